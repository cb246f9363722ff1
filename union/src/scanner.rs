//! Walks a spec's fields and works out which variant, if any, is active

use std::any::Any;

use error_stack::Report;

use crate::error::{Error, Result};
use crate::spec::{UnionSpec, VariantField};

/// One field of a spec value, as seen by the scanner
#[derive(Debug)]
pub struct ScannedField<'a, S: 'static> {
    /// Position in declaration order
    pub index:   usize,
    /// Table entry describing the field
    pub field:   &'static VariantField<S>,
    /// Whether the field holds its zero value
    pub is_zero: bool,
    spec:        &'a S,
}

impl<'a, S: 'static> ScannedField<'a, S> {
    /// Rust identifier of the field
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.field.name
    }

    /// Explicit tag override, if any
    #[must_use]
    pub const fn tag_override(&self) -> Option<&'static str> {
        self.field.tag
    }

    /// Current payload of the field
    #[must_use]
    pub fn value(&self) -> &'a (dyn Any + 'static) {
        (self.field.value)(self.spec)
    }
}

/// Enumerate the fields of `spec` in declaration order
///
/// Returns `None` when the type is not record-shaped.
#[must_use]
pub fn scan<S: UnionSpec>(spec: &S) -> Option<impl Iterator<Item = ScannedField<'_, S>>> {
    let fields = S::FIELDS?;
    Some(
        fields
            .iter()
            .enumerate()
            .map(move |(index, field)| ScannedField {
                index,
                field,
                is_zero: (field.is_zero)(spec),
                spec,
            }),
    )
}

/// The single set field of a union, borrowed from the record
#[derive(Debug, Clone, Copy)]
pub struct ActiveVariant<'a> {
    /// Position of the field in declaration order
    pub index: usize,
    /// Rust identifier of the field
    pub name:  &'static str,
    /// Tag the variant is written under by `TaggedUnion`
    pub tag:   &'static str,
    /// Payload of the field
    pub value: &'a (dyn Any + 'static),
}

impl<'a> ActiveVariant<'a> {
    /// The payload as `T`, if that is its type
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref()
    }
}

impl<'a, S: 'static> From<ScannedField<'a, S>> for ActiveVariant<'a> {
    fn from(scanned: ScannedField<'a, S>) -> Self {
        Self {
            index: scanned.index,
            name:  scanned.name(),
            tag:   scanned.field.tag_name(),
            value: scanned.value(),
        }
    }
}

/// Which of a spec's fields are set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantState {
    /// No field is set
    Empty,
    /// Exactly one field is set
    Single {
        /// Position of the set field in declaration order
        index: usize,
        /// Rust identifier of the set field
        name:  &'static str,
    },
    /// More than one field is set
    Invalid,
}

/// Outcome of active-field resolution
pub enum Resolution<'a, S: 'static> {
    /// The union type is not record-shaped
    NotARecord,
    /// No field is set
    Empty,
    /// Exactly one field is set
    Single(ScannedField<'a, S>),
    /// More than one field is set
    Invalid,
}

/// Find the single non-zero field of `spec`
#[must_use]
pub fn resolve<S: UnionSpec>(spec: &S) -> Resolution<'_, S> {
    let Some(fields) = scan(spec) else {
        return Resolution::NotARecord;
    };

    let mut active = None;
    for scanned in fields.filter(|scanned| !scanned.is_zero) {
        if active.is_some() {
            return Resolution::Invalid;
        }
        active = Some(scanned);
    }

    active.map_or(Resolution::Empty, Resolution::Single)
}

impl<'a, S: 'static> Resolution<'a, S> {
    /// The active field, or the error encode reports for this state
    pub fn require_single(self) -> Result<ScannedField<'a, S>> {
        match self {
            Self::Single(scanned) => Ok(scanned),
            Self::NotARecord => Err(Report::new(Error::NotARecord)),
            Self::Empty => Err(Report::new(Error::ZeroVariants)),
            Self::Invalid => Err(Report::new(Error::MultipleVariants)),
        }
    }

    /// The active field, if exactly one is set
    #[must_use]
    pub fn single(self) -> Option<ScannedField<'a, S>> {
        match self {
            Self::Single(scanned) => Some(scanned),
            _ => None,
        }
    }

    /// Summary of the resolution; `None` for a non-record spec
    #[must_use]
    pub fn state(&self) -> Option<VariantState> {
        match self {
            Self::NotARecord => None,
            Self::Empty => Some(VariantState::Empty),
            Self::Single(scanned) => Some(VariantState::Single {
                index: scanned.index,
                name:  scanned.name(),
            }),
            Self::Invalid => Some(VariantState::Invalid),
        }
    }
}

/// Field table of `S`, or `NotARecord`
pub fn record_fields<S: UnionSpec>() -> Result<&'static [VariantField<S>]> {
    S::FIELDS.ok_or_else(|| Report::new(Error::NotARecord))
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "tests fail loudly on unexpected errors")]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::UnionSpec;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Debug, Default, UnionSpec)]
    struct Reading {
        count:  u32,
        #[variant(tag = "text")]
        label:  String,
        point:  Option<Point>,
        #[variant(skip)]
        #[allow(dead_code, reason = "skipped fields never reach the field table")]
        cached: bool,
    }

    #[derive(Debug, Default)]
    struct Opaque;

    impl UnionSpec for Opaque {
        const FIELDS: Option<&'static [VariantField<Self>]> = None;
    }

    #[test]
    fn test_scan_visits_fields_in_declaration_order() {
        let reading = Reading {
            label: "north".to_string(),
            ..Reading::default()
        };

        let scanned: Vec<_> = scan(&reading)
            .expect("record spec")
            .map(|field| (field.index, field.name(), field.tag_override(), field.is_zero))
            .collect();

        assert_eq!(
            scanned,
            vec![
                (0, "count", None, true),
                (1, "label", Some("text"), false),
                (2, "point", None, true),
            ]
        );
    }

    #[test]
    fn test_scan_unwraps_option_payloads() {
        let reading = Reading {
            point: Some(Point { x: 1, y: 2 }),
            ..Reading::default()
        };

        let point = scan(&reading)
            .expect("record spec")
            .find(|field| field.name() == "point")
            .expect("point field");
        assert_eq!(point.value().downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
    }

    #[test]
    fn test_scan_non_record_spec() {
        assert!(scan(&Opaque).is_none());
        assert!(matches!(resolve(&Opaque), Resolution::NotARecord));
    }

    #[test]
    fn test_resolve_states() {
        let mut reading = Reading::default();
        assert_eq!(resolve(&reading).state(), Some(VariantState::Empty));

        reading.count = 3;
        assert_eq!(
            resolve(&reading).state(),
            Some(VariantState::Single {
                index: 0,
                name:  "count",
            })
        );

        reading.label = "north".to_string();
        assert_eq!(resolve(&reading).state(), Some(VariantState::Invalid));

        reading.count = 0;
        assert_eq!(
            resolve(&reading).state(),
            Some(VariantState::Single {
                index: 1,
                name:  "label",
            })
        );

        reading.label.clear();
        assert_eq!(resolve(&reading).state(), Some(VariantState::Empty));
    }

    #[test]
    fn test_skipped_fields_do_not_count() {
        let reading = Reading {
            count: 1,
            cached: true,
            ..Reading::default()
        };
        assert_eq!(
            resolve(&reading).state(),
            Some(VariantState::Single {
                index: 0,
                name:  "count",
            })
        );
    }

    #[test]
    fn test_require_single_errors() {
        let error = resolve(&Reading::default())
            .require_single()
            .expect_err("empty spec");
        assert!(matches!(error.current_context(), Error::ZeroVariants));

        let error = resolve(&Reading {
            count: 1,
            point: Some(Point { x: 1, y: 1 }),
            ..Reading::default()
        })
        .require_single()
        .expect_err("two fields set");
        assert!(matches!(error.current_context(), Error::MultipleVariants));

        let error = resolve(&Opaque).require_single().expect_err("opaque spec");
        assert!(matches!(error.current_context(), Error::NotARecord));
    }
}
