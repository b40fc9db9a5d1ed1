use crate::{CustomError, Record, ValidatorFn};
use std::collections::HashMap;

/// A record type that carries its own validation routine, run after
/// all of its declared field rules pass.
///
/// By default the routine answers whatever custom validator name the
/// record's metadata declares. Override
/// [responds_to](CustomValidatable::responds_to) to answer only
/// specific names; other names then fall through to the validators
/// registered on the [RecordValidator](crate::RecordValidator), or
/// are skipped.
///
/// ## Example
/// ```
/// use record_validation::{CustomError, CustomValidatable};
///
/// struct Range {
///     low: i32,
///     high: i32,
/// }
///
/// impl CustomValidatable for Range {
///     fn validate_custom(&self) -> Result<(), CustomError> {
///         if self.low > self.high {
///             Err("low is above high".into())
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(Range { low: 1, high: 2 }.validate_custom().is_ok());
/// assert!(Range { low: 3, high: 2 }.validate_custom().is_err());
///
/// // answers any declared name unless `responds_to` is overridden
/// assert!(Range { low: 1, high: 2 }.responds_to("CheckRange"));
/// assert!(Range { low: 1, high: 2 }.responds_to("anything"));
/// ```
pub trait CustomValidatable {
    /// Validate the record as a whole.
    fn validate_custom(&self) -> Result<(), CustomError>;

    /// Whether this type answers to the custom validator `name`
    /// declared in its metadata. Defaults to answering any name.
    fn responds_to(&self, name: &str) -> bool {
        let _ = name;
        true
    }
}

/// Run the custom validator called `name` for `record`, if one exists.
///
/// The record's own [CustomValidatable] capability is consulted first,
/// then the `named` validators. A name that resolves to neither is a
/// no-op.
pub fn dispatch_custom(
    record: &dyn Record,
    name: &str,
    named: &HashMap<String, ValidatorFn>,
) -> Result<(), CustomError> {
    if name.is_empty() {
        return Ok(());
    }

    if let Some(custom) = record.custom_validatable() {
        if custom.responds_to(name) {
            tracing::debug!(validator = name, "running record custom validator");
            return custom.validate_custom();
        }
    }

    match named.get(name) {
        Some(validator_fn) => {
            tracing::debug!(validator = name, "running registered custom validator");
            validator_fn.call(record)
        }
        None => {
            tracing::debug!(validator = name, "custom validator not found, skipping");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Structured;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Order {
        total: i64,
    }

    impl CustomValidatable for Order {
        fn validate_custom(&self) -> Result<(), CustomError> {
            if self.total < 0 {
                Err("negative total".into())
            } else {
                Ok(())
            }
        }

        fn responds_to(&self, name: &str) -> bool {
            name == "CheckTotal"
        }
    }

    #[test]
    fn capability_is_used_when_it_answers_the_name() {
        let order = Order { total: -1 };
        let record = Structured::with_custom(&order);
        let result = dispatch_custom(&record, "CheckTotal", &HashMap::new());
        assert_eq!(Err(CustomError::from("negative total")), result);
    }

    #[test]
    fn unknown_name_is_a_no_op() {
        let order = Order { total: -1 };
        let record = Structured::with_custom(&order);
        assert!(dispatch_custom(&record, "Other", &HashMap::new()).is_ok());
    }

    #[test]
    fn named_validators_cover_records_without_the_capability() {
        let mut named = HashMap::new();
        named.insert(
            "NeedsId".to_string(),
            ValidatorFn::new(|record: &dyn Record| match record.field("id") {
                Some(_) => Ok(()),
                None => Err(CustomError::new("missing id")),
            }),
        );

        let record = json!({ "name": "x" });
        let result = dispatch_custom(&record, "NeedsId", &named);
        assert_eq!("missing id", result.unwrap_err().message());
    }

    #[test]
    fn empty_name_never_dispatches() {
        let order = Order { total: -1 };
        let record = Structured::with_custom(&order);
        assert!(dispatch_custom(&record, "", &HashMap::new()).is_ok());
    }
}
