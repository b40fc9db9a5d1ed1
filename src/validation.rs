use crate::{Record, ValidationError, ValidatorConfig};

/// A rule that can validate one field of a record.
pub trait Validation {
    /// Validate the field this rule is declared for against the current
    /// state of `record`, returning the first
    /// [ValidationError](ValidationError) encountered, if any.
    fn validate_record(
        &self,
        record: &dyn Record,
        config: &ValidatorConfig,
    ) -> Result<(), ValidationError>;
}
