use crate::{
    concat_results, dispatch_custom, MetadataProvider, Record, RecordMetadata, ValidateError,
    Validation, ValidationErrors, ValidatorConfig, ValidatorFn,
};
use std::collections::HashMap;

/// Validates records against the metadata supplied by a
/// [MetadataProvider](MetadataProvider).
///
/// A validation call reads the record's metadata, checks every declared
/// field rule, and reports all failing fields together. Only when every
/// field passes is the record's custom validator run.
///
/// ## Example
/// ```
/// use record_validation::{FieldDescriptor, FixedMetadata, RecordMetadata, RecordValidator};
/// use serde_json::json;
///
/// let validator = RecordValidator::new(FixedMetadata(
///     RecordMetadata::new()
///         .field(FieldDescriptor::new("name").required(true))
///         .field(FieldDescriptor::new("email").required(true)),
/// ));
///
/// assert!(validator.validate(&json!({ "name": "ann", "email": "a@b" })).is_ok());
///
/// let error = validator.validate(&json!({ "name": "", "email": null })).unwrap_err();
/// assert_eq!(
///     "name: could not be nil or empty | email: could not be nil or empty",
///     error.to_string()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RecordValidator<P> {
    provider: P,
    config: ValidatorConfig,
    custom_validators: HashMap<String, ValidatorFn>,
}

impl<P> RecordValidator<P>
where
    P: MetadataProvider,
{
    /// Create a new `RecordValidator` with the default
    /// [ValidatorConfig](ValidatorConfig).
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: ValidatorConfig::default(),
            custom_validators: HashMap::new(),
        }
    }

    /// Factory method to set the configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Factory method to register a custom validator under `name`, used
    /// for records whose type does not provide one itself.
    pub fn custom_validator<S, F>(mut self, name: S, validator_fn: F) -> Self
    where
        S: Into<String>,
        F: Into<ValidatorFn>,
    {
        self.custom_validators
            .insert(name.into(), validator_fn.into());
        self
    }

    /// The configuration field rules are evaluated with.
    pub fn get_config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The metadata provider consulted on every call.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate `record`.
    pub fn validate(&self, record: &dyn Record) -> Result<(), ValidateError> {
        let metadata = self.provider.describe(record)?;

        tracing::debug!(
            type_name = record.type_name(),
            fields = metadata.fields.len(),
            "validating record"
        );

        self.validate_fields(record, &metadata)?;

        if !metadata.custom_validator.is_empty() {
            dispatch_custom(record, &metadata.custom_validator, &self.custom_validators)?;
        }

        tracing::debug!(type_name = record.type_name(), "record is valid");
        Ok(())
    }

    /// Check every field rule in `metadata` against `record`, without
    /// running any custom validator.
    pub fn validate_fields(
        &self,
        record: &dyn Record,
        metadata: &RecordMetadata,
    ) -> Result<(), ValidationErrors> {
        let result = concat_results(metadata.fields.iter().map(|descriptor| {
            let result = descriptor.validate_record(record, &self.config);
            tracing::trace!(field = %descriptor.field, ok = result.is_ok(), "evaluated field");
            result
        }));

        if let Err(errors) = &result {
            tracing::debug!(
                type_name = record.type_name(),
                failed = errors.len(),
                "record failed field validation"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomError, FieldDescriptor, FixedMetadata, MetadataError, ViolationKind};
    use serde_json::json;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn custom_validator_is_skipped_when_a_field_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let validator = RecordValidator::new(FixedMetadata(
            RecordMetadata::new()
                .field(FieldDescriptor::new("name").required(true))
                .custom_validator("Check"),
        ))
        .custom_validator("Check", move |_: &dyn Record| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), CustomError>(())
        });

        assert!(validator.validate(&json!({ "name": "" })).is_err());
        assert_eq!(0, calls.load(Ordering::SeqCst));

        assert!(validator.validate(&json!({ "name": "x" })).is_ok());
        assert_eq!(1, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn metadata_failure_stops_the_call() {
        let provider = |_: &dyn Record| -> Result<RecordMetadata, MetadataError> {
            Err(MetadataError::provider("unreadable"))
        };
        let validator = RecordValidator::new(provider);

        let error = validator.validate(&json!({ "name": "" })).unwrap_err();
        assert!(matches!(error, ValidateError::Metadata(_)));
        assert_eq!("fail reading meta data. unreadable", error.to_string());
    }

    #[test]
    fn field_errors_are_exposed() {
        let validator = RecordValidator::new(FixedMetadata(
            RecordMetadata::new()
                .field(FieldDescriptor::new("a").required(true))
                .field(FieldDescriptor::new("b"))
                .field(FieldDescriptor::new("c").required(true)),
        ));

        let error = validator.validate(&json!({ "a": 0, "b": 0, "c": [] })).unwrap_err();
        let errors = error.field_errors().unwrap();
        assert_eq!(2, errors.len());
        assert!(errors.iter().all(|e| e.kind == ViolationKind::Required));
        assert!(errors.get("b").is_none());
    }

    #[test]
    fn custom_error_is_wrapped() {
        let validator = RecordValidator::new(FixedMetadata(
            RecordMetadata::new().custom_validator("Check"),
        ))
        .custom_validator("Check", |_: &dyn Record| Err(CustomError::new("bad state")));

        let error = validator.validate(&json!({})).unwrap_err();
        assert_eq!("custom validator error. bad state", error.to_string());
    }
}
