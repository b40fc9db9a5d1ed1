use crate::{
    CustomValidatable, FixedMetadata, RecordMetadata, RecordValidator, Structured, ValidateError,
    ValidationErrors,
};
use serde::Serialize;

/// A record type that declares its own validation metadata.
///
/// ## Example
/// ```
/// use record_validation::{
///     CustomError, CustomValidatable, Describe, FieldDescriptor, RecordMetadata, Validatable,
/// };
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Signup {
///     user: String,
///     password: String,
///     confirm: String,
/// }
///
/// impl Describe for Signup {
///     fn metadata() -> RecordMetadata {
///         RecordMetadata::new()
///             .field(FieldDescriptor::new("user").required(true))
///             .field(FieldDescriptor::new("password").required(true))
///             .custom_validator("PasswordsMatch")
///     }
///
///     fn custom_validatable(&self) -> Option<&dyn CustomValidatable> {
///         Some(self)
///     }
/// }
///
/// impl CustomValidatable for Signup {
///     fn validate_custom(&self) -> Result<(), CustomError> {
///         if self.password == self.confirm {
///             Ok(())
///         } else {
///             Err("passwords do not match".into())
///         }
///     }
/// }
///
/// let signup = Signup {
///     user: "ann".into(),
///     password: "a".into(),
///     confirm: "b".into(),
/// };
/// assert_eq!(
///     "custom validator error. passwords do not match",
///     signup.validate().unwrap_err().to_string()
/// );
///
/// let signup = Signup {
///     user: "".into(),
///     password: "".into(),
///     confirm: "b".into(),
/// };
/// assert_eq!(
///     "user: could not be nil or empty | password: could not be nil or empty",
///     signup.validate().unwrap_err().to_string()
/// );
/// ```
pub trait Describe: Serialize {
    /// The metadata declared for this type.
    fn metadata() -> RecordMetadata;

    /// Returns `Some(self)` for types that implement
    /// [CustomValidatable].
    fn custom_validatable(&self) -> Option<&dyn CustomValidatable> {
        None
    }
}

/// An item that can be validated.
pub trait Validatable {
    /// Validate this item. Returns `Ok(())` if no errors were
    /// encountered.
    fn validate(&self) -> Result<(), ValidateError>;

    /// Validate this item, returning only the field errors. Returns an
    /// empty [ValidationErrors](ValidationErrors) if no field failed or
    /// the failure was not caused by field rules.
    fn validate_or_empty(&self) -> ValidationErrors {
        match self.validate() {
            Err(ValidateError::Fields(errors)) => errors,
            _ => ValidationErrors::default(),
        }
    }
}

impl<T> Validatable for T
where
    T: Describe,
{
    fn validate(&self) -> Result<(), ValidateError> {
        validate(self)
    }
}

/// Validate a self-describing record with the default
/// [ValidatorConfig](crate::ValidatorConfig).
pub fn validate<T: Describe>(record: &T) -> Result<(), ValidateError> {
    let mut structured = Structured::new(record);
    if let Some(custom) = record.custom_validatable() {
        structured = structured.custom(custom);
    }

    RecordValidator::new(FixedMetadata(T::metadata())).validate(&structured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomError, FieldDescriptor};
    use std::cell::Cell;

    #[derive(Serialize)]
    struct Note {
        title: String,
        #[serde(skip)]
        checked: Cell<bool>,
    }

    impl Describe for Note {
        fn metadata() -> RecordMetadata {
            RecordMetadata::new()
                .field(FieldDescriptor::new("title").required(true))
                .custom_validator("Check")
        }

        fn custom_validatable(&self) -> Option<&dyn CustomValidatable> {
            Some(self)
        }
    }

    impl CustomValidatable for Note {
        fn validate_custom(&self) -> Result<(), CustomError> {
            self.checked.set(true);
            Err(CustomError::new("bad state"))
        }
    }

    #[test]
    fn custom_validator_runs_only_after_fields_pass() {
        let note = Note {
            title: String::new(),
            checked: Cell::new(false),
        };
        assert_eq!(1, note.validate_or_empty().len());
        assert!(!note.checked.get());

        let note = Note {
            title: "x".into(),
            checked: Cell::new(false),
        };
        let error = note.validate().unwrap_err();
        assert!(note.checked.get());
        assert_eq!("custom validator error. bad state", error.to_string());
        assert!(note.validate_or_empty().is_empty());
    }
}
