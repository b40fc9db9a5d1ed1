use std::fmt::{Debug, Display};
use thiserror::Error;

/// Separator placed between the messages of failing fields when a
/// [ValidationErrors](ValidationErrors) is rendered as text.
pub const FIELD_SEPARATOR: &str = " | ";

/// The kind of constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The field was declared required but holds a zero/empty value.
    Required,
    /// The measured length is below the declared minimum.
    MinLength,
    /// The measured length is above the declared maximum.
    MaxLength,
    /// The value is not one of the declared list items.
    Enum,
}

impl ViolationKind {
    /// A stable identifier for this kind, so errors can be matched
    /// programatically without inspecting the message.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::Required => "REQUIRED",
            ViolationKind::MinLength => "MIN_LENGTH",
            ViolationKind::MaxLength => "MAX_LENGTH",
            ViolationKind::Enum => "ENUM",
        }
    }
}

/// An error associated with one field of a record.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The name of the field that this validation error is associated with.
    pub field: String,
    /// The constraint that failed.
    pub kind: ViolationKind,
    message: String,
}

impl ValidationError {
    /// Create a new `ValidationError` with a generic message.
    pub fn new<S: Into<String>>(field: S, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
            message: "validation error".to_string(),
        }
    }

    /// Factory method to set the message for this error.
    ///
    /// ## Example
    /// ```
    /// use record_validation::{ValidationError, ViolationKind};
    ///
    /// let error = ValidationError::new("name", ViolationKind::Required)
    ///     .message("could not be nil or empty");
    ///
    /// assert_eq!("could not be nil or empty", error.to_string());
    /// assert_eq!("REQUIRED", error.kind.code());
    /// ```
    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    /// The message for this error, without the field name.
    pub fn get_message(&self) -> &str {
        &self.message
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ValidationError{{ field: {0:?}, kind: {1:?}, message: {2:?} }}",
            self.field, self.kind, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

/// A collection of [ValidationError](ValidationError)s as a result of
/// validating the fields of a record, in the order the fields were
/// declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new `ValidationErrors`.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Get errors associated with the specified field, or `None` if
    /// there are no errors for that field.
    pub fn get(&self, field: &str) -> Option<ValidationErrors> {
        let errors: Vec<ValidationError> = self
            .errors
            .iter()
            .filter(|error| error.field == field)
            .cloned()
            .collect();

        if !errors.is_empty() {
            Some(ValidationErrors::new(errors))
        } else {
            None
        }
    }

    /// Returns true if there are no errors in this collection.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Extend this collection of errors with the contents of another
    /// collection.
    pub fn extend(&mut self, errors: ValidationErrors) {
        self.errors.extend(errors.errors)
    }

    /// Append a single error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error)
    }

    /// The number of errors in this collection.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in field declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

/// Renders as `"<field>: <message>"` for each error, joined by
/// [FIELD_SEPARATOR](FIELD_SEPARATOR).
///
/// ## Example
/// ```
/// use record_validation::{ValidationError, ValidationErrors, ViolationKind};
///
/// let errors = ValidationErrors::new(vec![
///     ValidationError::new("name", ViolationKind::Required).message("could not be nil or empty"),
///     ValidationError::new("code", ViolationKind::MinLength).message("min length is 3"),
/// ]);
///
/// assert_eq!(
///     "name: could not be nil or empty | code: min length is 3",
///     errors.to_string()
/// );
/// ```
impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e))
            .collect();
        write!(f, "{}", errors.join(FIELD_SEPARATOR))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors::new(vec![err])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// The error returned by a custom validator. Any `CustomError` fails
/// the validation call, including one with an empty message.
///
/// ## Example
/// ```
/// use record_validation::CustomError;
///
/// let boxed: Box<dyn std::error::Error + Send + Sync> = "quota exceeded".into();
/// let error = CustomError::from(boxed);
/// assert_eq!("quota exceeded", error.message());
/// assert_eq!(CustomError::new("quota exceeded"), error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CustomError(String);

impl CustomError {
    /// Create a new `CustomError` with the given message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }

    /// The message the custom validator returned.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<String> for CustomError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for CustomError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CustomError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self(err.to_string())
    }
}

/// Metadata for a record could not be produced by a
/// [MetadataProvider](crate::MetadataProvider).
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No metadata is known for the record's type.
    #[error("no metadata registered for type '{type_name}'")]
    Unregistered { type_name: String },

    /// Declared metadata could not be parsed.
    #[error("malformed metadata: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Any other provider failure.
    #[error("{0}")]
    Provider(String),
}

impl MetadataError {
    pub fn provider<S: Into<String>>(message: S) -> Self {
        MetadataError::Provider(message.into())
    }
}

/// The outcome of a failed validation call.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Metadata could not be read; no field was checked.
    #[error("fail reading meta data. {0}")]
    Metadata(#[from] MetadataError),

    /// One or more fields failed their declared constraints.
    #[error("{0}")]
    Fields(ValidationErrors),

    /// Every field passed but the custom validator rejected the record.
    #[error("custom validator error. {0}")]
    Custom(CustomError),
}

impl ValidateError {
    /// The per-field errors, if this failure came from field rules.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidateError::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ValidateError {
    fn from(errors: ValidationErrors) -> Self {
        ValidateError::Fields(errors)
    }
}

impl From<CustomError> for ValidateError {
    fn from(err: CustomError) -> Self {
        ValidateError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_filters_by_field() {
        let errors = ValidationErrors::new(vec![
            ValidationError::new("a", ViolationKind::Required),
            ValidationError::new("b", ViolationKind::Enum),
            ValidationError::new("a", ViolationKind::MaxLength),
        ]);

        assert_eq!(2, errors.get("a").map(|e| e.len()).unwrap_or(0));
        assert!(errors.get("c").is_none());
    }

    #[test]
    fn call_level_messages() {
        let err = ValidateError::from(MetadataError::provider("boom"));
        assert_eq!("fail reading meta data. boom", err.to_string());

        let err = ValidateError::from(CustomError::from("bad state"));
        assert_eq!("custom validator error. bad state", err.to_string());
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn empty_enum_message_keeps_field_label() {
        let errors: ValidationErrors = ValidationError::new("kind", ViolationKind::Enum)
            .message("")
            .into();
        assert_eq!("kind: ", errors.to_string());
    }
}
