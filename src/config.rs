use serde::Deserialize;

/// Default message for a value that is not one of a field's list items.
pub const DEFAULT_ENUM_MESSAGE: &str = "value not in allowed list";

/// What the length and list rules of a field are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthSemantics {
    /// Measure the rendering of the whole record. Once a field declares
    /// a minimum or maximum length, any record with a non-empty
    /// rendering fails the maximum check, whatever the bound. List
    /// membership is tested against the record rendering too.
    #[default]
    Literal,
    /// Measure the field's own value (characters of a string, elements
    /// of an array, otherwise its rendering) against both bounds, and
    /// test list membership against the field's text.
    FieldValue,
}

/// Options for a [RecordValidator](crate::RecordValidator).
///
/// ## Example
/// ```
/// use record_validation::{LengthSemantics, ValidatorConfig};
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{ "length_semantics": "field_value" }"#).unwrap();
///
/// assert_eq!(LengthSemantics::FieldValue, config.length_semantics);
/// assert_eq!("value not in allowed list", config.enum_message);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub length_semantics: LengthSemantics,
    pub enum_message: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            length_semantics: LengthSemantics::default(),
            enum_message: DEFAULT_ENUM_MESSAGE.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Factory method to set the [LengthSemantics].
    pub fn length_semantics(mut self, length_semantics: LengthSemantics) -> Self {
        self.length_semantics = length_semantics;
        self
    }

    /// Factory method to set the message used for list violations.
    pub fn enum_message<S: Into<String>>(mut self, message: S) -> Self {
        self.enum_message = message.into();
        self
    }
}
