use crate::{
    is_zero_value, LengthSemantics, Record, Validation, ValidationError,
    ValidatorConfig, ViolationKind,
};
use serde::Deserialize;
use serde_json::Value;

/// One allowed entry of a list field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListItem {
    pub key: String,
    pub text: String,
}

impl ListItem {
    /// Create a new `ListItem` with a stored `key` and a displayed `text`.
    pub fn new<K: Into<String>, T: Into<String>>(key: K, text: T) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

impl From<&str> for ListItem {
    fn from(text: &str) -> Self {
        ListItem::new(text, text)
    }
}

/// The constraints declared for one named field of a record.
///
/// ## Example
/// ```
/// use record_validation::{FieldDescriptor, Validation, ValidatorConfig, ViolationKind};
/// use serde_json::json;
///
/// let name = FieldDescriptor::new("name").required(true);
/// let config = ValidatorConfig::default();
///
/// let error = name
///     .validate_record(&json!({ "name": "" }), &config)
///     .unwrap_err();
/// assert_eq!(ViolationKind::Required, error.kind);
/// assert_eq!("could not be nil or empty", error.to_string());
///
/// // fields missing from the record are not checked
/// assert!(name.validate_record(&json!({}), &config).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    pub field: String,
    pub required: bool,
    pub min_length: usize,
    pub max_length: usize,
    pub use_list: bool,
    pub items: Vec<ListItem>,
    /// When non-empty, list membership is resolved elsewhere and is not
    /// checked locally.
    pub lookup_url: String,
}

impl FieldDescriptor {
    /// Create a new `FieldDescriptor` with no constraints.
    pub fn new<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    /// Factory method to set whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Factory method to set the minimum length, `0` for none.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Factory method to set the maximum length, `0` for none.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Factory method to restrict the field to the given list items.
    pub fn list<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ListItem>,
    {
        self.use_list = true;
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Factory method to defer list membership to an external lookup.
    pub fn lookup_url<S: Into<String>>(mut self, lookup_url: S) -> Self {
        self.lookup_url = lookup_url.into();
        self
    }

    fn checks_list_locally(&self) -> bool {
        self.use_list && self.lookup_url.is_empty()
    }

    fn lists(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text == text)
    }

    fn error(&self, kind: ViolationKind) -> ValidationError {
        ValidationError::new(self.field.clone(), kind)
    }

    fn min_length_error(&self) -> ValidationError {
        self.error(ViolationKind::MinLength)
            .message(format!("min length is {}", self.min_length))
    }

    fn max_length_error(&self) -> ValidationError {
        self.error(ViolationKind::MaxLength)
            .message(format!("max length is {}", self.max_length))
    }

    fn enum_error(&self, config: &ValidatorConfig) -> ValidationError {
        self.error(ViolationKind::Enum)
            .message(config.enum_message.clone())
    }

    fn validate_rendering(
        &self,
        record: &dyn Record,
        config: &ValidatorConfig,
    ) -> Result<(), ValidationError> {
        let rendered = record.render();

        if self.min_length > 0 && rendered.len() < self.min_length {
            return Err(self.min_length_error());
        }

        if (self.min_length > 0 || self.max_length > 0) && !rendered.is_empty() {
            return Err(self.max_length_error());
        }

        if self.checks_list_locally() && !self.lists(&rendered) {
            return Err(self.enum_error(config));
        }

        Ok(())
    }

    fn validate_value(&self, value: &Value, config: &ValidatorConfig) -> Result<(), ValidationError> {
        if is_zero_value(value) {
            return Ok(());
        }

        let text = value_text(value);
        let length = match value {
            Value::Array(items) => items.len(),
            _ => text.chars().count(),
        };

        if self.min_length > 0 && length < self.min_length {
            return Err(self.min_length_error());
        }

        if self.max_length > 0 && length > self.max_length {
            return Err(self.max_length_error());
        }

        if self.checks_list_locally() && !self.lists(&text) {
            return Err(self.enum_error(config));
        }

        Ok(())
    }
}

/// The text of a string value, or the JSON rendering of anything else.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Validation for FieldDescriptor {
    fn validate_record(
        &self,
        record: &dyn Record,
        config: &ValidatorConfig,
    ) -> Result<(), ValidationError> {
        let value = match record.field(&self.field) {
            Some(value) => value,
            None => {
                tracing::trace!(field = %self.field, "field not present on record, skipping");
                return Ok(());
            }
        };

        if self.required && is_zero_value(&value) {
            return Err(self
                .error(ViolationKind::Required)
                .message("could not be nil or empty"));
        }

        match config.length_semantics {
            LengthSemantics::Literal => self.validate_rendering(record, config),
            LengthSemantics::FieldValue => self.validate_value(&value, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn literal() -> ValidatorConfig {
        ValidatorConfig::default()
    }

    fn field_value() -> ValidatorConfig {
        ValidatorConfig::default().length_semantics(LengthSemantics::FieldValue)
    }

    #[test]
    fn literal_min_length_measures_the_whole_record() {
        let record = json!({ "code": "ab" });
        let rule = FieldDescriptor::new("code").min_length(100);

        let error = rule.validate_record(&record, &literal()).unwrap_err();
        assert_eq!(ViolationKind::MinLength, error.kind);
        assert_eq!("min length is 100", error.to_string());
    }

    #[test]
    fn literal_max_length_fails_any_rendered_record() {
        let record = json!({ "code": "ab" });
        let rule = FieldDescriptor::new("code").max_length(1000);

        let error = rule.validate_record(&record, &literal()).unwrap_err();
        assert_eq!(ViolationKind::MaxLength, error.kind);
        assert_eq!("max length is 1000", error.to_string());

        // also reached once only a minimum is declared and satisfied
        let rule = FieldDescriptor::new("code").min_length(1);
        let error = rule.validate_record(&record, &literal()).unwrap_err();
        assert_eq!("max length is 0", error.to_string());
    }

    #[test]
    fn literal_list_matches_the_record_rendering() {
        let record = json!("red");
        // a bare string has no fields, so nothing is checked
        let rule = FieldDescriptor::new("colour").list(vec!["red"]);
        assert!(rule.validate_record(&record, &literal()).is_ok());

        let record = json!({ "colour": "red" });
        let error = rule.validate_record(&record, &literal()).unwrap_err();
        assert_eq!(ViolationKind::Enum, error.kind);
        assert_eq!("value not in allowed list", error.to_string());

        let rule = FieldDescriptor::new("colour").list(vec![r#"{"colour":"red"}"#]);
        assert!(rule.validate_record(&record, &literal()).is_ok());
    }

    #[test]
    fn lookup_url_defers_list_membership() {
        let record = json!({ "colour": "mauve" });
        let rule = FieldDescriptor::new("colour")
            .list(vec!["red"])
            .lookup_url("/api/colours");

        assert!(rule.validate_record(&record, &literal()).is_ok());
        assert!(rule.validate_record(&record, &field_value()).is_ok());
    }

    #[test]
    fn required_is_checked_before_lengths() {
        let record = json!({ "name": null });
        let rule = FieldDescriptor::new("name").required(true).max_length(3);

        let error = rule.validate_record(&record, &literal()).unwrap_err();
        assert_eq!(ViolationKind::Required, error.kind);
    }

    #[test]
    fn field_value_lengths_compare_against_both_bounds() {
        let rule = FieldDescriptor::new("code").min_length(2).max_length(4);
        let config = field_value();

        assert!(rule.validate_record(&json!({ "code": "abc" }), &config).is_ok());
        assert_eq!(
            ViolationKind::MinLength,
            rule.validate_record(&json!({ "code": "a" }), &config)
                .unwrap_err()
                .kind
        );
        assert_eq!(
            "max length is 4",
            rule.validate_record(&json!({ "code": "abcde" }), &config)
                .unwrap_err()
                .to_string()
        );
        assert!(rule
            .validate_record(&json!({ "code": [1, 2, 3] }), &config)
            .is_ok());
        // empty optional values are left alone
        assert!(rule.validate_record(&json!({ "code": "" }), &config).is_ok());
    }

    #[test]
    fn field_value_list_matches_item_text() {
        let rule = FieldDescriptor::new("size").list(vec![
            ListItem::new("S", "small"),
            ListItem::new("L", "large"),
        ]);
        let config = field_value().enum_message("");

        assert!(rule.validate_record(&json!({ "size": "large" }), &config).is_ok());

        let error = rule
            .validate_record(&json!({ "size": "L" }), &config)
            .unwrap_err();
        assert_eq!(ViolationKind::Enum, error.kind);
        assert_eq!("", error.to_string());
    }

    #[test]
    fn descriptors_deserialize_with_defaults() {
        let rule: FieldDescriptor = serde_json::from_str(
            r#"{ "field": "size", "use_list": true, "items": [{ "key": "S", "text": "small" }] }"#,
        )
        .unwrap();

        assert_eq!(
            FieldDescriptor::new("size").list(vec![ListItem::new("S", "small")]),
            rule
        );
    }
}
