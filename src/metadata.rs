use crate::{FieldDescriptor, MetadataError, Record};
use serde::Deserialize;
use std::collections::HashMap;

/// The declared validation metadata of one record type: its field
/// rules in declaration order, and the name of its custom validator.
///
/// ## Example
/// ```
/// use record_validation::{FieldDescriptor, RecordMetadata};
///
/// let metadata = RecordMetadata::from_json(
///     r#"{
///         "fields": [{ "field": "name", "required": true }],
///         "custom_validator": "CheckName"
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(vec![FieldDescriptor::new("name").required(true)], metadata.fields);
/// assert_eq!("CheckName", metadata.custom_validator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RecordMetadata {
    pub fields: Vec<FieldDescriptor>,
    /// Empty when the type declares no custom validator.
    pub custom_validator: String,
}

impl RecordMetadata {
    /// Create a new `RecordMetadata` with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory method to append a field rule.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Factory method to declare the custom validator name.
    pub fn custom_validator<S: Into<String>>(mut self, name: S) -> Self {
        self.custom_validator = name.into();
        self
    }

    /// Parse metadata declared as JSON.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Produces the [RecordMetadata](RecordMetadata) for a record.
pub trait MetadataProvider {
    fn describe(&self, record: &dyn Record) -> Result<RecordMetadata, MetadataError>;
}

impl<F> MetadataProvider for F
where
    F: Fn(&dyn Record) -> Result<RecordMetadata, MetadataError>,
{
    fn describe(&self, record: &dyn Record) -> Result<RecordMetadata, MetadataError> {
        (self)(record)
    }
}

/// A provider that describes every record with the same metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedMetadata(pub RecordMetadata);

impl MetadataProvider for FixedMetadata {
    fn describe(&self, _record: &dyn Record) -> Result<RecordMetadata, MetadataError> {
        Ok(self.0.clone())
    }
}

impl From<RecordMetadata> for FixedMetadata {
    fn from(metadata: RecordMetadata) -> Self {
        FixedMetadata(metadata)
    }
}

/// A provider that looks metadata up by [Record::type_name].
///
/// ## Example
/// ```
/// use record_validation::{
///     FieldDescriptor, MetadataProvider, RecordMetadata, Structured, TypeRegistry,
/// };
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login {
///     user: String,
/// }
///
/// let registry = TypeRegistry::new().register::<Login>(
///     RecordMetadata::new().field(FieldDescriptor::new("user").required(true)),
/// );
///
/// assert_eq!(1, registry.len());
/// assert!(!registry.is_empty());
///
/// let login = Login { user: "ann".into() };
/// let metadata = registry.describe(&Structured::new(&login)).unwrap();
/// assert_eq!(1, metadata.fields.len());
///
/// assert!(registry.describe(&serde_json::json!({})).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, RecordMetadata>,
}

impl TypeRegistry {
    /// Create a new empty `TypeRegistry`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for the Rust type `T`, matched against records
    /// wrapped in [Structured](crate::Structured).
    pub fn register<T: ?Sized>(self, metadata: RecordMetadata) -> Self {
        self.register_name(std::any::type_name::<T>(), metadata)
    }

    /// Register metadata under an explicit type name.
    pub fn register_name<S: Into<String>>(mut self, type_name: S, metadata: RecordMetadata) -> Self {
        self.types.insert(type_name.into(), metadata);
        self
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MetadataProvider for TypeRegistry {
    fn describe(&self, record: &dyn Record) -> Result<RecordMetadata, MetadataError> {
        let type_name = record.type_name();
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| MetadataError::Unregistered {
                type_name: type_name.to_string(),
            })
    }
}
