use crate::{skipped_fields::skipped_fields, CustomValidatable};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Read access to the named fields of a record.
pub trait FieldAccess {
    /// The current value of the field called `name`, or `None` if the
    /// record has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// A record that can be validated.
pub trait Record: FieldAccess {
    /// A textual rendering of the whole record. Map records render
    /// their keys in sorted order so the same contents always render
    /// the same way.
    fn render(&self) -> String;

    /// The name metadata providers use to look up this record's type.
    fn type_name(&self) -> &str {
        ""
    }

    /// Returns the record as a [CustomValidatable] if its type
    /// supports custom validation.
    fn custom_validatable(&self) -> Option<&dyn CustomValidatable> {
        None
    }
}

/// Returns true for the zero/empty value of any JSON type: `null`,
/// `false`, `0`, `""`, `[]` and `{}`.
///
/// Only the value itself is inspected. A nested struct whose fields all
/// hold zero values serializes to a non-empty object, and is not zero.
///
/// ## Example
/// ```
/// use record_validation::is_zero_value;
/// use serde_json::json;
///
/// assert!(is_zero_value(&json!(null)));
/// assert!(is_zero_value(&json!(0.0)));
/// assert!(is_zero_value(&json!([])));
/// assert!(!is_zero_value(&json!("x")));
/// assert!(!is_zero_value(&json!(-1)));
/// ```
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

impl FieldAccess for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for Map<String, Value> {
    fn render(&self) -> String {
        render_json(self)
    }

    fn type_name(&self) -> &str {
        "object"
    }
}

/// Only JSON objects have fields; any other value resolves every field
/// to `None`.
impl FieldAccess for Value {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.field(name),
            _ => None,
        }
    }
}

impl Record for Value {
    fn render(&self) -> String {
        render_json(self)
    }

    fn type_name(&self) -> &str {
        match self {
            Value::Object(_) => "object",
            _ => "",
        }
    }
}

impl<K, V, S> FieldAccess for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Serialize,
    S: std::hash::BuildHasher,
{
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name)
            .and_then(|value| serde_json::to_value(value).ok())
    }
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq + Serialize,
    V: Serialize,
    S: std::hash::BuildHasher,
{
    fn render(&self) -> String {
        let sorted: BTreeMap<&str, &V> = self
            .iter()
            .map(|(key, value)| (<K as Borrow<str>>::borrow(key), value))
            .collect();
        render_json(&sorted)
    }

    fn type_name(&self) -> &str {
        "map"
    }
}

impl<K, V> FieldAccess for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Serialize,
{
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name)
            .and_then(|value| serde_json::to_value(value).ok())
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord + Serialize,
    V: Serialize,
{
    fn render(&self) -> String {
        render_json(self)
    }

    fn type_name(&self) -> &str {
        "map"
    }
}

/// A structured record: any `Serialize` type whose serialized form is
/// indexed by field name.
///
/// Types that serialize to something other than a map have no
/// resolvable fields. Fields left out by
/// `#[serde(skip_serializing_if = "...")]` still resolve, as `null`.
///
/// ## Example
/// ```
/// use record_validation::{FieldAccess, Record, Structured};
/// use serde::Serialize;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let user = User { name: "ann".into(), age: 3 };
/// let record = Structured::new(&user);
///
/// assert_eq!(Some(json!("ann")), record.field("name"));
/// assert_eq!(None, record.field("email"));
/// assert_eq!(r#"{"name":"ann","age":3}"#, record.render());
/// assert_eq!(3, record.get_ref().age);
/// ```
pub struct Structured<'a, T: ?Sized> {
    inner: &'a T,
    fields: Option<Map<String, Value>>,
    rendered: String,
    type_name: &'static str,
    custom: Option<&'a dyn CustomValidatable>,
}

impl<'a, T> Structured<'a, T>
where
    T: Serialize + ?Sized,
{
    /// Wrap `inner` as a record without custom validation.
    pub fn new(inner: &'a T) -> Self {
        let mut fields = match serde_json::to_value(inner) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(
                    type_name = std::any::type_name::<T>(),
                    error = %err,
                    "record could not be serialized, its fields will not resolve"
                );
                None
            }
        };

        if let Some(fields) = fields.as_mut() {
            for key in skipped_fields(inner) {
                fields.entry(key).or_insert(Value::Null);
            }
        }

        Self {
            inner,
            fields,
            rendered: render_json(inner),
            type_name: std::any::type_name::<T>(),
            custom: None,
        }
    }

    /// Factory method to attach the custom validator the engine runs
    /// for this record.
    pub fn custom(mut self, custom: &'a dyn CustomValidatable) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Borrow the wrapped value.
    pub fn get_ref(&self) -> &'a T {
        self.inner
    }
}

impl<'a, T> Structured<'a, T>
where
    T: Serialize + CustomValidatable + Sized,
{
    /// Wrap `inner` as a record whose custom validator is available to
    /// the engine.
    pub fn with_custom(inner: &'a T) -> Self {
        Self::new(inner).custom(inner)
    }
}

impl<'a, T: ?Sized> FieldAccess for Structured<'a, T> {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.as_ref().and_then(|fields| fields.get(name).cloned())
    }
}

impl<'a, T: ?Sized> Record for Structured<'a, T> {
    fn render(&self) -> String {
        self.rendered.clone()
    }

    fn type_name(&self) -> &str {
        self.type_name
    }

    fn custom_validatable(&self) -> Option<&dyn CustomValidatable> {
        self.custom
    }
}
