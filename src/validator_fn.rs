use crate::{CustomError, Record};
use std::{fmt::Debug, sync::Arc};
use uuid::Uuid;

type ValidatorFnTraitObject = dyn Fn(&dyn Record) -> Result<(), CustomError> + Send + Sync;

/// Function to perform custom validation on a whole record. Registered
/// by name on a [RecordValidator](crate::RecordValidator) for record
/// types that cannot implement
/// [CustomValidatable](crate::CustomValidatable) themselves.
///
/// ## Example
///
/// ```
/// use record_validation::{CustomError, Record, ValidatorFn};
/// use serde_json::json;
///
/// let v = ValidatorFn::new(|record: &dyn Record| {
///     match record.field("password") {
///         Some(password) if password == record.field("confirm").unwrap_or_default() => Ok(()),
///         _ => Err(CustomError::new("passwords do not match")),
///     }
/// });
///
/// assert!(v.call(&json!({ "password": "a", "confirm": "a" })).is_ok());
/// assert_eq!(
///     "passwords do not match",
///     v.call(&json!({ "password": "a", "confirm": "b" })).unwrap_err().to_string()
/// );
/// ```
pub struct ValidatorFn {
    closure: Arc<ValidatorFnTraitObject>,
    id: Uuid,
}

impl ValidatorFn {
    /// Create a new `ValidatorFn`.
    pub fn new<C>(closure: C) -> Self
    where
        C: Fn(&dyn Record) -> Result<(), CustomError> + Send + Sync + 'static,
    {
        Self {
            closure: Arc::new(closure),
            id: Uuid::new_v4(),
        }
    }

    /// Run the validation function against `record`.
    pub fn call(&self, record: &dyn Record) -> Result<(), CustomError> {
        (self.closure)(record)
    }
}

impl Clone for ValidatorFn {
    fn clone(&self) -> Self {
        Self {
            closure: Arc::clone(&self.closure),
            id: self.id,
        }
    }
}

impl PartialEq for ValidatorFn {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> From<C> for ValidatorFn
where
    C: Fn(&dyn Record) -> Result<(), CustomError> + Send + Sync + 'static,
{
    fn from(closure: C) -> Self {
        ValidatorFn::new(closure)
    }
}

impl Debug for ValidatorFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ValidatorFn(closure: {:p}, id: {})",
            self.closure, self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let a = ValidatorFn::new(|_: &dyn Record| Ok(()));
        let b = a.clone();
        let c = ValidatorFn::new(|_: &dyn Record| Ok(()));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
