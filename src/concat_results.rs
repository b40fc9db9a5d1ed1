use crate::{ValidationError, ValidationErrors};

/// Join per-field validation results, concatinating any errors they
/// contain in the order they were produced. If any of the results are
/// an `Err` it will return an `Err` containing all the errors from all
/// the results.
///
/// ## Example
/// ```
/// use record_validation::{concat_results, ValidationError, ViolationKind};
/// let results = vec![
///     Ok(()),
///     Err(ValidationError::new("field1", ViolationKind::Required)),
///     Err(ValidationError::new("field2", ViolationKind::Enum)),
///     Ok(()),
/// ];
///
/// let errors = concat_results(results).unwrap_err();
///
/// assert_eq!(2, errors.len());
/// assert_eq!("field1", errors.errors[0].field);
/// assert_eq!("field2", errors.errors[1].field);
/// ```
pub fn concat_results<I>(results: I) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = Result<(), ValidationError>>,
{
    let mut all_errors = ValidationErrors::default();

    for result in results {
        if let Err(error) = result {
            all_errors.push(error);
        }
    }

    if !all_errors.is_empty() {
        Err(all_errors)
    } else {
        Ok(())
    }
}
