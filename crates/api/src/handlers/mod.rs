pub mod account;
pub mod director;
pub mod movie;
pub mod review;

use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_core::validation::catalog::missing_reference;
use cinema_db::store::{Entity, Repository};

use crate::error::{AppError, AppResult};

/// Strip surrounding whitespace from a text field in place.
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional text field if it was sent.
pub(crate) fn trim_field(value: &mut Option<String>) {
    if let Some(value) = value.as_mut() {
        trim_in_place(value);
    }
}

/// Take a field that validation has already required.
pub(crate) fn present<T>(field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::InternalError(format!("{field} missing after validation")))
}

/// Narrow a validated integer to the width of its column.
pub(crate) fn narrow<T: TryFrom<i64>>(field: &str, value: i64) -> AppResult<T> {
    T::try_from(value)
        .map_err(|_| AppError::InternalError(format!("{field} out of range after validation: {value}")))
}

/// Reject a reference to a parent row that does not exist as a field error
/// on `field`.
pub(crate) async fn require_parent<E, S>(store: &S, field: &str, id: DbId) -> AppResult<()>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    match store.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::Validation(missing_reference(field, id)).into()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn trims_both_ends() {
        let mut value = "  Nolan \n".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "Nolan");
    }

    #[test]
    fn trims_sent_fields_only() {
        let mut sent = Some(" Heat ".to_string());
        let mut absent: Option<String> = None;
        trim_field(&mut sent);
        trim_field(&mut absent);
        assert_eq!(sent.as_deref(), Some("Heat"));
        assert_eq!(absent, None);
    }

    #[test]
    fn narrows_within_range() {
        assert_eq!(narrow::<i16>("stars", 5).unwrap(), 5);
        assert_eq!(narrow::<i32>("duration", i64::from(i32::MAX)).unwrap(), i32::MAX);
    }

    #[test]
    fn narrowing_out_of_range_is_internal() {
        assert_matches!(narrow::<i16>("stars", 40_000), Err(AppError::InternalError(_)));
        assert_matches!(present::<i64>("movie", None), Err(AppError::InternalError(_)));
    }

    #[test]
    fn leaves_clean_values_alone() {
        let mut value = "Nolan".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "Nolan");
    }
}
