use directory::store::{StoreError, UniqueKey};

pub mod place;
pub mod region;

const UNIQUE_VIOLATION: &str = "23505";

/// Maps sqlx errors onto the store error taxonomy. A unique violation is
/// classified by its constraint name: the slug constraints all carry
/// "slug" in their name, everything else unique on these tables is the
/// primary key.
pub(crate) fn convert_error(why: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_error) = &why {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let key = match db_error.constraint() {
                Some(constraint) if constraint.contains("slug") => UniqueKey::Slug,
                _ => UniqueKey::Id,
            };
            return StoreError::UniqueViolation(key);
        }
    }
    match why {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Other(Box::new(other)),
    }
}
