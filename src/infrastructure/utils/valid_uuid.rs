use uuid::Uuid;

use crate::errors::AppError;

/// Parses a record identifier. A malformed id cannot name a stored record,
/// so it is reported with the same not-found message as an absent one.
pub fn valid_uuid(id: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}
