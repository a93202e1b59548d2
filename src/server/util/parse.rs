use crate::server::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake stored as a String
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - The stored value is not a
///   decimal `u64`
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    match value.parse::<u64>() {
        Ok(id) => Ok(id),
        Err(source) => Err(InternalError::ParseStringId { value, source }.into()),
    }
}
