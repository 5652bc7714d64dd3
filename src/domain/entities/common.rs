use std::borrow::Cow;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationError;

use crate::errors::AppError;

/// Visibility of a project or skill on the public site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "publish_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Active,
    Inactive,
}

impl std::str::FromStr for PublishStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PublishStatus::Active),
            "inactive" => Ok(PublishStatus::Inactive),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
#[display("Unknown value: {_0}")]
pub struct UnknownVariant(pub String);

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn validate_publish_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<PublishStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", "Status must be either active or inactive"))
}

/// Non-string request fields arrive as raw JSON so a wrongly typed value
/// becomes a field error next to the others instead of failing the body.
pub(crate) fn json_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

pub(crate) fn validate_order(value: &Value) -> Result<(), ValidationError> {
    match json_i32(value) {
        Some(order) if order >= 0 => Ok(()),
        _ => Err(invalid("order", "Order must be a non-negative integer")),
    }
}

/// Missing order means 0; anything else must already have passed `validate_order`.
pub(crate) fn order_or_default(value: Option<&Value>) -> Result<i32, AppError> {
    value.map_or(Ok(0), |v| {
        json_i32(v).ok_or_else(|| AppError::BadRequest("Order must be a non-negative integer".into()))
    })
}

/// Trims in place; the caller decides whether blank means absent.
pub(crate) fn trim_in_place(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}

/// Trims and drops values that end up empty.
pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Query-string filters match nothing when they name an unknown variant,
/// and are ignored when blank.
pub(crate) fn parse_filter<T: std::str::FromStr>(raw: &Option<String>) -> Result<Option<T>, UnknownVariant> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| UnknownVariant(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(parse_filter::<PublishStatus>(&None), Ok(None));
        assert_eq!(parse_filter::<PublishStatus>(&Some("  ".into())), Ok(None));
        assert_eq!(parse_filter::<PublishStatus>(&Some("inactive".into())), Ok(Some(PublishStatus::Inactive)));
        assert!(parse_filter::<PublishStatus>(&Some("archived".into())).is_err());
    }

    #[test]
    fn order_must_be_a_whole_non_negative_number() {
        assert!(validate_order(&serde_json::json!(3)).is_ok());
        assert!(validate_order(&serde_json::json!(0)).is_ok());
        assert!(validate_order(&serde_json::json!(-1)).is_err());
        assert!(validate_order(&serde_json::json!(1.5)).is_err());
        assert!(validate_order(&serde_json::json!("2")).is_err());
        assert_eq!(order_or_default(None).unwrap(), 0);
    }

    #[test]
    fn trims_optional_text() {
        let mut value = Some("  Jane Doe ".to_string());
        trim_in_place(&mut value);
        assert_eq!(value.as_deref(), Some("Jane Doe"));
        assert_eq!(trim_optional(Some("   ".into())), None);
    }
}
