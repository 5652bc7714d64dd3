use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::common::{
        invalid, json_i32, order_or_default, parse_filter, trim_in_place, trim_optional,
        validate_order, validate_publish_status, PublishStatus, UnknownVariant,
    },
    errors::AppError,
};

pub const DEFAULT_SKILL_COLOR: &str = "#007BFF";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Tools,
    Other,
}

impl std::str::FromStr for SkillCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(SkillCategory::Frontend),
            "backend" => Ok(SkillCategory::Backend),
            "database" => Ok(SkillCategory::Database),
            "tools" => Ok(SkillCategory::Tools),
            "other" => Ok(SkillCategory::Other),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub level: i32,
    pub icon: Option<String>,
    pub color: String,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub name: String,
    pub category: SkillCategory,
    pub level: i32,
    pub icon: Option<String>,
    pub color: String,
    pub order: i32,
    pub status: PublishStatus,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[validate(
        required(message = "Skill name is required"),
        length(min = 2, max = 50, message = "Skill name must be between 2 and 50 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Invalid category"),
        custom(function = "validate_skill_category")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Skill level is required"),
        custom(function = "validate_level")
    )]
    pub level: Option<Value>,

    pub icon: Option<String>,

    #[validate(regex(path = *HEX_COLOR, message = "Color must be a valid hex color"))]
    pub color: Option<String>,

    #[validate(custom(function = "validate_order"))]
    pub order: Option<Value>,

    #[validate(custom(function = "validate_publish_status"))]
    pub status: Option<String>,
}

impl SkillRequest {
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.color);
        trim_in_place(&mut self.status);
    }
}

impl TryFrom<SkillRequest> for SkillInsert {
    type Error = AppError;

    fn try_from(request: SkillRequest) -> Result<Self, Self::Error> {
        let category = request
            .category
            .as_deref()
            .unwrap_or_default()
            .parse::<SkillCategory>()
            .map_err(|_| AppError::BadRequest("Invalid category".into()))?;

        let status = match request.status.as_deref() {
            Some(s) => s
                .parse::<PublishStatus>()
                .map_err(|_| AppError::BadRequest("Invalid status".into()))?,
            None => PublishStatus::default(),
        };

        Ok(SkillInsert {
            name: request.name.ok_or_else(|| AppError::BadRequest("Skill name is required".into()))?,
            category,
            level: request
                .level
                .as_ref()
                .and_then(json_i32)
                .ok_or_else(|| AppError::BadRequest("Level must be between 0 and 100".into()))?,
            icon: trim_optional(request.icon),
            color: trim_optional(request.color).unwrap_or_else(|| DEFAULT_SKILL_COLOR.to_string()),
            order: order_or_default(request.order.as_ref())?,
            status,
        })
    }
}

fn validate_level(value: &Value) -> Result<(), ValidationError> {
    match json_i32(value) {
        Some(level) if (0..=100).contains(&level) => Ok(()),
        _ => Err(invalid("level", "Level must be between 0 and 100")),
    }
}

fn validate_skill_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SkillCategory>()
        .map(|_| ())
        .map_err(|_| invalid("category", "Invalid category"))
}

/// Raw `?category=&status=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct SkillFilter {
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SkillQuery {
    pub category: Option<SkillCategory>,
    pub status: Option<PublishStatus>,
}

impl SkillFilter {
    pub fn resolve(&self) -> Result<SkillQuery, UnknownVariant> {
        Ok(SkillQuery {
            category: parse_filter(&self.category)?,
            status: parse_filter(&self.status)?,
        })
    }
}

impl SkillQuery {
    /// Active skills of one category, as shown on the public site.
    pub fn active_in(category: SkillCategory) -> Self {
        SkillQuery {
            category: Some(category),
            status: Some(PublishStatus::Active),
        }
    }

    pub fn matches(&self, skill: &Skill) -> bool {
        self.category.is_none_or(|c| skill.category == c)
            && self.status.is_none_or(|s| skill.status == s)
    }
}
