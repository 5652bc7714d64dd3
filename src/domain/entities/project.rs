use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::common::{
        invalid, order_or_default, parse_filter, trim_in_place, trim_optional, validate_order,
        validate_publish_status, PublishStatus, UnknownVariant,
    },
    errors::AppError,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_NAME_LENGTH: u64 = 2;
const MAX_NAME_LENGTH: u64 = 100;
const MIN_DESCRIPTION_LENGTH: u64 = 10;
const MAX_DESCRIPTION_LENGTH: u64 = 500;
const MAX_LONG_DESCRIPTION_LENGTH: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Other,
}

impl std::str::FromStr for ProjectCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(ProjectCategory::Frontend),
            "backend" => Ok(ProjectCategory::Backend),
            "fullstack" => Ok(ProjectCategory::Fullstack),
            "mobile" => Ok(ProjectCategory::Mobile),
            "other" => Ok(ProjectCategory::Other),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image: Option<String>,
    pub technologies: Vec<String>,
    pub live_link: Option<String>,
    pub github_link: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fully validated project, ready to be written as a new row or as a
/// full replacement of an existing one.
#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image: Option<String>,
    pub technologies: Vec<String>,
    pub live_link: Option<String>,
    pub github_link: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub order: i32,
    pub status: PublishStatus,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of both `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[validate(
        required(message = "Project name is required"),
        length(min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH, message = "Project name must be between 2 and 100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Project description is required"),
        length(min = MIN_DESCRIPTION_LENGTH, max = MAX_DESCRIPTION_LENGTH, message = "Description must be between 10 and 500 characters")
    )]
    pub description: Option<String>,

    #[validate(length(max = MAX_LONG_DESCRIPTION_LENGTH, message = "Long description cannot exceed 2000 characters"))]
    pub long_description: Option<String>,

    pub image: Option<String>,

    #[validate(
        required(message = "At least one technology must be specified"),
        custom(function = "validate_technologies")
    )]
    pub technologies: Option<Value>,

    pub live_link: Option<String>,

    pub github_link: Option<String>,

    #[validate(
        required(message = "Invalid category"),
        custom(function = "validate_project_category")
    )]
    pub category: Option<String>,

    #[validate(custom(function = "validate_featured"))]
    pub featured: Option<Value>,

    #[validate(custom(function = "validate_order"))]
    pub order: Option<Value>,

    #[validate(custom(function = "validate_publish_status"))]
    pub status: Option<String>,
}

impl ProjectRequest {
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.long_description);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.status);
        // Non-string entries are left for validation to report
        if let Some(Value::Array(technologies)) = self.technologies.as_mut() {
            technologies.retain_mut(|t| match t {
                Value::String(name) => {
                    *name = name.trim().to_string();
                    !name.is_empty()
                }
                _ => true,
            });
        }
    }
}

impl TryFrom<ProjectRequest> for ProjectInsert {
    type Error = AppError;

    fn try_from(request: ProjectRequest) -> Result<Self, Self::Error> {
        let category = request
            .category
            .as_deref()
            .unwrap_or_default()
            .parse::<ProjectCategory>()
            .map_err(|_| AppError::BadRequest("Invalid category".into()))?;

        let status = match request.status.as_deref() {
            Some(s) => s
                .parse::<PublishStatus>()
                .map_err(|_| AppError::BadRequest("Invalid status".into()))?,
            None => PublishStatus::default(),
        };

        Ok(ProjectInsert {
            name: request.name.ok_or_else(|| AppError::BadRequest("Project name is required".into()))?,
            description: request
                .description
                .ok_or_else(|| AppError::BadRequest("Project description is required".into()))?,
            long_description: trim_optional(request.long_description),
            image: trim_optional(request.image),
            technologies: technology_names(request.technologies.as_ref()),
            live_link: trim_optional(request.live_link),
            github_link: trim_optional(request.github_link),
            category,
            featured: request.featured.as_ref().and_then(Value::as_bool).unwrap_or(false),
            order: order_or_default(request.order.as_ref())?,
            status,
        })
    }
}

fn technology_names(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

fn validate_technologies(value: &Value) -> Result<(), ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(invalid("technologies", "Technologies must be a list of names"));
    };
    if items.is_empty() {
        return Err(invalid("technologies", "At least one technology must be specified"));
    }
    if !items.iter().all(Value::is_string) {
        return Err(invalid("technologies", "Technologies must be a list of names"));
    }
    Ok(())
}

fn validate_featured(value: &Value) -> Result<(), ValidationError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid("featured", "Featured must be true or false"))
    }
}

fn validate_project_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ProjectCategory>()
        .map(|_| ())
        .map_err(|_| invalid("category", "Invalid category"))
}

// ───── Listing ───────────────────────────────────────────────────────

/// Raw `?category=&featured=&status=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
}

/// Typed equality filters applied to a project listing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectQuery {
    pub category: Option<ProjectCategory>,
    pub featured: Option<bool>,
    pub status: Option<PublishStatus>,
}

impl ProjectFilter {
    /// `Err` means a filter names a value no project can have, so the
    /// listing is empty without asking the store.
    pub fn resolve(&self) -> Result<ProjectQuery, UnknownVariant> {
        Ok(ProjectQuery {
            category: parse_filter(&self.category)?,
            featured: self.featured.as_deref().map(|v| v.trim() == "true"),
            status: parse_filter(&self.status)?,
        })
    }
}

impl ProjectQuery {
    pub fn matches(&self, project: &Project) -> bool {
        self.category.is_none_or(|c| project.category == c)
            && self.featured.is_none_or(|f| project.featured == f)
            && self.status.is_none_or(|s| project.status == s)
    }
}
