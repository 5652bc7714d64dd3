use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::common::{trim_in_place, UnknownVariant},
    errors::AppError,
};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl std::str::FromStr for ContactStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(ContactStatus::Unread),
            "read" => Ok(ContactStatus::Read),
            "replied" => Ok(ContactStatus::Replied),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form as submitted by the site. Every field is optional at the
/// serde level so a missing field shows up as a validation entry.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct NewContactForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"),
        regex(path = *NAME_PATTERN, message = "Name can only contain letters and spaces")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Subject is required"),
        length(min = 5, max = 100, message = "Subject must be between 5 and 100 characters")
    )]
    pub subject: Option<String>,

    #[validate(
        required(message = "Message is required"),
        length(min = 10, max = 1000, message = "Message must be between 10 and 1000 characters")
    )]
    pub message: Option<String>,
}

impl NewContactForm {
    /// Trims text fields and lower-cases the email before validation.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.subject);
        trim_in_place(&mut self.message);
        if let Some(email) = self.email.as_mut() {
            *email = email.to_lowercase();
        }
    }

    pub fn into_insert(self, origin: ContactOrigin) -> Result<ContactInsert, AppError> {
        let missing = |field: &str| AppError::BadRequest(format!("{field} is required"));

        Ok(ContactInsert {
            name: self.name.ok_or_else(|| missing("name"))?,
            email: self.email.ok_or_else(|| missing("email"))?,
            subject: self.subject.ok_or_else(|| missing("subject"))?,
            message: self.message.ok_or_else(|| missing("message"))?,
            ip_address: origin.ip_address,
            user_agent: origin.user_agent,
        })
    }
}

/// Where a submission came from, captured from the HTTP request.
#[derive(Debug, Clone, Default)]
pub struct ContactOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Acknowledgement returned to the submitter; omits the message body and
/// the captured request metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Contact> for ContactReceipt {
    fn from(contact: Contact) -> Self {
        ContactReceipt {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            timestamp: contact.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactStatusUpdate {
    pub status: Option<String>,
}

impl ContactStatusUpdate {
    pub fn parse(&self) -> Result<ContactStatus, AppError> {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| AppError::BadRequest("Invalid status value".into()))
    }
}
