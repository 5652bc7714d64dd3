use std::sync::Arc;

use crate::{
    entities::contact::{Contact, ContactOrigin, ContactReceipt, ContactStatusUpdate, NewContactForm},
    errors::AppError,
    repositories::contact::ContactRepository,
    utils::valid_uuid::valid_uuid,
};
use validator::Validate;

const CONTACT_NOT_FOUND: &str = "Contact submission not found";

pub struct ContactHandler {
    pub contact_repo: Arc<dyn ContactRepository>,
}

impl ContactHandler {
    pub fn new(contact_repo: Arc<dyn ContactRepository>) -> Self {
        ContactHandler { contact_repo }
    }

    /// Validates and stores a contact form submission
    pub async fn submit_contact(
        &self,
        mut form: NewContactForm,
        origin: ContactOrigin,
    ) -> Result<ContactReceipt, AppError> {
        form.normalize();
        form.validate()?;

        let insert = form.into_insert(origin)?;
        let contact = self.contact_repo.create_contact(&insert).await?;

        tracing::info!(
            contact_id = %contact.id,
            name = %contact.name,
            email = %contact.email,
            subject = %contact.subject,
            ip = contact.ip_address.as_deref().unwrap_or("unknown"),
            "New contact form submission"
        );

        Ok(contact.into())
    }

    /// Lists every submission, newest first
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        self.contact_repo.list_contacts().await
    }

    pub async fn get_contact(&self, id: &str) -> Result<Contact, AppError> {
        let valid_id = valid_uuid(id, CONTACT_NOT_FOUND)?;

        self.contact_repo
            .get_contact_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(CONTACT_NOT_FOUND.into()))
    }

    /// Moves a submission between unread, read and replied
    pub async fn update_status(
        &self,
        id: &str,
        update: &ContactStatusUpdate,
    ) -> Result<Contact, AppError> {
        let status = update.parse()?;
        let valid_id = valid_uuid(id, CONTACT_NOT_FOUND)?;

        self.contact_repo
            .update_contact_status(&valid_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(CONTACT_NOT_FOUND.into()))
    }

    pub async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id, CONTACT_NOT_FOUND)?;

        match self.contact_repo.delete_contact(&valid_id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound(CONTACT_NOT_FOUND.into())),
        }
    }
}
