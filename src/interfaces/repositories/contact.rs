use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact::{Contact, ContactInsert, ContactStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError>;
    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError>;
    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;
    async fn update_contact_status(&self, id: &Uuid, status: ContactStatus) -> Result<Option<Contact>, AppError>;
    /// Returns `false` when no row had that id.
    async fn delete_contact(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError> {
        let created = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, subject, message, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.ip_address)
        .bind(&contact.user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"SELECT * FROM contacts ORDER BY created_at DESC"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"SELECT * FROM contacts WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn update_contact_status(&self, id: &Uuid, status: ContactStatus) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM contacts WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
