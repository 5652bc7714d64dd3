use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert, ProjectQuery},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Ordered by `order` ascending, newest first within the same order.
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM projects WHERE TRUE");

        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(featured) = query.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }

        builder.push(" ORDER BY display_order ASC, created_at DESC");

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(r#"SELECT * FROM projects WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                name, description, long_description, image, technologies,
                live_link, github_link, category, featured, display_order, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.live_link)
        .bind(&project.github_link)
        .bind(project.category)
        .bind(project.featured)
        .bind(project.order)
        .bind(project.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Option<Project>, AppError> {
        // Full replacement: optional columns not present in the payload are cleared
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                name = $1,
                description = $2,
                long_description = $3,
                image = $4,
                technologies = $5,
                live_link = $6,
                github_link = $7,
                category = $8,
                featured = $9,
                display_order = $10,
                status = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.live_link)
        .bind(&project.github_link)
        .bind(project.category)
        .bind(project.featured)
        .bind(project.order)
        .bind(project.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM projects WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
