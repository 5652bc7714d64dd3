use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillInsert, SkillQuery},
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Ordered by `order` ascending, then name ascending.
    async fn list_skills(&self, query: &SkillQuery) -> Result<Vec<Skill>, AppError>;
    async fn get_skill_by_id(&self, id: &Uuid) -> Result<Option<Skill>, AppError>;
    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: &Uuid, skill: &SkillInsert) -> Result<Option<Skill>, AppError>;
    async fn delete_skill(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self, query: &SkillQuery) -> Result<Vec<Skill>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM skills WHERE TRUE");

        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }

        builder.push(" ORDER BY display_order ASC, name ASC");

        let skills = builder
            .build_query_as::<Skill>()
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    async fn get_skill_by_id(&self, id: &Uuid) -> Result<Option<Skill>, AppError> {
        let skill = sqlx::query_as::<_, Skill>(r#"SELECT * FROM skills WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(skill)
    }

    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        let created = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, category, level, icon, color, display_order, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&skill.name)
        .bind(skill.category)
        .bind(skill.level)
        .bind(&skill.icon)
        .bind(&skill.color)
        .bind(skill.order)
        .bind(skill.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_skill(&self, id: &Uuid, skill: &SkillInsert) -> Result<Option<Skill>, AppError> {
        let updated = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills SET
                name = $1,
                category = $2,
                level = $3,
                icon = $4,
                color = $5,
                display_order = $6,
                status = $7,
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&skill.name)
        .bind(skill.category)
        .bind(skill.level)
        .bind(&skill.icon)
        .bind(&skill.color)
        .bind(skill.order)
        .bind(skill.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM skills WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
