use std::sync::Arc;

use crate::{
    entities::skill::{Skill, SkillCategory, SkillFilter, SkillInsert, SkillQuery, SkillRequest},
    errors::AppError,
    repositories::skill::SkillRepository,
    utils::valid_uuid::valid_uuid,
};
use validator::Validate;

const SKILL_NOT_FOUND: &str = "Skill not found";

pub struct SkillHandler {
    pub skill_repo: Arc<dyn SkillRepository>,
}

impl SkillHandler {
    pub fn new(skill_repo: Arc<dyn SkillRepository>) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self, filter: &SkillFilter) -> Result<Vec<Skill>, AppError> {
        match filter.resolve() {
            Ok(query) => self.skill_repo.list_skills(&query).await,
            Err(unknown) => {
                tracing::debug!("Skill filter matches nothing: {}", unknown);
                Ok(Vec::new())
            }
        }
    }

    /// Active skills in one category; an unknown category has no skills
    pub async fn list_active_in_category(&self, category: &str) -> Result<Vec<Skill>, AppError> {
        match category.trim().parse::<SkillCategory>() {
            Ok(category) => self.skill_repo.list_skills(&SkillQuery::active_in(category)).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    pub async fn get_skill(&self, id: &str) -> Result<Skill, AppError> {
        let valid_id = valid_uuid(id, SKILL_NOT_FOUND)?;

        self.skill_repo
            .get_skill_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SKILL_NOT_FOUND.into()))
    }

    pub async fn create_skill(&self, request: SkillRequest) -> Result<Skill, AppError> {
        let insert = Self::prepare(request)?;
        self.skill_repo.create_skill(&insert).await
    }

    pub async fn update_skill(&self, id: &str, request: SkillRequest) -> Result<Skill, AppError> {
        let insert = Self::prepare(request)?;
        let valid_id = valid_uuid(id, SKILL_NOT_FOUND)?;

        self.skill_repo
            .update_skill(&valid_id, &insert)
            .await?
            .ok_or_else(|| AppError::NotFound(SKILL_NOT_FOUND.into()))
    }

    pub async fn delete_skill(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id, SKILL_NOT_FOUND)?;

        match self.skill_repo.delete_skill(&valid_id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound(SKILL_NOT_FOUND.into())),
        }
    }

    fn prepare(mut request: SkillRequest) -> Result<SkillInsert, AppError> {
        request.normalize();
        request.validate()?;
        SkillInsert::try_from(request)
    }
}
