use std::sync::Arc;

use crate::repositories::{
    contact::ContactRepository,
    project::ProjectRepository,
    skill::SkillRepository,
    sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxSkillRepo, SqlxStore},
    store::StoreHealth,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub skill_repo: Arc<dyn SkillRepository>,
    pub store: Arc<dyn StoreHealth>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let contact_repo = Arc::new(SqlxContactRepo::new(pool.clone()));
        let project_repo = Arc::new(SqlxProjectRepo::new(pool.clone()));
        let skill_repo = Arc::new(SqlxSkillRepo::new(pool.clone()));
        let store = Arc::new(SqlxStore::new(pool));

        SharedRepositories {
            contact_repo,
            project_repo,
            skill_repo,
            store,
        }
    }
}
