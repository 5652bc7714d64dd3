use std::sync::Arc;

use crate::{
    entities::project::{Project, ProjectFilter, ProjectInsert, ProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};
use validator::Validate;

const PROJECT_NOT_FOUND: &str = "Project not found";

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Lists projects matching the optional filters, never paginated
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        match filter.resolve() {
            Ok(query) => self.project_repo.list_projects(&query).await,
            Err(unknown) => {
                tracing::debug!("Project filter matches nothing: {}", unknown);
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id, PROJECT_NOT_FOUND)?;

        self.project_repo
            .get_project_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.into()))
    }

    pub async fn create_project(&self, request: ProjectRequest) -> Result<Project, AppError> {
        let insert = Self::prepare(request)?;
        self.project_repo.create_project(&insert).await
    }

    /// Replaces every field of an existing project
    pub async fn update_project(&self, id: &str, request: ProjectRequest) -> Result<Project, AppError> {
        let insert = Self::prepare(request)?;
        let valid_id = valid_uuid(id, PROJECT_NOT_FOUND)?;

        self.project_repo
            .update_project(&valid_id, &insert)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.into()))
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id, PROJECT_NOT_FOUND)?;

        match self.project_repo.delete_project(&valid_id).await? {
            true => Ok(()),
            false => Err(AppError::NotFound(PROJECT_NOT_FOUND.into())),
        }
    }

    fn prepare(mut request: ProjectRequest) -> Result<ProjectInsert, AppError> {
        request.normalize();
        request.validate()?;
        ProjectInsert::try_from(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::{ProjectCategory, ProjectQuery};
    use async_trait::async_trait;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ProjectRepo {}

        #[async_trait]
        impl ProjectRepository for ProjectRepo {
            async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, AppError>;
            async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
            async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
            async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Option<Project>, AppError>;
            async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError>;
        }
    }

    #[tokio::test]
    async fn unknown_category_filter_returns_empty_without_query() {
        let mut repo = MockProjectRepo::new();
        repo.expect_list_projects().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let filter = ProjectFilter { category: Some("games".into()), ..Default::default() };

        assert!(handler.list_projects(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filters_are_passed_through_typed() {
        let mut repo = MockProjectRepo::new();
        repo.expect_list_projects()
            .withf(|q| q.category == Some(ProjectCategory::Backend) && q.featured == Some(true) && q.status.is_none())
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let handler = ProjectHandler::new(Arc::new(repo));
        let filter = ProjectFilter {
            category: Some("backend".into()),
            featured: Some("true".into()),
            status: None,
        };

        handler.list_projects(&filter).await.unwrap();
    }

    #[tokio::test]
    async fn update_validates_before_touching_the_store() {
        let mut repo = MockProjectRepo::new();
        repo.expect_update_project().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let result = handler
            .update_project(&Uuid::new_v4().to_string(), ProjectRequest::default())
            .await;

        let Err(AppError::ValidationError(errors)) = result else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["category", "description", "name", "technologies"]);
    }

    #[tokio::test]
    async fn update_of_missing_project_is_not_found() {
        let mut repo = MockProjectRepo::new();
        repo.expect_update_project().times(1).returning(|_, _| Ok(None));

        let handler = ProjectHandler::new(Arc::new(repo));
        let request = ProjectRequest {
            name: Some("Portfolio".into()),
            description: Some("Personal portfolio site.".into()),
            technologies: Some(serde_json::json!(["Rust"])),
            category: Some("backend".into()),
            ..Default::default()
        };

        let result = handler.update_project(&Uuid::new_v4().to_string(), request).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == PROJECT_NOT_FOUND));
    }
}
