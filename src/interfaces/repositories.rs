pub mod contact;
pub mod project;
pub mod skill;
pub mod sqlx_repo;
pub mod store;
