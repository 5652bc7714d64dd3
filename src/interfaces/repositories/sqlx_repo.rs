use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

/// Pool handle used for liveness checks rather than entity access.
#[derive(Clone)]
pub struct SqlxStore {
    pub pool: PgPool,
}
