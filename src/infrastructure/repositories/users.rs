//! Account storage

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::application::errors::RepositoryError;
use crate::domain::{Page, PageRequest, Role, User, UserCredentials, UserSummary};

const USER_COLUMNS: &str = "id, name, email, role, created_at";

/// Repository trait for account data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError>;

    async fn find_credentials_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UserCredentials>, RepositoryError>;

    /// Whether `email` belongs to an account other than `except_id`
    async fn email_in_use(
        &self,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<bool, RepositoryError>;

    async fn update_profile(
        &self,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, RepositoryError>;

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, RepositoryError>;

    async fn update_role(&self, id: i64, role: Role) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, RepositoryError>;

    async fn count_with_role(&self, role: Role) -> Result<i64, RepositoryError>;
}

/// SQLite-backed account repository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_user_search(qb: &mut QueryBuilder<'_, Sqlite>, search: Option<&str>) {
    if let Some(term) = search {
        let pattern = format!("%{}%", term);
        qb.push(" WHERE (u.name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.email LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role) VALUES (?, ?, ?, ?) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_credentials_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password, role, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_in_use(
        &self,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<bool, RepositoryError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM users WHERE email = ? AND (? IS NULL OR id != ?) LIMIT 1",
        )
        .bind(email)
        .bind(except_id)
        .bind(except_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn update_profile(
        &self,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = ?, email = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? RETURNING {}",
            USER_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET password = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("UPDATE users SET role = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
                .bind(role)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT u.id, u.name, u.email, u.role, u.created_at, \
             (SELECT COUNT(*) FROM bookings b WHERE b.user_id = u.id) AS total_bookings \
             FROM users u",
        );
        push_user_search(&mut qb, search);
        qb.push(" ORDER BY u.created_at DESC, u.id DESC LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let items = qb
            .build_query_as::<UserSummary>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users u");
        push_user_search(&mut count, search);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        Ok(Page::new(items, total, page))
    }

    async fn count_with_role(&self, role: Role) -> Result<i64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
