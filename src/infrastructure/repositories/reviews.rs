//! Review storage. Every write refreshes the package's cached rating in the
//! same transaction.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use crate::application::errors::RepositoryError;
use crate::domain::{Page, PageRequest, RatingSummary, ReviewChanges, ReviewDetails};

const REVIEW_COLUMNS: &str =
    "r.id, r.user_id, r.package_id, r.rating, r.comment, r.created_at, r.updated_at";

/// Repository trait for review data access
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review and refresh the package aggregate
    async fn create(
        &self,
        user_id: i64,
        package_id: i64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<ReviewDetails, RepositoryError>;

    /// Apply `changes` to a review owned by `user_id`; None if no such review
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        changes: &ReviewChanges,
    ) -> Result<Option<ReviewDetails>, RepositoryError>;

    /// Delete a review owned by `user_id`; false if no such review
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, RepositoryError>;

    async fn exists_for(&self, user_id: i64, package_id: i64) -> Result<bool, RepositoryError>;

    async fn list_for_package(
        &self,
        package_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, RepositoryError>;

    async fn all_for_package(&self, package_id: i64) -> Result<Vec<ReviewDetails>, RepositoryError>;

    async fn list_for_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, RepositoryError>;

    async fn recent(&self, limit: i64) -> Result<Vec<ReviewDetails>, RepositoryError>;

    /// Live AVG/COUNT over the package's reviews
    async fn rating_summary(&self, package_id: i64) -> Result<RatingSummary, RepositoryError>;
}

/// SQLite-backed review repository
#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Recompute a package's cached rating and review count from its reviews
pub async fn refresh_package_rating(
    conn: &mut SqliteConnection,
    package_id: i64,
) -> Result<RatingSummary, RepositoryError> {
    let summary = sqlx::query_as::<_, RatingSummary>(
        "UPDATE packages SET \
             rating = (SELECT COALESCE(AVG(rating), 0.0) FROM reviews WHERE package_id = ?1), \
             total_reviews = (SELECT COUNT(*) FROM reviews WHERE package_id = ?1) \
         WHERE id = ?1 \
         RETURNING rating, total_reviews",
    )
    .bind(package_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(summary.unwrap_or(RatingSummary {
        rating: 0.0,
        total_reviews: 0,
    }))
}

async fn fetch_with_reviewer(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<ReviewDetails, RepositoryError> {
    let review = sqlx::query_as::<_, ReviewDetails>(&format!(
        "SELECT {}, u.name AS user_name \
         FROM reviews r JOIN users u ON r.user_id = u.id \
         WHERE r.id = ?",
        REVIEW_COLUMNS
    ))
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(review)
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn create(
        &self,
        user_id: i64,
        package_id: i64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<ReviewDetails, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reviews (user_id, package_id, rating, comment) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(package_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&mut *tx)
        .await?;

        refresh_package_rating(&mut *tx, package_id).await?;
        let review = fetch_with_reviewer(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(review)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        changes: &ReviewChanges,
    ) -> Result<Option<ReviewDetails>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let package_id: Option<i64> = sqlx::query_scalar(
            "UPDATE reviews SET \
                 rating = COALESCE(?, rating), \
                 comment = COALESCE(?, comment), \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND user_id = ? \
             RETURNING package_id",
        )
        .bind(changes.rating)
        .bind(changes.comment.as_deref())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(package_id) = package_id else {
            return Ok(None);
        };

        refresh_package_rating(&mut *tx, package_id).await?;
        let review = fetch_with_reviewer(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(Some(review))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let package_id: Option<i64> = sqlx::query_scalar(
            "DELETE FROM reviews WHERE id = ? AND user_id = ? RETURNING package_id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(package_id) = package_id else {
            return Ok(false);
        };

        refresh_package_rating(&mut *tx, package_id).await?;
        tx.commit().await?;

        Ok(true)
    }

    async fn exists_for(&self, user_id: i64, package_id: i64) -> Result<bool, RepositoryError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM reviews WHERE user_id = ? AND package_id = ?")
                .bind(user_id)
                .bind(package_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    async fn list_for_package(
        &self,
        package_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, RepositoryError> {
        let items = sqlx::query_as::<_, ReviewDetails>(&format!(
            "SELECT {}, u.name AS user_name \
             FROM reviews r JOIN users u ON r.user_id = u.id \
             WHERE r.package_id = ? \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ? OFFSET ?",
            REVIEW_COLUMNS
        ))
        .bind(package_id)
        .bind(page.limit as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE package_id = ?")
            .bind(package_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    async fn all_for_package(&self, package_id: i64) -> Result<Vec<ReviewDetails>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ReviewDetails>(&format!(
            "SELECT {}, u.name AS user_name \
             FROM reviews r JOIN users u ON r.user_id = u.id \
             WHERE r.package_id = ? \
             ORDER BY r.created_at DESC, r.id DESC",
            REVIEW_COLUMNS
        ))
        .bind(package_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, RepositoryError> {
        let items = sqlx::query_as::<_, ReviewDetails>(&format!(
            "SELECT {}, p.title AS package_title, p.destination, p.image_url \
             FROM reviews r JOIN packages p ON r.package_id = p.id \
             WHERE r.user_id = ? \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ? OFFSET ?",
            REVIEW_COLUMNS
        ))
        .bind(user_id)
        .bind(page.limit as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ReviewDetails>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ReviewDetails>(&format!(
            "SELECT {}, u.name AS user_name, p.title AS package_title, p.destination \
             FROM reviews r \
             JOIN users u ON r.user_id = u.id \
             JOIN packages p ON r.package_id = p.id \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ?",
            REVIEW_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn rating_summary(&self, package_id: i64) -> Result<RatingSummary, RepositoryError> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            "SELECT COALESCE(AVG(rating), 0.0) AS rating, COUNT(*) AS total_reviews \
             FROM reviews WHERE package_id = ?",
        )
        .bind(package_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
