//! Package catalogue storage

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::application::errors::RepositoryError;
use crate::domain::{Package, PackageDraft, PackageFilter, Page, PageRequest, PopularPackage};

const PACKAGE_COLUMNS: &str = "p.id, p.title, p.destination, p.description, p.price, p.duration, \
     p.image_url, p.rating, p.total_reviews, p.created_at, p.updated_at";

/// Repository trait for package data access
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list(
        &self,
        filter: &PackageFilter,
        page: PageRequest,
    ) -> Result<Page<Package>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Package>, RepositoryError>;

    /// Packages ordered by booking count, then cached rating
    async fn popular(&self, limit: i64) -> Result<Vec<PopularPackage>, RepositoryError>;

    async fn by_destination(&self, destination: &str) -> Result<Vec<Package>, RepositoryError>;

    async fn create(&self, draft: &PackageDraft) -> Result<Package, RepositoryError>;

    async fn update(&self, id: i64, draft: &PackageDraft)
    -> Result<Option<Package>, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn has_bookings(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;
}

/// SQLite-backed package repository
#[derive(Clone)]
pub struct SqlitePackageRepository {
    pool: SqlitePool,
}

impl SqlitePackageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_package_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PackageFilter) {
    let mut separated = " WHERE ";

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(separated)
            .push("(p.title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description LIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.destination LIKE ")
            .push_bind(pattern)
            .push(")");
        separated = " AND ";
    }

    if let Some(destination) = &filter.destination {
        qb.push(separated)
            .push("p.destination LIKE ")
            .push_bind(format!("%{}%", destination));
        separated = " AND ";
    }

    if let Some(min) = filter.min_price {
        qb.push(separated).push("p.price >= ").push_bind(min);
        separated = " AND ";
    }

    if let Some(max) = filter.max_price {
        qb.push(separated).push("p.price <= ").push_bind(max);
    }
}

#[async_trait]
impl PackageRepository for SqlitePackageRepository {
    async fn list(
        &self,
        filter: &PackageFilter,
        page: PageRequest,
    ) -> Result<Page<Package>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM packages p", PACKAGE_COLUMNS));
        push_package_filter(&mut qb, filter);
        qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let items = qb
            .build_query_as::<Package>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM packages p");
        push_package_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Package>, RepositoryError> {
        let package = sqlx::query_as::<_, Package>(&format!(
            "SELECT {} FROM packages p WHERE p.id = ?",
            PACKAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(package)
    }

    async fn popular(&self, limit: i64) -> Result<Vec<PopularPackage>, RepositoryError> {
        let packages = sqlx::query_as::<_, PopularPackage>(&format!(
            "SELECT {}, COUNT(b.id) AS booking_count \
             FROM packages p \
             LEFT JOIN bookings b ON p.id = b.package_id \
             GROUP BY p.id \
             ORDER BY booking_count DESC, p.rating DESC, p.id ASC \
             LIMIT ?",
            PACKAGE_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    async fn by_destination(&self, destination: &str) -> Result<Vec<Package>, RepositoryError> {
        let packages = sqlx::query_as::<_, Package>(&format!(
            "SELECT {} FROM packages p WHERE p.destination LIKE ? \
             ORDER BY p.created_at DESC, p.id DESC",
            PACKAGE_COLUMNS
        ))
        .bind(format!("%{}%", destination))
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    async fn create(&self, draft: &PackageDraft) -> Result<Package, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO packages (title, destination, description, price, duration, image_url) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.destination)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.duration)
        .bind(&draft.image_url)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or(RepositoryError::Database(sqlx::Error::RowNotFound))
    }

    async fn update(
        &self,
        id: i64,
        draft: &PackageDraft,
    ) -> Result<Option<Package>, RepositoryError> {
        let result = sqlx::query(
            "UPDATE packages \
             SET title = ?, destination = ?, description = ?, price = ?, duration = ?, \
                 image_url = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&draft.title)
        .bind(&draft.destination)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.duration)
        .bind(&draft.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_bookings(&self, id: i64) -> Result<bool, RepositoryError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM bookings WHERE package_id = ? LIMIT 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM packages")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
