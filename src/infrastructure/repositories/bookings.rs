//! Booking storage and booking aggregates

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::application::errors::RepositoryError;
use crate::domain::{
    BookingDetails, BookingFilter, BookingStatus, NewBooking, Page, PageRequest,
    StatusCount, UserBookingStats,
};

const BOOKING_COLUMNS: &str = "b.id, b.user_id, b.package_id, b.booking_date, b.guests, b.rooms, \
     b.total_amount, b.status, b.created_at, b.updated_at";

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a pending booking and return it joined with its package
    async fn create(&self, booking: &NewBooking) -> Result<BookingDetails, RepositoryError>;

    /// Booking with package detail columns. `owner` restricts the lookup to
    /// one user's bookings.
    async fn find_details(
        &self,
        id: i64,
        owner: Option<i64>,
    ) -> Result<Option<BookingDetails>, RepositoryError>;

    /// Filtered page of bookings, newest first. `with_user` adds the customer name and email.
    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
        with_user: bool,
    ) -> Result<Page<BookingDetails>, RepositoryError>;

    /// Move a booking from `from` to `to`. Returns false when the row no
    /// longer has status `from`.
    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn user_stats(&self, user_id: i64) -> Result<UserBookingStats, RepositoryError>;

    async fn has_confirmed(&self, user_id: i64, package_id: i64) -> Result<bool, RepositoryError>;

    async fn count_for_user(&self, user_id: i64) -> Result<i64, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Sum of `total_amount` over confirmed bookings
    async fn confirmed_revenue(&self) -> Result<f64, RepositoryError>;

    async fn recent(&self, limit: i64) -> Result<Vec<BookingDetails>, RepositoryError>;

    async fn status_distribution(&self) -> Result<Vec<StatusCount>, RepositoryError>;
}

/// SQLite-backed booking repository
#[derive(Clone)]
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_booking_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &BookingFilter) {
    let mut separated = " WHERE ";

    if let Some(user_id) = filter.user_id {
        qb.push(separated).push("b.user_id = ").push_bind(user_id);
        separated = " AND ";
    }

    if let Some(status) = filter.status {
        qb.push(separated).push("b.status = ").push_bind(status);
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: &NewBooking) -> Result<BookingDetails, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO bookings (user_id, package_id, booking_date, guests, rooms, total_amount, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(booking.user_id)
        .bind(booking.package_id)
        .bind(booking.booking_date)
        .bind(booking.guests)
        .bind(booking.rooms)
        .bind(booking.total_amount)
        .bind(BookingStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        let details = sqlx::query_as::<_, BookingDetails>(&format!(
            "SELECT {}, p.title AS package_title, p.destination, p.image_url \
             FROM bookings b JOIN packages p ON b.package_id = p.id \
             WHERE b.id = ?",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(details)
    }

    async fn find_details(
        &self,
        id: i64,
        owner: Option<i64>,
    ) -> Result<Option<BookingDetails>, RepositoryError> {
        let details = sqlx::query_as::<_, BookingDetails>(&format!(
            "SELECT {}, p.title AS package_title, p.destination, p.image_url, \
                    p.price, p.description \
             FROM bookings b JOIN packages p ON b.package_id = p.id \
             WHERE b.id = ? AND (? IS NULL OR b.user_id = ?)",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
        with_user: bool,
    ) -> Result<Page<BookingDetails>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {}, p.title AS package_title, p.destination, p.image_url, p.price",
            BOOKING_COLUMNS
        ));
        if with_user {
            qb.push(", u.name AS user_name, u.email AS user_email");
        }
        qb.push(" FROM bookings b JOIN packages p ON b.package_id = p.id");
        if with_user {
            qb.push(" JOIN users u ON b.user_id = u.id");
        }
        push_booking_filter(&mut qb, filter);
        qb.push(" ORDER BY b.created_at DESC, b.id DESC LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let items = qb
            .build_query_as::<BookingDetails>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM bookings b");
        push_booking_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND status = ?",
        )
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        Ok(result.rows_affected() > 0)
    }

    async fn user_stats(&self, user_id: i64) -> Result<UserBookingStats, RepositoryError> {
        let stats = sqlx::query_as::<_, UserBookingStats>(
            "SELECT COUNT(*) AS total_bookings, \
                    COUNT(CASE WHEN status = 'confirmed' THEN 1 END) AS confirmed_bookings, \
                    COUNT(CASE WHEN status = 'pending' THEN 1 END) AS pending_bookings, \
                    COUNT(CASE WHEN status = 'cancelled' THEN 1 END) AS cancelled_bookings, \
                    TOTAL(total_amount) AS total_spent \
             FROM bookings WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn has_confirmed(&self, user_id: i64, package_id: i64) -> Result<bool, RepositoryError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM bookings \
             WHERE user_id = ? AND package_id = ? AND status = 'confirmed' LIMIT 1",
        )
        .bind(user_id)
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn confirmed_revenue(&self) -> Result<f64, RepositoryError> {
        // TOTAL() is always REAL, 0.0 for no rows
        let revenue: f64 = sqlx::query_scalar(
            "SELECT TOTAL(total_amount) FROM bookings WHERE status = 'confirmed'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(revenue)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<BookingDetails>, RepositoryError> {
        let bookings = sqlx::query_as::<_, BookingDetails>(&format!(
            "SELECT {}, p.title AS package_title, p.destination, \
                    u.name AS user_name, u.email AS user_email \
             FROM bookings b \
             JOIN packages p ON b.package_id = p.id \
             JOIN users u ON b.user_id = u.id \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT ?",
            BOOKING_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn status_distribution(&self) -> Result<Vec<StatusCount>, RepositoryError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM bookings GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
