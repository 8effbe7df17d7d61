//! Lead storage for the public booking-contact form

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::errors::RepositoryError;
use crate::domain::{BookingContact, BookingStatus, NewBookingContact};

const CONTACT_COLUMNS: &str = "id, name, email, phone, booking_date, status, created_at";

#[async_trait]
pub trait BookingContactRepository: Send + Sync {
    async fn create(&self, contact: &NewBookingContact) -> Result<BookingContact, RepositoryError>;

    /// Every lead, newest first
    async fn list_all(&self) -> Result<Vec<BookingContact>, RepositoryError>;

    async fn recent(&self, limit: i64) -> Result<Vec<BookingContact>, RepositoryError>;

    async fn update_status(&self, id: i64, status: BookingStatus) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

#[derive(Clone)]
pub struct SqliteBookingContactRepository {
    pool: SqlitePool,
}

impl SqliteBookingContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingContactRepository for SqliteBookingContactRepository {
    async fn create(&self, contact: &NewBookingContact) -> Result<BookingContact, RepositoryError> {
        let created = sqlx::query_as::<_, BookingContact>(&format!(
            "INSERT INTO booking_contacts (name, email, phone, booking_date, status) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.booking_date)
        .bind(BookingStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<BookingContact>, RepositoryError> {
        let contacts = sqlx::query_as::<_, BookingContact>(&format!(
            "SELECT {} FROM booking_contacts ORDER BY created_at DESC, id DESC",
            CONTACT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<BookingContact>, RepositoryError> {
        let contacts = sqlx::query_as::<_, BookingContact>(&format!(
            "SELECT {} FROM booking_contacts ORDER BY created_at DESC, id DESC LIMIT ?",
            CONTACT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn update_status(&self, id: i64, status: BookingStatus) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE booking_contacts SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM booking_contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
