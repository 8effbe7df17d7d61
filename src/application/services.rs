//! Application services for orchestrating business logic

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::errors::{ApplicationError, AuthError, RepositoryError};
use crate::domain::{
    BookingContact, BookingDetails, BookingFilter, BookingPolicy, BookingStatus, Capability,
    Dashboard, DashboardTotals, NewBooking, NewBookingContact, Package, PackageDetails,
    PackageDraft, PackageFilter, Page, PageRequest, PopularPackage, RatingSummary, ReviewChanges,
    ReviewDetails, Role, StatusChangeDecision, User, UserBookingStats, UserSummary, check_rating,
    decide_status_change,
};
use crate::infrastructure::{
    BookingContactRepository, BookingRepository, PackageRepository, PasswordHasher,
    ReviewRepository, TokenService, UserRepository,
};

/// Number of rows shown in each dashboard panel
pub const DASHBOARD_PANEL_SIZE: i64 = 5;

/// Upper bound for `/popular/{limit}` and `/recent/{limit}`
pub const MAX_SHOWCASE_LIMIT: i64 = 100;

/// Signed-in user plus bearer token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// A page of reviews for one package with its live aggregate
#[derive(Debug, Clone)]
pub struct PackageReviews {
    pub reviews: Page<ReviewDetails>,
    pub summary: RatingSummary,
}

/// Message from the public contact form
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Map a store conflict on insert/update to a caller-facing message
fn duplicate_as(message: &'static str) -> impl FnOnce(RepositoryError) -> ApplicationError {
    move |err| match err {
        RepositoryError::Duplicate => ApplicationError::conflict(message),
        other => other.into(),
    }
}

fn require(role: Role, capability: Capability, message: &str) -> Result<(), ApplicationError> {
    if role.can(capability) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(message))
    }
}

fn check_showcase_limit(limit: i64) -> Result<(), ApplicationError> {
    if (1..=MAX_SHOWCASE_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(ApplicationError::validation(
            "Limit must be between 1 and 100",
        ))
    }
}

/// Registration, login, token resolution and profile management
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApplicationError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApplicationError>;

    /// Resolve a bearer token to a live user row
    async fn authenticate(&self, token: &str) -> Result<User, ApplicationError>;

    async fn profile(&self, user_id: i64) -> Result<User, ApplicationError>;

    async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> Result<User, ApplicationError>;

    async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApplicationError>;
}

pub struct AuthServiceImpl {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthServiceImpl {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApplicationError> {
        const TAKEN: &str = "User with this email already exists";

        if self.users.email_in_use(email, None).await? {
            return Err(ApplicationError::conflict(TAKEN));
        }

        let hash = self.hasher.hash(password).await?;
        let user = self
            .users
            .create(name, email, &hash, Role::User)
            .await
            .map_err(duplicate_as(TAKEN))?;
        let token = self.tokens.issue(user.id)?;

        info!(user_id = user.id, "User registered");
        Ok(AuthSession { user, token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApplicationError> {
        let credentials = self
            .users
            .find_credentials_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &credentials.password).await? {
            debug!(user_id = credentials.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = credentials.into_user();
        let token = self.tokens.issue(user.id)?;
        Ok(AuthSession { user, token })
    }

    async fn authenticate(&self, token: &str) -> Result<User, ApplicationError> {
        let claims = self.tokens.verify(token)?;
        let user = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UnknownUser)?;
        Ok(user)
    }

    async fn profile(&self, user_id: i64) -> Result<User, ApplicationError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User"))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> Result<User, ApplicationError> {
        const TAKEN: &str = "Email is already taken";

        if self.users.email_in_use(email, Some(user_id)).await? {
            return Err(ApplicationError::conflict(TAKEN));
        }

        self.users
            .update_profile(user_id, name, email)
            .await
            .map_err(duplicate_as(TAKEN))?
            .ok_or_else(|| ApplicationError::not_found("User"))
    }

    async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApplicationError> {
        let credentials = self
            .users
            .find_credentials_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User"))?;

        if !self
            .hasher
            .verify(current_password, &credentials.password)
            .await?
        {
            return Err(ApplicationError::unauthorized(
                "Current password is incorrect",
            ));
        }

        let hash = self.hasher.hash(new_password).await?;
        if !self.users.update_password(user_id, &hash).await? {
            return Err(ApplicationError::not_found("User"));
        }

        info!(user_id, "Password changed");
        Ok(())
    }
}

/// Package catalogue browsing and administration
#[async_trait]
pub trait PackageService: Send + Sync {
    async fn list(
        &self,
        filter: &PackageFilter,
        page: PageRequest,
    ) -> Result<Page<Package>, ApplicationError>;

    async fn details(&self, id: i64) -> Result<PackageDetails, ApplicationError>;

    async fn popular(&self, limit: i64) -> Result<Vec<PopularPackage>, ApplicationError>;

    async fn by_destination(&self, destination: &str) -> Result<Vec<Package>, ApplicationError>;

    async fn create(&self, draft: &PackageDraft) -> Result<Package, ApplicationError>;

    async fn update(&self, id: i64, draft: &PackageDraft) -> Result<Package, ApplicationError>;

    async fn delete(&self, id: i64) -> Result<(), ApplicationError>;
}

pub struct PackageServiceImpl {
    packages: Arc<dyn PackageRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl PackageServiceImpl {
    pub fn new(packages: Arc<dyn PackageRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { packages, reviews }
    }
}

#[async_trait]
impl PackageService for PackageServiceImpl {
    async fn list(
        &self,
        filter: &PackageFilter,
        page: PageRequest,
    ) -> Result<Page<Package>, ApplicationError> {
        Ok(self.packages.list(filter, page).await?)
    }

    async fn details(&self, id: i64) -> Result<PackageDetails, ApplicationError> {
        let package = self
            .packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Package"))?;
        let reviews = self.reviews.all_for_package(id).await?;

        Ok(PackageDetails { package, reviews })
    }

    async fn popular(&self, limit: i64) -> Result<Vec<PopularPackage>, ApplicationError> {
        check_showcase_limit(limit)?;
        Ok(self.packages.popular(limit).await?)
    }

    async fn by_destination(&self, destination: &str) -> Result<Vec<Package>, ApplicationError> {
        Ok(self.packages.by_destination(destination).await?)
    }

    async fn create(&self, draft: &PackageDraft) -> Result<Package, ApplicationError> {
        let package = self.packages.create(draft).await?;
        info!(package_id = package.id, title = %package.title, "Package created");
        Ok(package)
    }

    async fn update(&self, id: i64, draft: &PackageDraft) -> Result<Package, ApplicationError> {
        self.packages
            .update(id, draft)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Package"))
    }

    async fn delete(&self, id: i64) -> Result<(), ApplicationError> {
        const IN_USE: &str = "Cannot delete package with existing bookings";

        if self.packages.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("Package"));
        }
        if self.packages.has_bookings(id).await? {
            return Err(ApplicationError::conflict(IN_USE));
        }

        match self.packages.delete(id).await {
            Ok(true) => {
                info!(package_id = id, "Package deleted");
                Ok(())
            }
            Ok(false) => Err(ApplicationError::not_found("Package")),
            Err(RepositoryError::StillReferenced) => Err(ApplicationError::conflict(IN_USE)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Booking creation, lookup and lifecycle
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create(
        &self,
        user: &User,
        package_id: i64,
        booking_date: chrono::NaiveDate,
        guests: i64,
        rooms: i64,
    ) -> Result<BookingDetails, ApplicationError>;

    async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> Result<Page<BookingDetails>, ApplicationError>;

    /// All bookings with customer columns; admin view
    async fn list_all(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<Page<BookingDetails>, ApplicationError>;

    /// Admins see any booking, everyone else only their own
    async fn get(&self, user: &User, id: i64) -> Result<BookingDetails, ApplicationError>;

    async fn change_status(
        &self,
        user: &User,
        id: i64,
        status: BookingStatus,
    ) -> Result<BookingDetails, ApplicationError>;

    async fn cancel(&self, user: &User, id: i64) -> Result<BookingDetails, ApplicationError>;

    async fn delete(&self, user: &User, id: i64) -> Result<(), ApplicationError>;

    async fn stats(&self, user_id: i64) -> Result<UserBookingStats, ApplicationError>;
}

pub struct BookingServiceImpl {
    bookings: Arc<dyn BookingRepository>,
    packages: Arc<dyn PackageRepository>,
}

impl BookingServiceImpl {
    pub fn new(bookings: Arc<dyn BookingRepository>, packages: Arc<dyn PackageRepository>) -> Self {
        Self { bookings, packages }
    }

    fn owner_scope(user: &User) -> Option<i64> {
        if user.role.can(Capability::ManageAllBookings) {
            None
        } else {
            Some(user.id)
        }
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    async fn create(
        &self,
        user: &User,
        package_id: i64,
        booking_date: chrono::NaiveDate,
        guests: i64,
        rooms: i64,
    ) -> Result<BookingDetails, ApplicationError> {
        require(
            user.role,
            Capability::CreateBooking,
            "Access denied. You cannot create bookings.",
        )?;
        BookingPolicy::check_request(booking_date, guests, rooms, Utc::now().date_naive())?;

        let package = self
            .packages
            .find_by_id(package_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Package"))?;

        let booking = NewBooking {
            user_id: user.id,
            package_id,
            booking_date,
            guests,
            rooms,
            total_amount: BookingPolicy::total_amount(package.price, guests, rooms),
        };
        let created = self.bookings.create(&booking).await?;

        info!(
            booking_id = created.booking.id,
            user_id = user.id,
            package_id,
            total_amount = created.booking.total_amount,
            "Booking created"
        );
        Ok(created)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> Result<Page<BookingDetails>, ApplicationError> {
        let filter = BookingFilter {
            user_id: Some(user_id),
            status,
        };
        Ok(self.bookings.list(&filter, page, false).await?)
    }

    async fn list_all(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<Page<BookingDetails>, ApplicationError> {
        Ok(self.bookings.list(filter, page, true).await?)
    }

    async fn get(&self, user: &User, id: i64) -> Result<BookingDetails, ApplicationError> {
        self.bookings
            .find_details(id, Self::owner_scope(user))
            .await?
            .ok_or_else(|| ApplicationError::not_found("Booking"))
    }

    async fn change_status(
        &self,
        user: &User,
        id: i64,
        status: BookingStatus,
    ) -> Result<BookingDetails, ApplicationError> {
        let booking = self
            .bookings
            .find_details(id, Self::owner_scope(user))
            .await?
            .ok_or_else(|| ApplicationError::not_found("Booking"))?
            .booking;

        let next = match decide_status_change(user.role, booking.status, status)? {
            StatusChangeDecision::Allowed(next) => next,
            StatusChangeDecision::Forbidden => {
                let message = match status {
                    BookingStatus::Confirmed => "Only admins can confirm bookings",
                    _ => "Only admins can reopen bookings",
                };
                return Err(ApplicationError::forbidden(message));
            }
        };

        if !self.bookings.update_status(id, booking.status, next).await? {
            return Err(ApplicationError::conflict(
                "Booking status was changed by another request",
            ));
        }

        info!(
            booking_id = id,
            from = %booking.status,
            to = %next,
            by = user.id,
            "Booking status changed"
        );

        self.bookings
            .find_details(id, None)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Booking"))
    }

    async fn cancel(&self, user: &User, id: i64) -> Result<BookingDetails, ApplicationError> {
        self.change_status(user, id, BookingStatus::Cancelled).await
    }

    async fn delete(&self, user: &User, id: i64) -> Result<(), ApplicationError> {
        require(
            user.role,
            Capability::ManageAllBookings,
            "Access denied. Admin privileges required.",
        )?;
        if !self.bookings.delete(id).await? {
            return Err(ApplicationError::not_found("Booking"));
        }
        info!(booking_id = id, by = user.id, "Booking deleted");
        Ok(())
    }

    async fn stats(&self, user_id: i64) -> Result<UserBookingStats, ApplicationError> {
        Ok(self.bookings.user_stats(user_id).await?)
    }
}

/// Reviews and the package rating aggregate
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn create(
        &self,
        user: &User,
        package_id: i64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<ReviewDetails, ApplicationError>;

    async fn for_package(
        &self,
        package_id: i64,
        page: PageRequest,
    ) -> Result<PackageReviews, ApplicationError>;

    async fn for_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, ApplicationError>;

    async fn recent(&self, limit: i64) -> Result<Vec<ReviewDetails>, ApplicationError>;

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: &ReviewChanges,
    ) -> Result<ReviewDetails, ApplicationError>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<(), ApplicationError>;
}

pub struct ReviewServiceImpl {
    reviews: Arc<dyn ReviewRepository>,
    packages: Arc<dyn PackageRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReviewServiceImpl {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        packages: Arc<dyn PackageRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            reviews,
            packages,
            bookings,
        }
    }
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    async fn create(
        &self,
        user: &User,
        package_id: i64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<ReviewDetails, ApplicationError> {
        const ALREADY: &str = "You have already reviewed this package";

        require(
            user.role,
            Capability::WriteReview,
            "Access denied. You cannot write reviews.",
        )?;
        check_rating(rating)?;

        if self.packages.find_by_id(package_id).await?.is_none() {
            return Err(ApplicationError::not_found("Package"));
        }
        if self.reviews.exists_for(user.id, package_id).await? {
            return Err(ApplicationError::conflict(ALREADY));
        }
        if !self.bookings.has_confirmed(user.id, package_id).await? {
            return Err(ApplicationError::forbidden(
                "You can only review packages you have booked and completed",
            ));
        }

        let review = self
            .reviews
            .create(user.id, package_id, rating, comment)
            .await
            .map_err(duplicate_as(ALREADY))?;

        info!(
            review_id = review.review.id,
            user_id = user.id,
            package_id,
            rating,
            "Review created"
        );
        Ok(review)
    }

    async fn for_package(
        &self,
        package_id: i64,
        page: PageRequest,
    ) -> Result<PackageReviews, ApplicationError> {
        if self.packages.find_by_id(package_id).await?.is_none() {
            return Err(ApplicationError::not_found("Package"));
        }

        let reviews = self.reviews.list_for_package(package_id, page).await?;
        let summary = self.reviews.rating_summary(package_id).await?;
        Ok(PackageReviews { reviews, summary })
    }

    async fn for_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<ReviewDetails>, ApplicationError> {
        Ok(self.reviews.list_for_user(user_id, page).await?)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ReviewDetails>, ApplicationError> {
        check_showcase_limit(limit)?;
        Ok(self.reviews.recent(limit).await?)
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: &ReviewChanges,
    ) -> Result<ReviewDetails, ApplicationError> {
        if changes.is_empty() {
            return Err(ApplicationError::validation("No fields to update"));
        }
        if let Some(rating) = changes.rating {
            check_rating(rating)?;
        }

        let review = self
            .reviews
            .update(id, user_id, changes)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Review"))?;

        debug!(review_id = id, user_id, "Review updated");
        Ok(review)
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<(), ApplicationError> {
        if !self.reviews.delete(id, user_id).await? {
            return Err(ApplicationError::not_found("Review"));
        }
        debug!(review_id = id, user_id, "Review deleted");
        Ok(())
    }
}

/// Admin console: accounts and the dashboard
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_users(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApplicationError>;

    async fn change_role(&self, user_id: i64, role: Role) -> Result<(), ApplicationError>;

    async fn delete_user(&self, user_id: i64) -> Result<(), ApplicationError>;

    /// Fresh aggregate view; recent contacts degrade to empty on failure
    async fn dashboard(&self) -> Result<Dashboard, ApplicationError>;
}

pub struct AdminServiceImpl {
    users: Arc<dyn UserRepository>,
    packages: Arc<dyn PackageRepository>,
    bookings: Arc<dyn BookingRepository>,
    contacts: Arc<dyn BookingContactRepository>,
}

impl AdminServiceImpl {
    pub fn new(
        users: Arc<dyn UserRepository>,
        packages: Arc<dyn PackageRepository>,
        bookings: Arc<dyn BookingRepository>,
        contacts: Arc<dyn BookingContactRepository>,
    ) -> Self {
        Self {
            users,
            packages,
            bookings,
            contacts,
        }
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn list_users(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApplicationError> {
        Ok(self.users.list(search, page).await?)
    }

    async fn change_role(&self, user_id: i64, role: Role) -> Result<(), ApplicationError> {
        if !self.users.update_role(user_id, role).await? {
            return Err(ApplicationError::not_found("User"));
        }
        info!(user_id, role = %role, "User role updated");
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApplicationError> {
        const HAS_BOOKINGS: &str = "Cannot delete user with existing bookings";

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User"))?;

        if user.role == Role::Admin {
            return Err(ApplicationError::forbidden("Cannot delete admin users"));
        }
        if self.bookings.count_for_user(user_id).await? > 0 {
            return Err(ApplicationError::conflict(HAS_BOOKINGS));
        }

        match self.users.delete(user_id).await {
            Ok(true) => {
                info!(user_id, "User deleted");
                Ok(())
            }
            Ok(false) => Err(ApplicationError::not_found("User")),
            Err(RepositoryError::StillReferenced) => Err(ApplicationError::conflict(HAS_BOOKINGS)),
            Err(e) => Err(e.into()),
        }
    }

    async fn dashboard(&self) -> Result<Dashboard, ApplicationError> {
        let stats = DashboardTotals {
            total_users: self.users.count_with_role(Role::User).await?,
            total_packages: self.packages.count().await?,
            total_bookings: self.bookings.count().await?,
            total_revenue: self.bookings.confirmed_revenue().await?,
        };

        let recent_bookings = self.bookings.recent(DASHBOARD_PANEL_SIZE).await?;
        let popular_packages = self.packages.popular(DASHBOARD_PANEL_SIZE).await?;
        let status_distribution = self.bookings.status_distribution().await?;

        let recent_contacts = match self.contacts.recent(DASHBOARD_PANEL_SIZE).await {
            Ok(contacts) => contacts,
            Err(e) => {
                warn!(error = %e, "Failed to load recent booking contacts");
                Vec::new()
            }
        };

        Ok(Dashboard {
            stats,
            recent_bookings,
            popular_packages,
            status_distribution,
            recent_contacts,
        })
    }
}

/// Public lead capture and the contact form
#[async_trait]
pub trait ContactService: Send + Sync {
    async fn capture_lead(
        &self,
        contact: &NewBookingContact,
    ) -> Result<BookingContact, ApplicationError>;

    async fn list_leads(&self) -> Result<Vec<BookingContact>, ApplicationError>;

    async fn update_lead_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<(), ApplicationError>;

    async fn delete_lead(&self, id: i64) -> Result<(), ApplicationError>;

    /// Acknowledge a contact-form message. Messages are logged, not stored.
    async fn submit_message(&self, message: &ContactMessage) -> Result<(), ApplicationError>;
}

pub struct ContactServiceImpl {
    contacts: Arc<dyn BookingContactRepository>,
}

impl ContactServiceImpl {
    pub fn new(contacts: Arc<dyn BookingContactRepository>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn capture_lead(
        &self,
        contact: &NewBookingContact,
    ) -> Result<BookingContact, ApplicationError> {
        let created = self.contacts.create(contact).await?;
        info!(
            contact_id = created.id,
            name = %created.name,
            email = %created.email,
            phone = %created.phone,
            booking_date = %created.booking_date,
            "Booking contact captured"
        );
        Ok(created)
    }

    async fn list_leads(&self) -> Result<Vec<BookingContact>, ApplicationError> {
        Ok(self.contacts.list_all().await?)
    }

    async fn update_lead_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<(), ApplicationError> {
        if !self.contacts.update_status(id, status).await? {
            return Err(ApplicationError::not_found("Booking contact"));
        }
        Ok(())
    }

    async fn delete_lead(&self, id: i64) -> Result<(), ApplicationError> {
        if !self.contacts.delete(id).await? {
            return Err(ApplicationError::not_found("Booking contact"));
        }
        Ok(())
    }

    async fn submit_message(&self, message: &ContactMessage) -> Result<(), ApplicationError> {
        info!(
            name = %message.name,
            email = %message.email,
            subject = %message.subject,
            message = %message.message,
            "Contact form submission"
        );
        Ok(())
    }
}
