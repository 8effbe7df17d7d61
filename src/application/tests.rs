// Service tests against a private in-memory store
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::application::{
    AdminService, AdminServiceImpl, ApplicationError, AuthError, AuthService, AuthServiceImpl,
    BookingService, BookingServiceImpl, ContactService, ContactServiceImpl, PackageService,
    PackageServiceImpl, ReviewService, ReviewServiceImpl,
};
use crate::config::Config;
use crate::domain::{
    BookingStatus, DomainError, NewBookingContact, Package, PackageDraft, PageRequest,
    ReviewChanges, Role, User,
};
use crate::infrastructure::{
    Database, PasswordHasher, SqliteBookingContactRepository, SqliteBookingRepository,
    SqlitePackageRepository, SqliteReviewRepository, SqliteUserRepository, TokenService,
    UserRepository,
};

struct Fixture {
    users: Arc<SqliteUserRepository>,
    auth: AuthServiceImpl,
    packages: PackageServiceImpl,
    bookings: BookingServiceImpl,
    reviews: ReviewServiceImpl,
    admin: AdminServiceImpl,
    contacts: ContactServiceImpl,
}

async fn fixture() -> Fixture {
    let config = Config::for_tests();
    let db = Database::connect(&config.database).await.unwrap();
    db.migrate().await.unwrap();

    let pool = db.pool().clone();
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let package_repo = Arc::new(SqlitePackageRepository::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(pool.clone()));
    let review_repo = Arc::new(SqliteReviewRepository::new(pool.clone()));
    let contact_repo = Arc::new(SqliteBookingContactRepository::new(pool));

    Fixture {
        auth: AuthServiceImpl::new(
            users.clone(),
            PasswordHasher::new(config.auth.bcrypt_cost),
            TokenService::from_config(&config.auth).unwrap(),
        ),
        packages: PackageServiceImpl::new(package_repo.clone(), review_repo.clone()),
        bookings: BookingServiceImpl::new(booking_repo.clone(), package_repo.clone()),
        reviews: ReviewServiceImpl::new(review_repo, package_repo.clone(), booking_repo.clone()),
        admin: AdminServiceImpl::new(
            users.clone(),
            package_repo,
            booking_repo,
            contact_repo.clone(),
        ),
        contacts: ContactServiceImpl::new(contact_repo),
        users,
    }
}

impl Fixture {
    async fn user(&self, name: &str, role: Role) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        self.users.create(name, &email, "unused", role).await.unwrap()
    }

    async fn package(&self, price: f64) -> Package {
        self.packages
            .create(&PackageDraft {
                title: "Lisbon Weekend".to_string(),
                destination: "Portugal".to_string(),
                description: "Trams, tiles and custard tarts by the river.".to_string(),
                price,
                duration: "3 days".to_string(),
                image_url: None,
            })
            .await
            .unwrap()
    }
}

fn next_month() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(30)
}

#[tokio::test]
async fn register_twice_is_conflict() {
    let f = fixture().await;
    let session = f
        .auth
        .register("Jane Doe", "jane@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(session.user.role, Role::User);
    assert!(!session.token.is_empty());

    let err = f
        .auth
        .register("Jane Again", "jane@example.com", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict { .. }));
}

#[tokio::test]
async fn login_checks_password_and_token_resolves_user() {
    let f = fixture().await;
    f.auth
        .register("Sam Lee", "sam@example.com", "secret1")
        .await
        .unwrap();

    let err = f.auth.login("sam@example.com", "wrong!").await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Auth(AuthError::InvalidCredentials)
    ));

    let session = f.auth.login("sam@example.com", "secret1").await.unwrap();
    let user = f.auth.authenticate(&session.token).await.unwrap();
    assert_eq!(user.name, "Sam Lee");

    f.users.delete(user.id).await.unwrap();
    let err = f.auth.authenticate(&session.token).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Auth(AuthError::UnknownUser)));
}

#[tokio::test]
async fn change_password_requires_current_password() {
    let f = fixture().await;
    let session = f
        .auth
        .register("Ana Ruiz", "ana@example.com", "secret1")
        .await
        .unwrap();

    let err = f
        .auth
        .change_password(session.user.id, "nope", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized { .. }));

    f.auth
        .change_password(session.user.id, "secret1", "secret2")
        .await
        .unwrap();
    assert!(f.auth.login("ana@example.com", "secret2").await.is_ok());
}

#[tokio::test]
async fn profile_email_must_be_free() {
    let f = fixture().await;
    let a = f.user("Alice", Role::User).await;
    f.user("Bob", Role::User).await;

    let err = f
        .auth
        .update_profile(a.id, "Alice", "bob@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict { .. }));

    let updated = f
        .auth
        .update_profile(a.id, "Alice Smith", "alice@example.com")
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice Smith");
}

#[tokio::test]
async fn booking_total_is_fixed_at_creation() {
    let f = fixture().await;
    let user = f.user("Alice", Role::User).await;
    let package = f.package(100.0).await;

    let booking = f
        .bookings
        .create(&user, package.id, next_month(), 2, 1)
        .await
        .unwrap();
    assert_eq!(booking.booking.total_amount, 200.0);
    assert_eq!(booking.booking.status, BookingStatus::Pending);
    assert_eq!(booking.package_title, "Lisbon Weekend");

    let draft = PackageDraft {
        title: package.title.clone(),
        destination: package.destination.clone(),
        description: "Trams, tiles and custard tarts by the river.".to_string(),
        price: 500.0,
        duration: "3 days".to_string(),
        image_url: None,
    };
    f.packages.update(package.id, &draft).await.unwrap();

    let reloaded = f.bookings.get(&user, booking.booking.id).await.unwrap();
    assert_eq!(reloaded.booking.total_amount, 200.0);
    assert_eq!(reloaded.price, Some(500.0));
}

#[tokio::test]
async fn booking_rejects_bad_requests() {
    let f = fixture().await;
    let user = f.user("Alice", Role::User).await;
    let package = f.package(100.0).await;

    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let err = f
        .bookings
        .create(&user, package.id, yesterday, 1, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidInput { .. })));

    let err = f
        .bookings
        .create(&user, package.id, next_month(), 11, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));

    let err = f
        .bookings
        .create(&user, 9999, next_month(), 1, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[tokio::test]
async fn only_admin_confirms_and_cancel_is_terminal() {
    let f = fixture().await;
    let user = f.user("Alice", Role::User).await;
    let admin = f.user("Root", Role::Admin).await;
    let package = f.package(100.0).await;
    let id = f
        .bookings
        .create(&user, package.id, next_month(), 1, 1)
        .await
        .unwrap()
        .booking
        .id;

    let err = f
        .bookings
        .change_status(&user, id, BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden { .. }));

    let confirmed = f
        .bookings
        .change_status(&admin, id, BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);

    f.bookings.cancel(&user, id).await.unwrap();
    let err = f.bookings.cancel(&user, id).await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::AlreadyCancelled)
    ));
}

#[tokio::test]
async fn other_users_bookings_are_hidden() {
    let f = fixture().await;
    let alice = f.user("Alice", Role::User).await;
    let bob = f.user("Bob", Role::User).await;
    let package = f.package(100.0).await;
    let id = f
        .bookings
        .create(&alice, package.id, next_month(), 1, 1)
        .await
        .unwrap()
        .booking
        .id;

    assert!(matches!(
        f.bookings.get(&bob, id).await.unwrap_err(),
        ApplicationError::NotFound { .. }
    ));
    assert!(matches!(
        f.bookings.cancel(&bob, id).await.unwrap_err(),
        ApplicationError::NotFound { .. }
    ));
}

#[tokio::test]
async fn review_lifecycle_keeps_rating_in_sync() {
    let f = fixture().await;
    let admin = f.user("Root", Role::Admin).await;
    let alice = f.user("Alice", Role::User).await;
    let bob = f.user("Bob", Role::User).await;
    let package = f.package(100.0).await;

    let err = f
        .reviews
        .create(&alice, package.id, 5, Some("Lovely trip all round"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden { .. }));

    for user in [&alice, &bob] {
        let id = f
            .bookings
            .create(user, package.id, next_month(), 1, 1)
            .await
            .unwrap()
            .booking
            .id;
        f.bookings
            .change_status(&admin, id, BookingStatus::Confirmed)
            .await
            .unwrap();
    }

    let review = f
        .reviews
        .create(&alice, package.id, 5, Some("Lovely trip all round"))
        .await
        .unwrap();
    assert_eq!(review.user_name.as_deref(), Some("Alice"));

    let err = f
        .reviews
        .create(&alice, package.id, 4, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict { .. }));

    let bobs = f
        .reviews
        .create(&bob, package.id, 2, Some("Too much walking for me"))
        .await
        .unwrap();

    let details = f.packages.details(package.id).await.unwrap();
    assert_eq!(details.package.total_reviews, 2);
    assert!((details.package.rating - 3.5).abs() < f64::EPSILON);
    assert_eq!(details.reviews.len(), 2);

    f.reviews
        .update(
            bob.id,
            bobs.review.id,
            &ReviewChanges {
                rating: Some(4),
                comment: None,
            },
        )
        .await
        .unwrap();
    let package_now = f.packages.details(package.id).await.unwrap().package;
    assert!((package_now.rating - 4.5).abs() < f64::EPSILON);

    // someone else's review is invisible
    let err = f
        .reviews
        .delete(alice.id, bobs.review.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));

    f.reviews.delete(bob.id, bobs.review.id).await.unwrap();
    let listing = f
        .reviews
        .for_package(package.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listing.summary.total_reviews, 1);
    assert!((listing.summary.rating - 5.0).abs() < f64::EPSILON);

    let package_now = f.packages.details(package.id).await.unwrap().package;
    assert_eq!(package_now.total_reviews, 1);
    assert!((package_now.rating - 5.0).abs() < f64::EPSILON);

    // removing the last review resets the cached aggregate
    f.reviews.delete(alice.id, review.review.id).await.unwrap();
    let package_now = f.packages.details(package.id).await.unwrap().package;
    assert_eq!(package_now.total_reviews, 0);
    assert!(package_now.rating.abs() < f64::EPSILON);
}

#[tokio::test]
async fn review_update_needs_a_field() {
    let f = fixture().await;
    let alice = f.user("Alice", Role::User).await;
    let err = f
        .reviews
        .update(alice.id, 1, &ReviewChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation { .. }));

    let err = f
        .reviews
        .update(
            alice.id,
            1,
            &ReviewChanges {
                rating: Some(9),
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
}

#[tokio::test]
async fn package_with_bookings_cannot_be_deleted() {
    let f = fixture().await;
    let alice = f.user("Alice", Role::User).await;
    let booked = f.package(100.0).await;
    let spare = f.package(50.0).await;
    f.bookings
        .create(&alice, booked.id, next_month(), 1, 1)
        .await
        .unwrap();

    let err = f.packages.delete(booked.id).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict { .. }));
    assert!(f.packages.details(booked.id).await.is_ok());

    f.packages.delete(spare.id).await.unwrap();
    assert!(matches!(
        f.packages.details(spare.id).await.unwrap_err(),
        ApplicationError::NotFound { .. }
    ));
}

#[tokio::test]
async fn admin_user_management_rules() {
    let f = fixture().await;
    let admin = f.user("Root", Role::Admin).await;
    let alice = f.user("Alice", Role::User).await;
    let bob = f.user("Bob", Role::User).await;
    let package = f.package(100.0).await;
    f.bookings
        .create(&alice, package.id, next_month(), 1, 1)
        .await
        .unwrap();

    assert!(matches!(
        f.admin.delete_user(admin.id).await.unwrap_err(),
        ApplicationError::Forbidden { .. }
    ));
    assert!(matches!(
        f.admin.delete_user(alice.id).await.unwrap_err(),
        ApplicationError::Conflict { .. }
    ));
    f.admin.delete_user(bob.id).await.unwrap();

    f.admin.change_role(alice.id, Role::Admin).await.unwrap();
    assert_eq!(f.auth.profile(alice.id).await.unwrap().role, Role::Admin);

    let page = f
        .admin
        .list_users(Some("ali"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].total_bookings, 1);
}

#[tokio::test]
async fn dashboard_aggregates() {
    let f = fixture().await;
    let admin = f.user("Root", Role::Admin).await;
    let alice = f.user("Alice", Role::User).await;
    let package = f.package(150.0).await;

    let first = f
        .bookings
        .create(&alice, package.id, next_month(), 2, 1)
        .await
        .unwrap();
    f.bookings
        .create(&alice, package.id, next_month(), 1, 1)
        .await
        .unwrap();
    f.bookings
        .change_status(&admin, first.booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    f.contacts
        .capture_lead(&NewBookingContact {
            name: "Lead".to_string(),
            email: "lead@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            booking_date: next_month(),
        })
        .await
        .unwrap();

    let dashboard = f.admin.dashboard().await.unwrap();
    assert_eq!(dashboard.stats.total_users, 1);
    assert_eq!(dashboard.stats.total_packages, 1);
    assert_eq!(dashboard.stats.total_bookings, 2);
    assert_eq!(dashboard.stats.total_revenue, 300.0);
    assert_eq!(dashboard.recent_bookings.len(), 2);
    assert_eq!(dashboard.popular_packages[0].booking_count, 2);
    assert_eq!(dashboard.status_distribution.len(), 2);
    assert_eq!(dashboard.recent_contacts.len(), 1);

    let stats = f.bookings.stats(alice.id).await.unwrap();
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.confirmed_bookings, 1);
    assert_eq!(stats.pending_bookings, 1);
}

#[tokio::test]
async fn lead_status_and_delete() {
    let f = fixture().await;
    let lead = f
        .contacts
        .capture_lead(&NewBookingContact {
            name: "Lead".to_string(),
            email: "lead@example.com".to_string(),
            phone: "555".to_string(),
            booking_date: next_month(),
        })
        .await
        .unwrap();
    assert_eq!(lead.status, BookingStatus::Pending);

    f.contacts
        .update_lead_status(lead.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(
        f.contacts.list_leads().await.unwrap()[0].status,
        BookingStatus::Confirmed
    );

    f.contacts.delete_lead(lead.id).await.unwrap();
    assert!(matches!(
        f.contacts.delete_lead(lead.id).await.unwrap_err(),
        ApplicationError::NotFound { .. }
    ));
}
