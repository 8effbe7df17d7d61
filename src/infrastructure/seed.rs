//! Startup data: the admin account and a starter catalogue

use tracing::info;

use crate::application::errors::ApplicationError;
use crate::config::SeedConfig;
use crate::domain::{PackageDraft, Role};

use super::auth::PasswordHasher;
use super::repositories::{PackageRepository, UserRepository};

struct SamplePackage {
    title: &'static str,
    destination: &'static str,
    description: &'static str,
    price: f64,
    duration: &'static str,
    image_url: &'static str,
}

const SAMPLE_PACKAGES: [SamplePackage; 6] = [
    SamplePackage {
        title: "Italian Adventure",
        destination: "Italy",
        description: "Explore the beautiful cities of Rome, Florence, and Venice with guided tours and authentic experiences.",
        price: 2400.0,
        duration: "7 days",
        image_url: "/uploads/italy.jpg",
    },
    SamplePackage {
        title: "Mexican Beach Getaway",
        destination: "Mexico",
        description: "Discover ancient ruins and pristine beaches with all-inclusive luxury accommodations.",
        price: 980.0,
        duration: "5 days",
        image_url: "/uploads/mexico.jpg",
    },
    SamplePackage {
        title: "French Romance",
        destination: "France",
        description: "Experience the romance of Paris and French countryside with wine tasting and cultural tours.",
        price: 1200.0,
        duration: "6 days",
        image_url: "/uploads/france.jpg",
    },
    SamplePackage {
        title: "Turkish Delight",
        destination: "Turkey",
        description: "Visit historic Istanbul and stunning Cappadocia with hot air balloon rides.",
        price: 500.0,
        duration: "4 days",
        image_url: "/uploads/turkey.jpg",
    },
    SamplePackage {
        title: "Indian Heritage",
        destination: "India",
        description: "Journey through diverse cultures and landscapes from the Taj Mahal to the Himalayas.",
        price: 800.0,
        duration: "8 days",
        image_url: "/uploads/india.jpg",
    },
    SamplePackage {
        title: "Spanish Fiesta",
        destination: "Spain",
        description: "Enjoy vibrant cities and Mediterranean coast with flamenco shows and tapas tours.",
        price: 1999.0,
        duration: "9 days",
        image_url: "/uploads/spain.jpg",
    },
];

/// Create the configured admin if its email is free, and the sample
/// packages if the catalogue is empty.
pub async fn seed(
    config: &SeedConfig,
    users: &dyn UserRepository,
    packages: &dyn PackageRepository,
    hasher: &PasswordHasher,
) -> Result<(), ApplicationError> {
    if !users.email_in_use(&config.admin_email, None).await? {
        let hash = hasher.hash(&config.admin_password).await?;
        users
            .create(&config.admin_name, &config.admin_email, &hash, Role::Admin)
            .await?;
        info!(email = %config.admin_email, "Admin user created");
    }

    if config.sample_packages && packages.count().await? == 0 {
        for sample in &SAMPLE_PACKAGES {
            let draft = PackageDraft {
                title: sample.title.to_string(),
                destination: sample.destination.to_string(),
                description: sample.description.to_string(),
                price: sample.price,
                duration: sample.duration.to_string(),
                image_url: Some(sample.image_url.to_string()),
            };
            packages.create(&draft).await?;
        }
        info!(count = SAMPLE_PACKAGES.len(), "Sample packages created");
    }

    Ok(())
}
