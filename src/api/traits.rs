use async_trait::async_trait;

use super::error::ApiError;
use crate::listings::FilterCriteria;
use crate::models::{AvailableOptions, Property, Status};

/// Read access to published listings.
/// The backend may honour only part of the criteria, callers filter again locally.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch every listing matching the server-side subset of `criteria`
    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<Property>, ApiError>;

    /// Fetch a single listing by its identifier
    async fn get(&self, uid: &str) -> Result<Property, ApiError>;
}

/// Operator-only listing management; every call needs a session
#[async_trait]
pub trait ListingAdmin: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, ApiError>;

    async fn update(&self, uid: &str, property: &Property) -> Result<Property, ApiError>;

    async fn delete(&self, uid: &str) -> Result<(), ApiError>;

    async fn change_status(&self, uid: &str, status: Status) -> Result<Property, ApiError>;

    async fn available_options(&self) -> Result<AvailableOptions, ApiError>;

    /// Upload a photo for a listing, returning its public URL
    async fn upload_image(
        &self,
        uid: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError>;

    async fn delete_image(&self, url: &str) -> Result<(), ApiError>;
}
