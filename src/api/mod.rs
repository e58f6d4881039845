pub mod client;
pub mod error;
pub mod session;
pub mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::SessionStore;
pub use traits::{ListingAdmin, ListingSource};
