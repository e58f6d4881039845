pub mod filter;
pub mod service;
pub mod summary;

pub use filter::FilterCriteria;
pub use service::{browse, load_dashboard, Dashboard};
pub use summary::{DashboardFilter, PeriodFilter};
