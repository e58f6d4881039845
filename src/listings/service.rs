use serde::Serialize;
use tracing::info;

use super::filter::{filter_properties, FilterCriteria};
use super::summary::{
    distinct_cities, distinct_neighborhoods, distinct_states, summarize_portfolio, DashboardFilter,
    PortfolioSnapshot,
};
use crate::api::{ApiError, ListingSource};
use crate::models::Property;

/// Everything the administrative dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub snapshot: PortfolioSnapshot,
    pub properties: Vec<Property>,
    /// Selection options, taken from the unfiltered portfolio
    pub cities: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub states: Vec<String>,
}

/// Public listing page: fetch with the criteria, then apply them locally
/// in case the backend ignored some of them.
pub async fn browse(
    source: &dyn ListingSource,
    criteria: &FilterCriteria,
) -> Result<Vec<Property>, ApiError> {
    let fetched = source.list(criteria).await?;
    let properties = filter_properties(&fetched, criteria);

    info!("{} of {} fetched properties match", properties.len(), fetched.len());
    Ok(properties)
}

/// Fetch the whole portfolio and summarize the part selected by `filter`
pub async fn load_dashboard(
    source: &dyn ListingSource,
    filter: &DashboardFilter,
) -> Result<Dashboard, ApiError> {
    let all = source.list(&FilterCriteria::default()).await?;
    let properties = filter.apply(&all);

    Ok(Dashboard {
        snapshot: summarize_portfolio(&properties),
        cities: distinct_cities(&all),
        neighborhoods: distinct_neighborhoods(&all),
        states: distinct_states(&all),
        properties,
    })
}
