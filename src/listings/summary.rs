use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::filter::text_matches;
use crate::models::{Category, Property, Status};

/// Restricts the dashboard to listings last updated in a given period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeriodFilter {
    #[default]
    All,
    Yearly {
        year: i32,
    },
    Monthly {
        year: i32,
        month: u32,
    },
}

impl PeriodFilter {
    /// Records without a last-update time never match an active period
    pub fn contains(&self, updated_at: Option<NaiveDateTime>) -> bool {
        match (self, updated_at) {
            (PeriodFilter::All, _) => true,
            (_, None) => false,
            (PeriodFilter::Yearly { year }, Some(at)) => at.year() == *year,
            (PeriodFilter::Monthly { year, month }, Some(at)) => {
                at.year() == *year && at.month() == *month
            }
        }
    }
}

/// Constraints selectable on the administrative dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub period: PeriodFilter,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub status: Option<Status>,
}

impl DashboardFilter {
    pub fn matches(&self, property: &Property) -> bool {
        text_matches(self.city.as_deref(), &property.address.city)
            && text_matches(self.neighborhood.as_deref(), &property.address.neighborhood)
            && self.status.map_or(true, |s| property.status() == s)
            && self.period.contains(property.updated_at)
    }

    pub fn apply(&self, records: &[Property]) -> Vec<Property> {
        records.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Summary counts and totals for the dashboard
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PortfolioSnapshot {
    pub total: usize,
    pub available: usize,
    pub sold: usize,
    pub rented: usize,
    pub reserved: usize,
    /// Sum of prices of sold listings in the sale category
    pub total_sold_sale_value: f64,
}

pub fn summarize_portfolio(records: &[Property]) -> PortfolioSnapshot {
    let mut snapshot = PortfolioSnapshot {
        total: records.len(),
        ..Default::default()
    };

    for property in records {
        match property.status() {
            Status::Available => snapshot.available += 1,
            Status::Sold => {
                snapshot.sold += 1;
                if property.category == Category::Sale {
                    snapshot.total_sold_sale_value += property.price;
                }
            }
            Status::Rented => snapshot.rented += 1,
            Status::Reserved => snapshot.reserved += 1,
        }
    }

    debug!(?snapshot, "Summarized portfolio");
    snapshot
}

pub fn distinct_cities(records: &[Property]) -> Vec<String> {
    distinct(records, |p| &p.address.city)
}

pub fn distinct_neighborhoods(records: &[Property]) -> Vec<String> {
    distinct(records, |p| &p.address.neighborhood)
}

pub fn distinct_states(records: &[Property]) -> Vec<String> {
    distinct(records, |p| &p.address.state)
}

/// Sorted, de-duplicated values; blanks are skipped since they cannot be selected
fn distinct<F>(records: &[Property], field: F) -> Vec<String>
where
    F: Fn(&Property) -> &String,
{
    records
        .iter()
        .map(field)
        .filter(|v| !v.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
