use serde::Serialize;
use tracing::debug;

use crate::models::{Category, Property, PropertyType, Status};

/// Criteria for narrowing down a set of listings.
///
/// Every field is optional and an unset field imposes no constraint.
/// Blank text fields count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact property type
    pub property_type: Option<PropertyType>,
    /// Exact listing category
    pub category: Option<Category>,
    /// Exact status; unset means every status is shown
    pub status: Option<Status>,
    /// City, case-insensitive
    pub city: Option<String>,
    /// State, case-insensitive
    pub state: Option<String>,
    /// Neighborhood, case-insensitive
    pub neighborhood: Option<String>,
    /// Minimum price (inclusive)
    pub min_price: Option<f64>,
    /// Maximum price (inclusive)
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub min_parking_spaces: Option<u32>,
    /// Minimum floor area in square meters
    pub min_area: Option<f64>,
    pub accepts_financing: Option<bool>,
    pub accepts_trade_in: Option<bool>,
}

impl FilterCriteria {
    /// Criteria for the public listing page.
    ///
    /// Unless closed listings are requested, only available ones are shown.
    /// An explicitly chosen status always wins.
    pub fn for_public_listing(mut self, show_closed: bool) -> Self {
        if self.status.is_none() && !show_closed {
            self.status = Some(Status::Available);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }

    /// Whether a single record satisfies every constraint that is set
    pub fn matches(&self, property: &Property) -> bool {
        self.property_type
            .map_or(true, |t| property.property_type == t)
            && self.category.map_or(true, |c| property.category == c)
            && self.status.map_or(true, |s| property.status() == s)
            && text_matches(self.city.as_deref(), &property.address.city)
            && text_matches(self.state.as_deref(), &property.address.state)
            && text_matches(self.neighborhood.as_deref(), &property.address.neighborhood)
            && self.min_price.map_or(true, |min| property.price >= min)
            && self.max_price.map_or(true, |max| property.price <= max)
            && self.min_bedrooms.map_or(true, |min| property.bedrooms >= min)
            && self.min_bathrooms.map_or(true, |min| property.bathrooms >= min)
            && self
                .min_parking_spaces
                .map_or(true, |min| property.parking_spaces >= min)
            && self.min_area.map_or(true, |min| property.area >= min)
            && self
                .accepts_financing
                .map_or(true, |v| property.accepts_financing == v)
            && self
                .accepts_trade_in
                .map_or(true, |v| property.accepts_trade_in == v)
    }

    /// Query parameters for the server-side listing endpoint, unset fields omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(t) = self.property_type {
            pairs.push(("tipo", wire_name(&t)));
        }
        if let Some(c) = self.category {
            pairs.push(("categoria", wire_name(&c)));
        }
        if let Some(s) = self.status {
            pairs.push(("status", wire_name(&s)));
        }
        if let Some(v) = non_blank(self.city.as_deref()) {
            pairs.push(("cidade", v.to_string()));
        }
        if let Some(v) = non_blank(self.state.as_deref()) {
            pairs.push(("estado", v.to_string()));
        }
        if let Some(v) = non_blank(self.neighborhood.as_deref()) {
            pairs.push(("bairro", v.to_string()));
        }
        if let Some(v) = self.min_price {
            pairs.push(("valorMin", v.to_string()));
        }
        if let Some(v) = self.max_price {
            pairs.push(("valorMax", v.to_string()));
        }
        if let Some(v) = self.min_bedrooms {
            pairs.push(("quartosMin", v.to_string()));
        }
        if let Some(v) = self.min_bathrooms {
            pairs.push(("banheirosMin", v.to_string()));
        }
        if let Some(v) = self.min_parking_spaces {
            pairs.push(("vagasMin", v.to_string()));
        }
        if let Some(v) = self.min_area {
            pairs.push(("areaMin", v.to_string()));
        }
        if let Some(v) = self.accepts_financing {
            pairs.push(("aceitaFinanciamento", v.to_string()));
        }
        if let Some(v) = self.accepts_trade_in {
            pairs.push(("aceitaPermuta", v.to_string()));
        }

        pairs
    }
}

/// Keep the records matching every set criterion, preserving input order
pub fn filter_properties(records: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    let matched: Vec<Property> = records
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();

    debug!("Filter kept {} of {} properties", matched.len(), records.len());
    matched
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive exact match; no trimming or accent folding
pub(crate) fn text_matches(wanted: Option<&str>, actual: &str) -> bool {
    match non_blank(wanted) {
        Some(wanted) => wanted.to_lowercase() == actual.to_lowercase(),
        None => true,
    }
}

fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn property(city: &str, bedrooms: u32, price: f64) -> Property {
        Property {
            title: format!("{} {}", city, bedrooms),
            address: Address {
                city: city.to_string(),
                neighborhood: "Centro".to_string(),
                state: "SP".to_string(),
            },
            bedrooms,
            price,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Property> {
        let mut records = vec![
            property("Francisco Morato", 1, 150_000.0),
            property("Francisco Morato", 3, 320_000.0),
            property("Other", 3, 90_000.0),
            property("Jundiaí", 4, 1_500.0),
        ];
        records[1].status = Some(Status::Sold);
        records[2].accepts_financing = true;
        records[3].category = Category::Rent;
        records[3].status = Some(Status::Rented);
        records
    }

    fn is_subsequence(sub: &[Property], full: &[Property]) -> bool {
        let mut rest = full.iter();
        sub.iter().all(|item| rest.any(|candidate| candidate == item))
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let records = sample();
        let criteria = FilterCriteria::default();

        assert!(criteria.is_empty());
        assert_eq!(filter_properties(&records, &criteria), records);
    }

    #[test]
    fn test_city_and_bedrooms() {
        let records = vec![
            property("Francisco Morato", 1, 0.0),
            property("Francisco Morato", 3, 0.0),
            property("Other", 3, 0.0),
        ];
        let criteria = FilterCriteria {
            min_bedrooms: Some(2),
            city: Some("Francisco Morato".to_string()),
            ..Default::default()
        };

        let result = filter_properties(&records, &criteria);
        assert_eq!(result, vec![records[1].clone()]);
    }

    #[test]
    fn test_city_is_case_insensitive_but_exact() {
        let records = vec![
            property("Francisco Morato", 2, 0.0),
            property("Francisco Morato ", 2, 0.0),
            property("São Paulo", 2, 0.0),
        ];

        let criteria = FilterCriteria {
            city: Some("francisco morato".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_properties(&records, &criteria), vec![records[0].clone()]);

        let criteria = FilterCriteria {
            city: Some("sao paulo".to_string()),
            ..Default::default()
        };
        assert!(filter_properties(&records, &criteria).is_empty());

        let criteria = FilterCriteria {
            city: Some("SÃO PAULO".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_properties(&records, &criteria), vec![records[2].clone()]);
    }

    #[test]
    fn test_blank_text_is_no_constraint() {
        let records = sample();
        let criteria = FilterCriteria {
            neighborhood: Some(String::new()),
            ..Default::default()
        };

        assert!(criteria.is_empty());
        assert_eq!(filter_properties(&records, &criteria).len(), records.len());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let records = sample();

        let criteria = FilterCriteria {
            min_price: Some(150_000.0),
            max_price: Some(320_000.0),
            ..Default::default()
        };
        let titles: Vec<String> = filter_properties(&records, &criteria)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Francisco Morato 1", "Francisco Morato 3"]);
    }

    #[test]
    fn test_status_defaults_to_available_when_absent() {
        let records = sample();
        let criteria = FilterCriteria {
            status: Some(Status::Available),
            ..Default::default()
        };

        let result = filter_properties(&records, &criteria);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.status.is_none()));
    }

    #[test]
    fn test_boolean_flags_only_apply_when_set() {
        let records = sample();

        let financing = FilterCriteria {
            accepts_financing: Some(true),
            ..Default::default()
        };
        assert_eq!(filter_properties(&records, &financing).len(), 1);

        let no_financing = FilterCriteria {
            accepts_financing: Some(false),
            ..Default::default()
        };
        assert_eq!(filter_properties(&records, &no_financing).len(), 3);
    }

    fn titles(records: &[Property], criteria: &FilterCriteria) -> Vec<String> {
        filter_properties(records, criteria)
            .into_iter()
            .map(|p| p.title)
            .collect()
    }

    fn layout() -> Vec<Property> {
        let mut house = property("Francisco Morato", 3, 300_000.0);
        house.title = "house".to_string();
        house.property_type = PropertyType::House;
        house.category = Category::Sale;
        house.bathrooms = 2;
        house.parking_spaces = 2;
        house.accepts_trade_in = true;

        let mut flat = property("Francisco Morato", 2, 1_800.0);
        flat.title = "flat".to_string();
        flat.property_type = PropertyType::Apartment;
        flat.category = Category::Rent;
        flat.bathrooms = 1;
        flat.parking_spaces = 1;

        let mut lot = property("Francisco Morato", 0, 80_000.0);
        lot.title = "lot".to_string();
        lot.property_type = PropertyType::LandLot;
        lot.category = Category::SaleOrRent;

        vec![house, flat, lot]
    }

    #[test]
    fn test_type_and_category_are_exact() {
        let records = layout();

        let apartments = FilterCriteria {
            property_type: Some(PropertyType::Apartment),
            ..Default::default()
        };
        assert_eq!(titles(&records, &apartments), ["flat"]);

        let offices = FilterCriteria {
            property_type: Some(PropertyType::CommercialRoom),
            ..Default::default()
        };
        assert!(filter_properties(&records, &offices).is_empty());

        let for_sale = FilterCriteria {
            category: Some(Category::Sale),
            ..Default::default()
        };
        assert_eq!(titles(&records, &for_sale), ["house"]);

        // sale-or-rent is its own category, not a wildcard
        let either = FilterCriteria {
            category: Some(Category::SaleOrRent),
            ..Default::default()
        };
        assert_eq!(titles(&records, &either), ["lot"]);
    }

    #[test]
    fn test_bathroom_and_parking_minimums_are_inclusive() {
        let records = layout();

        let bathrooms = |n| FilterCriteria {
            min_bathrooms: Some(n),
            ..Default::default()
        };
        assert_eq!(titles(&records, &bathrooms(1)), ["house", "flat"]);
        assert_eq!(titles(&records, &bathrooms(2)), ["house"]);
        assert!(filter_properties(&records, &bathrooms(3)).is_empty());

        let parking = |n| FilterCriteria {
            min_parking_spaces: Some(n),
            ..Default::default()
        };
        assert_eq!(titles(&records, &parking(0)), ["house", "flat", "lot"]);
        assert_eq!(titles(&records, &parking(1)), ["house", "flat"]);
        assert_eq!(titles(&records, &parking(2)), ["house"]);
        assert!(filter_properties(&records, &parking(3)).is_empty());
    }

    #[test]
    fn test_trade_in_flag() {
        let records = layout();

        let trade_in = FilterCriteria {
            accepts_trade_in: Some(true),
            ..Default::default()
        };
        assert_eq!(titles(&records, &trade_in), ["house"]);

        let no_trade_in = FilterCriteria {
            accepts_trade_in: Some(false),
            ..Default::default()
        };
        assert_eq!(titles(&records, &no_trade_in), ["flat", "lot"]);
    }

    #[test]
    fn test_missing_numeric_fields_compare_as_zero() {
        let records: Vec<Property> = vec![serde_json::from_str(r#"{ "titulo": "Lote" }"#).unwrap()];

        let zero = FilterCriteria {
            min_area: Some(0.0),
            min_bedrooms: Some(0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(filter_properties(&records, &zero).len(), 1);

        let one = FilterCriteria {
            min_area: Some(1.0),
            ..Default::default()
        };
        assert!(filter_properties(&records, &one).is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let records = sample();
        let criteria = FilterCriteria {
            min_bedrooms: Some(3),
            ..Default::default()
        };

        let result = filter_properties(&records, &criteria);
        assert_eq!(result.len(), 3);
        assert!(is_subsequence(&result, &records));
    }

    #[test]
    fn test_adding_fields_never_grows_result() {
        let records = sample();
        let steps = [
            FilterCriteria {
                min_bedrooms: Some(1),
                ..Default::default()
            },
            FilterCriteria {
                min_bedrooms: Some(1),
                city: Some("FRANCISCO MORATO".to_string()),
                ..Default::default()
            },
            FilterCriteria {
                min_bedrooms: Some(1),
                city: Some("FRANCISCO MORATO".to_string()),
                status: Some(Status::Available),
                ..Default::default()
            },
        ];

        let sizes: Vec<usize> = steps
            .iter()
            .map(|c| filter_properties(&records, c).len())
            .collect();
        assert_eq!(sizes, vec![4, 2, 1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            min_price: Some(100_000.0),
            state: Some("sp".to_string()),
            ..Default::default()
        };

        let once = filter_properties(&records, &criteria);
        let twice = filter_properties(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_public_listing_visibility() {
        let hidden = FilterCriteria::default().for_public_listing(false);
        assert_eq!(hidden.status, Some(Status::Available));

        let shown = FilterCriteria::default().for_public_listing(true);
        assert_eq!(shown.status, None);

        let explicit = FilterCriteria {
            status: Some(Status::Reserved),
            ..Default::default()
        }
        .for_public_listing(false);
        assert_eq!(explicit.status, Some(Status::Reserved));
    }

    #[test]
    fn test_query_pairs_use_wire_names() {
        let criteria = FilterCriteria {
            property_type: Some(PropertyType::CommercialRoom),
            category: Some(Category::SaleOrRent),
            status: Some(Status::Available),
            city: Some("Jundiaí".to_string()),
            neighborhood: Some(String::new()),
            min_bedrooms: Some(2),
            accepts_trade_in: Some(false),
            ..Default::default()
        };

        assert_eq!(
            criteria.to_query_pairs(),
            vec![
                ("tipo", "SALA_COMERCIAL".to_string()),
                ("categoria", "VENDA_ALUGUEL".to_string()),
                ("status", "DISPONIVEL".to_string()),
                ("cidade", "Jundiaí".to_string()),
                ("quartosMin", "2".to_string()),
                ("aceitaPermuta", "false".to_string()),
            ]
        );
    }
}
