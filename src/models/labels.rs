//! Display text shown to site visitors for enumerated listing values.

use super::{Category, Feature, PropertyType, Status};

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "Casa",
            PropertyType::Apartment => "Apartamento",
            PropertyType::LandLot => "Terreno",
            PropertyType::Commercial => "Comercial",
            PropertyType::Industrial => "Indústria",
            PropertyType::Duplex => "Duplex",
            PropertyType::RawLand => "Gleba",
            PropertyType::TwoStoryHouse => "Sobrado",
            PropertyType::CommercialRoom => "Sala Comercial",
        }
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sale => "Venda",
            Category::Rent => "Aluguel",
            Category::SaleOrRent => "Venda ou Aluguel",
        }
    }

    /// Rent prices are quoted per month
    pub fn price_suffix(&self) -> &'static str {
        match self {
            Category::Rent => "/mês",
            Category::Sale | Category::SaleOrRent => "",
        }
    }
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Available => "Disponível",
            Status::Sold => "Vendido",
            Status::Rented => "Alugado",
            Status::Reserved => "Reservado",
        }
    }
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Pool => "Piscina",
            Feature::Barbecue => "Churrasqueira",
            Feature::Gym => "Academia",
            Feature::PartyRoom => "Salão de Festas",
            Feature::Elevator => "Elevador",
            Feature::Concierge24h => "Portaria 24h",
            Feature::Playground => "Playground",
            Feature::Yard => "Quintal",
            Feature::GourmetArea => "Área Gourmet",
            Feature::Balcony => "Sacada",
            Feature::Suite => "Suíte",
            Feature::BuiltInClosets => "Armários Embutidos",
        }
    }
}

/// Format a value as Brazilian reais, e.g. `R$ 1.234.567,89`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PropertyType::CommercialRoom.label(), "Sala Comercial");
        assert_eq!(Category::SaleOrRent.label(), "Venda ou Aluguel");
        assert_eq!(Status::Available.label(), "Disponível");
        assert_eq!(Feature::Concierge24h.label(), "Portaria 24h");
    }

    #[test]
    fn test_price_suffix_only_for_rent() {
        assert_eq!(Category::Rent.price_suffix(), "/mês");
        assert_eq!(Category::Sale.price_suffix(), "");
        assert_eq!(Category::SaleOrRent.price_suffix(), "");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1500.0), "R$ 1.500,00");
        assert_eq!(format_brl(300000.0), "R$ 300.000,00");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
        assert_eq!(format_brl(-42.5), "-R$ 42,50");
    }
}
