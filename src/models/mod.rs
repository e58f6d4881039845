pub mod labels;
pub mod validation;

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of property being listed
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
pub enum PropertyType {
    #[default]
    #[serde(rename = "CASA")]
    House,
    #[serde(rename = "APARTAMENTO")]
    Apartment,
    #[serde(rename = "TERRENO")]
    LandLot,
    #[serde(rename = "COMERCIAL")]
    Commercial,
    #[serde(rename = "INDUSTRIA")]
    Industrial,
    #[serde(rename = "DUPLEX")]
    Duplex,
    #[serde(rename = "GLEBA")]
    RawLand,
    #[serde(rename = "SOBRADO")]
    TwoStoryHouse,
    #[serde(rename = "SALA_COMERCIAL")]
    CommercialRoom,
}

/// Whether a listing is offered for sale, for rent, or either
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
pub enum Category {
    #[default]
    #[serde(rename = "VENDA")]
    Sale,
    #[serde(rename = "ALUGUEL")]
    Rent,
    #[serde(rename = "VENDA_ALUGUEL")]
    SaleOrRent,
}

/// Commercial state of a listing
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
pub enum Status {
    #[default]
    #[serde(rename = "DISPONIVEL")]
    Available,
    #[serde(rename = "VENDIDO")]
    Sold,
    #[serde(rename = "ALUGADO")]
    Rented,
    #[serde(rename = "RESERVADO")]
    Reserved,
}

/// Amenity tag attached to a listing
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    clap::ValueEnum,
)]
pub enum Feature {
    #[serde(rename = "PISCINA")]
    Pool,
    #[serde(rename = "CHURRASQUEIRA")]
    Barbecue,
    #[serde(rename = "ACADEMIA")]
    Gym,
    #[serde(rename = "SALAO_FESTAS")]
    PartyRoom,
    #[serde(rename = "ELEVADOR")]
    Elevator,
    #[serde(rename = "PORTARIA_24H")]
    Concierge24h,
    #[serde(rename = "PLAYGROUND")]
    Playground,
    #[serde(rename = "QUINTAL")]
    Yard,
    #[serde(rename = "AREA_GOURMET")]
    GourmetArea,
    #[serde(rename = "SACADA")]
    Balcony,
    #[serde(rename = "SUITE")]
    Suite,
    #[serde(rename = "ARMARIOS_EMBUTIDOS")]
    BuiltInClosets,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    #[serde(rename = "IMAGEM")]
    Image,
}

/// Location information for a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Address {
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
}

/// A photo attached to a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub url: String,
    #[serde(rename = "tipo")]
    pub kind: MediaKind,
    #[serde(rename = "principal")]
    pub is_primary: bool,
}

/// Core property data model, as exchanged with the listing backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub property_type: PropertyType,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "endereco")]
    pub address: Address,
    pub area: f64,
    #[serde(rename = "quartos")]
    pub bedrooms: u32,
    #[serde(rename = "banheiros")]
    pub bathrooms: u32,
    #[serde(rename = "vagas")]
    pub parking_spaces: u32,
    #[serde(rename = "caracteristicas")]
    pub features: BTreeSet<Feature>,
    #[serde(rename = "aceitaFinanciamento")]
    pub accepts_financing: bool,
    #[serde(rename = "aceitaPermuta")]
    pub accepts_trade_in: bool,
    #[serde(rename = "midias")]
    pub media: Vec<Media>,
    #[serde(
        rename = "dataCriacao",
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        rename = "dataAtualizacao",
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Property {
    /// Effective status; listings without one are available
    pub fn status(&self) -> Status {
        self.status.unwrap_or_default()
    }

    /// Cover image: the media flagged primary, otherwise the first one
    pub fn cover(&self) -> Option<&Media> {
        self.media
            .iter()
            .find(|m| m.is_primary)
            .or_else(|| self.media.first())
    }

    /// Sold or rented listings are shown with a closed badge
    pub fn is_closed(&self) -> bool {
        matches!(self.status(), Status::Sold | Status::Rented)
    }

    /// Replace the media list with the given URLs in display order.
    /// The first URL becomes the primary image.
    pub fn with_media_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| Media {
                id: None,
                url: url.into(),
                kind: MediaKind::Image,
                is_primary: index == 0,
            })
            .collect();
        self
    }
}

/// Selection options the backend derives from the current portfolio
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AvailableOptions {
    #[serde(rename = "tipos")]
    pub types: Vec<PropertyType>,
    #[serde(rename = "categorias")]
    pub categories: Vec<Category>,
    #[serde(rename = "status")]
    pub statuses: Vec<Status>,
    #[serde(rename = "cidades")]
    pub cities: Vec<String>,
    #[serde(rename = "bairros")]
    pub neighborhoods: Vec<String>,
    #[serde(rename = "estados")]
    pub states: Vec<String>,
    #[serde(rename = "quantidadesQuartos")]
    pub bedroom_counts: Vec<u32>,
    #[serde(rename = "temFinanciamento")]
    pub any_financing: bool,
    #[serde(rename = "temPermuta")]
    pub any_trade_in: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    #[serde(default)]
    pub message: String,
}

/// Lenient (de)serialization of backend date-times.
///
/// Accepts RFC 3339 with an offset (kept as wall-clock time) or a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]`. Anything else reads as absent.
mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
