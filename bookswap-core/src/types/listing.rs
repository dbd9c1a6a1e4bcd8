//! The Listing record as the backend owns it

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Backend-assigned listing identifier.
///
/// Opaque to the client: the backend currently emits numbers, but strings are
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ListingId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ListingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ListingId::from(n),
            RawId::Text(s) => ListingId(s),
        })
    }
}

/// A non-negative amount of money, held in whole cents.
///
/// On the wire it is a plain JSON number (`3.5` is 350 cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Convert a decimal amount, rounding to the nearest cent.
    /// Returns `None` for negative or non-finite amounts.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Some(Self {
            cents: (amount * 100.0).round() as u64,
        })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }
}

/// Always two decimal places: `3.50`, `0.00`, `12.05`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            None => Ok(Price::ZERO),
            Some(amount) => Price::from_decimal(amount).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid price: {}", amount))
            }),
        }
    }
}

/// Whether a book is sold or given away
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ListingKind {
    /// Offered for a price
    #[default]
    #[serde(rename = "SELL", alias = "sell")]
    ForSale,

    /// Free to a good home
    #[serde(rename = "GIVEAWAY", alias = "giveaway")]
    Giveaway,
}

impl ListingKind {
    /// Wire name, as used in form inputs and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::ForSale => "SELL",
            ListingKind::Giveaway => "GIVEAWAY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SELL" | "FOR_SALE" => Some(ListingKind::ForSale),
            "GIVEAWAY" => Some(ListingKind::Giveaway),
            _ => None,
        }
    }

    /// Option label in the listing form
    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::ForSale => "For Sale",
            ListingKind::Giveaway => "Free Giveaway",
        }
    }
}

/// How the owner wants to be reached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ContactMethod {
    #[default]
    #[serde(rename = "EMAIL", alias = "email")]
    Email,

    #[serde(rename = "PHONE", alias = "phone")]
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "EMAIL",
            ContactMethod::Phone => "PHONE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EMAIL" => Some(ContactMethod::Email),
            "PHONE" => Some(ContactMethod::Phone),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactMethod::Email => "Email",
            ContactMethod::Phone => "Phone",
        }
    }
}

/// A book offered on the exchange, as persisted by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Backend-assigned identifier
    pub id: ListingId,

    pub title: String,

    pub author: String,

    /// Stored price; only meaningful for [`ListingKind::ForSale`]
    #[serde(default)]
    pub price: Price,

    #[serde(rename = "type")]
    pub kind: ListingKind,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Absolute URL or backend-relative path of the photo
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photo_url: String,

    pub owner_name: String,

    pub contact_method: ContactMethod,

    pub contact_info: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Listing {
    /// Price the buyer pays: always zero for giveaways
    pub fn effective_price(&self) -> Price {
        match self.kind {
            ListingKind::ForSale => self.price,
            ListingKind::Giveaway => Price::ZERO,
        }
    }

    pub fn is_giveaway(&self) -> bool {
        self.kind == ListingKind::Giveaway
    }
}

/// The JSON part of an upload: every draft field the backend stores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    pub title: String,
    pub author: String,
    pub price: Price,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub description: String,
    pub owner_name: String,
    pub contact_method: ContactMethod,
    pub contact_info: String,
}

impl ListingPayload {
    /// Build the record the backend would return for this payload
    pub fn into_listing(self, id: ListingId, photo_url: impl Into<String>) -> Listing {
        Listing {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
            kind: self.kind,
            description: self.description,
            photo_url: photo_url.into(),
            owner_name: self.owner_name,
            contact_method: self.contact_method,
            contact_info: self.contact_info,
            created_at: None,
            updated_at: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_BOOK: &str = r#"{
        "id": 7,
        "title": "Dune",
        "author": "Frank Herbert",
        "price": 4.25,
        "photoUrl": "/api/v1/books/7/photo",
        "type": "SELL",
        "description": null,
        "ownerName": "Ana",
        "contactMethod": "email",
        "contactInfo": "ana@example.com",
        "createdAt": "2024-05-01T10:15:30.123",
        "updatedAt": "2024-05-01T10:15:30.123"
    }"#;

    #[test]
    fn test_listing_from_backend_json() {
        let listing: Listing = serde_json::from_str(BACKEND_BOOK).unwrap();
        assert_eq!(listing.id, ListingId::from(7));
        assert_eq!(listing.price.cents(), 425);
        assert_eq!(listing.kind, ListingKind::ForSale);
        assert_eq!(listing.contact_method, ContactMethod::Email);
        assert_eq!(listing.description, "");
        assert!(listing.created_at.is_some());
    }

    #[test]
    fn test_listing_id_accepts_strings() {
        let id: ListingId = serde_json::from_str(r#""abc-123""#).unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_missing_price_is_zero() {
        let json = r#"{"id":1,"title":"T","author":"A","type":"GIVEAWAY",
            "ownerName":"O","contactMethod":"PHONE","contactInfo":"555"}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.price.is_zero());
        assert_eq!(listing.photo_url, "");
    }

    #[test]
    fn test_negative_price_rejected() {
        let result: std::result::Result<Price, _> = serde_json::from_str("-1.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_giveaway_effective_price_is_zero() {
        let mut listing: Listing = serde_json::from_str(BACKEND_BOOK).unwrap();
        listing.kind = ListingKind::Giveaway;
        assert_eq!(listing.price.cents(), 425);
        assert_eq!(listing.effective_price(), Price::ZERO);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(350).to_string(), "3.50");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!(Price::from_decimal(19.999).unwrap().to_string(), "20.00");
    }

    #[test]
    fn test_payload_wire_names() {
        let payload = ListingPayload {
            title: "1984".into(),
            author: "George Orwell".into(),
            price: Price::from_cents(350),
            kind: ListingKind::ForSale,
            description: String::new(),
            owner_name: "Bob".into(),
            contact_method: ContactMethod::Email,
            contact_info: "bob@example.com".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "SELL");
        assert_eq!(value["price"], 3.5);
        assert_eq!(value["ownerName"], "Bob");
        assert_eq!(value["contactMethod"], "EMAIL");
        assert!(value.get("photo").is_none());
    }

    #[test]
    fn test_kind_and_method_parse() {
        assert_eq!(ListingKind::parse("giveaway"), Some(ListingKind::Giveaway));
        assert_eq!(ListingKind::parse("SELL"), Some(ListingKind::ForSale));
        assert_eq!(ListingKind::parse("trade"), None);
        assert_eq!(ContactMethod::parse("Phone"), Some(ContactMethod::Phone));
        assert_eq!(ContactMethod::parse("fax"), None);
    }
}
