//! Draft listing state and validation for the submission form

use crate::error::{FormError, ValidationError};
use crate::photo::NormalizedPhoto;
use crate::types::{ContactMethod, ListingKind, ListingPayload, PhotoFile, Price};
use uuid::Uuid;

/// Identifies one draft for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single input change on the listing form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Author(String),
    /// Raw price text, coerced at submit time
    Price(String),
    Kind(ListingKind),
    Description(String),
    OwnerName(String),
    ContactMethod(ContactMethod),
    ContactInfo(String),
}

impl FieldUpdate {
    /// Map a named input event (`name`, `value`) to a typed update
    pub fn from_input(name: &str, value: impl Into<String>) -> Result<Self, FormError> {
        let value = value.into();
        let update = match name {
            "title" => FieldUpdate::Title(value),
            "author" => FieldUpdate::Author(value),
            "price" => FieldUpdate::Price(value),
            "type" => FieldUpdate::Kind(ListingKind::parse(&value).ok_or(
                FormError::InvalidValue {
                    field: "type",
                    value,
                },
            )?),
            "description" => FieldUpdate::Description(value),
            "ownerName" => FieldUpdate::OwnerName(value),
            "contactMethod" => FieldUpdate::ContactMethod(ContactMethod::parse(&value).ok_or(
                FormError::InvalidValue {
                    field: "contactMethod",
                    value,
                },
            )?),
            "contactInfo" => FieldUpdate::ContactInfo(value),
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        Ok(update)
    }
}

/// How the contact input should be presented for the selected method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactField {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// HTML input type
    pub input_type: &'static str,
}

impl ContactField {
    pub fn for_method(method: ContactMethod) -> Self {
        match method {
            ContactMethod::Email => ContactField {
                label: "Your Email *",
                placeholder: "your.email@example.com",
                input_type: "email",
            },
            ContactMethod::Phone => ContactField {
                label: "Your Phone Number *",
                placeholder: "(555) 123-4567",
                input_type: "tel",
            },
        }
    }
}

/// A validated draft: the JSON part plus the photo to upload
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub payload: ListingPayload,
    pub photo: PhotoFile,
}

/// The in-progress listing behind the submission form
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    id: DraftId,
    pub title: String,
    pub author: String,
    pub price: String,
    pub kind: ListingKind,
    pub description: String,
    pub owner_name: String,
    pub contact_method: ContactMethod,
    pub contact_info: String,
    photo: Option<NormalizedPhoto>,
}

impl ListingForm {
    /// An empty draft: for sale, contact by email
    pub fn new() -> Self {
        Self {
            id: DraftId::new(),
            title: String::new(),
            author: String::new(),
            price: String::new(),
            kind: ListingKind::ForSale,
            description: String::new(),
            owner_name: String::new(),
            contact_method: ContactMethod::Email,
            contact_info: String::new(),
            photo: None,
        }
    }

    pub fn id(&self) -> DraftId {
        self.id
    }

    /// Overwrite the one field named by the update
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Author(v) => self.author = v,
            FieldUpdate::Price(v) => self.price = v,
            FieldUpdate::Kind(v) => self.kind = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::OwnerName(v) => self.owner_name = v,
            FieldUpdate::ContactMethod(v) => self.contact_method = v,
            FieldUpdate::ContactInfo(v) => self.contact_info = v,
        }
    }

    pub fn set_photo(&mut self, photo: NormalizedPhoto) {
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    pub fn photo(&self) -> Option<&NormalizedPhoto> {
        self.photo.as_ref()
    }

    /// The price input is only shown for books that are for sale
    pub fn price_visible(&self) -> bool {
        self.kind == ListingKind::ForSale
    }

    pub fn contact_field(&self) -> ContactField {
        ContactField::for_method(self.contact_method)
    }

    /// Coerce the price text: zero for giveaways and unparsable input
    pub fn coerced_price(&self) -> Result<Price, ValidationError> {
        if self.kind == ListingKind::Giveaway {
            return Ok(Price::ZERO);
        }
        match self.price.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount < 0.0 => Err(ValidationError::NegativePrice),
            Ok(amount) => Ok(Price::from_decimal(amount).unwrap_or(Price::ZERO)),
            Err(_) => Ok(Price::ZERO),
        }
    }

    /// Check required fields and assemble the upload.
    ///
    /// The photo is checked first so a draft without one always reports
    /// [`ValidationError::MissingPhoto`].
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let photo = self.photo.as_ref().ok_or(ValidationError::MissingPhoto)?;

        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::MissingAuthor);
        }
        if self.kind == ListingKind::ForSale && self.price.trim().is_empty() {
            return Err(ValidationError::MissingPrice);
        }
        let price = self.coerced_price()?;
        if self.owner_name.trim().is_empty() {
            return Err(ValidationError::MissingOwnerName);
        }
        if self.contact_info.trim().is_empty() {
            return Err(ValidationError::MissingContactInfo);
        }

        Ok(Submission {
            payload: ListingPayload {
                title: self.title.clone(),
                author: self.author.clone(),
                price,
                kind: self.kind,
                description: self.description.clone(),
                owner_name: self.owner_name.clone(),
                contact_method: self.contact_method,
                contact_info: self.contact_info.clone(),
            },
            photo: photo.asset.clone(),
        })
    }
}

impl Default for ListingForm {
    fn default() -> Self {
        Self::new()
    }
}
