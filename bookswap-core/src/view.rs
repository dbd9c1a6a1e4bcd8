//! View models for the listing grid and the detail view

use crate::types::{ContactMethod, Listing, ListingId, Price};
use std::fmt;

/// Characters of description shown on a grid card
pub const DESCRIPTION_BUDGET: usize = 100;

const ELLIPSIS: &str = "...";

/// Path prefix the backend uses for stored listing photos
pub const PHOTO_PATH_PREFIX: &str = "/api/v1/books/";

/// Grey book outline shown when a photo cannot be loaded
pub const PLACEHOLDER_PHOTO: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjI2MCIgdmlld0JveD0iMCAwIDIwMCAyNjAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSIyMDAiIGhlaWdodD0iMjYwIiBmaWxsPSIjRjNGNEY2Ii8+CjxwYXRoIGQ9Ik04NSA5NUgxMTVWMTI1SDg1Vjk1WiIgZmlsbD0iI0Q1REJEQiIvPgo8cGF0aCBkPSJNNzAgMTQwSDEzMFYxNTVINzBWMTQwWiIgZmlsbD0iI0Q1REJEQiIvPgo8cGF0aCBkPSJNNzAgMTY1SDEzMFYxODBINzBWMTY1WiIgZmlsbD0iI0Q1REJEQiIvPgo8L3N2Zz4K";

/// Cut a description to the card budget, marking the cut with an ellipsis
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_BUDGET) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Resolves listing photo references against the API base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoLocator {
    api_base: String,
}

impl PhotoLocator {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Absolute references are used as-is; anything else is served from
    /// the listing's photo endpoint.
    pub fn resolve(&self, listing: &Listing) -> String {
        let reference = listing.photo_url.trim();
        if is_absolute(reference) {
            return reference.to_string();
        }
        if !reference.is_empty() && !reference.starts_with(PHOTO_PATH_PREFIX) {
            tracing::debug!(id = %listing.id, reference, "Unrecognized photo reference, using photo endpoint");
        }
        self.photo_endpoint(&listing.id)
    }

    pub fn photo_endpoint(&self, id: &ListingId) -> String {
        format!("{}/v1/books/{}/photo", self.api_base, id)
    }
}

fn is_absolute(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

/// Price tag shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBadge {
    Free,
    ForSale(Price),
}

impl PriceBadge {
    pub fn for_listing(listing: &Listing) -> Self {
        if listing.is_giveaway() {
            PriceBadge::Free
        } else {
            PriceBadge::ForSale(listing.price)
        }
    }

    /// Longer wording used in the detail view
    pub fn detail_label(&self) -> String {
        match self {
            PriceBadge::Free => "\u{1F381} Free Giveaway".to_string(), // 🎁
            PriceBadge::ForSale(price) => format!("\u{1F4B0} For Sale - ${}", price), // 💰
        }
    }
}

impl fmt::Display for PriceBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBadge::Free => f.write_str("\u{1F381} FREE"),
            PriceBadge::ForSale(price) => write!(f, "\u{1F4B0} ${}", price),
        }
    }
}

/// One cell of the listing grid
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: ListingId,
    pub title: String,
    /// "by {author}"
    pub byline: String,
    pub excerpt: String,
    pub owner: String,
    pub badge: PriceBadge,
    pub photo_url: String,
}

impl ListingCard {
    pub fn new(listing: &Listing, photo_url: String) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            byline: format!("by {}", listing.author),
            excerpt: truncate_description(&listing.description),
            owner: listing.owner_name.clone(),
            badge: PriceBadge::for_listing(listing),
            photo_url,
        }
    }
}

/// Read-only detail view of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub id: ListingId,
    pub title: String,
    pub byline: String,
    pub price_label: String,
    pub description: String,
    pub owner: String,
    pub contact_line: String,
    pub contact_button: &'static str,
    pub photo_url: String,
}

impl ListingDetail {
    pub fn new(listing: &Listing, photo_url: String) -> Self {
        let icon = match listing.contact_method {
            ContactMethod::Email => "\u{1F4E7}", // 📧
            ContactMethod::Phone => "\u{1F4DE}", // 📞
        };
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            byline: format!("by {}", listing.author),
            price_label: PriceBadge::for_listing(listing).detail_label(),
            description: listing.description.clone(),
            owner: listing.owner_name.clone(),
            contact_line: format!("{} {}", icon, listing.contact_info),
            contact_button: contact_button_label(listing.contact_method),
            photo_url,
        }
    }
}

pub fn contact_button_label(method: ContactMethod) -> &'static str {
    match method {
        ContactMethod::Email => "\u{1F4E7} Send Email",
        ContactMethod::Phone => "\u{1F4DE} Copy Phone Number",
    }
}

/// What "contact owner" does for a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAction {
    /// Open the platform mail composer
    ComposeEmail { mailto: String },

    /// Copy the number and confirm with a notice
    CopyToClipboard { text: String, notice: String },
}

impl ContactAction {
    pub fn for_listing(listing: &Listing) -> Self {
        match listing.contact_method {
            ContactMethod::Email => {
                let subject = format!("Interested in \"{}\"", listing.title);
                let body = format!(
                    "Hi {},\n\nI saw your listing for \"{}\" by {} on Community Book Exchange and I'm interested!\n\nCould we arrange a time to meet?\n\nThanks!",
                    listing.owner_name, listing.title, listing.author
                );
                ContactAction::ComposeEmail {
                    mailto: format!(
                        "mailto:{}?subject={}&body={}",
                        listing.contact_info,
                        urlencoding::encode(&subject),
                        urlencoding::encode(&body)
                    ),
                }
            }
            ContactMethod::Phone => ContactAction::CopyToClipboard {
                text: listing.contact_info.clone(),
                notice: format!("Phone number copied to clipboard: {}", listing.contact_info),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListingKind, ListingPayload};
    use proptest::prelude::*;

    fn listing(kind: ListingKind, cents: u64, method: ContactMethod) -> Listing {
        ListingPayload {
            title: "1984".into(),
            author: "George Orwell".into(),
            price: Price::from_cents(cents),
            kind,
            description: "A dystopian classic.".into(),
            owner_name: "Bob".into(),
            contact_method: method,
            contact_info: match method {
                ContactMethod::Email => "bob@example.com".into(),
                ContactMethod::Phone => "(555) 123-4567".into(),
            },
        }
        .into_listing(ListingId::from(42), "/api/v1/books/42/photo")
    }

    #[test]
    fn test_truncate_short_and_exact() {
        assert_eq!(truncate_description("short"), "short");
        let exact = "x".repeat(100);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn test_truncate_long() {
        let long = "y".repeat(101);
        assert_eq!(truncate_description(&long), format!("{}...", "y".repeat(100)));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let long = "é".repeat(150);
        let cut = truncate_description(&long);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
    }

    proptest! {
        #[test]
        fn prop_truncation(text in "\\PC{0,250}") {
            let cut = truncate_description(&text);
            let len = text.chars().count();
            if len > DESCRIPTION_BUDGET {
                let head: String = text.chars().take(DESCRIPTION_BUDGET).collect();
                prop_assert_eq!(cut, format!("{}...", head));
            } else {
                prop_assert_eq!(cut, text);
            }
        }

        #[test]
        fn prop_sale_badge_has_two_decimals(cents in 0u64..10_000_000) {
            let badge = PriceBadge::for_listing(&listing(ListingKind::ForSale, cents, ContactMethod::Email));
            let text = badge.to_string();
            let amount = text.rsplit('$').next().unwrap();
            let (_, decimals) = amount.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert_eq!(amount.replace('.', "").parse::<u64>().unwrap(), cents);
        }

        #[test]
        fn prop_giveaway_badge_is_free(cents in 0u64..10_000_000) {
            let badge = PriceBadge::for_listing(&listing(ListingKind::Giveaway, cents, ContactMethod::Email));
            prop_assert_eq!(badge, PriceBadge::Free);
            prop_assert!(badge.to_string().contains("FREE"));
        }
    }

    #[test]
    fn test_badge_text() {
        let sale = listing(ListingKind::ForSale, 350, ContactMethod::Email);
        assert_eq!(PriceBadge::for_listing(&sale).to_string(), "💰 $3.50");
        assert_eq!(
            PriceBadge::for_listing(&sale).detail_label(),
            "💰 For Sale - $3.50"
        );
        let free = listing(ListingKind::Giveaway, 999, ContactMethod::Email);
        assert_eq!(PriceBadge::for_listing(&free).to_string(), "🎁 FREE");
        assert_eq!(PriceBadge::for_listing(&free).detail_label(), "🎁 Free Giveaway");
    }

    #[test]
    fn test_photo_resolution() {
        let locator = PhotoLocator::new("http://localhost:8080/api/");
        let mut book = listing(ListingKind::ForSale, 100, ContactMethod::Email);

        assert_eq!(
            locator.resolve(&book),
            "http://localhost:8080/api/v1/books/42/photo"
        );

        book.photo_url = "https://cdn.example.com/42.jpg".into();
        assert_eq!(locator.resolve(&book), "https://cdn.example.com/42.jpg");

        book.photo_url = String::new();
        assert_eq!(
            locator.resolve(&book),
            "http://localhost:8080/api/v1/books/42/photo"
        );
    }

    #[test]
    fn test_card_fields() {
        let mut book = listing(ListingKind::ForSale, 350, ContactMethod::Email);
        book.description = "d".repeat(120);
        let card = ListingCard::new(&book, "photo".into());
        assert_eq!(card.byline, "by George Orwell");
        assert_eq!(card.excerpt.len(), 103);
        assert_eq!(card.badge, PriceBadge::ForSale(Price::from_cents(350)));
    }

    #[test]
    fn test_email_contact_action() {
        let book = listing(ListingKind::ForSale, 350, ContactMethod::Email);
        let ContactAction::ComposeEmail { mailto } = ContactAction::for_listing(&book) else {
            panic!("expected email action");
        };
        assert!(mailto.starts_with("mailto:bob@example.com?subject=Interested%20in%20%221984%22&body="));
        assert!(mailto.contains("Hi%20Bob%2C"));
        assert!(mailto.contains("by%20George%20Orwell"));
    }

    #[test]
    fn test_phone_contact_action() {
        let book = listing(ListingKind::Giveaway, 0, ContactMethod::Phone);
        assert_eq!(
            ContactAction::for_listing(&book),
            ContactAction::CopyToClipboard {
                text: "(555) 123-4567".into(),
                notice: "Phone number copied to clipboard: (555) 123-4567".into(),
            }
        );
        let detail = ListingDetail::new(&book, String::new());
        assert_eq!(detail.contact_button, "📞 Copy Phone Number");
        assert_eq!(detail.contact_line, "📞 (555) 123-4567");
    }
}
