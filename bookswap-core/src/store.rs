//! In-memory ordered collection of listings driving the grid

use crate::types::{Listing, ListingId};

/// Listings in display order.
///
/// Backend order after a fetch; locally submitted listings go to the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all content with a fetch result
    pub fn replace_all(&mut self, listings: Vec<Listing>) {
        self.listings = listings;
    }

    /// Insert a newly created listing at the head
    pub fn prepend(&mut self, listing: Listing) {
        self.listings.insert(0, listing);
    }

    pub fn clear(&mut self) {
        self.listings.clear();
    }

    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    pub fn first(&self) -> Option<&Listing> {
        self.listings.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter()
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
