//! Plain-text rendering of the listing screen

use bookswap_core::form::ListingForm;
use bookswap_core::{App, ListingCard, ListingDetail};
use std::fmt::Write;

const HEADER: &str = "\u{1F4DA} Community Book Exchange\nShare books with your local community\n";

/// Render whatever the app currently shows
pub fn render(app: &App) -> String {
    if app.is_loading() {
        return "Loading books...\n".to_string();
    }
    if let Some(detail) = app.detail() {
        return render_detail(&detail);
    }
    if let Some(form) = app.draft() {
        return render_form(form);
    }
    render_grid(&app.cards())
}

/// The grid of cards, numbered from 1
pub fn render_grid(cards: &[ListingCard]) -> String {
    let mut out = String::from(HEADER);
    if cards.is_empty() {
        out.push_str("\nNo books listed yet.\n");
        return out;
    }
    for (index, card) in cards.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}  {}", index + 1, card.title, card.badge);
        let _ = writeln!(out, "    {}", card.byline);
        if !card.excerpt.is_empty() {
            let _ = writeln!(out, "    {}", card.excerpt);
        }
        let _ = writeln!(out, "    \u{1F4CD} {}", card.owner);
        let _ = writeln!(out, "    {}", card.photo_url);
    }
    out
}

pub fn render_detail(detail: &ListingDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "{}", detail.byline);
    let _ = writeln!(out);
    let _ = writeln!(out, "Type: {}", detail.price_label);
    let _ = writeln!(out, "Description: {}", detail.description);
    let _ = writeln!(out, "Contact Information:");
    let _ = writeln!(out, "  \u{1F4CD} {}", detail.owner);
    let _ = writeln!(out, "  {}", detail.contact_line);
    let _ = writeln!(out, "Photo: {}", detail.photo_url);
    let _ = writeln!(out);
    let _ = writeln!(out, "[{}]", detail.contact_button);
    out
}

/// The submission form with its current values
pub fn render_form(form: &ListingForm) -> String {
    let mut out = String::from("\u{1F4DA} List a New Book\n\n");
    let _ = writeln!(out, "Book Title *: {}", form.title);
    let _ = writeln!(out, "Author *: {}", form.author);
    let _ = writeln!(
        out,
        "Book Photo *: {}",
        form.photo()
            .map(|p| p.asset.file_name.as_str())
            .unwrap_or("(none)")
    );
    let _ = writeln!(out, "Listing Type *: {}", form.kind.label());
    if form.price_visible() {
        let _ = writeln!(out, "Price ($) *: {}", form.price);
    }
    let _ = writeln!(out, "Description: {}", form.description);
    let _ = writeln!(out, "Your Name *: {}", form.owner_name);
    let _ = writeln!(out, "Contact Method *: {}", form.contact_method.label());
    let _ = writeln!(out, "{}: {}", form.contact_field().label, form.contact_info);
    out
}
