//! Buyer hand-off: price display and the messaging deep link.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::product::{Price, Product};

/// Characters `encodeURIComponent` leaves untouched besides alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const MESSAGING_BASE: &str = "https://wa.me";

/// Render a price as en-US dollars: `$1,199.00`.
///
/// Rounds to cents from the decimal expansion, so any finite amount renders
/// its full integer part.
pub fn format_price(price: Price) -> String {
    let fixed = format!("{:.2}", price.amount());
    let (dollars, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${grouped}.{cents}")
}

/// The prefilled message a buyer sends to the seller.
pub fn contact_message(product: &Product) -> String {
    format!(
        "Hi! I'm interested in your \"{}\" listed for {} on TechNexus. \
         Is it still available?\n\nProduct Details:\n{}",
        product.title(),
        format_price(product.price()),
        product.description()
    )
}

/// `https://wa.me/<handle>?text=<message>` for the given listing.
///
/// Pure string construction; nothing is opened or sent.
pub fn contact_link(product: &Product) -> String {
    let message = contact_message(product);
    let text = utf8_percent_encode(&message, COMPONENT);
    format!("{MESSAGING_BASE}/{}?text={text}", product.seller_contact_handle())
}
