// src/domain/listing.rs

use serde::Serialize;

/// One property from a search-results page, flattened to the fields the API exposes.
///
/// Both extraction strategies build this in a single expression, so a record is
/// either complete (with `None` where data was missing) or not produced at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub address: String,
    pub price: Option<i64>,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub sqft: Option<i64>,
    pub link: Option<String>,
}

impl Listing {
    /// True when at least one field fell back to `None` during mapping.
    pub fn is_degraded(&self) -> bool {
        self.address.is_empty()
            || self.price.is_none()
            || self.beds.is_none()
            || self.baths.is_none()
            || self.sqft.is_none()
            || self.link.is_none()
    }
}

/// "$1,250,000" -> 1250000. Every non-digit is dropped before parsing.
pub fn parse_price(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Square footage is printed like a price ("1,200 sqft"), so it parses the same way.
pub fn parse_sqft(text: &str) -> Option<i64> {
    parse_price(text)
}

/// Leading integer of `text`, e.g. "3bed" -> 3. Anything else -> `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    trimmed[..end].parse().ok()
}

/// Like [`parse_leading_int`] but keeps one decimal part: "2.5ba" -> 2.5.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut seen_dot = false;
    let mut end = 0;

    for (i, c) in trimmed.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }

    trimmed[..end].parse().ok()
}
