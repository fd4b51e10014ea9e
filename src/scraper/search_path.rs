use crate::domain::FilterSpec;
use std::fmt::Display;
use url::Url;

/// Appends the site's filter segments to a location key.
///
/// `("90210", price 100000..=500000)` -> `"90210/price-100000-500000"`. A dimension is
/// only written when it has a bound; the open side is written as `na`. With no bounds
/// the key comes back unchanged.
pub fn build_search_path(location_key: &str, spec: &FilterSpec) -> String {
    let mut segments = vec![location_key.to_string()];

    if spec.has_price_bound() {
        segments.push(range_segment("price", spec.min_price, spec.max_price));
    }
    if spec.has_beds_bound() {
        segments.push(range_segment("beds", spec.min_beds, spec.max_beds));
    }
    if spec.has_baths_bound() {
        segments.push(range_segment(
            "baths",
            spec.min_baths.map(Baths),
            spec.max_baths.map(Baths),
        ));
    }

    segments.join("/")
}

pub fn search_url(site: &Url, search_path: &str) -> String {
    format!(
        "{}/realestateandhomes-search/{}",
        site.as_str().trim_end_matches('/'),
        search_path
    )
}

/// Zip codes and city keys like `Austin_TX`. Anything that could escape the path
/// segment is refused.
pub fn validate_location_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("location is required".to_string());
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!("location contains invalid character {bad:?}"));
    }
    Ok(())
}

fn range_segment<T: Display>(name: &str, min: Option<T>, max: Option<T>) -> String {
    let side = |v: Option<T>| v.map_or_else(|| "na".to_string(), |v| v.to_string());
    format!("{name}-{}-{}", side(min), side(max))
}

/// Prints whole bath counts without a trailing ".0".
struct Baths(f64);

impl Display for Baths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
