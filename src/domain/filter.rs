// src/domain/filter.rs

use crate::domain::listing::Listing;
use std::collections::HashMap;
use thiserror::Error;

/// Numeric range bounds over price, beds and baths, built fresh for each request.
///
/// `None` means the caller did not supply that bound. An unset bound never rejects a
/// listing; a supplied bound always rejects a listing whose field is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_beds: Option<i64>,
    pub max_beds: Option<i64>,
    pub min_baths: Option<f64>,
    pub max_baths: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid value for {param}: {value:?}")]
    InvalidNumber { param: &'static str, value: String },
    #[error("{dimension} minimum is greater than its maximum")]
    InvertedRange { dimension: &'static str },
}

impl FilterSpec {
    /// Builds a spec from decoded query parameters.
    ///
    /// Accepts the older `beds` / `baths` names as aliases for `min_beds` / `min_baths`.
    /// Empty values count as absent.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, FilterError> {
        let spec = FilterSpec {
            min_price: int_param(params, "min_price", None)?,
            max_price: int_param(params, "max_price", None)?,
            min_beds: int_param(params, "min_beds", Some("beds"))?,
            max_beds: int_param(params, "max_beds", None)?,
            min_baths: float_param(params, "min_baths", Some("baths"))?,
            max_baths: float_param(params, "max_baths", None)?,
        };

        spec.check_ranges()?;
        Ok(spec)
    }

    pub fn is_unbounded(&self) -> bool {
        *self == FilterSpec::default()
    }

    pub fn has_price_bound(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    pub fn has_beds_bound(&self) -> bool {
        self.min_beds.is_some() || self.max_beds.is_some()
    }

    pub fn has_baths_bound(&self) -> bool {
        self.min_baths.is_some() || self.max_baths.is_some()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        within(listing.price, self.min_price, self.max_price)
            && within(listing.beds, self.min_beds, self.max_beds)
            && within(listing.baths, self.min_baths, self.max_baths)
    }

    fn check_ranges(&self) -> Result<(), FilterError> {
        if inverted(self.min_price, self.max_price) {
            return Err(FilterError::InvertedRange { dimension: "price" });
        }
        if inverted(self.min_beds, self.max_beds) {
            return Err(FilterError::InvertedRange { dimension: "beds" });
        }
        if inverted(self.min_baths, self.max_baths) {
            return Err(FilterError::InvertedRange { dimension: "baths" });
        }
        Ok(())
    }
}

/// Keeps the listings that satisfy every bound in `spec`, in their original order.
pub fn filter(listings: Vec<Listing>, spec: &FilterSpec) -> Vec<Listing> {
    if spec.is_unbounded() {
        return listings;
    }

    listings.into_iter().filter(|l| spec.matches(l)).collect()
}

fn within<T: PartialOrd + Copy>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    match (value, min, max) {
        (_, None, None) => true,
        (None, _, _) => false,
        (Some(v), min, max) => {
            min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
        }
    }
}

fn inverted<T: PartialOrd>(min: Option<T>, max: Option<T>) -> bool {
    matches!((min, max), (Some(lo), Some(hi)) if lo > hi)
}

fn raw_param<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
    alias: Option<&'static str>,
) -> Option<(&'static str, &'a str)> {
    let lookup = |key: &'static str| {
        params
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| (key, v))
    };

    lookup(name).or_else(|| alias.and_then(lookup))
}

fn int_param(
    params: &HashMap<String, String>,
    name: &'static str,
    alias: Option<&'static str>,
) -> Result<Option<i64>, FilterError> {
    let Some((param, raw)) = raw_param(params, name, alias) else {
        return Ok(None);
    };

    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(FilterError::InvalidNumber {
            param,
            value: raw.to_string(),
        }),
    }
}

fn float_param(
    params: &HashMap<String, String>,
    name: &'static str,
    alias: Option<&'static str>,
) -> Result<Option<f64>, FilterError> {
    let Some((param, raw)) = raw_param(params, name, alias) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(FilterError::InvalidNumber {
            param,
            value: raw.to_string(),
        }),
    }
}
