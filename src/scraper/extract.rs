// extract.rs
use crate::domain::listing::{parse_leading_float, parse_leading_int, parse_price, parse_sqft};
use crate::domain::Listing;
use crate::scraper::models::Property;
use crate::scraper::page::{ExtractionStrategy, RawPage};
use crate::scraper::ScraperError;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Where the listings array has lived inside `__NEXT_DATA__`, newest layout first.
const LISTINGS_PATHS: [&str; 2] = [
    "/props/pageProps/properties",
    "/props/pageProps/searchResults/home_search/results",
];

const CARD_SELECTOR: &str = ".component_property-card";
const ADDRESS_SELECTOR: &str = ".address";
const PRICE_SELECTOR: &str = ".price";
const BEDS_SELECTOR: &str = ".beds";
const BATHS_SELECTOR: &str = ".baths";
const SQFT_SELECTOR: &str = ".sqft";
const LINK_SELECTOR: &str = "a[href]";

/// What to do with a page that has no `__NEXT_DATA__` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Fail with `DataBlockNotFound`.
    #[default]
    Strict,
    /// Read the legacy property cards instead.
    Compat,
}

impl std::str::FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ExtractionMode::Strict),
            "compat" => Ok(ExtractionMode::Compat),
            other => Err(format!("unknown extraction mode {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extractor {
    mode: ExtractionMode,
    site: Url,
}

impl Extractor {
    pub fn new(mode: ExtractionMode, site: Url) -> Self {
        Self { mode, site }
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn extract(&self, page: &RawPage) -> Result<Vec<Listing>, ScraperError> {
        let listings = match page.strategy() {
            ExtractionStrategy::EmbeddedJson => {
                let json_text = page.data_block().ok_or(ScraperError::DataBlockNotFound)?;
                self.extract_next_data(json_text)?
            }
            ExtractionStrategy::DomCards => match self.mode {
                ExtractionMode::Strict => return Err(ScraperError::DataBlockNotFound),
                ExtractionMode::Compat => self.extract_cards(page.document())?,
            },
        };

        let degraded = listings.iter().filter(|l| l.is_degraded()).count();
        if degraded > 0 {
            debug!(
                total = listings.len(),
                degraded, "some listings are missing fields"
            );
        }

        Ok(listings)
    }

    fn extract_next_data(&self, json_text: &str) -> Result<Vec<Listing>, ScraperError> {
        let data: Value = serde_json::from_str(json_text)
            .map_err(|e| ScraperError::MalformedPayload(e.to_string()))?;

        let arr = LISTINGS_PATHS
            .iter()
            .find_map(|path| data.pointer(path).and_then(Value::as_array))
            .ok_or(ScraperError::ListingsArrayNotFound)?;

        let listings = arr
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                if !value.is_object() {
                    warn!(index, "skipping listing entry that is not an object");
                    return None;
                }
                match Property::deserialize(value) {
                    Ok(prop) => Some(self.listing_from_property(&prop)),
                    Err(e) => {
                        warn!(index, error = %e, "skipping unreadable listing entry");
                        None
                    }
                }
            })
            .collect();

        Ok(listings)
    }

    fn listing_from_property(&self, prop: &Property) -> Listing {
        Listing {
            address: prop.address_line().unwrap_or_default().to_string(),
            price: prop.list_price,
            beds: prop.beds(),
            baths: prop.baths(),
            sqft: prop.sqft(),
            link: prop
                .permalink
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| self.detail_link(p)),
        }
    }

    fn detail_link(&self, permalink: &str) -> String {
        format!(
            "{}/realestateandhomes-detail/{}",
            self.site.as_str().trim_end_matches('/'),
            permalink
        )
    }

    fn extract_cards(&self, document: &Html) -> Result<Vec<Listing>, ScraperError> {
        let card = selector(CARD_SELECTOR)?;
        let address = selector(ADDRESS_SELECTOR)?;
        let price = selector(PRICE_SELECTOR)?;
        let beds = selector(BEDS_SELECTOR)?;
        let baths = selector(BATHS_SELECTOR)?;
        let sqft = selector(SQFT_SELECTOR)?;
        let link = selector(LINK_SELECTOR)?;

        let cards: Vec<ElementRef> = document.select(&card).collect();
        if cards.is_empty() {
            return Err(ScraperError::DataBlockNotFound);
        }

        let listings = cards
            .into_iter()
            .map(|el| Listing {
                address: text_of(el, &address),
                price: parse_price(&text_of(el, &price)),
                beds: parse_leading_int(&text_of(el, &beds)),
                baths: parse_leading_float(&text_of(el, &baths)),
                sqft: parse_sqft(&text_of(el, &sqft)),
                link: el
                    .select(&link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .and_then(|href| self.site.join(href).ok())
                    .map(String::from),
            })
            .collect();

        Ok(listings)
    }
}

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(format!("{css}: {e}")))
}

fn text_of(el: ElementRef, sel: &Selector) -> String {
    el.select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
