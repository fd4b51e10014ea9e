mod extract;
mod models;
mod page;
mod scraper;
mod scraper_error;
mod search_path;

pub use extract::{ExtractionMode, Extractor};
pub use page::RawPage;
pub use self::scraper::{FetchSettings, PageSource, RealtorScraper};
pub use scraper_error::ScraperError;
pub use search_path::{build_search_path, search_url, validate_location_key};
