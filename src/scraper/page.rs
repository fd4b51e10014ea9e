use scraper::{Html, Selector};

const NEXT_DATA_SELECTOR: &str = r#"script[id="__NEXT_DATA__"]"#;

/// Which generation of the site's markup a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Listings live in the `__NEXT_DATA__` JSON script.
    EmbeddedJson,
    /// Listings are only available as rendered property cards.
    DomCards,
}

/// A fetched search-results page, parsed once and handed to the extractor.
pub struct RawPage {
    document: Html,
    data_block: Option<String>,
}

impl RawPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let data_block = find_data_block(&document);

        Self {
            document,
            data_block,
        }
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        if self.data_block.is_some() {
            ExtractionStrategy::EmbeddedJson
        } else {
            ExtractionStrategy::DomCards
        }
    }

    pub fn data_block(&self) -> Option<&str> {
        self.data_block.as_deref()
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

fn find_data_block(document: &Html) -> Option<String> {
    let selector = Selector::parse(NEXT_DATA_SELECTOR).ok()?;
    let element = document.select(&selector).next()?;
    Some(element.text().collect())
}
