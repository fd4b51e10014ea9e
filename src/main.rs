use crate::config::Config;
use crate::router::{respond, App};
use crate::scraper::{Extractor, RealtorScraper};
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scraper;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("realtor_scrape=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1️⃣ Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Build the page fetcher
    let source = match RealtorScraper::new(config.fetch.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("❌ Scraper init failed: {e}");
            std::process::exit(1);
        }
    };

    let app = App {
        site: config.site.clone(),
        extractor: Extractor::new(config.extraction_mode, config.site.clone()),
        source: Box::new(source),
    };

    // 3️⃣ Start the server
    info!(
        mode = ?app.extractor.mode(),
        proxied = config.fetch.zenrows_api_key.is_some(),
        "Server is running at http://{}",
        config.addr
    );

    let server = Server::bind(&config.addr).max_workers(config.max_workers);

    // 4️⃣ Serve requests, passing the app into the closure
    let result = server.serve(move |req, _info| respond(req, &app));

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
