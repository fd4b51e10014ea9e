mod routes_tests;
mod scrape_tests;
