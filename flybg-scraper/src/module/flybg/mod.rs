///! flybulgarien.dk route scraper
///!
///! Validates a requested route and date against the booking site's own
///! lookups, then scrapes the quotes table served inside the search page's
///! iframe.

pub mod types;
pub mod parser;
pub mod client;
pub mod route_query;

pub use client::FlyBgClient;
pub use route_query::RouteQuery;
pub use types::ScraperError;
