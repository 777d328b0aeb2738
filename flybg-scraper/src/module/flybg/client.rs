///! HTTP client for the flybulgarien.dk booking site
///!
///! One method per remote lookup. Requests are issued one at a time and
///! nothing is cached between calls.

use std::time::Duration;

use flybg_common::{DEPARTURE_AIRPORTS, FlightOffer, Query};
use reqwest::{Client, RequestBuilder, Url};

use super::parser::{extract_iframe_src, parse_arrival_airports, parse_available_dates, parse_quotes_table};
use super::types::{Result, ScraperError};
use crate::config::ScraperConfig;

/// Client for the booking site's lookup scripts and search pages
pub struct FlyBgClient {
    client: Client,
    base_url: String,
    language: u32,
}

impl FlyBgClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    /// The six airports the site departs from, sorted.
    pub fn list_departure_airports(&self) -> Vec<String> {
        let mut airports: Vec<String> = DEPARTURE_AIRPORTS.iter().map(|code| code.to_string()).collect();
        airports.sort();
        airports
    }

    /// Airports reachable from `departure_city`.
    pub async fn list_arrival_airports(&self, departure_city: &str) -> Result<Vec<String>> {
        let url = format!("{}/script/getcity/{}-{}", self.base_url, self.language, departure_city);
        let (_, body) = self.fetch(self.client.get(&url), "arrival airports").await?;

        let airports = parse_arrival_airports(&body)?;
        tracing::info!("{} arrival airports reachable from {}", airports.len(), departure_city);
        Ok(airports)
    }

    /// Dates with flights on the route, as ISO-8601 strings in site order.
    pub async fn list_available_dates(&self, departure_city: &str, arrival_city: &str) -> Result<Vec<String>> {
        let url = format!("{}/script/getdates/{}-departure", self.base_url, self.language);
        let request = self
            .client
            .post(&url)
            .form(&[("code1", departure_city), ("code2", arrival_city)]);
        let (_, body) = self.fetch(request, "available dates").await?;

        let dates = parse_available_dates(&body)?;
        tracing::info!("{} dates available for {} -> {}", dates.len(), departure_city, arrival_city);
        Ok(dates)
    }

    /// Run the search and scrape the quotes table from the iframe it embeds.
    pub async fn search_flights(&self, query: &Query) -> Result<Vec<FlightOffer>> {
        let url = format!("{}/en/search", self.base_url);
        let request = self.client.get(&url).query(&[
            ("lang", self.language.to_string()),
            ("departure-city", query.departure_city.clone()),
            ("arrival-city", query.arrival_city.clone()),
            ("departure-date", query.search_date()),
            ("adults-children", query.passenger_count.to_string()),
        ]);
        let (page_url, search_page) = self.fetch(request, "search page").await?;

        let src = extract_iframe_src(&search_page)?;
        let quotes_url = page_url
            .join(&src)
            .map_err(|e| ScraperError::Scrape(format!("Bad iframe src '{}': {}", src, e)))?;

        let (_, quotes_page) = self.fetch(self.client.get(quotes_url), "quotes page").await?;
        let offers = parse_quotes_table(&quotes_page)?;

        tracing::info!(
            "Found {} flights {} -> {} on {}",
            offers.len(),
            query.departure_city,
            query.arrival_city,
            query.iso_date()
        );
        Ok(offers)
    }

    /// Send one request; returns the final URL and the body text.
    async fn fetch(&self, request: RequestBuilder, what: &str) -> Result<(Url, String)> {
        let response = request.send().await.map_err(|e| request_error(e, what))?;
        tracing::debug!("Fetched {} for {} -> {}", response.url(), what, response.status());

        if !response.status().is_success() {
            return Err(ScraperError::RemoteLookup(format!(
                "HTTP {} while fetching {}",
                response.status(),
                what
            )));
        }

        let url = response.url().clone();
        let body = response.text().await.map_err(|e| request_error(e, what))?;
        Ok((url, body))
    }
}

fn request_error(error: reqwest::Error, what: &str) -> ScraperError {
    if error.is_timeout() {
        ScraperError::RemoteLookup(format!("Timed out while fetching {}", what))
    } else {
        ScraperError::Transport(error)
    }
}
