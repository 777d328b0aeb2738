///! Error kinds for the route scraper

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid departure date '{0}', expected DD-MM-YYYY")]
    DateFormat(String),

    #[error("Passenger count must be at least 1")]
    PassengerCount,

    #[error("This city is missing: {0}")]
    DepartureCity(String),

    #[error("There is no flight to this city: {0}")]
    ArrivalCity(String),

    #[error("There are no dates on this route for {0}")]
    DepartureDate(String),

    #[error("Remote lookup failed: {0}")]
    RemoteLookup(String),

    #[error("Unexpected page structure: {0}")]
    Scrape(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),
}

impl ScraperError {
    /// Validation failures are reported to the user as advisories, not errors
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScraperError::DepartureCity(_)
                | ScraperError::ArrivalCity(_)
                | ScraperError::DepartureDate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
