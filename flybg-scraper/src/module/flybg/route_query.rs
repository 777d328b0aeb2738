///! Route validation and search orchestration
///!
///! `run` walks departure -> arrival -> date validation and only searches when
///! all three pass. A failed check prints an advisory listing the valid
///! values instead of returning an error.

use std::io::Write;

use chrono::NaiveDate;
use flybg_common::{INPUT_DATE_FORMAT, Query};

use super::client::FlyBgClient;
use super::types::{Result, ScraperError};

pub struct RouteQuery {
    query: Query,
    client: FlyBgClient,
}

impl RouteQuery {
    /// `departure_date` is `DD-MM-YYYY`; passengers default to 1.
    pub fn new(
        client: FlyBgClient,
        departure_city: &str,
        arrival_city: &str,
        departure_date: &str,
        passengers: Option<u32>,
    ) -> Result<Self> {
        let date = NaiveDate::parse_from_str(departure_date, INPUT_DATE_FORMAT)
            .map_err(|_| ScraperError::DateFormat(departure_date.to_string()))?;

        let passenger_count = passengers.unwrap_or(Query::DEFAULT_PASSENGERS);
        if passenger_count == 0 {
            return Err(ScraperError::PassengerCount);
        }

        Ok(Self {
            query: Query::new(departure_city, arrival_city, date, passenger_count),
            client,
        })
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Check the route and date against the site's own lookups.
    pub async fn validate(&self) -> Result<()> {
        let query = &self.query;

        if !self.client.list_departure_airports().contains(&query.departure_city) {
            tracing::warn!("Unknown departure airport {}", query.departure_city);
            return Err(ScraperError::DepartureCity(query.departure_city.clone()));
        }

        let arrivals = self.client.list_arrival_airports(&query.departure_city).await?;
        if !arrivals.contains(&query.arrival_city) {
            tracing::warn!("No route {} -> {}", query.departure_city, query.arrival_city);
            return Err(ScraperError::ArrivalCity(query.arrival_city.clone()));
        }

        let dates = self
            .client
            .list_available_dates(&query.departure_city, &query.arrival_city)
            .await?;
        let date = query.iso_date();
        if !dates.contains(&date) {
            tracing::warn!("No flights {} -> {} on {}", query.departure_city, query.arrival_city, date);
            return Err(ScraperError::DepartureDate(date));
        }

        Ok(())
    }

    /// Validate, search and print the results to stdout.
    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.run_with_writer(&mut stdout).await
    }

    pub async fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.validate().await {
            Ok(()) => {}
            Err(e) if e.is_validation() => {
                let advisory = self.advisory(&e).await?;
                writeln!(out, "{}", advisory)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        let offers = self.client.search_flights(&self.query).await?;

        if offers.is_empty() {
            writeln!(
                out,
                "No flights found for {} -> {} on {}",
                self.query.departure_city,
                self.query.arrival_city,
                self.query.iso_date()
            )?;
        }
        for offer in &offers {
            writeln!(out, "{}", offer)?;
        }

        Ok(())
    }

    /// Message for a failed check; the valid values are fetched again.
    async fn advisory(&self, error: &ScraperError) -> Result<String> {
        let query = &self.query;

        let message = match error {
            ScraperError::DepartureCity(_) => format!(
                "This city is missing. Use the airport IATA from the list: {}",
                format_list(&self.client.list_departure_airports())
            ),
            ScraperError::ArrivalCity(_) => format!(
                "There is no flight to this city. Use the airport IATA from the list: {}",
                format_list(&self.client.list_arrival_airports(&query.departure_city).await?)
            ),
            ScraperError::DepartureDate(_) => format!(
                "There are no dates on this route. List of available dates: {}",
                format_list(
                    &self
                        .client
                        .list_available_dates(&query.departure_city, &query.arrival_city)
                        .await?
                )
            ),
            other => other.to_string(),
        };

        Ok(message)
    }
}

fn format_list(values: &[String]) -> String {
    format!("[{}]", values.join(", "))
}
