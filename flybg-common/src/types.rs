use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Airports the booking site departs from. The site has no lookup for these.
pub const DEPARTURE_AIRPORTS: [&str; 6] = ["CPH", "BLL", "PDV", "BOJ", "SOF", "VAR"];

/// Date format accepted on the command line, e.g. "01-06-2024"
pub const INPUT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Date format the search page expects, e.g. "01.06.2024"
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Date format used when comparing against the site's list of dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A requested route on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Departure airport IATA code, e.g. "SOF"
    pub departure_city: String,
    /// Arrival airport IATA code, e.g. "CPH"
    pub arrival_city: String,
    pub departure_date: NaiveDate,
    /// Adults and children, always >= 1
    pub passenger_count: u32,
}

impl Query {
    pub const DEFAULT_PASSENGERS: u32 = 1;

    pub fn new(
        departure_city: impl Into<String>,
        arrival_city: impl Into<String>,
        departure_date: NaiveDate,
        passenger_count: u32,
    ) -> Self {
        Self {
            departure_city: departure_city.into(),
            arrival_city: arrival_city.into(),
            departure_date,
            passenger_count,
        }
    }

    /// Departure date as the site lists it, e.g. "2024-06-01"
    pub fn iso_date(&self) -> String {
        self.departure_date.format(ISO_DATE_FORMAT).to_string()
    }

    /// Departure date as the search page takes it, e.g. "01.06.2024"
    pub fn search_date(&self) -> String {
        self.departure_date.format(SEARCH_DATE_FORMAT).to_string()
    }
}

/// One flight from the quotes table. Values are kept exactly as the site renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub departure_airport: String,
    pub outbound_time: String,
    pub inbound_time: String,
    pub outbound_flight: String,
    pub inbound_flight: String,
    /// Price text, e.g. "120.00 EUR"
    pub price: String,
    pub arrival_airport: String,
}

impl std::fmt::Display for FlightOffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Departure: {}, Arrival: {}, Outbound: {}, Inbound: {}, Flights: {} / {}, Price: {}",
            self.departure_airport,
            self.arrival_airport,
            self.outbound_time,
            self.inbound_time,
            self.outbound_flight,
            self.inbound_flight,
            self.price,
        )
    }
}
