use std::path::PathBuf;

use flybg_scraper::config::ScraperConfig;
use flybg_scraper::module::flybg::{FlyBgClient, RouteQuery};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{self, method},
};

pub const DATES_BLOB: &str = "[2024,6,1],[2024,6,8],[2024,6,15],-";
pub const ARRIVALS_JSON: &str = r#"["CPH","BLL"]"#;

pub const OFFER_1: &str =
    "Departure: SOF, Arrival: CPH, Outbound: 08:15, Inbound: 10:05, Flights: FB471 / FB472, Price: 120.00 EUR";
pub const OFFER_2: &str =
    "Departure: SOF, Arrival: CPH, Outbound: 17:40, Inbound: 19:30, Flights: FB475 / FB476, Price: 145.50 EUR";

pub fn fixture(name: &str) -> String {
    let mut path = PathBuf::new();
    path.push(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/it/fixtures");
    path.push(name);
    std::fs::read_to_string(&path).unwrap()
}

pub struct TestHelper {
    pub mock_server: MockServer,
}

impl TestHelper {
    pub async fn new() -> TestHelper {
        TestHelper {
            mock_server: MockServer::start().await,
        }
    }

    pub fn client(&self) -> FlyBgClient {
        let config = ScraperConfig::default().with_base_url(self.mock_server.uri());
        FlyBgClient::new(&config).unwrap()
    }

    pub fn route(&self, departure: &str, arrival: &str, date: &str, passengers: u32) -> RouteQuery {
        RouteQuery::new(self.client(), departure, arrival, date, Some(passengers)).unwrap()
    }

    /// Run the route and return what it printed
    pub async fn run(&self, route: &RouteQuery) -> String {
        let mut out: Vec<u8> = Vec::new();
        route.run_with_writer(&mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    pub async fn request_count(&self) -> usize {
        self.mock_server.received_requests().await.unwrap().len()
    }

    pub async fn mock_arrivals(&self, departure: &str, response: ResponseTemplate, expected: u64) {
        Mock::given(method("GET"))
            .and(matchers::path(format!("/script/getcity/2-{}", departure)))
            .respond_with(response)
            .expect(expected)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_dates(&self, departure: &str, arrival: &str, body: &str, expected: u64) {
        Mock::given(method("POST"))
            .and(matchers::path("/script/getdates/2-departure"))
            .and(matchers::body_string_contains(format!("code1={}", departure)))
            .and(matchers::body_string_contains(format!("code2={}", arrival)))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_search(&self, date: &str, passengers: &str, body: String, expected: u64) {
        Mock::given(method("GET"))
            .and(matchers::path("/en/search"))
            .and(matchers::query_param("lang", "2"))
            .and(matchers::query_param("departure-city", "SOF"))
            .and(matchers::query_param("arrival-city", "CPH"))
            .and(matchers::query_param("departure-date", date))
            .and(matchers::query_param("adults-children", passengers))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_quotes(&self, body: String, expected: u64) {
        Mock::given(method("GET"))
            .and(matchers::path("/flywiz/quotes.aspx"))
            .and(matchers::query_param("id", "8812"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected)
            .mount(&self.mock_server)
            .await;
    }

    /// Every endpoint answers for SOF -> CPH with the given quotes page
    pub async fn mock_happy_path(&self, quotes_fixture: &str) {
        self.mock_arrivals("SOF", ResponseTemplate::new(200).set_body_string(ARRIVALS_JSON), 1)
            .await;
        self.mock_dates("SOF", "CPH", DATES_BLOB, 1).await;
        self.mock_search("01.06.2024", "1", fixture("search_page.html"), 1).await;
        self.mock_quotes(fixture(quotes_fixture), 1).await;
    }
}
