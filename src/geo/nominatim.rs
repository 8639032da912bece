//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! The usage policy requires an identifying User-Agent on every request.

use crate::config::SearchConfig;
use crate::error::{Error, Result, TransportError};
use crate::geo::{AddressParts, Coordinates, GeoBackend, GeocodeCandidate, GeocodeRequest};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

/// Address breakdown (only the keys we display)
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    suburb: Option<String>,
    locality: Option<String>,
    town: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
}

impl NominatimBackend {
    /// Create a backend from search settings
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Full search URL for a request
    fn search_url(&self, request: &GeocodeRequest) -> String {
        let query = request
            .params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/search?{}", self.base_url, query)
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid longitude: {}", lng)))?;
        let coords = Coordinates::new(lat, lng);
        coords
            .validate()
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(coords)
    }

    fn into_candidate(place: NominatimPlace) -> Result<GeocodeCandidate> {
        let coords = Self::parse_coords(&place.lat, &place.lon)?;
        let addr = place.address.unwrap_or_default();

        Ok(GeocodeCandidate {
            place_id: place.place_id,
            coords,
            display_name: place.display_name,
            address: AddressParts {
                house_number: non_empty(addr.house_number),
                road: non_empty(addr.road),
                suburb: non_empty(addr.suburb),
                locality: non_empty(addr.locality),
                town: non_empty(addr.town),
                city: non_empty(addr.city),
                state: non_empty(addr.state),
                postcode: non_empty(addr.postcode),
            },
        })
    }
}

/// Blank components count as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GeoBackend for NominatimBackend {
    async fn search(&self, request: &GeocodeRequest) -> Result<Vec<GeocodeCandidate>> {
        let url = self.search_url(request);
        debug!(%url, "Nominatim search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let places: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse Nominatim response: {}", e)))?;

        debug!(count = places.len(), "Nominatim returned places");

        places.into_iter().map(Self::into_candidate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> NominatimBackend {
        let config = SearchConfig {
            endpoint: server.uri(),
            ..SearchConfig::default()
        };
        NominatimBackend::new(&config).unwrap()
    }

    fn george_street() -> serde_json::Value {
        json!({
            "place_id": 101,
            "lat": "-33.8688",
            "lon": "151.2070",
            "display_name": "123, George Street, Sydney, New South Wales, 2000, Australia",
            "address": {
                "house_number": "123",
                "road": "George Street",
                "suburb": "Sydney",
                "state": "New South Wales",
                "postcode": "2000",
                "country": "Australia",
                "country_code": "au"
            },
            "extratags": {}
        })
    }

    #[test]
    fn test_parse_coords() {
        let coords = NominatimBackend::parse_coords("-33.8688", "151.2093").unwrap();
        assert!((coords.lat - (-33.8688)).abs() < 0.0001);
        assert!((coords.lng - 151.2093).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(matches!(
            NominatimBackend::parse_coords("invalid", "0"),
            Err(Error::Parse(_))
        ));
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
        assert!(NominatimBackend::parse_coords("95.0", "0").is_err());
    }

    #[test]
    fn test_search_url_encodes_values() {
        let backend = NominatimBackend::new(&SearchConfig::default()).unwrap();
        let url = backend.search_url(&GeocodeRequest::FreeText {
            query: "123 George St, Australia".to_string(),
            limit: 8,
        });
        assert!(url.starts_with("https://nominatim.openstreetmap.org/search?"));
        assert!(url.contains("q=123%20George%20St%2C%20Australia"));
        assert!(url.contains("limit=8"));
    }

    #[tokio::test]
    async fn test_free_text_search() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "123 George Street, Australia"))
            .and(query_param("countrycodes", "au"))
            .and(query_param("addressdetails", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([george_street()])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let results = backend
            .search(&GeocodeRequest::FreeText {
                query: "123 George Street, Australia".to_string(),
                limit: 8,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let candidate = &results[0];
        assert_eq!(candidate.place_id, 101);
        assert_eq!(candidate.address.road.as_deref(), Some("George Street"));
        assert_eq!(candidate.address.town, None);
    }

    #[tokio::test]
    async fn test_structured_search() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("street", "123 George Street"))
            .and(query_param("country", "Australia"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let results = backend
            .search(&GeocodeRequest::Structured {
                street: "123 George Street".to_string(),
                limit: 5,
            })
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend
            .search(&GeocodeRequest::FreeText {
                query: "Bondi, Australia".to_string(),
                limit: 8,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Status(500))));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend
            .search(&GeocodeRequest::FreeText {
                query: "Bondi, Australia".to_string(),
                limit: 8,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_blank_address_parts_dropped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "place_id": 7,
                "lat": "-31.95",
                "lon": "115.86",
                "display_name": "Perth, Western Australia, Australia",
                "address": { "city": "Perth", "suburb": "" }
            }])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let results = backend
            .search(&GeocodeRequest::FreeText {
                query: "Perth, Australia".to_string(),
                limit: 8,
            })
            .await
            .unwrap();

        assert_eq!(results[0].address.suburb, None);
        assert_eq!(results[0].address.city.as_deref(), Some("Perth"));
    }
}
