//! Two-step geocode search
//!
//! A broad free-text request always runs first. Street addresses that come
//! back thin get a structured follow-up, merged in without duplicates.

use crate::constants::search::{FALLBACK_LIMIT, FALLBACK_THRESHOLD, PRIMARY_LIMIT};
use crate::error::Result;
use crate::geo::{GeoBackend, GeocodeCandidate, GeocodeRequest};
use crate::search::query::SearchQuery;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Requests a search will issue, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub primary: GeocodeRequest,
    pub fallback: Option<GeocodeRequest>,
}

impl SearchPlan {
    /// Build the plan for a query
    pub fn for_query(query: &SearchQuery) -> Self {
        let primary = GeocodeRequest::FreeText {
            query: query.normalized().to_string(),
            limit: PRIMARY_LIMIT,
        };

        let fallback = query.is_street_address().then(|| GeocodeRequest::Structured {
            street: query.street().to_string(),
            limit: FALLBACK_LIMIT,
        });

        Self { primary, fallback }
    }
}

/// Geocode client over any backend
#[derive(Debug, Clone)]
pub struct GeocodeClient<B> {
    backend: B,
}

impl<B: GeoBackend> GeocodeClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Search for a query, returning unique candidates (possibly none)
    ///
    /// Fails only if the primary request fails. A failing fallback request
    /// is logged and the primary results are returned as they are.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<GeocodeCandidate>> {
        let plan = SearchPlan::for_query(query);

        let primary = self.backend.search(&plan.primary).await?;
        let primary_count = primary.len();
        debug!(query = query.normalized(), count = primary_count, "primary search done");

        // Thinness is judged on the raw response, before dedup
        let mut results = merge_candidates(Vec::new(), primary);

        if primary_count < FALLBACK_THRESHOLD {
            if let Some(fallback) = &plan.fallback {
                match self.backend.search(fallback).await {
                    Ok(extra) => {
                        debug!(count = extra.len(), "fallback search done");
                        results = merge_candidates(results, extra);
                    }
                    Err(e) => {
                        warn!(error = %e, "fallback search failed, keeping primary results");
                    }
                }
            }
        }

        Ok(results)
    }
}

/// Append `extra` to `existing`, skipping any place already present
pub fn merge_candidates(
    mut existing: Vec<GeocodeCandidate>,
    extra: Vec<GeocodeCandidate>,
) -> Vec<GeocodeCandidate> {
    let mut seen: HashSet<u64> = existing.iter().map(|c| c.place_id).collect();

    for candidate in extra {
        if seen.insert(candidate.place_id) {
            existing.push(candidate);
        }
    }

    existing
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, TransportError};
    use crate::geo::{AddressParts, Coordinates};
    use std::sync::{Arc, Mutex};

    pub(crate) fn candidate(place_id: u64, road: &str) -> GeocodeCandidate {
        GeocodeCandidate {
            place_id,
            coords: Coordinates::new(-33.8688, 151.2093),
            display_name: format!("{}, Sydney, New South Wales, Australia", road),
            address: AddressParts {
                road: Some(road.to_string()),
                ..AddressParts::default()
            },
        }
    }

    /// Backend that replays canned responses and records what it was asked
    #[derive(Clone, Default)]
    pub(crate) struct FakeBackend {
        pub free_text: Arc<Mutex<Option<Result<Vec<GeocodeCandidate>>>>>,
        pub structured: Arc<Mutex<Option<Result<Vec<GeocodeCandidate>>>>>,
        pub requests: Arc<Mutex<Vec<GeocodeRequest>>>,
    }

    impl FakeBackend {
        pub(crate) fn with(
            free_text: Result<Vec<GeocodeCandidate>>,
            structured: Result<Vec<GeocodeCandidate>>,
        ) -> Self {
            Self {
                free_text: Arc::new(Mutex::new(Some(free_text))),
                structured: Arc::new(Mutex::new(Some(structured))),
                requests: Arc::default(),
            }
        }

        pub(crate) fn requests(&self) -> Vec<GeocodeRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn replay(slot: &Mutex<Option<Result<Vec<GeocodeCandidate>>>>) -> Result<Vec<GeocodeCandidate>> {
        match slot.lock().unwrap().as_ref() {
            Some(Ok(candidates)) => Ok(candidates.clone()),
            Some(Err(Error::Transport(e))) => Err(e.clone().into()),
            Some(Err(e)) => Err(Error::Parse(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    impl GeoBackend for FakeBackend {
        async fn search(&self, request: &GeocodeRequest) -> Result<Vec<GeocodeCandidate>> {
            self.requests.lock().unwrap().push(request.clone());
            match request {
                GeocodeRequest::FreeText { .. } => replay(&self.free_text),
                GeocodeRequest::Structured { .. } => replay(&self.structured),
            }
        }
    }

    #[test]
    fn test_plan_for_street_address() {
        let plan = SearchPlan::for_query(&SearchQuery::new("123 George Street"));

        assert_eq!(
            plan.primary,
            GeocodeRequest::FreeText {
                query: "123 George Street, Australia".to_string(),
                limit: 8,
            }
        );
        assert_eq!(
            plan.fallback,
            Some(GeocodeRequest::Structured {
                street: "123 George Street".to_string(),
                limit: 5,
            })
        );
    }

    #[test]
    fn test_plan_for_place_name() {
        let plan = SearchPlan::for_query(&SearchQuery::new("Bondi Beach"));
        assert!(plan.fallback.is_none());
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let merged = merge_candidates(
            vec![candidate(1, "A"), candidate(2, "B")],
            vec![candidate(2, "B again"), candidate(3, "C"), candidate(3, "C again")],
        );

        let ids: Vec<u64> = merged.iter().map(|c| c.place_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(merged[1].address.road.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_fallback_runs_when_primary_is_thin() {
        let backend = FakeBackend::with(
            Ok(vec![candidate(1, "George Street")]),
            Ok(vec![candidate(1, "George Street"), candidate(2, "George St")]),
        );
        let client = GeocodeClient::new(backend.clone());

        let results = client.search(&SearchQuery::new("123 George Street")).await.unwrap();

        assert_eq!(results.len(), 2);
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert!(matches!(
            &requests[1],
            GeocodeRequest::Structured { street, .. } if street == "123 George Street"
        ));
    }

    #[tokio::test]
    async fn test_no_fallback_when_primary_is_enough() {
        let backend = FakeBackend::with(
            Ok(vec![candidate(1, "A"), candidate(2, "B"), candidate(3, "C")]),
            Ok(vec![candidate(4, "D")]),
        );
        let client = GeocodeClient::new(backend.clone());

        let results = client.search(&SearchQuery::new("123 George Street")).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_primary_rows_count_toward_threshold() {
        let backend = FakeBackend::with(
            Ok(vec![candidate(1, "A"), candidate(1, "A"), candidate(2, "B")]),
            Ok(vec![candidate(9, "Z")]),
        );
        let client = GeocodeClient::new(backend.clone());

        let results = client.search(&SearchQuery::new("123 George Street")).await.unwrap();

        let ids: Vec<u64> = results.iter().map(|c| c.place_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_no_fallback_for_place_names() {
        let backend = FakeBackend::with(Ok(Vec::new()), Ok(vec![candidate(4, "D")]));
        let client = GeocodeClient::new(backend.clone());

        let results = client.search(&SearchQuery::new("Bondi Beach")).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_is_swallowed() {
        let backend = FakeBackend::with(
            Ok(vec![candidate(1, "George Street")]),
            Err(TransportError::Status(503).into()),
        );
        let client = GeocodeClient::new(backend.clone());

        let results = client.search(&SearchQuery::new("123 George Street")).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_primary_failure_skips_fallback() {
        let backend = FakeBackend::with(
            Err(TransportError::Status(500).into()),
            Ok(vec![candidate(2, "George St")]),
        );
        let client = GeocodeClient::new(backend.clone());

        let err = client
            .search(&SearchQuery::new("123 George Street"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
        assert_eq!(backend.requests().len(), 1);
    }
}
