//! Club identity resolution across an ordered chain of lookup sources.
//!
//! Sources are unreliable by nature (remote markup and API shapes change
//! without notice), so the resolver's contract is that no transient
//! source failure ever becomes a caller-visible error while any
//! fallback can still answer.

pub mod catalog;
pub mod facr_api;
pub mod fotbal_web;

use crate::error::ResolveError;
use crate::text::strip_diacritics;
use async_trait::async_trait;
use common::model::club::Club;
use log::{debug, info};

/// Outcome of one source answering a search. `Empty` and `Unavailable`
/// both mean "try the next source", but are logged differently.
#[derive(Debug)]
pub enum Lookup {
    Hits(Vec<Club>),
    Empty,
    Unavailable,
}

/// One external club lookup source.
#[async_trait]
pub trait ClubProvider: Send + Sync {
    /// Short identifier used in diagnostics.
    fn source_id(&self) -> &'static str;

    async fn search(&self, query: &str) -> Lookup;

    /// Resolve a single club by its provider-scoped identifier.
    async fn get_by_id(&self, id: &str) -> Option<Club>;
}

/// Orchestrates providers in priority order with a normalized retry and
/// a static-catalog terminal fallback for searches.
pub struct ClubResolver {
    providers: Vec<Box<dyn ClubProvider>>,
}

impl ClubResolver {
    /// Production chain: structured API first, HTML scrape second.
    pub fn new() -> Self {
        ClubResolver {
            providers: vec![
                Box::new(facr_api::FacrApiProvider::new()),
                Box::new(fotbal_web::FotbalWebProvider::new()),
            ],
        }
    }

    pub fn with_providers(providers: Vec<Box<dyn ClubProvider>>) -> Self {
        ClubResolver { providers }
    }

    /// Search for clubs. Never fails for a non-empty query: when every
    /// provider comes up empty, the static catalog answers.
    pub async fn search(&self, query: &str) -> Result<Vec<Club>, ResolveError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        if let Some(clubs) = self.run_chain(query).await {
            return Ok(clubs);
        }

        // One retry with the diacritics stripped, only when that
        // actually changes the query.
        let normalized = strip_diacritics(&query.to_lowercase());
        if normalized != query.to_lowercase() {
            if let Some(clubs) = self.run_chain(&normalized).await {
                return Ok(clubs);
            }
        }

        info!("all providers empty for {:?}, serving catalog fallback", query);
        Ok(catalog::filter(query))
    }

    /// Resolve one club by identifier. Unlike `search` there is no
    /// catalog fallback; exhausting the chain is `NotFound`.
    pub async fn resolve_by_id(&self, id: &str) -> Result<Club, ResolveError> {
        if id.trim().is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        for provider in &self.providers {
            match provider.get_by_id(id).await {
                Some(club) if !club.name.is_empty() => {
                    debug!("{} resolved club {}", provider.source_id(), id);
                    return Ok(club);
                }
                Some(_) => debug!("{} returned nameless club for {}", provider.source_id(), id),
                None => debug!("{} could not resolve {}", provider.source_id(), id),
            }
        }

        Err(ResolveError::NotFound)
    }

    async fn run_chain(&self, query: &str) -> Option<Vec<Club>> {
        for provider in &self.providers {
            match provider.search(query).await {
                Lookup::Hits(clubs) if !clubs.is_empty() => {
                    debug!(
                        "{} answered {:?} with {} hits",
                        provider.source_id(),
                        query,
                        clubs.len()
                    );
                    return Some(clubs);
                }
                Lookup::Hits(_) | Lookup::Empty => {
                    debug!("{} had no hits for {:?}", provider.source_id(), query)
                }
                Lookup::Unavailable => {
                    debug!("{} unavailable for {:?}", provider.source_id(), query)
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::club::ClubType;
    use std::sync::{Arc, Mutex};

    /// Scripted provider: a fixed search outcome per call, recording the
    /// queries it was asked.
    struct FakeProvider {
        id: &'static str,
        outcome: fn() -> Lookup,
        by_id: Option<Club>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FakeProvider {
        fn new(id: &'static str, outcome: fn() -> Lookup) -> Self {
            FakeProvider {
                id,
                outcome,
                by_id: None,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ClubProvider for FakeProvider {
        fn source_id(&self) -> &'static str {
            self.id
        }

        async fn search(&self, query: &str) -> Lookup {
            self.seen.lock().unwrap().push(query.to_string());
            (self.outcome)()
        }

        async fn get_by_id(&self, _id: &str) -> Option<Club> {
            self.by_id.clone()
        }
    }

    fn club(name: &str) -> Club {
        Club {
            id: "42".into(),
            name: name.into(),
            city: String::new(),
            club_type: Some(ClubType::Football),
            website: String::new(),
            logo_url: String::new(),
        }
    }

    fn hits() -> Lookup {
        Lookup::Hits(vec![club("FK Teplice")])
    }

    fn empty() -> Lookup {
        Lookup::Empty
    }

    fn unavailable() -> Lookup {
        Lookup::Unavailable
    }

    #[actix_web::test]
    async fn first_provider_with_hits_wins() {
        let resolver = ClubResolver::with_providers(vec![
            Box::new(FakeProvider::new("one", hits)),
            Box::new(FakeProvider::new("two", hits)),
        ]);
        let clubs = resolver.search("teplice").await.unwrap();
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].name, "FK Teplice");
    }

    #[actix_web::test]
    async fn unavailable_provider_falls_through() {
        let resolver = ClubResolver::with_providers(vec![
            Box::new(FakeProvider::new("down", unavailable)),
            Box::new(FakeProvider::new("up", hits)),
        ]);
        let clubs = resolver.search("teplice").await.unwrap();
        assert_eq!(clubs[0].name, "FK Teplice");
    }

    #[actix_web::test]
    async fn empty_query_is_rejected() {
        let resolver = ClubResolver::with_providers(vec![]);
        assert!(matches!(
            resolver.search("   ").await,
            Err(ResolveError::EmptyQuery)
        ));
    }

    #[actix_web::test]
    async fn catalog_answers_when_all_providers_miss() {
        let resolver = ClubResolver::with_providers(vec![
            Box::new(FakeProvider::new("one", empty)),
            Box::new(FakeProvider::new("two", unavailable)),
        ]);
        let clubs = resolver.search("slavia").await.unwrap();
        assert!(clubs.iter().any(|c| c.name == "SK Slavia Praha"));
    }

    #[actix_web::test]
    async fn accented_query_is_retried_stripped() {
        let provider = FakeProvider::new("one", empty);
        let seen = Arc::clone(&provider.seen);
        let resolver = ClubResolver::with_providers(vec![Box::new(provider)]);
        let _ = resolver.search("Příbram").await.unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Příbram".to_string(), "pribram".to_string()]
        );
    }

    #[actix_web::test]
    async fn plain_query_is_not_retried() {
        let provider = FakeProvider::new("one", empty);
        let seen = Arc::clone(&provider.seen);
        let resolver = ClubResolver::with_providers(vec![Box::new(provider)]);
        let _ = resolver.search("teplice").await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["teplice".to_string()]);
    }

    #[actix_web::test]
    async fn resolve_by_id_skips_nameless_results() {
        let mut nameless = FakeProvider::new("one", empty);
        nameless.by_id = Some(club(""));
        let mut named = FakeProvider::new("two", empty);
        named.by_id = Some(club("SK Sigma Olomouc"));
        let resolver =
            ClubResolver::with_providers(vec![Box::new(nameless), Box::new(named)]);
        let club = resolver.resolve_by_id("42").await.unwrap();
        assert_eq!(club.name, "SK Sigma Olomouc");
    }

    #[actix_web::test]
    async fn resolve_by_id_exhaustion_is_not_found() {
        let resolver = ClubResolver::with_providers(vec![
            Box::new(FakeProvider::new("one", empty)),
            Box::new(FakeProvider::new("two", unavailable)),
        ]);
        assert!(matches!(
            resolver.resolve_by_id("unknown").await,
            Err(ResolveError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn resolve_by_empty_id_is_invalid() {
        let resolver = ClubResolver::with_providers(vec![]);
        assert!(matches!(
            resolver.resolve_by_id(" ").await,
            Err(ResolveError::EmptyQuery)
        ));
    }
}
