//! Structured club lookup against the FAČR mirror API.

use crate::address::extract_city;
use crate::resolver::{ClubProvider, Lookup};
use async_trait::async_trait;
use common::model::club::Club;
use log::debug;
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://facr.tdvorak.dev";
const TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "logoteka/0.1 (+https://github.com/logoteka)";

pub struct FacrApiProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    club_id: String,
    #[serde(default)]
    club_type: String,
    #[serde(default)]
    logo_url: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Deserialize)]
struct ClubDetail {
    #[serde(default)]
    name: String,
    #[serde(default)]
    club_id: String,
    #[serde(default)]
    club_type: String,
    #[serde(default)]
    logo_url: String,
    #[serde(default)]
    address: String,
}

fn hit_to_club(hit: SearchHit) -> Club {
    Club {
        id: hit.club_id,
        name: hit.name,
        city: extract_city(&hit.address),
        club_type: hit.club_type.parse().ok(),
        website: String::new(),
        logo_url: hit.logo_url,
    }
}

fn detail_to_club(detail: ClubDetail) -> Club {
    Club {
        id: detail.club_id,
        name: detail.name,
        city: extract_city(&detail.address),
        club_type: detail.club_type.parse().ok(),
        website: String::new(),
        logo_url: detail.logo_url,
    }
}

impl FacrApiProvider {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        FacrApiProvider {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ClubProvider for FacrApiProvider {
    fn source_id(&self) -> &'static str {
        "facr-api"
    }

    async fn search(&self, query: &str) -> Lookup {
        let url = format!("{}/club/search", self.base_url);
        let resp = match self.client.get(&url).query(&[("q", query)]).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("facr-api search transport failure: {}", e);
                return Lookup::Unavailable;
            }
        };
        if !resp.status().is_success() {
            debug!("facr-api search returned status {}", resp.status());
            return Lookup::Unavailable;
        }
        match resp.json::<SearchResponse>().await {
            Ok(parsed) if parsed.results.is_empty() => Lookup::Empty,
            Ok(parsed) => Lookup::Hits(parsed.results.into_iter().map(hit_to_club).collect()),
            Err(e) => {
                debug!("facr-api search response did not parse: {}", e);
                Lookup::Unavailable
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Option<Club> {
        let url = format!("{}/club/football/{}", self.base_url, id);
        let resp = self.client.get(&url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<ClubDetail>().await.ok().map(detail_to_club)
    }
}
