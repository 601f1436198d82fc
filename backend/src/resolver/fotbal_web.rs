//! Club lookup by scraping the public fotbal.cz search and club detail
//! pages. Markup regions are extracted with the forgiving helpers in
//! `crate::html`; any mismatch degrades to an empty or unavailable
//! result, never an error.

use crate::address::extract_city;
use crate::html;
use crate::resolver::{ClubProvider, Lookup};
use async_trait::async_trait;
use common::model::club::{Club, ClubType};
use log::debug;
use std::time::Duration;

const SEARCH_URL: &str = "https://www.fotbal.cz/club/hledej";
const FOOTBALL_DETAIL_BASE: &str = "https://www.fotbal.cz/souteze/club/club";
const FUTSAL_DETAIL_BASE: &str = "https://www.fotbal.cz/futsal/club/club";
const SITE_BASE: &str = "https://www.fotbal.cz";
const TIMEOUT: Duration = Duration::from_secs(12);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

pub struct FotbalWebProvider {
    client: reqwest::Client,
}

/// Extract club entries from a search results page. One entry per
/// `ListItemSplit` list item; items missing a link are skipped.
fn parse_search_page(body: &str) -> Vec<Club> {
    let mut clubs = Vec::new();
    let mut from = 0;

    while let Some((start, end)) = html::next_block_ci(body, "ListItemSplit", "</li>", from) {
        let block = &body[start..end];
        from = end;

        let href = match html::attr_ci(block, "href") {
            Some(h) if !h.trim().is_empty() => h.trim(),
            _ => continue,
        };

        let mut name = html::slice_between_ci(block, "<span class=\"H7", "</span>")
            .map(html::strip_tags)
            .unwrap_or_default();
        if name.is_empty() {
            name = html::slice_between_ci(block, "Link--inverted", "</a>")
                .map(html::strip_tags)
                .unwrap_or_default();
        }

        let logo_url = block
            .find("<img")
            .and_then(|at| html::attr_ci(&block[at..], "src"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let address = html::slice_between_ci(block, "ClubAddress", "</p>")
            .map(html::strip_tags)
            .unwrap_or_default();

        let club_type = if href.to_lowercase().contains("/futsal/") {
            ClubType::Futsal
        } else {
            ClubType::Football
        };

        let id = href
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let website = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", SITE_BASE, href)
        };

        clubs.push(Club {
            id,
            name,
            city: extract_city(&address),
            club_type: Some(club_type),
            website,
            logo_url,
        });
    }

    clubs
}

/// Extract a club identity from a detail page. Returns `None` when the
/// expected heading is missing, which usually means an error page.
fn parse_detail_page(body: &str, id: &str, club_type: ClubType) -> Option<Club> {
    let heading = html::slice_between_ci(body, "<h1", "</h1>")?;
    let name = html::slice_between_ci(heading, "<span", "</span>")
        .map(html::strip_tags)
        .unwrap_or_else(|| html::strip_tags(heading));
    if name.is_empty() {
        return None;
    }

    let address = html::slice_between_ci(body, "ClubAddress", "</p>")
        .map(html::strip_tags)
        .unwrap_or_default();

    Some(Club {
        id: id.to_string(),
        name,
        city: extract_city(&address),
        club_type: Some(club_type),
        website: String::new(),
        // The media store follows a fixed naming scheme per club id.
        logo_url: format!("https://is1.fotbal.cz/media/kluby/{}/{}_crop.jpg", id, id),
    })
}

impl FotbalWebProvider {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        FotbalWebProvider { client }
    }

    async fn fetch_search_page(&self, query: &str) -> Result<Option<String>, reqwest::Error> {
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "cs-CZ,cs;q=0.9,en;q=0.8")
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(Some(resp.text().await?));
        }

        // The site sometimes rejects multi-word queries; one retry with
        // the query quoted.
        let quoted = format!("\"{}\"", query);
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", quoted.as_str())])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "cs-CZ,cs;q=0.9,en;q=0.8")
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(Some(resp.text().await?))
        } else {
            Ok(None)
        }
    }

    async fn fetch_detail(&self, base: &str, id: &str, club_type: ClubType) -> Option<Club> {
        let url = format!("{}/{}", base, id);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "cs-CZ,cs;q=0.9,en;q=0.8")
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let body = resp.text().await.ok()?;
        parse_detail_page(&body, id, club_type)
    }
}

#[async_trait]
impl ClubProvider for FotbalWebProvider {
    fn source_id(&self) -> &'static str {
        "fotbal-web"
    }

    async fn search(&self, query: &str) -> Lookup {
        match self.fetch_search_page(query).await {
            Ok(Some(body)) => {
                let clubs = parse_search_page(&body);
                if clubs.is_empty() {
                    Lookup::Empty
                } else {
                    Lookup::Hits(clubs)
                }
            }
            Ok(None) => Lookup::Empty,
            Err(e) => {
                debug!("fotbal-web search transport failure: {}", e);
                Lookup::Unavailable
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Option<Club> {
        if let Some(club) = self
            .fetch_detail(FOOTBALL_DETAIL_BASE, id, ClubType::Football)
            .await
        {
            return Some(club);
        }
        self.fetch_detail(FUTSAL_DETAIL_BASE, id, ClubType::Futsal)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"<html><body><ul>
      <li class="ListItemSplit u-mb">
        <a class="Link--inverted" href="/souteze/club/club/1060231/">
          <img src="https://is1.fotbal.cz/media/kluby/1060231/1060231_crop.jpg" alt="">
          <span class="H7">SK Slavia Praha</span>
        </a>
        <div class="ClubAddress"><p>U Slavie 1540/2a, 10000 Praha</p></div>
      </li>
      <li class="ListItemSplit u-mb">
        <a class="Link--inverted" href="/futsal/club/club/futsal77/">
          <span class="H7">Helas Brno</span>
        </a>
        <div class="ClubAddress"><p>Vodova 108, 61200 Brno</p></div>
      </li>
      <li class="ListItemSplit u-mb">
        <a class="Link--inverted" href="">broken entry</a>
      </li>
    </ul></body></html>"#;

    #[test]
    fn parses_entries_from_search_page() {
        let clubs = parse_search_page(SEARCH_PAGE);
        assert_eq!(clubs.len(), 2);

        assert_eq!(clubs[0].id, "1060231");
        assert_eq!(clubs[0].name, "SK Slavia Praha");
        assert_eq!(clubs[0].city, "Praha");
        assert_eq!(clubs[0].club_type, Some(ClubType::Football));
        assert_eq!(
            clubs[0].website,
            "https://www.fotbal.cz/souteze/club/club/1060231/"
        );
        assert!(clubs[0].logo_url.contains("1060231_crop.jpg"));

        assert_eq!(clubs[1].id, "futsal77");
        assert_eq!(clubs[1].club_type, Some(ClubType::Futsal));
        assert_eq!(clubs[1].city, "Brno");
    }

    #[test]
    fn unrelated_markup_parses_to_nothing() {
        assert!(parse_search_page("<html><body><p>maintenance</p></body></html>").is_empty());
    }

    #[test]
    fn parses_detail_page() {
        let body = r#"<html><body>
          <h1 class="H4"><span>FC Baník Ostrava</span></h1>
          <div class="ClubAddress"><p>Slezská Ostrava 1, 71000 Ostrava</p></div>
        </body></html>"#;
        let club = parse_detail_page(body, "2070001", ClubType::Football).unwrap();
        assert_eq!(club.id, "2070001");
        assert_eq!(club.name, "FC Baník Ostrava");
        assert_eq!(club.city, "Ostrava");
        assert!(club.logo_url.ends_with("2070001_crop.jpg"));
    }

    #[test]
    fn detail_without_heading_is_none() {
        assert!(parse_detail_page("<html><body>404</body></html>", "x", ClubType::Football)
            .is_none());
    }
}
