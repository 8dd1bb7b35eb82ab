//! Giphy search client and GIF picker state.
//!
//! Thin HTTP wrapper around the search endpoint. Request building and
//! response parsing are pure so they can be tested without the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chatroom_shared::constants::GIF_SEARCH_ERROR;

use crate::config::ClientConfig;
use crate::error::GifError;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GifResult {
    pub id: String,
    pub title: String,
    /// Small rendition for the picker grid.
    pub preview_url: String,
    /// Full rendition embedded in the message.
    pub original_url: String,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GiphyClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    limit: u32,
    rating: String,
    lang: String,
}

impl GiphyClient {
    pub fn new(config: &ClientConfig) -> Result<Self, GifError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key: config.giphy_api_key.clone(),
            endpoint: config.giphy_endpoint.clone(),
            limit: config.giphy_limit,
            rating: config.giphy_rating.clone(),
            lang: config.giphy_lang.clone(),
        })
    }

    /// `GET {endpoint}?api_key=&q=&limit=&offset=0&rating=&lang=`
    pub fn build_request(&self, term: &str) -> Result<reqwest::Request, GifError> {
        let limit = self.limit.to_string();
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", term),
                ("limit", limit.as_str()),
                ("offset", "0"),
                ("rating", self.rating.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .build()?;
        Ok(request)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<GifResult>, GifError> {
        let request = self.build_request(term)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GifError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let results = parse_response(&body)?;

        debug!(term, count = results.len(), "GIF search done");
        Ok(results)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ApiGif>,
}

#[derive(Deserialize)]
struct ApiGif {
    id: String,
    #[serde(default)]
    title: String,
    images: ApiImages,
}

#[derive(Deserialize)]
struct ApiImages {
    fixed_width: Option<ApiRendition>,
    original: Option<ApiRendition>,
}

#[derive(Deserialize)]
struct ApiRendition {
    url: String,
}

// =============================================================================
// PARSING
// =============================================================================

/// Hits missing the original rendition are skipped; a missing preview falls
/// back to the original.
pub fn parse_response(json: &str) -> Result<Vec<GifResult>, GifError> {
    let api: SearchResponse = serde_json::from_str(json)?;

    Ok(api
        .data
        .into_iter()
        .filter_map(|gif| {
            let original_url = gif.images.original?.url;
            let preview_url = gif
                .images
                .fixed_width
                .map(|r| r.url)
                .unwrap_or_else(|| original_url.clone());
            Some(GifResult {
                id: gif.id,
                title: gif.title,
                preview_url,
                original_url,
            })
        })
        .collect())
}

// =============================================================================
// PICKER
// =============================================================================

/// GIF modal state.
#[derive(Debug, Default, Clone)]
pub struct GifPicker {
    pub open: bool,
    pub term: String,
    pub results: Vec<GifResult>,
    /// Message for the error dialog, shown until dismissed.
    pub error: Option<&'static str>,
}

impl GifPicker {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the modal; the term and results do not survive.
    pub fn close(&mut self) {
        self.open = false;
        self.term.clear();
        self.results.clear();
    }

    /// Trimmed search term, or `None` when there is nothing to search for.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.term.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn apply_results(&mut self, outcome: Result<Vec<GifResult>, GifError>) {
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "GIF search failed");
                self.results.clear();
                self.error = Some(GIF_SEARCH_ERROR);
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// URL to send for the result at `index`.
    pub fn pick(&self, index: usize) -> Option<&str> {
        self.results.get(index).map(|r| r.original_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {
                "id": "abc",
                "title": "cat typing",
                "images": {
                    "fixed_width": { "url": "https://media.giphy.com/abc/200w.gif" },
                    "original": { "url": "https://media.giphy.com/abc/giphy.gif" }
                }
            },
            {
                "id": "nopreview",
                "images": { "original": { "url": "https://media.giphy.com/np/giphy.gif" } }
            },
            {
                "id": "broken",
                "images": { "fixed_width": { "url": "https://media.giphy.com/b/200w.gif" } }
            }
        ],
        "pagination": { "total_count": 3 }
    }"#;

    fn client() -> GiphyClient {
        let config = ClientConfig {
            giphy_api_key: "k3y".into(),
            ..Default::default()
        };
        GiphyClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_has_fixed_parameters() {
        let request = client().build_request("happy cat").unwrap();
        let url = request.url();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(url.host_str(), Some("api.giphy.com"));
        assert_eq!(url.path(), "/v1/gifs/search");

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected = [
            ("api_key", "k3y"),
            ("q", "happy cat"),
            ("limit", "24"),
            ("offset", "0"),
            ("rating", "g"),
            ("lang", "en"),
        ];
        for (k, v) in expected {
            assert!(
                query.contains(&(k.to_string(), v.to_string())),
                "missing {k}={v}"
            );
        }
    }

    #[test]
    fn test_parse_response() {
        let results = parse_response(SAMPLE).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].preview_url, "https://media.giphy.com/abc/200w.gif");
        assert_eq!(results[0].original_url, "https://media.giphy.com/abc/giphy.gif");
        assert_eq!(results[1].preview_url, results[1].original_url);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(parse_response("<html>"), Err(GifError::Decode(_))));
    }

    #[test]
    fn test_picker_blank_term_is_noop() {
        let mut picker = GifPicker::default();
        picker.term = "   ".into();
        assert!(picker.search_term().is_none());
        picker.term = " cats ".into();
        assert_eq!(picker.search_term(), Some("cats"));
    }

    #[test]
    fn test_picker_failure_clears_and_raises_dialog() {
        let mut picker = GifPicker::default();
        picker.apply_results(parse_response(SAMPLE));
        assert_eq!(picker.pick(0), Some("https://media.giphy.com/abc/giphy.gif"));

        picker.apply_results(Err(GifError::Status(500)));
        assert!(picker.results.is_empty());
        assert_eq!(picker.error, Some(GIF_SEARCH_ERROR));

        picker.dismiss_error();
        assert!(picker.error.is_none());
    }

    #[test]
    fn test_close_clears_term_and_results() {
        let mut picker = GifPicker::default();
        picker.open();
        picker.term = "dogs".into();
        picker.apply_results(parse_response(SAMPLE));

        picker.close();
        assert!(!picker.open);
        assert!(picker.term.is_empty());
        assert!(picker.results.is_empty());
    }
}
