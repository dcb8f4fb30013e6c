//! HTTP client for the OMDb title lookup endpoint.
//!
//! Wraps `GET {base}?apikey={key}&t={title}` using [`reqwest`].

use serde::Deserialize;

/// Default OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// The subset of an OMDb title response the importer reads.
///
/// OMDb reports missing values as `"N/A"`; those are filtered during mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OmdbMovie {
    pub title: Option<String>,
    pub year: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    /// `"True"` or `"False"`.
    pub response: Option<String>,
    /// Set when `response` is `"False"`.
    pub error: Option<String>,
}

/// Errors from the OMDb client.
#[derive(Debug, thiserror::Error)]
pub enum OmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// OMDb returned a non-2xx status code.
    #[error("OMDb API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// OMDb answered but found nothing for the title.
    #[error("OMDb has no match for '{title}': {message}")]
    NoMatch { title: String, message: String },
}

/// OMDb lookup client.
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// * `base_url` - endpoint URL, e.g. [`DEFAULT_BASE_URL`].
    /// * `api_key` - OMDb API key.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Look up a movie by exact title.
    pub async fn fetch_by_title(&self, title: &str) -> Result<OmdbMovie, OmdbError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OmdbError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let movie = response.json::<OmdbMovie>().await?;
        if movie.response.as_deref() == Some("False") {
            return Err(OmdbError::NoMatch {
                title: title.to_string(),
                message: movie.error.unwrap_or_else(|| "no details".to_string()),
            });
        }
        Ok(movie)
    }
}
