//! HTTP client for the Nova REST API.
//!
//! Wraps `reqwest` with typed endpoints, status handling and response
//! deserialization. Roster rows are normalized before they are returned.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::normalize::normalize_records;
use super::types::{ExistsResponse, OrganizationSuggestion, PractitionerProfile, StateOption, Suggestion};
use crate::domain::{DirectoryError, LocationRecord, RecordId, Result};
use crate::Config;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body excerpt carried into [`DirectoryError::Api`].
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the Nova REST API.
///
/// Use [`NovaClient::new`] with the application [`Config`], or
/// [`NovaClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct NovaClient {
    client: Client,
    base_url: Url,
}

impl NovaClient {
    /// Creates a client for `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be built, or [`DirectoryError::Config`] if the base URL is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, config.request_timeout_secs)
    }

    /// Creates a client with an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be built, or [`DirectoryError::Config`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("provider-directory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Exactly one trailing slash, so endpoint segments append below any
        // path prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised)
            .map_err(|e| DirectoryError::Config(format!("invalid API base URL '{base_url}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(DirectoryError::Config(format!("API base URL '{base_url}' cannot carry a path")));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Name and specialty suggestions for the search box.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::Http`] on network failure.
    /// - [`DirectoryError::Api`] on a non-success status.
    /// - [`DirectoryError::Deserialize`] if the body is not a suggestion list.
    pub async fn search_suggestions(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = self.build_url(&["api", "search", "suggestions"], &[("query", query)]);
        self.get_json(url, &format!("search suggestions (query={query})")).await
    }

    /// Organization suggestions for the search box.
    ///
    /// # Errors
    ///
    /// Same as [`NovaClient::search_suggestions`].
    pub async fn organization_suggestions(&self, query: &str) -> Result<Vec<OrganizationSuggestion>> {
        let url = self.build_url(&["api", "organizations", "suggestions"], &[("query", query)]);
        self.get_json(url, &format!("organization suggestions (query={query})")).await
    }

    /// Both suggestion lists, practitioner/specialty entries first.
    ///
    /// # Errors
    ///
    /// Fails if either request fails.
    pub async fn all_suggestions(&self, query: &str) -> Result<Vec<Suggestion>> {
        let (mut search, organizations) =
            tokio::try_join!(self.search_suggestions(query), self.organization_suggestions(query))?;
        search.extend(organizations.into_iter().map(Suggestion::from));
        Ok(search)
    }

    /// States offered by the state filter.
    ///
    /// # Errors
    ///
    /// Same as [`NovaClient::search_suggestions`].
    pub async fn states(&self) -> Result<Vec<StateOption>> {
        let url = self.build_url(&["api", "states"], &[]);
        self.get_json(url, "states").await
    }

    /// Whether the organization has directory data.
    ///
    /// # Errors
    ///
    /// Same as [`NovaClient::search_suggestions`].
    pub async fn organization_exists(&self, organization_id: &RecordId) -> Result<bool> {
        let url = self.build_url(&["api", "organizations", organization_id.as_str(), "exists"], &[]);
        let body: ExistsResponse = self
            .get_json(url, &format!("organization exists (id={organization_id})"))
            .await?;
        Ok(body.exists)
    }

    /// Normalized location roster of an organization.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::OrganizationNotFound`] on a 404.
    /// - Otherwise the same as [`NovaClient::search_suggestions`].
    #[tracing::instrument(level = "debug", skip_all, fields(organization = %organization_id))]
    pub async fn organization_locations(&self, organization_id: &RecordId) -> Result<Vec<LocationRecord>> {
        let url = self.build_url(&["api", "organizations", organization_id.as_str(), "locations"], &[]);
        let response = self.send(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::OrganizationNotFound(organization_id.to_string()));
        }

        let records: Vec<LocationRecord> =
            Self::decode(response, &format!("organization locations (id={organization_id})")).await?;
        tracing::debug!(count = records.len(), "roster received");
        Ok(normalize_records(records))
    }

    /// Profile of one practitioner.
    ///
    /// # Errors
    ///
    /// Same as [`NovaClient::search_suggestions`].
    pub async fn practitioner(&self, practitioner_id: &RecordId) -> Result<PractitionerProfile> {
        let url = self.build_url(&["api", "practitioners", practitioner_id.as_str()], &[]);
        let mut profile: PractitionerProfile = self
            .get_json(url, &format!("practitioner (id={practitioner_id})"))
            .await?;
        profile.locations = normalize_records(std::mem::take(&mut profile.locations));
        Ok(profile)
    }

    /// Appends percent-encoded path segments and query pairs to the base URL.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn send(&self, url: Url) -> Result<Response> {
        tracing::debug!(%url, "GET");
        Ok(self.client.get(url).send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T> {
        let response = self.send(url).await?;
        Self::decode(response, context).await
    }

    /// Checks for a 2xx status and parses the body as JSON.
    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt: String = body.trim().chars().take(ERROR_BODY_LIMIT).collect();
            tracing::warn!(%status, context, "Nova API request failed");
            return Err(DirectoryError::Api(if excerpt.is_empty() {
                format!("{context} returned {status}")
            } else {
                format!("{context} returned {status}: {excerpt}")
            }));
        }

        serde_json::from_str(&body).map_err(|source| DirectoryError::Deserialize {
            context: context.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NovaClient {
        NovaClient::with_base_url(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_segments_and_query() {
        let client = test_client("http://localhost:8080");
        let url = client.build_url(&["api", "search", "suggestions"], &[("query", "card")]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/search/suggestions?query=card");
    }

    #[test]
    fn build_url_keeps_path_prefix() {
        let client = test_client("https://example.org/nova///");
        let url = client.build_url(&["api", "states"], &[]);
        assert_eq!(url.as_str(), "https://example.org/nova/api/states");
    }

    #[test]
    fn build_url_encodes_ids_and_queries() {
        let client = test_client("http://localhost:8080/");
        let url = client.build_url(&["api", "organizations", "a/b c", "exists"], &[("query", "x & y")]);
        assert!(url.path().contains("a%2Fb%20c"), "segment should be encoded: {url}");
        assert!(url.as_str().contains("x+%26+y"), "query should be encoded: {url}");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = NovaClient::with_base_url("not a url", 30).unwrap_err();
        assert!(matches!(err, DirectoryError::Config(_)));
    }
}
