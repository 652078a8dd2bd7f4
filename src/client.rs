//! Content client for the WordPress REST API.
//!
//! Two namespaces are read: the standard `wp/v2` one (page and post
//! listings) and the theme's `gutenberg-api/v1` one, which serves header,
//! footer, and per-page block trees already shaped for the front end.
//!
//! One attempt per call. No retries and no in-process caching; the
//! revalidation window is only forwarded to the server as a
//! `Cache-Control` request hint.

use crate::config::BackendConfig;
use crate::types::{FooterData, HeaderData, PageData, WpPost};
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Number of response-body characters kept in a status error.
pub const BODY_EXCERPT_CHARS: usize = 250;

const REST_PREFIX: &str = "wp-json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("WP fetch failed {status} {status_text}: {body_excerpt}")]
    Status {
        status: u16,
        status_text: String,
        body_excerpt: String,
    },
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Which REST namespace a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `wp/v2`
    Core,
    /// `gutenberg-api/v1`
    Content,
}

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    /// Freshness window in seconds, sent as a cache hint.
    pub revalidate: Option<u64>,
    /// Query-string pairs appended to the URL.
    pub query: Vec<(String, String)>,
}

impl FetchOptions {
    pub fn revalidate(secs: u64) -> Self {
        Self {
            revalidate: Some(secs),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Join a base URL and a path with exactly one slash between them.
///
/// ```
/// use blockpress::client::join_url;
/// assert_eq!(join_url("https://x.test/", "/posts"), "https://x.test/posts");
/// assert_eq!(join_url("https://x.test", "posts"), "https://x.test/posts");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `Cache-Control` value for a revalidation window.
pub fn cache_control(revalidate_secs: u64) -> String {
    if revalidate_secs == 0 {
        "no-cache".to_string()
    } else {
        format!("max-age={revalidate_secs}")
    }
}

/// First [`BODY_EXCERPT_CHARS`] characters of a response body.
pub fn body_excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Log a failed fetch and continue without its data.
///
/// This is the boundary where backend failures turn into the absent-data
/// sentinel that pages render as a fallback.
pub fn absent_on_error<T>(result: Result<T, FetchError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(what, error = %e, "fetch failed, continuing without data");
            None
        }
    }
}

/// Blocking HTTP client bound to one WordPress site.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: Client,
    site_url: String,
    core_namespace: String,
    content_namespace: String,
    credentials: Option<(String, String)>,
    revalidate: u64,
}

impl ContentClient {
    /// Build a client from backend settings.
    ///
    /// Fails with [`FetchError::MissingConfig`] before any network activity
    /// when the site URL is not configured.
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let site_url = config
            .site_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(FetchError::MissingConfig("backend.site_url (WP_SITE_URL)"))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.clone(), pass.clone()))
            }
            _ => None,
        };
        Ok(Self {
            http,
            site_url: site_url.to_string(),
            core_namespace: config.core_namespace.clone(),
            content_namespace: config.content_namespace.clone(),
            credentials,
            revalidate: config.revalidate_secs,
        })
    }

    /// Base URL of a namespace, e.g. `https://cms.test/wp-json/wp/v2`.
    pub fn namespace_url(&self, namespace: Namespace) -> String {
        let ns = match namespace {
            Namespace::Core => &self.core_namespace,
            Namespace::Content => &self.content_namespace,
        };
        join_url(&join_url(&self.site_url, REST_PREFIX), ns)
    }

    /// GET `path` under `namespace` and parse the JSON body as `T`.
    pub fn fetch_json<T: DeserializeOwned>(
        &self,
        namespace: Namespace,
        path: &str,
        options: &FetchOptions,
    ) -> Result<T, FetchError> {
        let url = join_url(&self.namespace_url(namespace), path);
        debug!(%url, "GET");

        let mut request = self.http.get(&url).header(CONTENT_TYPE, "application/json");
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(secs) = options.revalidate {
            request = request.header(CACHE_CONTROL, cache_control(secs));
        }
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body_excerpt: body_excerpt(&body),
            });
        }
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }

    fn content_options(&self) -> FetchOptions {
        FetchOptions::revalidate(self.revalidate)
    }

    pub fn header(&self) -> Result<HeaderData, FetchError> {
        self.fetch_json(Namespace::Content, "/header", &self.content_options())
    }

    pub fn footer(&self) -> Result<FooterData, FetchError> {
        self.fetch_json(Namespace::Content, "/footer", &self.content_options())
    }

    /// Block tree and metadata of the page with `slug`.
    pub fn page(&self, slug: &str) -> Result<PageData, FetchError> {
        self.fetch_json(
            Namespace::Content,
            &format!("/pages/{slug}"),
            &self.content_options(),
        )
    }

    /// Published pages from the standard namespace.
    pub fn list_pages(&self, per_page: u32) -> Result<Vec<WpPost>, FetchError> {
        let options = self.content_options().with_query("per_page", per_page);
        self.fetch_json(Namespace::Core, "/pages", &options)
    }

    pub fn list_posts(&self, per_page: u32) -> Result<Vec<WpPost>, FetchError> {
        let options = self.content_options().with_query("per_page", per_page);
        self.fetch_json(Namespace::Core, "/posts", &options)
    }
}
