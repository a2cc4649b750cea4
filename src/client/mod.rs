//! Client layer: the request gateway with conditional caching, and the
//! operations built on top of it.

mod cache;

use std::error::Error as StdError;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    AirRaidAlertOblastStatus, AirRaidAlertOblastStatuses, Alerts, ApiError, ApiErrorKind,
    ApiToken, LocationError, LocationRef, LocationUidResolver, ValidationError,
};

pub use cache::{CachedResponse, MemoryCache, ResponseCache};

const DEFAULT_BASE_URL: &str = "https://api.alerts.in.ua/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_USER_AGENT: &str = concat!("alerts-in-ua-rust/", env!("CARGO_PKG_VERSION"));

/// Default period accepted by the alert history endpoint.
pub const DEFAULT_HISTORY_PERIOD: &str = "week_ago";

const ACTIVE_ALERTS_ENDPOINT: &str = "alerts/active.json";
const STATUSES_BY_OBLAST_ENDPOINT: &str = "iot/active_air_raid_alerts_by_oblast.json";

const ACCEPT: &str = "Accept";
const AUTHORIZATION: &str = "Authorization";
const USER_AGENT: &str = "User-Agent";
const IF_MODIFIED_SINCE: &str = "If-Modified-Since";

type Headers = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    last_modified: Option<String>,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let last_modified = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text()?;
        Ok(HttpResponse {
            status,
            last_modified,
            body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AlertsClient`].
pub enum AlertsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The API answered with a status other than 200 or 304.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A 200 response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A location title or UID is not in the built-in table.
    #[error("location not found: {0}")]
    Location(#[from] LocationError),

    /// The token (or another constructor input) was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The base URL passed to the builder could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The endpoint is not a plain relative path under the base URL.
    #[error("invalid endpoint: {endpoint:?}")]
    InvalidEndpoint { endpoint: String },
}

impl AlertsError {
    /// Kind of the API error, if this is one.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Whether the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        let Self::Transport(err) = self else {
            return false;
        };
        if let Some(err) = err.downcast_ref::<reqwest::Error>() {
            return err.is_timeout();
        }
        err.downcast_ref::<std::io::Error>()
            .is_some_and(|err| err.kind() == std::io::ErrorKind::TimedOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Options for endpoints without parameters, such as active alerts.
pub struct FetchOptions {
    /// Revalidate a cached payload with `If-Modified-Since` before downloading.
    pub use_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Period token sent as-is, e.g. `week_ago` or `month_ago`.
    pub period: String,
    /// See [`FetchOptions::use_cache`].
    pub use_cache: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_HISTORY_PERIOD.to_owned(),
            use_cache: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOptions {
    /// Treat partial (raion/hromada-level) alerts as no alert.
    pub oblast_level_only: bool,
    /// See [`FetchOptions::use_cache`].
    pub use_cache: bool,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            oblast_level_only: false,
            use_cache: true,
        }
    }
}

/// Builder for [`AlertsClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent or cache.
pub struct AlertsClientBuilder {
    token: ApiToken,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    cache: Option<Box<dyn ResponseCache>>,
}

impl AlertsClientBuilder {
    /// Create a builder with the public API URL and a 5 second timeout.
    pub fn new(token: ApiToken) -> Self {
        Self {
            token,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cache: None,
        }
    }

    /// Override the versioned API root, e.g. `http://127.0.0.1:8080/v1/`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the default [`MemoryCache`].
    pub fn cache(mut self, cache: impl ResponseCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Build an [`AlertsClient`].
    pub fn build(self) -> Result<AlertsClient, AlertsError> {
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| AlertsError::Transport(Box::new(err)))?;

        Ok(AlertsClient {
            token: self.token,
            base_url,
            user_agent: self.user_agent,
            resolver: LocationUidResolver::new(),
            cache: self
                .cache
                .unwrap_or_else(|| Box::new(MemoryCache::new())),
            http: Box::new(ReqwestTransport { client }),
        })
    }
}

/// Blocking client for the alerts.in.ua API.
///
/// Every successful response is cached per endpoint together with its
/// `Last-Modified` header. Later calls revalidate with `If-Modified-Since` and
/// return the cached payload on `304 Not Modified`.
///
/// All request methods take `&mut self`. The client is not internally
/// synchronized: to share one between threads, wrap it in a `Mutex`.
pub struct AlertsClient {
    token: ApiToken,
    base_url: Url,
    user_agent: String,
    resolver: LocationUidResolver,
    cache: Box<dyn ResponseCache>,
    http: Box<dyn HttpTransport>,
}

impl AlertsClient {
    /// Create a client with default settings.
    ///
    /// Fails if the token is blank. For more customization, use [`AlertsClient::builder`].
    pub fn new(token: impl Into<String>) -> Result<Self, AlertsError> {
        Self::builder(ApiToken::new(token)?).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(token: ApiToken) -> AlertsClientBuilder {
        AlertsClientBuilder::new(token)
    }

    /// Resolver used to turn location titles into UIDs.
    pub fn location_resolver(&self) -> &LocationUidResolver {
        &self.resolver
    }

    /// Cached response for `endpoint`, if any.
    pub fn cached(&self, endpoint: &str) -> Option<&CachedResponse> {
        self.cache.get(endpoint)
    }

    /// Drop every cached response, so the next call per endpoint is a plain request.
    pub fn clear_cache(&mut self) {
        debug!("clearing response cache");
        self.cache.clear();
    }

    /// GET `endpoint` (relative to the base URL) and return the parsed JSON body.
    ///
    /// With `use_cache`, a cached endpoint is first revalidated with a
    /// conditional request; on `304` the cached payload is returned as-is.
    /// Any other answer is followed by a plain request. Errors are never
    /// masked by cached data.
    ///
    /// Errors:
    /// - [`AlertsError::Transport`] when the request fails or times out,
    /// - [`AlertsError::Api`] for any status other than 200/304,
    /// - [`AlertsError::Parse`] when a 200 body is not JSON,
    /// - [`AlertsError::InvalidEndpoint`] when `endpoint` would leave the base path.
    pub fn fetch(&mut self, endpoint: &str, use_cache: bool) -> Result<Value, AlertsError> {
        let url = self.endpoint_url(endpoint)?;

        if use_cache {
            if let Some(cached) = self.cache.get(endpoint) {
                let mut headers = self.standard_headers();
                headers.push((IF_MODIFIED_SINCE, cached.last_modified.clone()));

                debug!(endpoint, last_modified = %cached.last_modified, "sending conditional request");
                let response = self
                    .http
                    .get(url.as_str(), &headers)
                    .map_err(AlertsError::Transport)?;

                if response.status == 304 {
                    debug!(endpoint, "not modified, using cached payload");
                    return Ok(cached.data.clone());
                }
                debug!(endpoint, status = response.status, "cached payload not revalidated");
            }
        }

        debug!(endpoint, "sending request");
        let response = self
            .http
            .get(url.as_str(), &self.standard_headers())
            .map_err(AlertsError::Transport)?;
        debug!(endpoint, status = response.status, "received response");

        if response.status != 200 {
            return Err(crate::transport::decode_api_error(response.status, &response.body).into());
        }

        let data: Value = serde_json::from_str(&response.body)
            .map_err(|err| AlertsError::Parse(Box::new(err)))?;

        match response.last_modified {
            Some(last_modified) => {
                debug!(endpoint, last_modified = %last_modified, "caching response");
                self.cache.insert(
                    endpoint.to_owned(),
                    CachedResponse {
                        data: data.clone(),
                        last_modified,
                    },
                );
            }
            None => {
                warn!(endpoint, "response has no Last-Modified header, not caching");
                self.cache.remove(endpoint);
            }
        }

        Ok(data)
    }

    /// Alerts that are active right now.
    pub fn active_alerts(&mut self, options: FetchOptions) -> Result<Alerts, AlertsError> {
        let payload = self.fetch(ACTIVE_ALERTS_ENDPOINT, options.use_cache)?;
        crate::transport::decode_alerts_response(payload)
            .map_err(|err| AlertsError::Parse(Box::new(err)))
    }

    /// Alert history of a region over `options.period`.
    ///
    /// `location` is a UID, a numeric string, or a location title.
    pub fn alerts_history(
        &mut self,
        location: impl Into<LocationRef>,
        options: HistoryOptions,
    ) -> Result<Alerts, AlertsError> {
        let uid = location.into().resolve(&self.resolver)?;
        let endpoint = format!("regions/{uid}/alerts/{}.json", options.period);
        let payload = self.fetch(&endpoint, options.use_cache)?;
        crate::transport::decode_alerts_response(payload)
            .map_err(|err| AlertsError::Parse(Box::new(err)))
    }

    /// Air raid status of a single oblast.
    pub fn air_raid_alert_status(
        &mut self,
        location: impl Into<LocationRef>,
        options: StatusOptions,
    ) -> Result<AirRaidAlertOblastStatus, AlertsError> {
        let uid = location.into().resolve(&self.resolver)?;
        let location_title = self.resolver.resolve_location_title(uid)?;
        let endpoint = format!("iot/active_air_raid_alerts/{uid}.json");
        let payload = self.fetch(&endpoint, options.use_cache)?;
        crate::transport::decode_oblast_status(location_title, &payload, options.oblast_level_only)
            .map_err(|err| AlertsError::Parse(Box::new(err)))
    }

    /// Air raid statuses of all oblasts.
    pub fn air_raid_alert_statuses_by_oblast(
        &mut self,
        options: StatusOptions,
    ) -> Result<AirRaidAlertOblastStatuses, AlertsError> {
        let payload = self.fetch(STATUSES_BY_OBLAST_ENDPOINT, options.use_cache)?;
        crate::transport::decode_oblast_statuses(&payload, options.oblast_level_only)
            .map_err(|err| AlertsError::Parse(Box::new(err)))
    }

    /// Append `endpoint` under the base path.
    ///
    /// Only plain relative paths are accepted: no leading `/`, no empty, `.` or
    /// `..` segments, and no scheme, query, fragment or percent-escapes.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, AlertsError> {
        let invalid = || AlertsError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
        };

        let plain_segments = endpoint.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains([':', '?', '#', '%', '\\'])
        });
        if !plain_segments {
            return Err(invalid());
        }

        let url = self.base_url.join(endpoint).map_err(|_| invalid())?;
        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path()) {
            return Err(invalid());
        }
        Ok(url)
    }

    fn standard_headers(&self) -> Headers {
        vec![
            (ACCEPT, "application/json".to_owned()),
            (AUTHORIZATION, self.token.bearer()),
            (USER_AGENT, self.user_agent.clone()),
        ]
    }
}
