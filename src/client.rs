use crate::config::{Credentials, DEFAULT_API_BASE_URL, DEFAULT_JWT_EXPIRE_SEC, Settings};
use crate::error::{ApiError, ReportError};
use crate::report::ReportRequest;
use crate::token::SignedToken;
use chrono::{Duration, NaiveDate, Utc};
use log::{debug, info};
use reqwest::{Client as HttpClient, Response, StatusCode};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    http: HttpClient,
    base_url: String,
    token_ttl: Duration,
}

impl Client {
    /// Create a new client with the default base URL and token lifetime.
    pub fn new(credentials: Credentials) -> Result<Self, ReportError> {
        let http = HttpClient::builder().user_agent(USER_AGENT).build()?;

        info!("Initialized analytics API client with default base URL");
        Ok(Self {
            credentials,
            http,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token_ttl: Duration::seconds(DEFAULT_JWT_EXPIRE_SEC as i64),
        })
    }

    /// Create a client configured from loaded settings.
    pub fn from_settings(settings: Settings) -> Result<Self, ReportError> {
        let Settings {
            api_base_url,
            jwt_expire_sec,
            credentials,
        } = settings;
        Ok(Self::new(credentials)?
            .with_base_url(api_base_url)
            .with_token_ttl(Duration::seconds(jwt_expire_sec as i64)))
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Updated analytics API base URL to {}", self.base_url);
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Fetch the in-review report for a reporting day.
    pub async fn fetch_in_review_report(&self, date: NaiveDate) -> Result<Vec<u8>, ReportError> {
        self.fetch_report(&ReportRequest::in_review(date)).await
    }

    /// Fetch a report and return its body untouched.
    pub async fn fetch_report(&self, request: &ReportRequest) -> Result<Vec<u8>, ReportError> {
        debug!("Fetching {} report for {}", request.kind, request.date);
        let response = self.get(request.path_and_query()).await?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(ReportError::from)
    }

    async fn get(&self, path: String) -> Result<Response, ReportError> {
        let token = SignedToken::issue(&self.credentials, self.token_ttl, Utc::now())?;
        let url = format!("{}{}", self.base_url, path);
        debug!("GET request to {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        debug!("Received status {}", response.status());
        Self::handle_status(response).await
    }

    async fn handle_status(response: Response) -> Result<Response, ReportError> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ReportError::Api(ApiError::from_status(status, body)))
    }
}
