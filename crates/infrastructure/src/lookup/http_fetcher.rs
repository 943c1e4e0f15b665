use async_trait::async_trait;
use domainstack_application::ports::SectionFetcher;
use domainstack_domain::config::LookupConfig;
use domainstack_domain::{DomainError, FetchOutcome, PermanentFailure, Section};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = "Domainstack/0.3 (revalidation)";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Asks the lookup service for `GET {base_url}/v1/{section}/{domain}`.
///
/// The service does the DNS/RDAP/TLS/HTTP work; this side only maps its
/// answer onto [`FetchOutcome`].
pub struct HttpSectionFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSectionFetcher {
    pub fn new(config: &LookupConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, section: Section, domain: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, section, domain)
    }
}

/// Maps a lookup-service response onto a fetch outcome.
///
/// 2xx bodies must be JSON. 408, 429 and 5xx are transient. Any other status
/// is permanent, classified by the `error` code in the body when present.
pub fn classify_response(status: StatusCode, body: &str) -> FetchOutcome {
    if status.is_success() {
        return match serde_json::from_str(body) {
            Ok(payload) => FetchOutcome::Fresh(payload),
            Err(e) => FetchOutcome::Retry(format!("malformed lookup response: {e}")),
        };
    }

    if status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
    {
        return FetchOutcome::Retry(format!("HTTP {}", status.as_u16()));
    }

    let failure = serde_json::from_str::<ErrorBody>(body)
        .map(|b| PermanentFailure::from_code(&b.error))
        .unwrap_or_else(|_| PermanentFailure::Other(format!("HTTP {}", status.as_u16())));
    FetchOutcome::Permanent(failure)
}

#[async_trait]
impl SectionFetcher for HttpSectionFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, section: Section, domain: &str) -> FetchOutcome {
        let url = self.url(section, domain);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Lookup request failed");
                return FetchOutcome::Retry(e.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read lookup response");
                return FetchOutcome::Retry(e.to_string());
            }
        };

        debug!(status = status.as_u16(), bytes = body.len(), "Lookup response");
        classify_response(status, &body)
    }
}
