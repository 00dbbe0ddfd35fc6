use crate::configuration::BackendSettings;
use crate::domain::{ContactSubmission, NewsletterSubscription, SubscriptionStatus};
use crate::telemetry::error_chain_fmt;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use std::sync::{Arc, PoisonError, RwLock};

pub const CONTACT_TABLE: &str = "contact_submissions";
pub const SUBSCRIBER_TABLE: &str = "newsletter_subscribers";

/// Postgres error code for `unique_violation`.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

const PLACEHOLDER_ENDPOINT: &str = "YOUR_SUPABASE_URL";
const PLACEHOLDER_ACCESS_TOKEN: &str = "YOUR_SUPABASE_ANON_KEY";

/// A row as echoed back by the backend after an insert.
pub type Row = serde_json::Value;

/// The two remote writes the form coordinators rely on.
#[async_trait::async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<Row, RemoteError>;

    async fn insert_subscriber(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<Row, RemoteError>;
}

#[derive(thiserror::Error)]
pub enum ConfigurationError {
    #[error("The backend endpoint is missing")]
    MissingEndpoint,
    #[error("The backend access token is missing")]
    MissingAccessToken,
    #[error("The backend endpoint `{0}` is not a valid http(s) URL")]
    InvalidEndpoint(String),
    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

impl std::fmt::Debug for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum RemoteError {
    #[error("Database not configured")]
    NotConfigured,
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
    #[error("The backend did not answer in time")]
    TimedOut(#[source] reqwest::Error),
    #[error("Failed to reach the backend")]
    Transport(#[source] reqwest::Error),
}

impl RemoteError {
    pub fn code(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION_CODE)
    }

    /// Rejections are answers from the backend; everything else means the
    /// request never got one.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RemoteError::Rejected { .. })
    }
}

impl std::fmt::Debug for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::TimedOut(e)
        } else {
            RemoteError::Transport(e)
        }
    }
}

#[derive(Clone, Debug)]
struct Connection {
    base_url: Url,
    http_client: Client,
    access_token: Secret<String>,
}

/// Client for the hosted table API.
///
/// Starts unconfigured: every insert fails with [`RemoteError::NotConfigured`]
/// until [`BackendClient::configure`] succeeds, and again after
/// [`BackendClient::dispose`]. Clones share the same connection state.
#[derive(Clone, Debug, Default)]
pub struct BackendClient {
    connection: Arc<RwLock<Option<Connection>>>,
}

#[derive(serde::Serialize)]
struct ContactRow<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    created_at: DateTime<Utc>,
}

#[derive(serde::Serialize)]
struct SubscriberRow<'a> {
    email: &'a str,
    subscribed_at: DateTime<Utc>,
    status: SubscriptionStatus,
}

#[derive(serde::Deserialize, Default)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl BackendClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(name = "Configuring backend client", skip(self, settings))]
    pub fn configure(&self, settings: &BackendSettings) -> Result<(), ConfigurationError> {
        let endpoint = settings.endpoint.trim();
        if endpoint.is_empty() || endpoint == PLACEHOLDER_ENDPOINT {
            return Err(ConfigurationError::MissingEndpoint);
        }
        let token = settings.access_token.expose_secret().trim();
        if token.is_empty() || token == PLACEHOLDER_ACCESS_TOKEN {
            return Err(ConfigurationError::MissingAccessToken);
        }
        let base_url = Url::parse(endpoint)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigurationError::InvalidEndpoint(endpoint.to_string()))?;
        let http_client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(ConfigurationError::HttpClient)?;

        let connection = Connection {
            base_url,
            http_client,
            access_token: Secret::new(token.to_string()),
        };
        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(connection);
        tracing::info!("Backend client configured");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the connection; inserts fail as unconfigured afterwards.
    pub fn dispose(&self) {
        self.connection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        tracing::info!("Backend client disposed");
    }

    fn connection(&self) -> Option<Connection> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn insert_row<T: serde::Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<Row, RemoteError> {
        let Some(connection) = self.connection() else {
            tracing::error!("Backend client used before it was configured");
            return Err(RemoteError::NotConfigured);
        };
        let url = format!(
            "{}/rest/v1/{}",
            connection.base_url.as_str().trim_end_matches('/'),
            table
        );
        let response = connection
            .http_client
            .post(&url)
            .header("apikey", connection.access_token.expose_secret())
            .bearer_auth(connection.access_token.expose_secret())
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response from the backend")
                    .to_string()
            });
            return Err(RemoteError::Rejected {
                status,
                code: body.code,
                message,
            });
        }

        // The row is stored once the status is a success, whatever the body says.
        match response.json::<Vec<Row>>().await {
            Ok(rows) => Ok(rows.into_iter().next().unwrap_or(Row::Null)),
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    %status,
                    "Insert succeeded but the returned representation could not be read"
                );
                Ok(Row::Null)
            }
        }
    }
}

#[async_trait::async_trait]
impl SubmissionStore for BackendClient {
    #[tracing::instrument(
        name = "Saving contact submission",
        skip(self, submission),
        fields(contact_email = %submission.email),
        err(Debug)
    )]
    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<Row, RemoteError> {
        let row = ContactRow {
            name: submission.name.as_ref(),
            email: submission.email.as_ref(),
            message: submission.message.as_ref(),
            created_at: submission.created_at,
        };
        self.insert_row(CONTACT_TABLE, &row).await
    }

    #[tracing::instrument(
        name = "Saving newsletter subscriber",
        skip(self, subscription),
        fields(subscriber_email = %subscription.email),
        err(Debug)
    )]
    async fn insert_subscriber(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<Row, RemoteError> {
        let row = SubscriberRow {
            email: subscription.email.as_ref(),
            subscribed_at: subscription.subscribed_at,
            status: subscription.status,
        };
        self.insert_row(SUBSCRIBER_TABLE, &row).await
    }
}
