//! Gemini `generateContent` client.
//!
//! Wraps a plain-text question in the upstream request envelope, posts it and
//! hands back the raw response body. The answer is never parsed here.
//!
//! One async core ([`GeminiClient::ask`]) backs two other entry points:
//! [`GeminiClient::ask_blocking`] for synchronous callers and
//! [`GeminiClient::ask_detached`] which returns a handle immediately.

use metrics::counter;
use reqwest::{header::CONTENT_TYPE, Client};
use secrecy::ExposeSecret;
use serde::Serialize;
use service_core::error::AppError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;

use crate::config::GeminiSettings;

/// Error type for Gemini calls.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Upstream answered with a 4xx or 5xx status.
    #[error("Gemini API returned an error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Error communicating with Gemini API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Blocking call not possible: {0}")]
    Runtime(String),

    #[error("Gemini request task failed: {0}")]
    Task(String),
}

impl GeminiError {
    /// HTTP status of an upstream rejection, if that is what this is.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GeminiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<GeminiError> for AppError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Upstream { status, body } => AppError::Upstream { status, body },
            GeminiError::Transport(_) => AppError::ServiceUnavailable,
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(GeminiError::Client)?;

        Ok(Self { settings, client })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// `{base}/models/{model}:generateContent?key={key}`. Contains the API
    /// key, so it is never logged.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model,
            self.settings.api_key.expose_secret()
        )
    }

    /// Send `question` upstream and return the raw response body.
    pub async fn ask(&self, question: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::for_question(question);

        tracing::debug!(
            model = %self.settings.model,
            question_len = question.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_client_error() || status.is_server_error() {
            tracing::error!(
                model = %self.settings.model,
                status = status.as_u16(),
                body = %body,
                "Gemini API error response"
            );
            counter!("gemini_requests_total", "outcome" => "upstream_error").increment(1);
            return Err(GeminiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        counter!("gemini_requests_total", "outcome" => "success").increment(1);
        Ok(body)
    }

    /// Like [`ask`](Self::ask), but waits for the answer on the calling thread.
    ///
    /// Inside a multi-thread Tokio runtime the worker is handed over via
    /// `block_in_place`; outside any runtime a private current-thread runtime
    /// drives the call. A current-thread runtime cannot block, so that case
    /// is reported as [`GeminiError::Runtime`].
    pub fn ask_blocking(&self, question: &str) -> Result<String, GeminiError> {
        match Handle::try_current() {
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::CurrentThread => Err(GeminiError::Runtime(
                    "ask_blocking called on a current-thread runtime; use ask().await".to_string(),
                )),
                _ => tokio::task::block_in_place(|| handle.block_on(self.ask(question))),
            },
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| GeminiError::Runtime(e.to_string()))?;
                runtime.block_on(self.ask(question))
            }
        }
    }

    /// Start the call in the background and return a handle right away.
    ///
    /// The call is spawned on the current Tokio runtime; outside one this
    /// fails with [`GeminiError::Runtime`].
    pub fn ask_detached(&self, question: impl Into<String>) -> Result<PendingAnswer, GeminiError> {
        let handle = Handle::try_current().map_err(|e| GeminiError::Runtime(e.to_string()))?;
        let client = self.clone();
        let question = question.into();
        Ok(PendingAnswer {
            task: handle.spawn(async move { client.ask(&question).await }),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> GeminiError {
        // Strip the URL: it carries the API key.
        let e = e.without_url();
        tracing::error!(model = %self.settings.model, error = %e, "Error communicating with Gemini API");
        counter!("gemini_requests_total", "outcome" => "transport_error").increment(1);
        GeminiError::Transport(e)
    }
}

/// In-flight answer started by [`GeminiClient::ask_detached`].
///
/// Resolves to the same result [`GeminiClient::ask`] would have produced.
/// Dropping the handle does not cancel the request; call [`abort`](Self::abort).
pub struct PendingAnswer {
    task: JoinHandle<Result<String, GeminiError>>,
}

impl PendingAnswer {
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Future for PendingAnswer {
    type Output = Result<String, GeminiError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|e| Err(GeminiError::Task(e.to_string()))))
    }
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

/// `{"contents":[{"parts":[{"text":"..."}]}]}`
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn for_question(question: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: question }],
            }],
        }
    }
}
