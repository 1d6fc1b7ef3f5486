//! HTTP client for the shelf-analysis endpoint.
//!
//! Wraps the external vision service's `POST /analyze-shelf/` multipart
//! endpoint using [`reqwest`], with status checking, JSON parsing, and the
//! configurable retry policy from [`crate::retry`].

use crate::response::AnalysisResponse;
use crate::retry::{next_delay, with_jitter, RetryPolicy};

/// Client for a single vision-service deployment.
pub struct VisionClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

/// Errors from the vision-service client.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("vision service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed vision response: {0}")]
    MalformedResponse(String),
}

impl VisionError {
    /// Whether another attempt could plausibly succeed. Client-side 4xx
    /// responses and malformed bodies are not retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            VisionError::Request(_) => true,
            VisionError::Api { status, .. } => *status >= 500,
            VisionError::MalformedResponse(_) => false,
        }
    }
}

impl VisionClient {
    /// Create a new client.
    ///
    /// * `base_url` - service base URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: String, retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            retry,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across components).
    pub fn with_client(client: reqwest::Client, base_url: String, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url,
            retry,
        }
    }

    /// Service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a shelf photo for analysis.
    ///
    /// Sends a multipart `POST /analyze-shelf/` with `store_id`, `shelf_id`,
    /// and the image, retrying per the configured policy on transport errors
    /// and 5xx responses.
    pub async fn analyze_shelf(
        &self,
        store_id: &str,
        shelf_id: &str,
        filename: &str,
        image: Vec<u8>,
    ) -> Result<AnalysisResponse, VisionError> {
        let mut delay = self.retry.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self
                .analyze_shelf_once(store_id, shelf_id, filename, image.clone())
                .await
            {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let wait = with_jitter(delay);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        wait_ms = wait.as_millis() as u64,
                        error = %e,
                        "Vision analysis attempt failed, retrying",
                    );
                    tokio::time::sleep(wait).await;
                    delay = next_delay(delay, &self.retry);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One analysis attempt, no retry.
    async fn analyze_shelf_once(
        &self,
        store_id: &str,
        shelf_id: &str,
        filename: &str,
        image: Vec<u8>,
    ) -> Result<AnalysisResponse, VisionError> {
        // The multipart form is consumed by send(), so it is rebuilt per attempt.
        let form = reqwest::multipart::Form::new()
            .text("store_id", store_id.to_string())
            .text("shelf_id", shelf_id.to_string())
            .part(
                "image",
                reqwest::multipart::Part::bytes(image).file_name(filename.to_string()),
            );

        let response = self
            .client
            .post(format!("{}/analyze-shelf/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`VisionError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, VisionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VisionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful response body into the analysis result.
    async fn parse_response(response: reqwest::Response) -> Result<AnalysisResponse, VisionError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| VisionError::MalformedResponse(format!("invalid JSON: {e}")))
    }
}
