// src/lambda.rs

//! AWS Lambda handler for community digests.
//!
//! Accepts either a direct invocation payload (`{"code": "005930"}`) or an
//! API gateway style event carrying `queryStringParameters.code`, and always
//! answers with a [`DigestResponse`].

use std::collections::HashMap;

use chrono::Utc;
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::models::DigestResponse;
use crate::pipeline::DigestPipeline;

/// Lambda invocation payload.
#[derive(Debug, Default, Deserialize)]
pub struct CommunityRequest {
    /// Stock code for direct invocations
    #[serde(default)]
    pub code: Option<String>,

    /// Query parameters when invoked through an HTTP gateway
    #[serde(default, rename = "queryStringParameters")]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl CommunityRequest {
    /// The requested stock code, direct field first.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().or_else(|| {
            self.query_string_parameters
                .as_ref()
                .and_then(|params| params.get("code"))
                .map(String::as_str)
        })
    }
}

/// Main Lambda handler function.
#[instrument(skip(pipeline, event))]
pub async fn handler(
    pipeline: &DigestPipeline,
    event: LambdaEvent<CommunityRequest>,
) -> std::result::Result<DigestResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();
    let code = request.code();
    info!("Community digest requested: code={:?}", code);

    let response = pipeline.respond(code, Utc::now()).await;
    match &response.error {
        Some(error) => warn!("Digest failed: {}", error),
        None => info!(
            "Digest ready: {} latest, {} best in {}ms",
            response.latest.len(),
            response.best.len(),
            start.elapsed().as_millis()
        ),
    }

    Ok(response)
}
