//! Request and response transformers applied around the transport.
//!
//! A [Pipeline] runs request transformers in order and response
//! transformers in reverse order. A failure produced while preparing the
//! request still passes through every response transformer.

use std::fmt::Debug;
use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::StatusCode;
use tracing::{debug, trace};

use crate::error::{payload_is_present, ApiError};
use crate::storage::{LocalStorage, TOKEN_KEY};
use crate::transport::{Request, Response};

pub trait Middleware: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn on_request(&self, request: Request) -> Result<Request, ApiError> {
        Ok(request)
    }

    fn on_response(
        &self,
        outcome: Result<Response, ApiError>,
    ) -> Result<Response, ApiError> {
        outcome
    }
}

/// Ordered list of middleware.
#[derive(Debug, Default)]
pub struct Pipeline {
    layers: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, layer: impl Middleware + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    pub fn apply_request(&self, request: Request) -> Result<Request, ApiError> {
        self.layers.iter().try_fold(request, |request, layer| {
            trace!(layer = layer.name(), "applying request middleware");
            layer.on_request(request)
        })
    }

    pub fn apply_response(
        &self,
        outcome: Result<Response, ApiError>,
    ) -> Result<Response, ApiError> {
        self.layers.iter().rev().fold(outcome, |outcome, layer| {
            trace!(layer = layer.name(), "applying response middleware");
            layer.on_response(outcome)
        })
    }
}

/// Attach `Authorization: Bearer <token>` when a token is stored.
///
/// The token is read on every request and never written.
#[derive(Debug)]
pub struct BearerAuth {
    storage: Arc<dyn LocalStorage>,
}

impl BearerAuth {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }
}

impl Middleware for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    fn on_request(&self, mut request: Request) -> Result<Request, ApiError> {
        if let Some(token) = self.storage.get_item(TOKEN_KEY)? {
            if !token.is_empty() {
                request.headers.insert(
                    header::AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {token}"))?,
                );
            }
        }
        Ok(request)
    }
}

/// Resolve failures that carry a payload as if they had succeeded.
///
/// Callers cannot tell a backend error body from a regular payload unless
/// they inspect its shape. Failures without a payload pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecoverPayload;

impl Middleware for RecoverPayload {
    fn name(&self) -> &'static str {
        "recover-payload"
    }

    fn on_response(
        &self,
        outcome: Result<Response, ApiError>,
    ) -> Result<Response, ApiError> {
        match outcome {
            Err(ApiError::Rejected { status, payload }) if payload_is_present(&payload) => {
                debug!(?status, "resolving rejected request with its payload");
                Ok(Response::new(status.unwrap_or(StatusCode::OK), payload))
            },
            other => other,
        }
    }
}
