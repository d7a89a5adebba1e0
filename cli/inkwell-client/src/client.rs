//! The configured API client.

use std::fmt::Debug;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{CollectionApi, ExploreApi, HomeApi, NoteApi, UserApi};
use crate::config::{ClientConfig, TransportMode};
use crate::error::ApiError;
use crate::middleware::{BearerAuth, Pipeline, RecoverPayload};
use crate::storage::LocalStorage;
use crate::transport::{FixtureTransport, HttpTransport, Request, Transport, TransportTrait};
use crate::types::Query;

/// A client for the notes backend.
///
/// Wraps a [Transport] selected once from [ClientConfig::mode] and a
/// [Pipeline] of middleware:
/// - network: [BearerAuth], then [RecoverPayload]
/// - fixtures: [RecoverPayload] only, so no token is ever attached
///
/// Every call returns the payload itself, never the response envelope.
pub struct ApiClient {
    transport: Transport,
    pipeline: Pipeline,
    config: ClientConfig,
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("mode", &self.config.mode)
            .field("middleware", &self.pipeline.names())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig, storage: Arc<dyn LocalStorage>) -> Result<Self, ApiError> {
        let (transport, pipeline) = match config.mode {
            TransportMode::Network => {
                debug!(base_url = %config.base_url, "using network transport");
                let transport = HttpTransport::new(&config)?.into();
                let pipeline = Pipeline::new()
                    .with(BearerAuth::new(storage))
                    .with(RecoverPayload);
                (transport, pipeline)
            },
            TransportMode::Fixtures => {
                debug!("using fixture transport");
                let pipeline = Pipeline::new().with(RecoverPayload);
                (FixtureTransport.into(), pipeline)
            },
        };

        Ok(Self::from_parts(config, transport, pipeline))
    }

    /// Assemble a client from an explicit transport and pipeline.
    pub fn from_parts(config: ClientConfig, transport: Transport, pipeline: Pipeline) -> Self {
        Self {
            transport,
            pipeline,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn middleware(&self) -> Vec<&'static str> {
        self.pipeline.names()
    }

    /// Send a request through the pipeline and return the untyped payload.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send_raw(&self, request: Request) -> Result<Value, ApiError> {
        debug!("sending request");
        let outcome = match self.pipeline.apply_request(request) {
            Ok(request) => self.transport.send(request).await,
            Err(e) => Err(e),
        };
        self.pipeline
            .apply_response(outcome)
            .map(|response| response.into_payload())
    }

    /// Send a request and decode the payload into `T`.
    ///
    /// A payload that does not fit `T` is returned inside
    /// [ApiError::UnexpectedShape].
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let payload = self.send_raw(request).await?;
        match <T as Deserialize>::deserialize(&payload) {
            Ok(value) => Ok(value),
            Err(source) => Err(ApiError::UnexpectedShape { payload, source }),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        query: Query,
    ) -> Result<T, ApiError> {
        self.send(Request::new(Method::GET, path).with_query(query))
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<T, ApiError> {
        self.send(with_body(Request::new(Method::POST, path), body)?)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, ApiError> {
        self.send(with_body(Request::new(Method::PUT, path), Some(body))?)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
    ) -> Result<T, ApiError> {
        self.send(Request::new(Method::DELETE, path)).await
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn notes(&self) -> NoteApi<'_> {
        NoteApi::new(self)
    }

    pub fn collections(&self) -> CollectionApi<'_> {
        CollectionApi::new(self)
    }

    pub fn home(&self) -> HomeApi<'_> {
        HomeApi::new(self)
    }

    pub fn explore(&self) -> ExploreApi<'_> {
        ExploreApi::new(self)
    }
}

fn with_body(
    request: Request,
    body: Option<&(impl Serialize + ?Sized)>,
) -> Result<Request, ApiError> {
    match body {
        Some(body) => Ok(request.with_body(serde_json::to_value(body).map_err(ApiError::Encode)?)),
        None => Ok(request),
    }
}
