//! Interceptor chain applied to every call.

use std::sync::Arc;

use catalog_toast::ToastService;

use crate::error_translator::ErrorTranslator;
use crate::normalize::NormalizeResponse;
use crate::request::{ApiRequest, ApiResponse, HttpFailure};
use crate::transport::Transport;

/// A response/failure stage. Both hooks default to pass-through.
pub trait Interceptor: Send + Sync {
    fn on_response(&self, _request: &ApiRequest, response: ApiResponse) -> ApiResponse {
        response
    }

    fn on_error(&self, _request: &ApiRequest, failure: HttpFailure) -> HttpFailure {
        failure
    }
}

/// Transport plus interceptors, applied in registration order.
pub struct HttpPipeline<T> {
    transport: T,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl<T: Transport> HttpPipeline<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            interceptors: Vec::new(),
        }
    }

    /// Envelope unwrapping followed by error toasts.
    pub fn standard(transport: T, toasts: ToastService) -> Self {
        Self::new(transport)
            .with(NormalizeResponse)
            .with(ErrorTranslator::new(toasts))
    }

    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, HttpFailure> {
        tracing::debug!(method = %request.method, path = %request.path, "request");

        match self.transport.send(&request).await {
            Ok(response) => Ok(self
                .interceptors
                .iter()
                .fold(response, |response, stage| stage.on_response(&request, response))),
            Err(failure) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    status = failure.status,
                    "request failed"
                );
                Err(self
                    .interceptors
                    .iter()
                    .fold(failure, |failure, stage| stage.on_error(&request, failure)))
            }
        }
    }
}
