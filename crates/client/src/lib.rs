//! `catalog-client`: HTTP access to the products REST backend.
//!
//! Every call goes through an [`HttpPipeline`]: a [`Transport`] performs the
//! request, then each registered [`Interceptor`] sees the response or the
//! failure. The standard pipeline unwraps `data` envelopes and turns failures
//! into user-facing error toasts.

pub mod api;
pub mod error;
pub mod error_translator;
pub mod interceptor;
pub mod normalize;
pub mod request;
pub mod transport;

pub use api::{ListQuery, ProductsApi, ProductsBackend};
pub use error::ClientError;
pub use error_translator::{ErrorTranslator, RequestAction};
pub use interceptor::{HttpPipeline, Interceptor};
pub use normalize::NormalizeResponse;
pub use request::{ApiRequest, ApiResponse, HttpFailure};
pub use transport::{ReqwestTransport, Transport};
