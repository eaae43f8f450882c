//! Failure → user message translation.
//!
//! Each failed call produces exactly one error toast whose text names the
//! action that failed and, when available, why. The failure itself is passed
//! on unchanged so callers can still react to it.

use reqwest::Method;
use serde_json::Value;

use catalog_toast::ToastService;

use crate::interceptor::Interceptor;
use crate::request::{ApiRequest, HttpFailure};

const NETWORK: &str = "Sin conexión con el servidor";
const UNEXPECTED: &str = "Error inesperado";
const NOT_FOUND: &str = "No se encontró el recurso solicitado.";
const INVALID_DATA: &str = "Datos inválidos.";
const UNKNOWN: &str = "Ocurrió un error";

const VERIFY_PATH: &str = "/products/verification/";
const PRODUCTS_PATH: &str = "/products";

/// What the failing request was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Create,
    Update,
    Delete,
    Verify,
    Other,
}

impl RequestAction {
    pub fn classify(method: &Method, path: &str) -> Self {
        if path.contains(VERIFY_PATH) {
            return RequestAction::Verify;
        }
        if path.contains(PRODUCTS_PATH) {
            if *method == Method::POST {
                return RequestAction::Create;
            }
            if *method == Method::PUT {
                return RequestAction::Update;
            }
            if *method == Method::DELETE {
                return RequestAction::Delete;
            }
        }
        RequestAction::Other
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            RequestAction::Create => "No se pudo crear el producto",
            RequestAction::Update => "No se pudo actualizar el producto",
            RequestAction::Delete => "No se pudo eliminar el producto",
            RequestAction::Verify => "No se pudo verificar el ID",
            RequestAction::Other => UNKNOWN,
        }
    }
}

/// Message the backend put in an error body, if any.
///
/// Accepts a plain string body, a `message` field, or an `errors` collection
/// whose entries are strings or `{ "message": ... }` objects.
pub fn backend_message(body: Option<&Value>) -> Option<String> {
    match body? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Object(map) => {
            if let Some(Value::String(message)) = map.get("message") {
                if !message.is_empty() {
                    return Some(message.clone());
                }
            }

            let entries: Vec<&Value> = match map.get("errors")? {
                Value::Object(errors) => errors.values().collect(),
                Value::Array(errors) => errors.iter().collect(),
                _ => return None,
            };
            let messages: Vec<&str> = entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(obj) => obj.get("message").and_then(Value::as_str),
                    _ => None,
                })
                .filter(|text| !text.is_empty())
                .collect();

            Some(messages.join(" · ")).filter(|joined| !joined.is_empty())
        }
        _ => None,
    }
}

/// `"{prefix}. {detail}"`, or the bare prefix when the detail is empty or
/// already starts with it.
pub fn compose_message(prefix: &str, detail: &str) -> String {
    let prefix = prefix.trim().trim_end_matches(['.', ':']);
    let detail = detail.trim();
    if detail.is_empty() || detail.to_lowercase().starts_with(&prefix.to_lowercase()) {
        prefix.to_string()
    } else {
        format!("{prefix}. {detail}")
    }
}

/// Full user-facing text for a failed request.
pub fn user_message(request: &ApiRequest, failure: &HttpFailure) -> String {
    let action = RequestAction::classify(&request.method, &request.path);

    let detail = match (failure.status, action) {
        (400, RequestAction::Create) => INVALID_DATA.to_string(),
        (404, RequestAction::Update | RequestAction::Delete) => NOT_FOUND.to_string(),
        _ => backend_message(failure.body.as_ref()).unwrap_or_else(|| {
            if failure.is_network() {
                NETWORK.to_string()
            } else if !failure.status_text.is_empty() {
                failure.status_text.clone()
            } else {
                UNEXPECTED.to_string()
            }
        }),
    };

    compose_message(action.prefix(), &detail)
}

/// Emits one error toast per failed call; never retries.
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    toasts: ToastService,
}

impl ErrorTranslator {
    pub fn new(toasts: ToastService) -> Self {
        Self { toasts }
    }
}

impl Interceptor for ErrorTranslator {
    fn on_error(&self, request: &ApiRequest, failure: HttpFailure) -> HttpFailure {
        self.toasts.error(user_message(request, &failure));
        failure
    }
}
