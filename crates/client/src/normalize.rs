//! Unwraps `{ "data": ... }` envelopes so callers see the payload itself.

use serde_json::Value;

use crate::interceptor::Interceptor;
use crate::request::{ApiRequest, ApiResponse};

/// Replaces a response body `{ "data": X }` by `X` when `X` is an array or any
/// other truthy value (non-null, non-false, non-zero, non-empty string).
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeResponse;

impl Interceptor for NormalizeResponse {
    fn on_response(&self, _request: &ApiRequest, mut response: ApiResponse) -> ApiResponse {
        let unwrap = match &response.body {
            Value::Object(map) => map.get("data").is_some_and(|data| data.is_array() || is_truthy(data)),
            _ => false,
        };

        if unwrap {
            if let Value::Object(mut map) = response.body.take() {
                response.body = map.remove("data").unwrap_or(Value::Null);
            }
        }
        response
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(body: Value) -> Value {
        NormalizeResponse
            .on_response(&ApiRequest::get("/products"), ApiResponse::ok(body))
            .body
    }

    #[test]
    fn unwraps_arrays_including_empty_ones() {
        assert_eq!(normalize(json!({ "data": [{ "id": "a" }] })), json!([{ "id": "a" }]));
        assert_eq!(normalize(json!({ "data": [] })), json!([]));
    }

    #[test]
    fn unwraps_objects_and_drops_siblings() {
        let body = json!({ "message": "Product added successfully", "data": { "id": "a" } });
        assert_eq!(normalize(body), json!({ "id": "a" }));
    }

    #[test]
    fn leaves_falsy_data_alone() {
        for body in [json!({ "data": null }), json!({ "data": false }), json!({ "data": 0 }), json!({ "data": "" })] {
            assert_eq!(normalize(body.clone()), body);
        }
    }

    #[test]
    fn leaves_bodies_without_envelope_alone() {
        for body in [json!([1, 2]), json!({ "items": [] }), json!(true), Value::Null] {
            assert_eq!(normalize(body.clone()), body);
        }
    }
}
