/// Shared response helpers for route handlers
///
/// All JSON endpoints answer through these two helpers so error payloads
/// stay uniform: `{"ok": false, "error": {"code", "message", "details"?}}`.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

/// 200 OK with a JSON body
pub fn success_response(data: impl Serialize) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Error with a machine-readable code and a human-readable message
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<serde_json::Value>,
) -> Response {
    let body = ErrorBody {
        ok: false,
        error: ErrorDetail {
            code: code.to_string(),
            message: message.to_string(),
            details,
        },
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let response = success_response(serde_json::json!({"ok": true, "id": "7"}));
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["id"], "7");
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_INPUT",
            "missing field",
            None,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["message"], "missing field");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_error_response_with_details() {
        let response = error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            "insert failed",
            Some(serde_json::json!({"collection": "item"})),
        );

        let body = body_json(response).await;
        assert_eq!(body["error"]["details"]["collection"], "item");
    }
}
