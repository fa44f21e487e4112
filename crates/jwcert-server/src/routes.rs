use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use jwcert::{CertificateVerifier, VerificationResult};
use miniserde::{
    Deserialize,
    json::{self, Object, Value},
};
use std::sync::Arc;

const NO_TOKEN: &str = "No token provided.";
const INTERNAL_ERROR: &str = "Internal server error.";

#[derive(Clone)]
struct AppState {
    verifier: Arc<CertificateVerifier>,
}

/// Request body of `POST /api/verify`; unknown fields are ignored
#[derive(Debug, Deserialize)]
struct VerifyRequest {
    token: Option<String>,
    #[serde(rename = "publicKey")]
    public_key: Option<String>,
}

pub fn router(verifier: CertificateVerifier) -> Router {
    let state = AppState {
        verifier: Arc::new(verifier),
    };

    Router::new()
        .route("/api/verify", post(verify_handler))
        .with_state(state)
}

async fn verify_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(reason) => {
            tracing::error!(reason, "failed to read verification request");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    let token = match request.token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => return error_response(StatusCode::BAD_REQUEST, NO_TOKEN),
    };

    let result = state.verifier.verify(token, request.public_key.as_deref());
    if let VerificationResult::Valid { payload } = &result {
        let certificate = payload.certificate();
        tracing::info!(
            recipient = certificate.recipient(),
            certificate_id = certificate.certificate_id().unwrap_or("-"),
            "certificate verified"
        );
    }

    json_response(StatusCode::OK, result.to_json())
}

fn parse_request(body: &[u8]) -> Result<VerifyRequest, &'static str> {
    let text = std::str::from_utf8(body).map_err(|_| "body is not UTF-8")?;
    json::from_str(text).map_err(|_| "body is not a verification request object")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let mut body = Object::new();
    body.insert("valid".to_owned(), Value::Bool(false));
    body.insert("error".to_owned(), Value::String(message.to_owned()));
    json_response(status, json::to_string(&body))
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
