use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use serde_json::{Value, json};

use crate::config::Branding;

// Final disposition of a request, mapped 1:1 onto an envelope
#[derive(Debug, Clone)]
pub enum Outcome {
    Success { result: Vec<Value>, remaining: u32 },
    QuotaExceeded,
    Invalid(String),
    NotFound(String),
    MethodNotAllowed,
    NotImplemented(String),
}

// Build the uniform JSON envelope for an outcome. Pure: same outcome
// and branding always produce the same status, headers and body.
pub fn build(outcome: &Outcome, branding: &Branding) -> (StatusCode, HeaderMap, String) {
    match outcome {
        Outcome::Success { result, remaining } => {
            let body = json!({
                "data": {
                    "success": true,
                    "result": result,
                    "brand": branding.brand,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "searches_remaining": remaining,
                }
            });
            let mut headers = json_headers(&branding.brand);
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=60"),
            );
            (StatusCode::OK, headers, pretty(&body))
        }
        Outcome::QuotaExceeded => {
            let body = json!({
                "error": "API Down - Buy Premium",
                "message": "This API service is currently unavailable for free users",
                "contact": format!("DM {} for premium access with custom name", branding.owner),
                "telegram": branding.telegram,
                "status": 403,
                "BRAND": branding.brand,
            });
            (StatusCode::FORBIDDEN, json_headers(&branding.brand), pretty(&body))
        }
        Outcome::Invalid(message) => error_envelope(StatusCode::BAD_REQUEST, message, branding),
        Outcome::NotFound(message) => error_envelope(StatusCode::NOT_FOUND, message, branding),
        Outcome::MethodNotAllowed => {
            error_envelope(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", branding)
        }
        Outcome::NotImplemented(message) => {
            error_envelope(StatusCode::NOT_IMPLEMENTED, message, branding)
        }
    }
}

// Static document served on a bare GET /
pub fn service_description(branding: &Branding) -> (StatusCode, HeaderMap, String) {
    let body = json!({
        "message": "Secure API Services",
        "brand": branding.brand,
        "note": "Add query parameters to use",
        "example": "/?num=XXXXXXXXXX",
    });
    (StatusCode::OK, plain_json_headers(), pretty(&body))
}

// Error envelopes carry the brand in the body only; the x-brand header
// belongs to success and the premium rejection
fn error_envelope(
    status: StatusCode,
    message: &str,
    branding: &Branding,
) -> (StatusCode, HeaderMap, String) {
    let body = json!({
        "success": false,
        "error": message,
        "brand": branding.brand,
    });
    (status, plain_json_headers(), pretty(&body))
}

fn plain_json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn json_headers(brand: &str) -> HeaderMap {
    let mut headers = plain_json_headers();
    headers.insert(
        "x-brand",
        HeaderValue::from_str(brand).unwrap_or_else(|_| HeaderValue::from_static("gateway")),
    );
    headers
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding() -> Branding {
        Branding {
            brand: "TEST BRAND".to_string(),
            owner: "@owner".to_string(),
            telegram: "https://t.me/test".to_string(),
        }
    }

    #[test]
    fn success_envelope_carries_result_and_remaining() {
        let outcome = Outcome::Success {
            result: vec![json!({ "name": "a" })],
            remaining: 42,
        };
        let (status, headers, body) = build(&outcome, &branding());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("x-brand").unwrap(), "TEST BRAND");
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "public, max-age=60");

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["data"]["success"], json!(true));
        assert_eq!(parsed["data"]["result"], json!([{ "name": "a" }]));
        assert_eq!(parsed["data"]["searches_remaining"], json!(42));
        assert_eq!(parsed["data"]["brand"], json!("TEST BRAND"));
        assert!(parsed["data"]["timestamp"].is_string());
    }

    #[test]
    fn quota_envelope_is_the_premium_rejection() {
        let (status, headers, body) = build(&Outcome::QuotaExceeded, &branding());
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(headers.get("x-brand").unwrap(), "TEST BRAND");

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["status"], json!(403));
        assert_eq!(parsed["BRAND"], json!("TEST BRAND"));
        assert_eq!(parsed["telegram"], json!("https://t.me/test"));
        assert!(parsed["contact"].as_str().unwrap().contains("@owner"));
    }

    #[test]
    fn error_envelopes_map_statuses() {
        let cases = [
            (Outcome::Invalid("bad".to_string()), StatusCode::BAD_REQUEST),
            (Outcome::NotFound("none".to_string()), StatusCode::NOT_FOUND),
            (Outcome::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (
                Outcome::NotImplemented("soon".to_string()),
                StatusCode::NOT_IMPLEMENTED,
            ),
        ];
        for (outcome, expected) in cases {
            let (status, headers, body) = build(&outcome, &branding());
            assert_eq!(status, expected);
            // brand lives in the body only on the error path
            assert!(headers.get("x-brand").is_none());
            assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");

            let parsed: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed["success"], json!(false));
            assert_eq!(parsed["brand"], json!("TEST BRAND"));
            assert!(parsed["error"].is_string());
        }
    }

    #[test]
    fn bodies_are_pretty_printed() {
        let (_, _, body) = build(&Outcome::MethodNotAllowed, &branding());
        assert!(body.contains('\n'));
    }

    #[test]
    fn service_description_is_static_200() {
        let (status, _, body) = service_description(&branding());
        assert_eq!(status, StatusCode::OK);

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["example"], json!("/?num=XXXXXXXXXX"));
    }
}
