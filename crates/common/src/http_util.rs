use error_stack::{Report, ResultExt};
use http::header::{self, HeaderValue};
use http::{Method, Request};

use crate::constants::{APPLICATION_JSON, HEADER_AUTH_KEY, HEADER_AUTH_TIME, HEADER_SIGNATURE};
use crate::error::InkyBayError;
use crate::request_signing::SignedRequestEnvelope;

impl SignedRequestEnvelope {
    /// Build the outbound POST carrying this envelope.
    ///
    /// `body` must be the exact bytes that were signed; re-serializing the
    /// JSON after signing invalidates the digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the URL
    /// is not a valid URI.
    pub fn into_http_request(
        self,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<Request<Vec<u8>>, Report<InkyBayError>> {
        let mut api_key =
            HeaderValue::from_str(api_key).change_context(InkyBayError::InvalidRequest {
                message: "API key is not a valid header value".into(),
            })?;
        api_key.set_sensitive(true);

        let signature =
            HeaderValue::from_str(&self.signature).change_context(InkyBayError::InvalidRequest {
                message: "Signature is not a valid header value".into(),
            })?;

        Request::builder()
            .method(Method::POST)
            .uri(self.url.as_str())
            .header(HEADER_AUTH_KEY, api_key)
            .header(HEADER_AUTH_TIME, self.auth_time.to_string())
            .header(HEADER_SIGNATURE, signature)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .change_context(InkyBayError::InvalidRequest {
                message: format!("Failed to build request for {}", self.url),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_signing::verify_http_request;
    use crate::test_support::tests::{test_signer, GOLDEN_BODY, GOLDEN_TIME, TEST_SECRET};

    fn signed_request() -> Request<Vec<u8>> {
        test_signer()
            .sign_at("search", GOLDEN_BODY, GOLDEN_TIME)
            .expect("should sign")
            .into_http_request("test-api-key", GOLDEN_BODY.to_vec())
            .expect("should build request")
    }

    #[test]
    fn test_request_shape() {
        let req = signed_request();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(
            req.uri().to_string(),
            "https://inkybay.example/api/shop/search.php"
        );
        assert_eq!(req.headers()[HEADER_AUTH_KEY], "test-api-key");
        assert!(req.headers()[HEADER_AUTH_KEY].is_sensitive());
        assert_eq!(req.headers()[HEADER_AUTH_TIME], "1700000000");
        assert_eq!(
            req.headers()[HEADER_SIGNATURE],
            "FsOk0oqSrT23yB0jSxyrkhqf8aF1qcS8LuA9OqyfPUI="
        );
        assert_eq!(req.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(req.body().as_slice(), GOLDEN_BODY);
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let req = signed_request();
        assert!(req.headers().get("authKey").is_some());
        assert!(req.headers().get("AuthTime").is_some());
        assert!(req.headers().get("Signature").is_some());
    }

    #[test]
    fn test_rejects_api_key_with_newline() {
        let err = test_signer()
            .sign_at("search", GOLDEN_BODY, GOLDEN_TIME)
            .expect("should sign")
            .into_http_request("key\nInjected: yes", GOLDEN_BODY.to_vec())
            .expect_err("should reject api key");
        assert!(matches!(
            err.current_context(),
            InkyBayError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn test_upstream_verifies_request() {
        assert!(verify_http_request(TEST_SECRET, &signed_request()));
    }

    #[test]
    fn test_flipping_any_header_fails_verification() {
        let mut req = signed_request();
        req.headers_mut()
            .insert(HEADER_AUTH_TIME, HeaderValue::from_static("1700000001"));
        assert!(!verify_http_request(TEST_SECRET, &req));

        let mut req = signed_request();
        req.headers_mut().insert(
            HEADER_SIGNATURE,
            HeaderValue::from_static("FsOk0oqSrT23yB0jSxyrkhqf8aF1qcS8LuA9OqyfPUJ="),
        );
        assert!(!verify_http_request(TEST_SECRET, &req));

        let mut req = signed_request();
        req.headers_mut().remove(HEADER_SIGNATURE);
        assert!(!verify_http_request(TEST_SECRET, &req));

        let mut req = signed_request();
        req.headers_mut()
            .insert(HEADER_AUTH_TIME, HeaderValue::from_static("soon"));
        assert!(!verify_http_request(TEST_SECRET, &req));
    }

    #[test]
    fn test_resent_body_must_match_signed_bytes() {
        // Same JSON, different bytes.
        let mut req = signed_request();
        *req.body_mut() = br#"{"type":"all","srckey":"abc"}"#.to_vec();
        assert!(!verify_http_request(TEST_SECRET, &req));

        let mut req = signed_request();
        *req.body_mut() = br#"{"srckey": "abc", "type": "all"}"#.to_vec();
        assert!(!verify_http_request(TEST_SECRET, &req));
    }

    #[test]
    fn test_other_endpoint_fails_verification() {
        let (mut parts, body) = signed_request().into_parts();
        parts.uri = "https://inkybay.example/api/shop/info.php"
            .parse()
            .expect("should parse uri");
        let req = Request::from_parts(parts, body);
        assert!(!verify_http_request(TEST_SECRET, &req));
    }
}
