//! Bearer Token Extraction
//!
//! Reads the token out of an `Authorization: Bearer <token>` header.

use http::{HeaderMap, header};

/// Extract the bearer token from the Authorization header
///
/// Returns `None` when the header is absent, not valid UTF-8,
/// or does not use the Bearer scheme.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def");
        assert_eq!(extract_bearer(&headers), Some("abc.def"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bearer token123");
        assert_eq!(extract_bearer(&headers), Some("token123"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_empty_token() {
        let headers = headers_with("Bearer ");
        assert_eq!(extract_bearer(&headers), None);
    }
}
