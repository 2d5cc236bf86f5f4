use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use tracing::warn;
use url::form_urlencoded;

use crate::error::ServiceError;

/// Name of the cookie that carries the visitor's login.
pub const IDENTITY_COOKIE: &str = "user";

/// Login taken from the identity cookie, if any. The value is trusted as-is.
pub struct Identity(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Identity(read_identity(&parts.headers)))
    }
}

/// Requires the identity cookie, rejecting with 401 otherwise.
pub struct Identified(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Identified
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        read_identity(&parts.headers)
            .map(Identified)
            .ok_or(ServiceError::Unauthenticated)
    }
}

/// Requires the identity cookie to be absent, rejecting with 403 otherwise.
pub struct Anonymous;

#[async_trait]
impl<S> FromRequestParts<S> for Anonymous
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match read_identity(&parts.headers) {
            Some(login) => {
                warn!(%login, "identified visitor hit an anonymous-only route");
                Err(ServiceError::AlreadyIdentified)
            }
            None => Ok(Anonymous),
        }
    }
}

/// Decoded value of the identity cookie. An empty value counts as absent.
pub fn read_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == IDENTITY_COOKIE)
        .map(|(_, value)| decode_login(value.trim_matches('"')))
        .filter(|value| !value.is_empty())
}

/// The login is percent-encoded so cookie delimiters such as `;`, `,` or a
/// space survive the round trip.
pub fn set_identity_cookie(login: &str) -> Result<HeaderValue, ServiceError> {
    let encoded: String = form_urlencoded::byte_serialize(login.as_bytes()).collect();
    HeaderValue::from_str(&format!("{IDENTITY_COOKIE}={encoded}; Path=/"))
        .map_err(|e| ServiceError::Internal(format!("login not representable as a cookie: {e}")))
}

fn decode_login(value: &str) -> String {
    // Raw `&` and `=` are pair separators to the form decoder, not part of a login.
    let escaped = value.replace('&', "%26").replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .map(|(key, _)| key.into_owned())
        .next()
        .unwrap_or_default()
}

pub fn clear_identity_cookie() -> HeaderValue {
    HeaderValue::from_static("user=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_identity_among_other_cookies() {
        let headers = headers_with("theme=dark; user=alice; lang=en");
        assert_eq!(read_identity(&headers).as_deref(), Some("alice"));
    }

    #[test]
    fn similar_names_do_not_match() {
        let headers = headers_with("username=alice; xuser=bob");
        assert_eq!(read_identity(&headers), None);
    }

    #[test]
    fn empty_value_is_absent() {
        assert_eq!(read_identity(&headers_with("user=")), None);
        assert_eq!(read_identity(&HeaderMap::new()), None);
    }

    #[test]
    fn set_cookie_carries_plain_login() {
        let value = set_identity_cookie("alice").unwrap();
        assert_eq!(value.to_str().unwrap(), "user=alice; Path=/");
    }

    #[test]
    fn delimiters_in_login_survive_the_cookie() {
        for login in ["alice;x", "bob smith", "a,b", "100%=ok&more", "ünï"] {
            let value = set_identity_cookie(login).unwrap();
            let cookie = value.to_str().unwrap().trim_end_matches("; Path=/").to_string();
            assert!(!cookie.contains(';') && !cookie.contains(' ') && !cookie.contains(','));
            assert_eq!(read_identity(&headers_with(&cookie)).as_deref(), Some(login));
        }
    }

    #[test]
    fn encoded_identity_among_other_cookies() {
        let headers = headers_with("theme=dark; user=alice%3Bx; lang=en");
        assert_eq!(read_identity(&headers).as_deref(), Some("alice;x"));
    }
}
