//! The raw outcome of one transport call.
//!
//! A [`Response`] keeps the originating [`Request`], the payload bytes and
//! whatever status metadata the transport reported. Decoding into a typed
//! value is deferred to [`Response::decode`].

use crate::describe;
use crate::request::Request;
use crate::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Status metadata reported by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The final URL, after any redirects.
    pub url: Url,
    /// The response headers.
    pub headers: HeaderMap,
}

/// A response as returned by [`Client::run`](crate::Client::run).
///
/// # Examples
///
/// ```
/// use resourceful::{Request, Response};
/// use http::Method;
/// use url::Url;
///
/// let request = Request::new(Method::GET, Url::parse("https://example.com/n").unwrap());
/// let response = Response::new(request, Some("42".into()), None);
///
/// assert_eq!(response.http_status_code(), 200);
/// assert_eq!(response.decode::<u32>().unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    request: Request,
    data: Option<Bytes>,
    meta: Option<ResponseMeta>,
}

impl Response {
    /// Creates a new `Response`.
    ///
    /// `meta` is `None` when no transport was involved, e.g. in tests.
    pub fn new(request: Request, data: Option<Bytes>, meta: Option<ResponseMeta>) -> Self {
        Self {
            request,
            data,
            meta,
        }
    }

    /// The request that produced this response.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The raw payload, if any.
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// The transport metadata, if any.
    pub fn meta(&self) -> Option<&ResponseMeta> {
        self.meta.as_ref()
    }

    /// The status reported by the transport, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.meta.as_ref().map(|meta| meta.status)
    }

    /// The HTTP status code, or `200` when there is no transport metadata.
    pub fn http_status_code(&self) -> u16 {
        self.meta
            .as_ref()
            .map_or(StatusCode::OK.as_u16(), |meta| meta.status.as_u16())
    }

    /// Returns `true` for status codes in `200..300`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_status_code())
    }

    /// Returns a response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.meta.as_ref()?.headers.get(name)?.to_str().ok()
    }

    /// Turns a non-2xx response into [`Error::BadStatus`].
    pub fn validate(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::BadStatus(self.http_status_code()))
        }
    }

    /// Decodes the payload as JSON into `T`.
    ///
    /// # Errors
    ///
    /// [`Error::NoData`] without a payload, [`Error::CouldNotDecode`] when
    /// the payload is not JSON of the expected shape.
    pub fn decode<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let data = self.data.as_ref().ok_or(Error::NoData)?;
        serde_json::from_slice(data).map_err(|_| Error::CouldNotDecode)
    }

    /// A multi-line description used for debug logging.
    ///
    /// Just `[RESPONSE]` when either metadata or payload is missing.
    pub fn log_description(&self) -> String {
        let mut result = String::from("[RESPONSE]");

        let (Some(meta), Some(data)) = (&self.meta, &self.data) else {
            return result;
        };

        result.push_str(&format!(" {} {}", meta.status.as_u16(), meta.url));

        let headers = describe::headers(&meta.headers);
        if !headers.is_empty() {
            result.push_str("\n ├─ Headers\n");
            result.push_str(&headers);
        }

        let content = describe::payload(data);
        if !content.is_empty() {
            result.push_str("\n ├─ Content\n");
            result.push_str(&content);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, Method};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        id: u32,
        name: String,
    }

    fn request() -> Request {
        Request::new(
            Method::GET,
            Url::parse("https://example.com/users?fullName=true").unwrap(),
        )
    }

    fn users() -> Vec<User> {
        vec![User {
            id: 1,
            name: "Tiago".to_string(),
        }]
    }

    fn meta(status: u16) -> ResponseMeta {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        ResponseMeta {
            status: StatusCode::from_u16(status).unwrap(),
            url: request().url().clone(),
            headers,
        }
    }

    #[test]
    fn test_decode_with_success() {
        let data = serde_json::to_vec(&users()).unwrap();
        let response = Response::new(request(), Some(data.into()), None);

        assert_eq!(response.decode::<Vec<User>>().unwrap(), users());
    }

    #[test]
    fn test_decode_without_data() {
        let response = Response::new(request(), None, None);

        let err = response.decode::<Vec<User>>().unwrap_err();
        assert!(matches!(err, Error::NoData));
        assert_eq!(err.to_string(), "No data.");

        assert!(matches!(response.decode::<serde_json::Value>(), Err(Error::NoData)));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let data = serde_json::to_vec(&users()).unwrap();
        let response = Response::new(request(), Some(data.into()), None);

        let err = response.decode::<User>().unwrap_err();
        assert!(matches!(err, Error::CouldNotDecode));
        assert_eq!(err.to_string(), "Failed to decode object.");
    }

    #[test]
    fn test_decode_invalid_json() {
        let response = Response::new(request(), Some(Bytes::from_static(b"not json")), None);
        assert!(matches!(response.decode::<User>(), Err(Error::CouldNotDecode)));
    }

    #[test]
    fn test_status_defaults_to_ok() {
        let response = Response::new(request(), None, None);

        assert_eq!(response.http_status_code(), 200);
        assert!(response.is_success());
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_classification_boundaries() {
        for code in [200, 204, 299] {
            let response = Response::new(request(), Some(Bytes::new()), Some(meta(code)));
            assert!(response.validate().is_ok(), "{code} should succeed");
        }

        for code in [100, 199, 300, 404, 500] {
            let response = Response::new(request(), Some(Bytes::new()), Some(meta(code)));
            match response.validate() {
                Err(Error::BadStatus(status)) => assert_eq!(status, code),
                other => panic!("Expected BadStatus({code}), got {:?}", other),
            }
        }
    }

    #[test]
    fn test_status() {
        let response = Response::new(request(), None, Some(meta(201)));
        assert_eq!(response.status(), Some(StatusCode::CREATED));

        let response = Response::new(request(), None, None);
        assert_eq!(response.status(), None);
        assert_eq!(response.http_status_code(), 200);
    }

    #[test]
    fn test_header() {
        let response = Response::new(request(), None, Some(meta(200)));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_log_description() {
        let data = serde_json::to_vec(&users()[0]).unwrap();
        let response = Response::new(request(), Some(data.into()), Some(meta(200)));

        let expected = "[RESPONSE] 200 https://example.com/users?fullName=true\n \
                        ├─ Headers\n \
                        │ Content-Type: application/json\n \
                        ├─ Content\n  \
                        {\n    \
                        \"id\": 1,\n    \
                        \"name\": \"Tiago\"\n  \
                        }";
        assert_eq!(response.log_description(), expected);
    }

    #[test]
    fn test_log_description_without_meta() {
        let response = Response::new(request(), Some(Bytes::from_static(b"{}")), None);
        assert_eq!(response.log_description(), "[RESPONSE]");
    }
}
