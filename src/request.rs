//! The concrete request built from a [`Resource`].

use crate::body::CachePolicy;
use crate::describe;
use crate::resource::Resource;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::collections::HashMap;
use url::Url;

/// A fully built HTTP request, ready for a [`Transport`](crate::Transport).
///
/// Built once per call with [`Request::from_resource`]; the merge helpers
/// consume the request and return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    cache_policy: CachePolicy,
}

impl Request {
    /// Creates a bodiless request with no headers and the default cache policy.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Builds the request described by `resource` against `base_url`.
    ///
    /// Query parameters keep the resource's map order. A body is only
    /// attached for `POST` and `PUT`, and only if it serializes.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` cannot have a path appended (a cannot-be-a-base
    /// URL such as `mailto:`). This is a programming error, not a runtime one.
    ///
    /// # Examples
    ///
    /// ```
    /// use resourceful::{Request, Resource};
    /// use std::collections::HashMap;
    /// use url::Url;
    ///
    /// struct Users;
    ///
    /// impl Resource for Users {
    ///     fn path(&self) -> String {
    ///         "users".to_string()
    ///     }
    ///
    ///     fn url_query_parameters(&self) -> HashMap<String, String> {
    ///         HashMap::from([("fullName".to_string(), "true".to_string())])
    ///     }
    /// }
    ///
    /// let base = Url::parse("https://example.com").unwrap();
    /// let request = Request::from_resource(&Users, &base);
    /// assert_eq!(request.url().as_str(), "https://example.com/users?fullName=true");
    /// ```
    pub fn from_resource<R>(resource: &R, base_url: &Url) -> Self
    where
        R: Resource + ?Sized,
    {
        let mut url = append_path(base_url, &resource.path());

        let parameters = resource.url_query_parameters();
        if !parameters.is_empty() {
            url.query_pairs_mut().clear().extend_pairs(parameters.iter());
        }

        let method = resource.method();
        let body = if method == Method::POST || method == Method::PUT {
            resource
                .http_body()
                .and_then(|body| body.to_json())
                .map(Bytes::from)
        } else {
            None
        };

        let mut headers = HeaderMap::new();
        for (name, value) in resource.headers() {
            if let Some((name, value)) = parse_header(&name, &value) {
                headers.insert(name, value);
            }
        }

        Self {
            method,
            url,
            headers,
            body,
            cache_policy: resource.cache_policy(),
        }
    }

    /// Appends query items and sorts the combined list by parameter name.
    ///
    /// Returns the request unchanged when `parameters` is empty.
    pub fn add_parameters(mut self, parameters: &HashMap<String, String>) -> Self {
        if parameters.is_empty() {
            return self;
        }

        let mut items: Vec<(String, String)> = self.url.query_pairs().into_owned().collect();
        items.extend(
            parameters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        items.sort_by(|a, b| a.0.cmp(&b.0));

        self.url.query_pairs_mut().clear().extend_pairs(&items);
        self
    }

    /// Appends headers without replacing values that are already set.
    ///
    /// Returns the request unchanged when `headers` is empty.
    pub fn add_headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (name, value) in headers {
            if let Some((name, value)) = parse_header(name, value) {
                self.headers.append(name, value);
            }
        }
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The absolute URL, query string included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The serialized JSON body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// The cache policy handed to the transport.
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    /// A multi-line description used for debug logging.
    ///
    /// ```text
    /// [REQUEST] POST https://example.com/users/1
    ///  ├─ Headers
    ///  │ Content-Type: application/json
    ///  ├─ Body
    ///   {
    ///     "id": 1
    ///   }
    /// ```
    pub fn log_description(&self) -> String {
        let mut result = format!("[REQUEST] {} {}", self.method, self.url);

        let headers = describe::headers(&self.headers);
        if !headers.is_empty() {
            result.push_str("\n ├─ Headers\n");
            result.push_str(&headers);
        }

        if let Some(body) = &self.body {
            let body = describe::payload(body);
            if !body.is_empty() {
                result.push_str("\n ├─ Body\n");
                result.push_str(&body);
            }
        }

        result
    }
}

fn append_path(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments
                .pop_if_empty()
                .extend(path.trim_start_matches('/').split('/'));
        }
        Err(()) => panic!("Could not append path {path:?} to {base_url}"),
    }
    url
}

fn parse_header(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => Some((name, value)),
        _ => {
            tracing::warn!(header = %name, "Skipping invalid header");
            None
        }
    }
}
