//! The declarative description of one HTTP call.

use crate::body::{CachePolicy, HttpBody};
use http::Method;
use std::collections::HashMap;

/// A reusable description of one HTTP call.
///
/// Only [`path`](Resource::path) is required; every other method has a
/// default. A typical API is an enum with one variant per endpoint.
///
/// # Examples
///
/// ```
/// use resourceful::{HttpBody, Request, Resource};
/// use http::Method;
/// use std::collections::HashMap;
/// use url::Url;
///
/// enum UsersApi {
///     Users,
///     Rename { id: u64, name: String },
/// }
///
/// impl Resource for UsersApi {
///     fn method(&self) -> Method {
///         match self {
///             UsersApi::Users => Method::GET,
///             UsersApi::Rename { .. } => Method::PUT,
///         }
///     }
///
///     fn path(&self) -> String {
///         match self {
///             UsersApi::Users => "users".to_string(),
///             UsersApi::Rename { id, .. } => format!("users/{id}"),
///         }
///     }
///
///     fn http_body(&self) -> Option<HttpBody> {
///         match self {
///             UsersApi::Users => None,
///             UsersApi::Rename { name, .. } => {
///                 let mut parameters = HashMap::new();
///                 parameters.insert("name".to_string(), name.clone().into());
///                 Some(HttpBody::Parameters(parameters))
///             }
///         }
///     }
/// }
///
/// let base = Url::parse("https://example.com").unwrap();
/// let request = Request::from_resource(&UsersApi::Users, &base);
/// assert_eq!(request.url().as_str(), "https://example.com/users");
/// ```
pub trait Resource {
    /// Defaults to `GET`.
    fn method(&self) -> Method {
        Method::GET
    }

    /// The path relative to the client's base URL.
    fn path(&self) -> String;

    /// Query items attached to the URL. Defaults to none.
    fn url_query_parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Only sent for `POST` and `PUT`. Defaults to none.
    fn http_body(&self) -> Option<HttpBody> {
        None
    }

    /// Defaults to none.
    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Defaults to [`CachePolicy::UseProtocolCachePolicy`].
    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::default()
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn method(&self) -> Method {
        (**self).method()
    }

    fn path(&self) -> String {
        (**self).path()
    }

    fn url_query_parameters(&self) -> HashMap<String, String> {
        (**self).url_query_parameters()
    }

    fn http_body(&self) -> Option<HttpBody> {
        (**self).http_body()
    }

    fn headers(&self) -> HashMap<String, String> {
        (**self).headers()
    }

    fn cache_policy(&self) -> CachePolicy {
        (**self).cache_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Users;

    impl Resource for Users {
        fn path(&self) -> String {
            "users".to_string()
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Users.method(), Method::GET);
        assert!(Users.url_query_parameters().is_empty());
        assert!(Users.http_body().is_none());
        assert!(Users.headers().is_empty());
        assert_eq!(Users.cache_policy(), CachePolicy::UseProtocolCachePolicy);
    }
}
