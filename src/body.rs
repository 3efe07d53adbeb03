//! Request body and cache policy vocabulary.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Object-safe JSON encoding for [`HttpBody::Encodable`].
trait EncodeJson: Send + Sync {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T> EncodeJson for T
where
    T: Serialize + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// The body of a POST or PUT request.
///
/// # Examples
///
/// ```
/// use resourceful::HttpBody;
/// use serde::Serialize;
/// use std::collections::HashMap;
///
/// #[derive(Serialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// let typed = HttpBody::encodable(User { id: 1, name: "Tiago".to_string() });
///
/// let mut parameters = HashMap::new();
/// parameters.insert("id".to_string(), serde_json::json!(1));
/// let raw = HttpBody::Parameters(parameters);
///
/// assert!(typed.to_json().is_some());
/// assert!(raw.to_json().is_some());
/// ```
#[derive(Clone)]
pub enum HttpBody {
    /// Arbitrary key/value pairs, serialized as a JSON object.
    Parameters(HashMap<String, Value>),
    /// Any serializable value, serialized with `serde_json`.
    Encodable(Encodable),
}

/// A type-erased serializable payload. Build it with [`HttpBody::encodable`].
#[derive(Clone)]
pub struct Encodable(Arc<dyn EncodeJson>);

impl HttpBody {
    /// Wraps a serializable value.
    pub fn encodable<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        HttpBody::Encodable(Encodable(Arc::new(value)))
    }

    /// Serializes the body to JSON bytes.
    ///
    /// Returns `None` if serialization fails; callers treat that as "no body".
    pub fn to_json(&self) -> Option<Vec<u8>> {
        let encoded = match self {
            HttpBody::Parameters(parameters) => serde_json::to_vec(parameters),
            HttpBody::Encodable(Encodable(value)) => value.to_json(),
        };

        match encoded {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                // TODO: surface this as a build error once callers can handle one.
                tracing::warn!(error = %e, "Failed to serialize request body, sending none");
                None
            }
        }
    }
}

impl fmt::Debug for HttpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpBody::Parameters(parameters) => {
                f.debug_tuple("Parameters").field(parameters).finish()
            }
            HttpBody::Encodable(_) => f.write_str("Encodable(..)"),
        }
    }
}

/// How the transport should treat cached data for a request.
///
/// The client never interprets the policy; it is handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Whatever the protocol's own caching rules say.
    #[default]
    UseProtocolCachePolicy,
    /// Always go to the origin.
    ReloadIgnoringLocalCacheData,
    /// Use cached data of any age, otherwise load.
    ReturnCacheDataElseLoad,
    /// Use cached data only, never load.
    ReturnCacheDataDontLoad,
}

impl CachePolicy {
    /// The `Cache-Control` request directive expressing this policy, if any.
    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            CachePolicy::UseProtocolCachePolicy => None,
            CachePolicy::ReloadIgnoringLocalCacheData => Some("no-cache"),
            CachePolicy::ReturnCacheDataElseLoad => Some("max-stale"),
            CachePolicy::ReturnCacheDataDontLoad => Some("only-if-cached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_parameters_serialize_as_object() {
        let mut parameters = HashMap::new();
        parameters.insert("name".to_string(), Value::from("Tiago"));
        let bytes = HttpBody::Parameters(parameters).to_json().unwrap();

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Tiago" }));
    }

    #[test]
    fn test_failed_encoding_yields_no_body() {
        assert!(HttpBody::encodable(Unserializable).to_json().is_none());
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(CachePolicy::default().cache_control(), None);
        assert_eq!(
            CachePolicy::ReloadIgnoringLocalCacheData.cache_control(),
            Some("no-cache")
        );
    }
}
