//! HTTP client that runs [`Resource`]s.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to
//! configure and create clients.

use crate::{
    config::ClientConfig,
    error::ConfigError,
    request::Request,
    resource::Resource,
    response::{Response, ResponseMeta},
    transport::{ReqwestTransport, Transport},
    Error, Result,
};
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::Level;
use url::Url;

/// Runs resources against a base URL.
///
/// The client is cheap to clone and meant to be shared. Every call builds a
/// fresh [`Request`], merges in the client's [`ClientConfig`], sends it
/// through the [`Transport`] and classifies the status code. A call is
/// attempted exactly once.
///
/// Three shapes are offered over the same execution path: futures
/// ([`run`](Client::run)), single-item streams
/// ([`run_stream`](Client::run_stream)) and completion callbacks
/// ([`run_with`](Client::run_with)).
///
/// # Examples
///
/// ```no_run
/// use resourceful::{Client, Resource};
/// use serde::Deserialize;
///
/// struct Users;
///
/// impl Resource for Users {
///     fn path(&self) -> String {
///         "users".to_string()
///     }
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
///
/// let users: Vec<User> = client.run_as(&Users).await?;
/// for user in users {
///     println!("{}: {}", user.id, user.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    base_url: Url,
    config: ClientConfig,
    log_level: Level,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the transport cannot be built.
    pub fn new(base_url: impl AsRef<str>) -> std::result::Result<Self, ConfigError> {
        Self::builder().base_url(base_url)?.build()
    }

    /// The URL every resource path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The defaults merged into every request.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Builds the request that [`run`](Client::run) would send for `resource`.
    ///
    /// # Panics
    ///
    /// Panics if the resource path cannot be appended to the base URL.
    pub fn request<R>(&self, resource: &R) -> Request
    where
        R: Resource + ?Sized,
    {
        Request::from_resource(resource, &self.inner.base_url)
            .add_headers(&self.inner.config.headers)
            .add_parameters(&self.inner.config.url_query_parameters)
    }

    /// Runs `resource` and returns the raw response.
    ///
    /// The request is built immediately but nothing is sent until the
    /// returned future is polled. Dropping it cancels the call.
    ///
    /// # Errors
    ///
    /// [`Error::Other`] on transport failure, [`Error::BadStatus`] for a
    /// status outside `200..300`.
    ///
    /// # Panics
    ///
    /// Panics if the resource path cannot be appended to the base URL.
    pub fn run<R>(&self, resource: &R) -> impl Future<Output = Result<Response>> + Send + 'static
    where
        R: Resource + ?Sized,
    {
        self.dispatch(self.request(resource))
    }

    /// Runs `resource` and decodes the JSON payload into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`run`](Client::run) returns, plus [`Error::NoData`] and
    /// [`Error::CouldNotDecode`].
    pub fn run_as<R, T>(&self, resource: &R) -> impl Future<Output = Result<T>> + Send + 'static
    where
        R: Resource + ?Sized,
        T: DeserializeOwned + Send + 'static,
    {
        self.dispatch_as(self.request(resource))
    }

    /// Like [`run`](Client::run), as a stream that yields once and ends.
    pub fn run_stream<R>(&self, resource: &R) -> BoxStream<'static, Result<Response>>
    where
        R: Resource + ?Sized,
    {
        stream::once(self.dispatch(self.request(resource))).boxed()
    }

    /// Like [`run_as`](Client::run_as), as a stream that yields once and ends.
    pub fn run_stream_as<R, T>(&self, resource: &R) -> BoxStream<'static, Result<T>>
    where
        R: Resource + ?Sized,
        T: DeserializeOwned + Send + 'static,
    {
        stream::once(self.dispatch_as(self.request(resource))).boxed()
    }

    /// Runs `resource` on the current tokio runtime and hands the result to
    /// `completion`.
    ///
    /// `completion` is called exactly once, on a runtime worker thread.
    /// Aborting the returned handle cancels the call and `completion` is
    /// never invoked.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn run_with<R, F>(&self, resource: &R, completion: F) -> JoinHandle<()>
    where
        R: Resource + ?Sized,
        F: FnOnce(Result<Response>) + Send + 'static,
    {
        spawn_completion(self.dispatch(self.request(resource)), completion)
    }

    /// Like [`run_with`](Client::run_with), decoding the payload into `T`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn run_as_with<R, T, F>(&self, resource: &R, completion: F) -> JoinHandle<()>
    where
        R: Resource + ?Sized,
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        spawn_completion(self.dispatch_as(self.request(resource)), completion)
    }

    fn dispatch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send + 'static {
        let inner = Arc::clone(&self.inner);
        async move { inner.execute(request).await }
    }

    fn dispatch_as<T>(&self, request: Request) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let call = self.dispatch(request);
        async move { call.await?.decode() }
    }
}

impl ClientInner {
    /// Sends a single request and classifies the outcome.
    async fn execute(&self, request: Request) -> Result<Response> {
        let debug = self.log_level >= Level::DEBUG;

        if debug {
            tracing::debug!("{}", request.log_description());
        }

        let sent = match self.transport.send(&request).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %request.method(),
                    url = %request.url(),
                    "Request failed"
                );
                return Err(Error::Other(e));
            }
        };

        let response = Response::new(
            request,
            Some(sent.body),
            Some(ResponseMeta {
                status: sent.status,
                url: sent.url,
                headers: sent.headers,
            }),
        );

        if debug {
            tracing::debug!("{}", response.log_description());
        }

        response.validate()
    }
}

fn spawn_completion<O, F>(
    call: impl Future<Output = O> + Send + 'static,
    completion: F,
) -> JoinHandle<()>
where
    O: Send + 'static,
    F: FnOnce(O) + Send + 'static,
{
    tokio::spawn(async move { completion(call.await) })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use resourceful::ClientBuilder;
/// use std::time::Duration;
/// use tracing::Level;
///
/// # fn example() -> Result<(), resourceful::ConfigError> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .default_query_parameter("language", "pt")
///     .log_level(Level::DEBUG)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    log_level: Level,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            config: ClientConfig::default(),
            transport: None,
            timeout: None,
            log_level: Level::INFO,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> std::result::Result<Self, ConfigError> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Replaces the default headers and query parameters.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> std::result::Result<Self, ConfigError> {
        self.config = self.config.with_header(name, value)?;
        Ok(self)
    }

    /// Adds a default query parameter that will be included in all requests.
    pub fn default_query_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_query_param(name, value);
        self
    }

    /// Uses a custom transport instead of the default `reqwest` one.
    ///
    /// A custom transport is responsible for its own timeouts.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the request timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the most verbose level this client logs at.
    ///
    /// Request and response descriptions are logged at `DEBUG`, so they are
    /// only emitted when this is `DEBUG` or `TRACE`. Defaults to `INFO`.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable base URL was provided or if the
    /// default transport cannot be built.
    pub fn build(self) -> std::result::Result<Client, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(base_url));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeout(self.timeout)?),
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                config: self.config,
                log_level: self.log_level,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
