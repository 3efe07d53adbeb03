//! # Resourceful - declarative HTTP resources with typed responses
//!
//! Resourceful lets you describe each endpoint of an API once, as a
//! [`Resource`], and run it through a [`Client`] built on top of `reqwest`.
//! Every call yields either a [`Response`] (or a value decoded from it) or
//! one [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use resourceful::{Client, HttpBody, Resource};
//! use http::Method;
//! use serde::{Deserialize, Serialize};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! enum UsersApi {
//!     List,
//!     Create(User),
//! }
//!
//! impl Resource for UsersApi {
//!     fn method(&self) -> Method {
//!         match self {
//!             UsersApi::List => Method::GET,
//!             UsersApi::Create(_) => Method::POST,
//!         }
//!     }
//!
//!     fn path(&self) -> String {
//!         "users".to_string()
//!     }
//!
//!     fn http_body(&self) -> Option<HttpBody> {
//!         match self {
//!             UsersApi::List => None,
//!             UsersApi::Create(user) => Some(HttpBody::encodable(user.clone())),
//!         }
//!     }
//!
//!     fn headers(&self) -> HashMap<String, String> {
//!         HashMap::from([("Content-Type".to_string(), "application/json".to_string())])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .default_query_parameter("language", "pt")
//!         .build()?;
//!
//!     let users: Vec<User> = client.run_as(&UsersApi::List).await?;
//!     println!("{} users", users.len());
//!
//!     let created = client
//!         .run(&UsersApi::Create(User { id: 0, name: "Tiago".to_string() }))
//!         .await?;
//!     println!("Created: {}", created.http_status_code());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure comes back through the same [`Error`] channel, with a
//! stable one-line description:
//!
//! ```no_run
//! use resourceful::{Client, Error, Resource};
//!
//! struct Health;
//!
//! impl Resource for Health {
//!     fn path(&self) -> String {
//!         "health".to_string()
//!     }
//! }
//!
//! # async fn example(client: Client) {
//! match client.run_as::<_, serde_json::Value>(&Health).await {
//!     Ok(body) => println!("Healthy: {body}"),
//!     Err(Error::BadStatus(code)) => eprintln!("Server answered {code}"),
//!     Err(Error::NoData) | Err(Error::CouldNotDecode) => eprintln!("Unexpected payload"),
//!     Err(Error::Other(e)) => eprintln!("Transport failed: {e}"),
//! }
//! # }
//! ```
//!
//! ## Invocation Shapes
//!
//! - [`Client::run`] / [`Client::run_as`] return a cold future.
//! - [`Client::run_stream`] / [`Client::run_stream_as`] return a stream that
//!   yields exactly once.
//! - [`Client::run_with`] / [`Client::run_as_with`] spawn the call on tokio
//!   and invoke a completion callback exactly once.
//!
//! ## Logging
//!
//! With [`ClientBuilder::log_level`] set to `DEBUG`, every request and
//! response is described through `tracing` at debug level.

mod body;
mod client;
mod config;
mod describe;
mod error;
mod request;
mod resource;
mod response;
mod transport;

pub use body::{CachePolicy, Encodable, HttpBody};
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{BoxError, ConfigError, Error, Result};
pub use http::Method;
pub use request::Request;
pub use resource::Resource;
pub use response::{Response, ResponseMeta};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
