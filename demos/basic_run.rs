//! Basic example running a few resources against JSONPlaceholder.
//!
//! This example shows how to:
//! - Describe endpoints as a `Resource` enum
//! - Fetch and decode data with `run_as`
//! - Send a JSON body with `POST`
//! - Use the stream and callback shapes
//!
//! Run with: `cargo run --example basic_run`

use futures::StreamExt;
use resourceful::{Client, HttpBody, Method, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::Level;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Clone, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

enum PostsApi {
    Post(u32),
    ByUser(u32),
    Create(NewPost),
}

impl Resource for PostsApi {
    fn method(&self) -> Method {
        match self {
            PostsApi::Create(_) => Method::POST,
            _ => Method::GET,
        }
    }

    fn path(&self) -> String {
        match self {
            PostsApi::Post(id) => format!("posts/{id}"),
            PostsApi::ByUser(_) | PostsApi::Create(_) => "posts".to_string(),
        }
    }

    fn url_query_parameters(&self) -> HashMap<String, String> {
        match self {
            PostsApi::ByUser(user_id) => HashMap::from([("userId".to_string(), user_id.to_string())]),
            _ => HashMap::new(),
        }
    }

    fn http_body(&self) -> Option<HttpBody> {
        match self {
            PostsApi::Create(post) => Some(HttpBody::encodable(post.clone())),
            _ => None,
        }
    }

    fn headers(&self) -> HashMap<String, String> {
        match self {
            PostsApi::Create(_) => HashMap::from([(
                "Content-Type".to_string(),
                "application/json; charset=UTF-8".to_string(),
            )]),
            _ => HashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("resourceful=debug,basic_run=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .default_header("User-Agent", "resourceful-demo/0.1")?
        .log_level(Level::DEBUG)
        .build()?;

    println!("=== GET Request Example ===");
    let post: Post = client.run_as(&PostsApi::Post(1)).await?;
    println!("Post ID: {}", post.id);
    println!("Title: {}", post.title);
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };
    let response = client.run(&PostsApi::Create(new_post)).await?;
    println!("Status code: {}", response.http_status_code());
    println!("Content-Type: {:?}", response.header("content-type"));
    let created: Post = response.decode()?;
    println!("Created post ID: {}", created.id);
    println!();

    println!("=== Stream Example ===");
    let mut posts = client.run_stream_as::<_, Vec<Post>>(&PostsApi::ByUser(1));
    while let Some(result) = posts.next().await {
        println!("User 1 has {} posts", result?.len());
    }
    println!();

    println!("=== Callback Example ===");
    let (tx, rx) = tokio::sync::oneshot::channel();
    // Dropping the handle detaches the call; `handle.abort()` would cancel it.
    let handle = client.run_as_with(&PostsApi::Post(404_000), move |result: resourceful::Result<Post>| {
        let _ = tx.send(result);
    });
    match rx.await? {
        Ok(post) => println!("Unexpectedly found post {}", post.id),
        Err(e) => println!("Expected failure: {e}"),
    }
    handle.await?;

    Ok(())
}
