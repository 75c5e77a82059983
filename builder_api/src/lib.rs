//! Client library for the Builder decision-tree execution API.
//!
//! Builder evaluates versioned decision trees server-side. This crate
//! wraps the v2 REST surface: submitting synchronous and asynchronous
//! executions of a tree release, sending follow-up interactions into a
//! running session, and fetching session state. Requests authenticate
//! with a tenant-scoped API key sent as a bearer token.
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), builder_api::Error> {
//! let client = builder_api::Client::new("aabbcc".to_string(), "my_tenant".to_string())?;
//!
//! let mut params = HashMap::new();
//! params.insert("color".to_string(), serde_json::json!("red"));
//!
//! let response = client.add_execution("color_pick", "production", &params).await?;
//! println!("session {}: {:?}", response.session_id, response.data.vars);
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod types;

pub use self::client::Client;
pub use self::errors::Error;
pub use self::types::{Response, ResponseData};
