//! # layout-client
//!
//! Async HTTP client for the remote dashboard layout endpoint.
//!
//! The endpoint holds one layout document per user. The client never issues
//! partial patches: `put` always sends the full document.
//!
//! ## Example
//!
//! ```rust,ignore
//! use layout_client::LayoutClient;
//!
//! let client = LayoutClient::new("https://api.example.com", "alice", None)?;
//! if let Some(doc) = client.fetch().await? {
//!     println!("stored layout: {doc}");
//! }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{LayoutClient, LAYOUT_RESOURCE};
pub use error::ApiError;
