//! Chat Transport - async chat-completions client for Cloak
//!
//! Talks to an OpenRouter-compatible endpoint with bounded retries and
//! classified errors. Runs entirely on the async runtime; never issue
//! window-handle calls from this context.

mod client;
mod error;
mod protocol;
mod retry;

pub use client::*;
pub use error::*;
pub use protocol::*;
pub use retry::*;
