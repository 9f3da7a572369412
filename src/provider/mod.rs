//! OpenRouter provider access for benessere.
//!
//! Wraps the two REST endpoints the app needs (model listing and chat
//! completions) behind a [`Provider`] struct, keeping HTTP details out of
//! the catalog and completion layers.

mod client;
mod error;
pub mod wire;

pub use client::Provider;
pub use error::ProviderError;
