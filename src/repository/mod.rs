//! Form store client module for JSON-over-HTTP communication

mod client;
mod error;
mod traits;
mod wire;

pub use client::HttpFormRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use traits::FormRepository;
pub use wire::form_payload_json;

#[cfg(test)]
pub use traits::MockFormRepository;
