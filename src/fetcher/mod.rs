//! Fetching job pages over HTTP or from saved local files.

pub mod client;
pub mod cookies;
pub mod errors;
pub mod headers;
pub mod pipeline;
pub mod types;

pub use client::{FetchContext, fetch_page, source_host};
pub use errors::FetchError;
pub use types::{PageSource, RawPage};
