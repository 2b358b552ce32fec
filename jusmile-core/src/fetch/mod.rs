//! Network access for reference resources.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod sources;
mod table;

pub use client::{QueryMode, ReqwestClient, ResourceClient, ResourceRequest, Response};
pub use error::FetchError;
pub use sources::{resolve_source, ResourceKind, ResourceSources, SourceOverrides};
pub use table::TableFetcher;
