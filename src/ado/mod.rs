//! Azure DevOps REST API access
//!
//! A thin, authenticated client over the Azure DevOps REST API with typed
//! errors. All tool handlers go through [`AdoClient`]; nothing else in the
//! crate talks HTTP.

mod client;
mod error;

pub use client::{AdoClient, PrSearchCriteria};
pub use error::{AdoError, AdoResult};
