pub mod config;
pub mod error;
pub mod logger;
pub mod http;
pub mod gateway;
pub mod catalog;
pub mod extractor;
pub mod model;
pub mod assembler;
pub mod export;

#[cfg(test)]
mod testing;

// Exporting types for convenience
pub use assembler::{Assembler, Assembly};
pub use catalog::{CatalogFetcher, Failure, LeaderListing};
pub use config::{FailurePolicy, ScraperConfig};
pub use error::{Result, ScrapeError};
pub use extractor::Extractor;
pub use gateway::Gateway;
pub use http::{HttpResponse, HttpSession, Transport};
pub use model::{CountryCode, Dataset, LeaderRecord, RawLeader};
