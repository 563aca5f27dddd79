use log::{info, warn};

use crate::catalog::{CatalogFetcher, Failure, LeaderListing};
use crate::config::FailurePolicy;
use crate::error::{Result, ScrapeError};
use crate::extractor::Extractor;
use crate::http::Transport;
use crate::model::{Dataset, LeaderRecord, RawLeader};

/// A finished dataset plus whatever was skipped on the way.
#[derive(Debug, Default)]
pub struct Assembly {
    pub dataset: Dataset,
    pub failures: Vec<Failure>,
}

/// Turns raw leaders into enriched records by reading their encyclopedia pages.
pub struct Assembler<'a, P: Transport> {
    pages: P,
    extractor: &'a Extractor,
    policy: FailurePolicy,
}

impl<'a, P: Transport> Assembler<'a, P> {
    pub fn new(pages: P, extractor: &'a Extractor, policy: FailurePolicy) -> Self {
        Assembler { pages, extractor, policy }
    }

    /// Countries, then leaders, then pages, all one after another.
    pub fn run<S: Transport>(&self, catalog: &CatalogFetcher<'_, S>) -> Result<Assembly> {
        let countries = catalog.list_countries()?;
        let listing = catalog.list_leaders(&countries)?;
        self.assemble(listing)
    }

    /// Visits leaders in listing order. No sorting, no dedup, no name checks.
    pub fn assemble(&self, listing: LeaderListing) -> Result<Assembly> {
        let total = listing.leader_count();
        let mut assembly = Assembly {
            dataset: Dataset::new(),
            failures: listing.failures,
        };
        let mut done = 0;

        for (country_code, leaders) in listing.by_country {
            for leader in leaders {
                done += 1;
                info!(
                    "Processing {} / {} : {} {} ({})",
                    done, total, leader.first_name, leader.last_name, country_code
                );

                let name = format!("{} {}", leader.first_name, leader.last_name);
                match self.first_paragraph(&leader) {
                    Ok(paragraph) => {
                        let record = LeaderRecord::enrich(&country_code, leader, paragraph);
                        assembly.dataset.push(record);
                    }
                    Err(e) if self.policy == FailurePolicy::Skip => {
                        warn!("Skipping {} ({}): {}", name, country_code, e);
                        assembly.failures.push(Failure {
                            country_code: country_code.clone(),
                            leader: Some(name),
                            error: e,
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        info!(
            "Assembled {} records across {} countries ({} skipped).",
            assembly.dataset.len(),
            assembly.dataset.countries().count(),
            assembly.failures.len()
        );
        Ok(assembly)
    }

    fn first_paragraph(&self, leader: &RawLeader) -> Result<String> {
        let url = leader.wikipedia_url.as_str();
        let resp = self.pages.get(url)?;
        if !resp.is_success() {
            return Err(ScrapeError::transport(url, format!("HTTP status {}", resp.status)));
        }
        self.extractor.extract_first_paragraph(&resp.body)
    }
}
