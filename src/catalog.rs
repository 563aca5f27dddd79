use log::{info, warn};
use serde_json::Value;

use crate::config::{ApiConfig, FailurePolicy};
use crate::error::{Result, ScrapeError};
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::model::{CountryCode, RawLeader};

/// Something that went wrong for one country or one leader and was skipped.
#[derive(Debug)]
pub struct Failure {
    pub country_code: CountryCode,
    /// Leader name, or `None` when the whole country was lost.
    pub leader: Option<String>,
    pub error: ScrapeError,
}

/// Raw leaders per country, in the order the countries were requested.
#[derive(Debug, Default)]
pub struct LeaderListing {
    pub by_country: Vec<(CountryCode, Vec<RawLeader>)>,
    pub failures: Vec<Failure>,
}

impl LeaderListing {
    pub fn leader_count(&self) -> usize {
        self.by_country.iter().map(|(_, leaders)| leaders.len()).sum()
    }
}

pub struct CatalogFetcher<'a, S: Transport> {
    gateway: &'a Gateway<S>,
    api: &'a ApiConfig,
    policy: FailurePolicy,
}

impl<'a, S: Transport> CatalogFetcher<'a, S> {
    pub fn new(gateway: &'a Gateway<S>, api: &'a ApiConfig, policy: FailurePolicy) -> Self {
        CatalogFetcher { gateway, api, policy }
    }

    pub fn list_countries(&self) -> Result<Vec<CountryCode>> {
        let url = self.api.countries_url();
        let body = self.gateway.fetch(&url)?;
        let countries: Vec<CountryCode> = decode_list(&url, body)?;
        info!("API supports {} countries: {}", countries.len(), countries.join(", "));
        Ok(countries)
    }

    /// One gateway call per country, issued in the order given.
    pub fn list_leaders(&self, countries: &[CountryCode]) -> Result<LeaderListing> {
        let mut listing = LeaderListing::default();

        for country in countries {
            match self.leaders_for(country) {
                Ok(leaders) => {
                    info!("{}: {} leaders", country, leaders.len());
                    listing.by_country.push((country.clone(), leaders));
                }
                Err(e) if self.policy == FailurePolicy::Skip => {
                    warn!("Skipping country {}: {}", country, e);
                    listing.failures.push(Failure {
                        country_code: country.clone(),
                        leader: None,
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(listing)
    }

    fn leaders_for(&self, country: &str) -> Result<Vec<RawLeader>> {
        let url = self.api.leaders_url(country);
        let body = self.gateway.fetch(&url)?;
        decode_list(&url, body)
    }
}

/// The API answers lists with a bare JSON array and errors with `{"message": ...}`.
fn decode_list<T: serde::de::DeserializeOwned>(url: &str, body: Value) -> Result<Vec<T>> {
    if !body.is_array() {
        let reason = match body.get("message").and_then(Value::as_str) {
            Some(msg) => format!("expected a list, server said {:?}", msg),
            None => format!("expected a list, got {}", body),
        };
        return Err(ScrapeError::malformed(url, reason));
    }
    serde_json::from_value(body).map_err(|e| ScrapeError::malformed(url, e))
}
