use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Short country identifier as handed out by the API, e.g. `"us"`.
pub type CountryCode = String;

/// A leader exactly as the API lists it. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLeader {
    pub first_name: String,
    pub last_name: String,
    pub wikipedia_url: String,
}

/// A leader plus the intro paragraph from their encyclopedia page.
/// Field order here is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub country_code: CountryCode,
    pub first_name: String,
    pub last_name: String,
    pub wikipedia_url: String,
    pub first_paragraph: String,
}

impl LeaderRecord {
    pub fn enrich(country_code: &str, raw: RawLeader, first_paragraph: String) -> Self {
        LeaderRecord {
            country_code: country_code.to_string(),
            first_name: raw.first_name,
            last_name: raw.last_name,
            wikipedia_url: raw.wikipedia_url,
            first_paragraph,
        }
    }
}

/// Country code -> enriched leaders, in the order they were first seen.
///
/// Records are filed under their own `country_code`, so a record can never
/// sit under the wrong key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<(CountryCode, Vec<LeaderRecord>)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LeaderRecord) {
        match self.entries.iter_mut().find(|(code, _)| *code == record.country_code) {
            Some((_, records)) => records.push(record),
            None => self.entries.push((record.country_code.clone(), vec![record])),
        }
    }

    pub fn get(&self, country: &str) -> Option<&[LeaderRecord]> {
        self.entries
            .iter()
            .find(|(code, _)| code == country)
            .map(|(_, records)| records.as_slice())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    /// Every record, country by country.
    pub fn records(&self) -> impl Iterator<Item = &LeaderRecord> {
        self.entries.iter().flat_map(|(_, records)| records.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, records) in &self.entries {
            map.serialize_entry(code, records)?;
        }
        map.end()
    }
}
