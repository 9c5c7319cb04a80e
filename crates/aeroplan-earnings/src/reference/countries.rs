use super::loader::load_table;
use super::ReferenceDataError;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CountryRow {
    country: String,
    continent: String,
}

/// Country name to continent name.
#[derive(Debug, Clone, Default)]
pub struct ContinentTable {
    continents: HashMap<String, String>,
}

impl ContinentTable {
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let continents = load_table(
            reader,
            "countries",
            |row: &CountryRow| row.country.clone(),
            |row| Ok(row.continent),
        )?;
        Ok(Self { continents })
    }

    pub fn continent_of(&self, country: &str) -> Option<&str> {
        self.continents.get(country).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.continents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.continents.is_empty()
    }
}
