use super::loader::load_table;
use super::ReferenceDataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Airport reference record keyed by IATA code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: HashMap<String, Airport>,
}

impl AirportTable {
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let airports = load_table(
            reader,
            "airports",
            |row: &Airport| row.code.to_ascii_uppercase(),
            |mut row: Airport| {
                if row.code.len() != 3 {
                    return Err(ReferenceDataError::InvalidRow {
                        dataset: "airports",
                        detail: format!("airport code '{}' is not three letters", row.code),
                    });
                }
                row.code = row.code.to_ascii_uppercase();
                Ok(row)
            },
        )?;
        Ok(Self { airports })
    }

    /// Unknown codes are not an error here; callers decide what missing data means.
    pub fn lookup(&self, code: &str) -> Option<&Airport> {
        self.airports.get(&code.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }
}
