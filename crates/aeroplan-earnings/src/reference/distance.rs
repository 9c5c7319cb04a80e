use super::airports::{Airport, AirportTable};
use super::loader::read_rows;
use super::ReferenceDataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceSource {
    Published,
    Haversine,
}

impl DistanceSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Haversine => "Haversine",
        }
    }
}

impl fmt::Display for DistanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a city-pair lookup. `error` is only set when neither the
/// published table nor the airport coordinates could produce a distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance: Option<u32>,
    pub source: Option<DistanceSource>,
    pub error: Option<String>,
}

impl DistanceResult {
    pub fn published(miles: u32) -> Self {
        Self {
            distance: Some(miles),
            source: Some(DistanceSource::Published),
            error: None,
        }
    }

    pub fn haversine(miles: u32) -> Self {
        Self {
            distance: Some(miles),
            source: Some(DistanceSource::Haversine),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            distance: None,
            source: None,
            error: Some(message.into()),
        }
    }
}

/// One row of the published table as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishedDistanceRow {
    pub city1: String,
    pub city2: String,
    #[serde(default)]
    pub legacy_distance: Option<u32>,
    #[serde(default)]
    pub current_distance: Option<u32>,
}

impl PublishedDistanceRow {
    /// The current figure wins whenever the airline has republished the pair.
    pub fn effective_distance(&self) -> Option<u32> {
        self.current_distance.or(self.legacy_distance)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublishedDistances {
    rows: Vec<PublishedDistanceRow>,
    index: HashMap<(String, String), u32>,
}

impl PublishedDistances {
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let rows: Vec<PublishedDistanceRow> = read_rows(reader, "distances")?;
        let mut index = HashMap::with_capacity(rows.len());

        for row in &rows {
            let miles = row
                .effective_distance()
                .ok_or_else(|| ReferenceDataError::InvalidRow {
                    dataset: "distances",
                    detail: format!("{}-{} has no distance", row.city1, row.city2),
                })?;
            index.insert(
                (
                    row.city1.to_ascii_uppercase(),
                    row.city2.to_ascii_uppercase(),
                ),
                miles,
            );
        }

        Ok(Self { rows, index })
    }

    /// Tries both orderings; the dataset only lists each pair once.
    pub fn lookup(&self, origin: &str, destination: &str) -> Option<u32> {
        let origin = origin.to_ascii_uppercase();
        let destination = destination.to_ascii_uppercase();
        self.index
            .get(&(origin.clone(), destination.clone()))
            .or_else(|| self.index.get(&(destination, origin)))
            .copied()
    }

    /// Rows in dataset order.
    pub fn rows(&self) -> &[PublishedDistanceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Great-circle distance in statute miles.
pub fn haversine_miles(from: &Airport, to: &Airport) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
}

pub(crate) fn resolve(
    published: &PublishedDistances,
    airports: &AirportTable,
    origin: &str,
    destination: &str,
) -> DistanceResult {
    if let Some(miles) = published.lookup(origin, destination) {
        return DistanceResult::published(miles);
    }

    // Evaluate the pair in code order so the result does not depend on direction.
    let origin = origin.trim().to_ascii_uppercase();
    let destination = destination.trim().to_ascii_uppercase();
    let (first, second) = if origin <= destination {
        (origin, destination)
    } else {
        (destination, origin)
    };

    let Some(from) = airports.lookup(&first) else {
        return DistanceResult::failed(format!("{first} not found"));
    };
    let Some(to) = airports.lookup(&second) else {
        return DistanceResult::failed(format!("{second} not found"));
    };

    DistanceResult::haversine(haversine_miles(from, to) as u32)
}
