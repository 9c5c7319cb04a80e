//! Static reference datasets: airports, country to continent mapping, and the
//! published city-pair distance table, plus the distance resolver built on them.

mod airports;
mod countries;
mod distance;
mod loader;

pub use airports::{Airport, AirportTable};
pub use countries::ContinentTable;
pub use distance::{
    haversine_miles, DistanceResult, DistanceSource, PublishedDistanceRow, PublishedDistances,
    EARTH_RADIUS_MILES,
};

use crate::config::ReferenceConfig;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::info;

const BUNDLED_AIRPORTS: &str = include_str!("../../data/airports.csv");
const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.csv");
const BUNDLED_DISTANCES: &str = include_str!("../../data/distances.csv");

static BUNDLED: OnceLock<Arc<ReferenceData>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {dataset} data: {source}")]
    Csv {
        dataset: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("invalid {dataset} row: {detail}")]
    InvalidRow {
        dataset: &'static str,
        detail: String,
    },
}

/// Read-only lookups shared by every calculation. Built once and safe to read
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    airports: AirportTable,
    continents: ContinentTable,
    distances: PublishedDistances,
}

impl ReferenceData {
    /// Datasets compiled into the crate, parsed on first use.
    pub fn bundled() -> Result<Arc<ReferenceData>, ReferenceDataError> {
        if let Some(data) = BUNDLED.get() {
            return Ok(Arc::clone(data));
        }

        let data = Arc::new(Self::from_readers(
            Cursor::new(BUNDLED_AIRPORTS),
            Cursor::new(BUNDLED_COUNTRIES),
            Cursor::new(BUNDLED_DISTANCES),
        )?);
        Ok(Arc::clone(BUNDLED.get_or_init(|| data)))
    }

    /// Load `airports.csv`, `countries.csv`, and `distances.csv` from a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ReferenceDataError> {
        let dir = dir.as_ref();
        let open = |name: &str| {
            let path = dir.join(name);
            std::fs::File::open(&path).map_err(|source| ReferenceDataError::Io { path, source })
        };

        Self::from_readers(
            open("airports.csv")?,
            open("countries.csv")?,
            open("distances.csv")?,
        )
    }

    pub fn from_config(config: &ReferenceConfig) -> Result<Arc<ReferenceData>, ReferenceDataError> {
        match &config.data_dir {
            Some(dir) => Ok(Arc::new(Self::from_dir(dir)?)),
            None => Self::bundled(),
        }
    }

    pub fn from_readers<A, C, D>(
        airports: A,
        countries: C,
        distances: D,
    ) -> Result<Self, ReferenceDataError>
    where
        A: Read,
        C: Read,
        D: Read,
    {
        let airports = AirportTable::from_reader(airports)?;
        let continents = ContinentTable::from_reader(countries)?;
        let distances = PublishedDistances::from_reader(distances)?;

        info!(
            airports = airports.len(),
            countries = continents.len(),
            published_pairs = distances.len(),
            "reference data loaded"
        );

        Ok(Self {
            airports,
            continents,
            distances,
        })
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.lookup(code)
    }

    pub fn continent_of(&self, country: &str) -> Option<&str> {
        self.continents.continent_of(country)
    }

    pub fn airports(&self) -> &AirportTable {
        &self.airports
    }

    pub fn published_distances(&self) -> &PublishedDistances {
        &self.distances
    }

    /// Published table first, great-circle fallback second.
    pub fn resolve_distance(&self, origin: &str, destination: &str) -> DistanceResult {
        distance::resolve(&self.distances, &self.airports, origin, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Arc<ReferenceData> {
        ReferenceData::bundled().expect("bundled reference data loads")
    }

    #[test]
    fn bundled_data_is_cached() {
        let first = bundled();
        let second = bundled();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn published_pairs_are_unique_and_ordered() {
        let data = bundled();
        let rows = data.published_distances().rows();
        assert!(!rows.is_empty());

        for row in rows {
            assert!(
                row.city1 < row.city2,
                "{}-{} must list codes in ascending order",
                row.city1,
                row.city2
            );
        }
        for window in rows.windows(2) {
            let previous = (&window[0].city1, &window[0].city2);
            let next = (&window[1].city1, &window[1].city2);
            assert!(
                previous < next,
                "{previous:?} must sort strictly before {next:?}"
            );
        }
    }

    #[test]
    fn published_distances_stay_close_to_haversine() {
        let data = bundled();
        for row in data.published_distances().rows() {
            let from = data.airport(&row.city1).expect("published origin is a known airport");
            let to = data.airport(&row.city2).expect("published destination is a known airport");
            let published = f64::from(row.effective_distance().expect("row has a distance"));
            let haversine = haversine_miles(from, to);
            let deviation = (published - haversine).abs() / haversine;
            assert!(
                deviation <= 0.03,
                "{}-{} published {published} deviates {:.1}% from haversine {haversine:.0}",
                row.city1,
                row.city2,
                deviation * 100.0
            );
        }
    }

    #[test]
    fn every_airport_country_has_a_continent() {
        let data = bundled();
        for airport in data.airports().iter() {
            assert!(
                data.continent_of(&airport.country).is_some(),
                "{} ({}) has no continent",
                airport.code,
                airport.country
            );
        }
    }

    #[test]
    fn resolves_published_and_fallback_pairs() {
        let data = bundled();

        let published = data.resolve_distance("SFO", "YVR");
        assert_eq!(published, DistanceResult::published(802));

        let fallback = data.resolve_distance("SFO", "NRT");
        assert_eq!(fallback.source, Some(DistanceSource::Haversine));
        assert!(fallback.distance.is_some());

        let missing = data.resolve_distance("XYZ", "YVR");
        assert_eq!(missing.error.as_deref(), Some("XYZ not found"));
    }

    #[test]
    fn from_dir_propagates_io_errors() {
        let error = ReferenceData::from_dir("./does-not-exist").expect_err("expected io error");
        match error {
            ReferenceDataError::Io { path, .. } => assert!(path.ends_with("airports.csv")),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
