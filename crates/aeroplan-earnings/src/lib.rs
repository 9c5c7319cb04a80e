//! Aeroplan earning engine: per-segment calculators, distance resolution, and
//! itinerary-level allocation of fares into points and status-qualifying credit.

pub mod config;
pub mod earnings;
pub mod error;
pub mod itinerary;
pub mod reference;
pub mod telemetry;

pub use earnings::{EarningResult, EarningsEngine, EliteStatus, SegmentRequest, TicketNumber};
pub use itinerary::{CalculatorError, Itinerary, ItineraryRequest, Segment, TotalRow};
pub use reference::{DistanceResult, DistanceSource, ReferenceData};
