//! Itinerary-level calculation: parse the segment block, evaluate every leg,
//! spread the fare over the legs by distance, and roll up totals.

mod allocation;
mod parser;
pub mod report;

pub use allocation::allocate_dollars;
pub use parser::{parse_segment, split_segments, SegmentLine, SegmentParseError};

use crate::earnings::{
    EarningError, EarningResult, EarningsEngine, EliteStatus, FareBrand, Leg, TicketNumber,
    UnknownEliteStatus,
};
use crate::reference::DistanceResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("base fare is required")]
    MissingBaseFare,
    #[error("base fare cannot be negative (got {value})")]
    NegativeBaseFare { value: f64 },
    #[error("surcharges are required")]
    MissingSurcharges,
    #[error("surcharges cannot be negative (got {value})")]
    NegativeSurcharges { value: f64 },
    #[error("{field} is not a valid amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error(transparent)]
    InvalidEliteStatus(#[from] UnknownEliteStatus),
    #[error("segment {line} is invalid: {source}")]
    Segment {
        line: usize,
        #[source]
        source: SegmentParseError,
    },
    #[error("cannot resolve distance {origin}-{destination}: {message}")]
    Distance {
        origin: String,
        destination: String,
        message: String,
    },
}

impl From<EarningError> for CalculatorError {
    fn from(value: EarningError) -> Self {
        match value {
            EarningError::Distance {
                origin,
                destination,
                message,
            } => Self::Distance {
                origin,
                destination,
                message,
            },
        }
    }
}

/// Raw calculation input as submitted by a form or command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItineraryRequest {
    #[serde(default)]
    pub ticket: Option<String>,
    /// Tier code: `""`/`"0"`, `"25"`, `"35"`, `"50"`, `"75"`, or `"100"`.
    #[serde(default)]
    pub elite_status: String,
    /// Whitespace-separated `airline,origin,destination,class[,brand]` lines.
    pub segments: String,
    pub base_fare: Option<f64>,
    pub surcharges: Option<f64>,
}

/// One flown leg with its resolved distance and (if classifiable) earning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub operating_airline: String,
    pub origin: String,
    pub destination: String,
    pub fare_class: char,
    pub fare_brand: Option<FareBrand>,
    pub distance: DistanceResult,
    pub earning: Option<EarningResult>,
}

impl Segment {
    pub fn miles(&self) -> Option<u64> {
        self.distance.distance.map(u64::from)
    }

    pub fn eligible_dollars(&self) -> Option<u64> {
        self.earning.as_ref()?.eligible_dollars()
    }

    pub fn sqc(&self) -> Option<u64> {
        self.earning.as_ref()?.sqc()
    }

    pub fn base_points(&self) -> Option<u64> {
        self.earning.as_ref()?.base_points()
    }

    pub fn bonus_points(&self) -> Option<u64> {
        self.earning.as_ref()?.bonus_points()
    }

    pub fn total_points(&self) -> Option<u64> {
        self.earning.as_ref()?.total_points()
    }
}

/// Column sums. A metric is `None` as soon as one segment lacks it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TotalRow {
    pub distance: Option<u64>,
    pub eligible_dollars: Option<u64>,
    pub sqc: Option<u64>,
    pub base_points: Option<u64>,
    pub bonus_points: Option<u64>,
    pub total_points: Option<u64>,
}

impl TotalRow {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let sum = |metric: fn(&Segment) -> Option<u64>| segments.iter().map(metric).sum::<Option<u64>>();
        Self {
            distance: sum(Segment::miles),
            eligible_dollars: sum(Segment::eligible_dollars),
            sqc: sum(Segment::sqc),
            base_points: sum(Segment::base_points),
            bonus_points: sum(Segment::bonus_points),
            total_points: sum(Segment::total_points),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub ticket: TicketNumber,
    pub elite_status: EliteStatus,
    pub base_fare_cents: u64,
    pub surcharges_cents: u64,
    pub segments: Vec<Segment>,
    pub total: TotalRow,
}

impl Itinerary {
    pub fn calculate(engine: &EarningsEngine, request: &ItineraryRequest) -> Result<Self, CalculatorError> {
        let base_fare_cents = match request.base_fare {
            None => return Err(CalculatorError::MissingBaseFare),
            Some(value) if value < 0.0 => return Err(CalculatorError::NegativeBaseFare { value }),
            Some(value) => to_cents("base fare", value)?,
        };
        let surcharges_cents = match request.surcharges {
            None => return Err(CalculatorError::MissingSurcharges),
            Some(value) if value < 0.0 => return Err(CalculatorError::NegativeSurcharges { value }),
            Some(value) => to_cents("surcharges", value)?,
        };
        let elite_status: EliteStatus = request.elite_status.parse()?;
        let ticket = TicketNumber::new(request.ticket.as_deref().unwrap_or_default());

        let lines = split_segments(&request.segments)
            .enumerate()
            .map(|(index, text)| {
                parse_segment(text, engine.reference()).map_err(|source| CalculatorError::Segment {
                    line: index + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut segments = Vec::with_capacity(lines.len());
        for line in lines {
            let fare_basis = line.fare_brand.map(FareBrand::code);
            let evaluation = engine.evaluate_leg(&Leg {
                operating_airline: &line.operating_airline,
                marketing_airline: None,
                origin: &line.origin,
                destination: &line.destination,
                fare_class: Some(line.fare_class),
                fare_basis,
                ticket: &ticket,
                elite_status,
            })?;

            segments.push(Segment {
                operating_airline: line.operating_airline,
                origin: line.origin,
                destination: line.destination,
                fare_class: line.fare_class,
                fare_brand: line.fare_brand,
                distance: evaluation.distance,
                earning: evaluation.earning,
            });
        }

        let total_cents = base_fare_cents + surcharges_cents;
        let distances: Vec<Option<u32>> = segments.iter().map(|s| s.distance.distance).collect();
        let shares = allocate_dollars(&distances, total_cents);
        for (segment, dollars) in segments.iter_mut().zip(shares) {
            if let Some(earning) = segment.earning.as_mut() {
                earning.set_eligible_dollars(dollars);
            }
        }

        let total = TotalRow::from_segments(&segments);
        debug!(
            segments = segments.len(),
            total_cents,
            sqc = ?total.sqc,
            points = ?total.total_points,
            "itinerary calculated"
        );

        Ok(Self {
            ticket,
            elite_status,
            base_fare_cents,
            surcharges_cents,
            segments,
            total,
        })
    }

    pub fn total_fare_cents(&self) -> u64 {
        self.base_fare_cents + self.surcharges_cents
    }
}

/// Whole cents, rounded to the nearest cent.
fn to_cents(field: &'static str, value: f64) -> Result<u64, CalculatorError> {
    const MAX_CENTS: f64 = 1e15;
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents > MAX_CENTS {
        return Err(CalculatorError::InvalidAmount { field, value });
    }
    Ok(cents as u64)
}
