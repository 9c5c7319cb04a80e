//! Per-segment earning rules and the engine that dispatches to them.

mod calculator;
mod context;
mod fare;
mod own_carrier;
mod partner;
mod registry;
mod result;

pub use calculator::{
    spend_multiplier_for_percent, BonusPolicy, EarningCalculator, FloorPolicy, PartnerTerms,
    PercentTable,
};
pub use context::{EarningContext, EliteStatus, TicketNumber, UnknownEliteStatus, OWN_TICKET_STOCK};
pub use fare::{is_zero_credit_basis, FareBrand, UnknownFareBrand};
pub use own_carrier::OwnCarrierCalculator;
pub use partner::{CorridorCalculator, HubRouteCalculator, RegionalCalculator, TableCalculator};
pub use registry::{CalculatorRegistry, OWN_CARRIER};
pub use result::{DistanceEarning, EarningResult, SpendEarning, UnknownPartner};

use crate::reference::{DistanceResult, ReferenceData, ReferenceDataError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EarningError {
    #[error("cannot resolve distance {origin}-{destination}: {message}")]
    Distance {
        origin: String,
        destination: String,
        message: String,
    },
}

/// Input of the standalone single-segment evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SegmentRequest {
    pub operating_airline: String,
    #[serde(default)]
    pub marketing_airline: Option<String>,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub fare_class: Option<char>,
    #[serde(default)]
    pub fare_basis: Option<String>,
    #[serde(default)]
    pub ticket_number: Option<String>,
    #[serde(default)]
    pub elite_bonus_multiplier: u32,
}

/// Distance plus earning for one leg. `earning` is `None` when the fare could
/// not be classified; the distance is still known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegEvaluation {
    pub distance: DistanceResult,
    pub earning: Option<EarningResult>,
}

/// The leg as the rules see it, before reference lookups.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Leg<'a> {
    pub operating_airline: &'a str,
    pub marketing_airline: Option<&'a str>,
    pub origin: &'a str,
    pub destination: &'a str,
    pub fare_class: Option<char>,
    pub fare_basis: Option<&'a str>,
    pub ticket: &'a TicketNumber,
    pub elite_status: EliteStatus,
}

/// Reference data plus the calculator registry. Immutable once built and
/// shared by reference with every calculation.
#[derive(Debug)]
pub struct EarningsEngine {
    reference: Arc<ReferenceData>,
    registry: CalculatorRegistry,
}

impl EarningsEngine {
    pub fn new(reference: Arc<ReferenceData>, registry: CalculatorRegistry) -> Self {
        Self {
            reference,
            registry,
        }
    }

    /// Bundled reference data with the standard rule set.
    pub fn bundled() -> Result<Self, ReferenceDataError> {
        Ok(Self::new(ReferenceData::bundled()?, CalculatorRegistry::standard()))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    /// Evaluate one segment outside an itinerary. Eligible dollars stay unset,
    /// so spend-based metrics read as `None` until the caller allocates a fare.
    pub fn earning_result(&self, request: &SegmentRequest) -> Result<Option<EarningResult>, EarningError> {
        let ticket = TicketNumber::new(request.ticket_number.as_deref().unwrap_or_default());
        let leg = Leg {
            operating_airline: request.operating_airline.trim(),
            marketing_airline: request
                .marketing_airline
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty()),
            origin: request.origin.trim(),
            destination: request.destination.trim(),
            fare_class: request.fare_class,
            fare_basis: request
                .fare_basis
                .as_deref()
                .map(str::trim)
                .filter(|basis| !basis.is_empty()),
            ticket: &ticket,
            elite_status: EliteStatus::from_bonus_multiplier(request.elite_bonus_multiplier),
        };

        Ok(self.evaluate_leg(&leg)?.earning)
    }

    pub(crate) fn evaluate_leg(&self, leg: &Leg<'_>) -> Result<LegEvaluation, EarningError> {
        let origin = leg.origin.to_ascii_uppercase();
        let destination = leg.destination.to_ascii_uppercase();
        let distance = self.reference.resolve_distance(&origin, &destination);

        if let Some(message) = &distance.error {
            warn!(%origin, %destination, error = %message, "distance unresolved");
            return Err(EarningError::Distance {
                origin,
                destination,
                message: message.clone(),
            });
        }
        debug!(
            %origin,
            %destination,
            miles = ?distance.distance,
            source = ?distance.source,
            "distance resolved"
        );

        let rule_code = self
            .registry
            .rule_code(leg.operating_airline, leg.marketing_airline);
        let Some(calculator) = self
            .registry
            .resolve(leg.operating_airline, leg.marketing_airline)
        else {
            warn!(airline = %rule_code, "no earning rules for airline");
            let earning = EarningResult::UnknownPartner(UnknownPartner {
                airline: rule_code,
                distance: distance.clone(),
                eligible_dollars: None,
            });
            return Ok(LegEvaluation {
                distance,
                earning: Some(earning),
            });
        };
        debug!(
            operating = leg.operating_airline,
            marketing = ?leg.marketing_airline,
            rules = %rule_code,
            calculator = calculator.name(),
            "calculator selected"
        );

        let origin_country = self.reference.airport(&origin).map(|a| a.country.as_str());
        let destination_country = self
            .reference
            .airport(&destination)
            .map(|a| a.country.as_str());
        let operating = leg.operating_airline.to_ascii_uppercase();
        let marketing = leg.marketing_airline.map(str::to_ascii_uppercase);

        let context = EarningContext {
            operating_airline: &operating,
            marketing_airline: marketing.as_deref(),
            origin: &origin,
            destination: &destination,
            origin_country,
            destination_country,
            origin_continent: origin_country.and_then(|c| self.reference.continent_of(c)),
            destination_continent: destination_country.and_then(|c| self.reference.continent_of(c)),
            fare_class: leg.fare_class.map(|c| c.to_ascii_uppercase()),
            fare_basis: leg.fare_basis,
            ticket: leg.ticket,
            elite_status: leg.elite_status,
            distance: &distance,
        };

        let earning = calculator.evaluate(&context);
        if earning.is_none() {
            debug!(rules = %rule_code, "fare could not be classified");
        }

        Ok(LegEvaluation { distance, earning })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> EarningsEngine {
        EarningsEngine::bundled().expect("bundled engine builds")
    }

    fn request(operating: &str, origin: &str, destination: &str, fare_class: Option<char>) -> SegmentRequest {
        SegmentRequest {
            operating_airline: operating.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            fare_class,
            ..SegmentRequest::default()
        }
    }

    #[test]
    fn partner_without_fare_class_is_undetermined() {
        let result = engine()
            .earning_result(&request("A3", "ATH", "FRA", None))
            .expect("airports resolve");
        assert_eq!(result, None);
    }

    #[test]
    fn partner_class_missing_from_chart_earns_zero() {
        let result = engine()
            .earning_result(&request("A3", "ATH", "FRA", Some('F')))
            .expect("airports resolve")
            .expect("fare class present");
        assert_eq!(result.base_multiplier(), Some(0));
        assert_eq!(result.base_points(), Some(0));
        assert_eq!(result.sqc(), Some(0));
    }

    #[test]
    fn codeshare_marketed_by_swiss_uses_swiss_chart() {
        let engine = engine();
        let mut codeshare = request("WK", "ZRH", "YYZ", Some('Y'));
        codeshare.marketing_airline = Some("LX".to_string());
        let as_swiss = engine
            .earning_result(&codeshare)
            .expect("airports resolve")
            .expect("class known");
        let as_edelweiss = engine
            .earning_result(&request("WK", "ZRH", "YYZ", Some('Y')))
            .expect("airports resolve")
            .expect("class known");
        let swiss = engine
            .earning_result(&request("LX", "ZRH", "YYZ", Some('Y')))
            .expect("airports resolve")
            .expect("class known");

        assert_eq!(as_swiss, swiss);
        assert_eq!(as_swiss.base_multiplier(), Some(100));
        assert_eq!(as_edelweiss.base_multiplier(), Some(50));
    }

    #[test]
    fn award_basis_forces_zero_on_own_metal() {
        let mut award = request("AC", "YVR", "YYZ", Some('J'));
        award.fare_basis = Some("JAERO".to_string());
        award.ticket_number = Some("0141234567890".to_string());
        award.elite_bonus_multiplier = 5;
        let result = engine()
            .earning_result(&award)
            .expect("airports resolve")
            .expect("fare classified");
        assert_eq!(result.base_multiplier(), Some(0));
    }

    #[test]
    fn unknown_airline_is_reported_not_dropped() {
        let result = engine()
            .earning_result(&request("xx", "YVR", "YYZ", Some('Y')))
            .expect("airports resolve")
            .expect("unknown partner result");
        match result {
            EarningResult::UnknownPartner(partner) => assert_eq!(partner.airline, "XX"),
            other => panic!("expected unknown partner, got {other:?}"),
        }
    }

    #[test]
    fn unresolvable_airport_is_an_error() {
        let error = engine()
            .earning_result(&request("AC", "YVR", "QQQ", Some('Y')))
            .expect_err("QQQ is not an airport");
        assert_eq!(
            error,
            EarningError::Distance {
                origin: "YVR".to_string(),
                destination: "QQQ".to_string(),
                message: "QQQ not found".to_string(),
            }
        );
    }

    #[test]
    fn spend_metrics_wait_for_allocation() {
        let mut own = request("AC", "SFO", "YVR", Some('Y'));
        own.fare_basis = Some("LT".to_string());
        own.ticket_number = Some("014".to_string());
        own.elite_bonus_multiplier = 5;
        let mut result = engine()
            .earning_result(&own)
            .expect("airports resolve")
            .expect("fare classified");

        assert_eq!(result.distance().distance, Some(802));
        assert_eq!(result.sqc(), None);
        result.set_eligible_dollars(Some(829));
        assert_eq!(result.sqc(), Some(3316));
        assert_eq!(result.total_points(), Some(4974));
    }
}
