use crate::reference::DistanceResult;
use serde::{Deserialize, Serialize};

/// Spend-based earning: credit follows the dollars allocated to the segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendEarning {
    pub distance: DistanceResult,
    pub sqc_multiplier: u32,
    pub elite_bonus_multiplier: u32,
    pub eligible_dollars: Option<u64>,
}

impl SpendEarning {
    pub fn new(distance: DistanceResult, sqc_multiplier: u32, elite_bonus_multiplier: u32) -> Self {
        Self {
            distance,
            sqc_multiplier,
            elite_bonus_multiplier,
            eligible_dollars: None,
        }
    }

    pub fn sqc(&self) -> Option<u64> {
        self.eligible_dollars
            .map(|dollars| dollars * u64::from(self.sqc_multiplier))
    }

    /// Zero-credit fares earn no base points either.
    pub fn base_points(&self) -> Option<u64> {
        self.eligible_dollars.map(|dollars| {
            if self.sqc_multiplier == 0 {
                0
            } else {
                dollars
            }
        })
    }

    pub fn bonus_points(&self) -> Option<u64> {
        self.eligible_dollars.map(|dollars| {
            if self.sqc_multiplier == 0 {
                0
            } else {
                dollars * u64::from(self.elite_bonus_multiplier)
            }
        })
    }
}

/// Distance-based earning: points are a percentage of the flown miles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceEarning {
    pub distance: DistanceResult,
    pub earning_percent: u32,
    /// Guaranteed minimum base points; zero when no floor applies.
    pub minimum_points: u32,
    pub bonus_percent: u32,
    pub earns_status_credit: bool,
    pub eligible_dollars: Option<u64>,
}

impl DistanceEarning {
    fn miles(&self) -> Option<u64> {
        self.distance.distance.map(u64::from)
    }

    pub fn sqc(&self) -> Option<u64> {
        if !self.earns_status_credit {
            return Some(0);
        }
        self.miles()
            .map(|miles| miles * u64::from(self.earning_percent) / 100)
    }

    pub fn base_points(&self) -> Option<u64> {
        self.miles().map(|miles| {
            let earned = miles * u64::from(self.earning_percent) / 100;
            earned.max(u64::from(self.minimum_points))
        })
    }

    /// Capped at the flown distance so the floor does not inflate the bonus.
    pub fn bonus_points(&self) -> Option<u64> {
        let miles = self.miles()?;
        let base = self.base_points()?;
        Some(base.min(miles) * u64::from(self.bonus_percent) / 100)
    }
}

/// Placeholder for an operating airline with no calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownPartner {
    pub airline: String,
    pub distance: DistanceResult,
    pub eligible_dollars: Option<u64>,
}

/// Per-segment earning. Point and credit figures are derived on demand from the
/// stored fields, so assigning `eligible_dollars` is the only mutation needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EarningResult {
    Spend(SpendEarning),
    Distance(DistanceEarning),
    UnknownPartner(UnknownPartner),
}

impl EarningResult {
    pub fn distance(&self) -> &DistanceResult {
        match self {
            Self::Spend(earning) => &earning.distance,
            Self::Distance(earning) => &earning.distance,
            Self::UnknownPartner(partner) => &partner.distance,
        }
    }

    pub fn eligible_dollars(&self) -> Option<u64> {
        match self {
            Self::Spend(earning) => earning.eligible_dollars,
            Self::Distance(earning) => earning.eligible_dollars,
            Self::UnknownPartner(partner) => partner.eligible_dollars,
        }
    }

    pub fn set_eligible_dollars(&mut self, dollars: Option<u64>) {
        match self {
            Self::Spend(earning) => earning.eligible_dollars = dollars,
            Self::Distance(earning) => earning.eligible_dollars = dollars,
            Self::UnknownPartner(partner) => partner.eligible_dollars = dollars,
        }
    }

    /// SQC multiplier for spend earning, percent of distance otherwise.
    pub fn base_multiplier(&self) -> Option<u32> {
        match self {
            Self::Spend(earning) => Some(earning.sqc_multiplier),
            Self::Distance(earning) => Some(earning.earning_percent),
            Self::UnknownPartner(_) => None,
        }
    }

    pub fn elite_bonus_multiplier(&self) -> Option<u32> {
        match self {
            Self::Spend(earning) => Some(earning.elite_bonus_multiplier),
            Self::Distance(earning) => Some(earning.bonus_percent),
            Self::UnknownPartner(_) => None,
        }
    }

    pub fn sqc(&self) -> Option<u64> {
        match self {
            Self::Spend(earning) => earning.sqc(),
            Self::Distance(earning) => earning.sqc(),
            Self::UnknownPartner(_) => None,
        }
    }

    pub fn base_points(&self) -> Option<u64> {
        match self {
            Self::Spend(earning) => earning.base_points(),
            Self::Distance(earning) => earning.base_points(),
            Self::UnknownPartner(_) => None,
        }
    }

    pub fn bonus_points(&self) -> Option<u64> {
        match self {
            Self::Spend(earning) => earning.bonus_points(),
            Self::Distance(earning) => earning.bonus_points(),
            Self::UnknownPartner(_) => None,
        }
    }

    pub fn total_points(&self) -> Option<u64> {
        Some(self.base_points()? + self.bonus_points()?)
    }

    pub fn is_unknown_partner(&self) -> bool {
        matches!(self, Self::UnknownPartner(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_fields_follow_eligible_dollars() {
        let mut result = EarningResult::Spend(SpendEarning::new(
            DistanceResult::published(802),
            4,
            5,
        ));
        assert_eq!(result.sqc(), None);
        assert_eq!(result.total_points(), None);

        result.set_eligible_dollars(Some(231));
        assert_eq!(result.sqc(), Some(924));
        assert_eq!(result.base_points(), Some(231));
        assert_eq!(result.bonus_points(), Some(1155));
        assert_eq!(result.total_points(), Some(1386));

        result.set_eligible_dollars(Some(100));
        assert_eq!(result.sqc(), Some(400));
        assert_eq!(result.total_points(), Some(600));
    }

    #[test]
    fn zero_multiplier_spend_earns_nothing() {
        let mut result =
            EarningResult::Spend(SpendEarning::new(DistanceResult::published(802), 0, 5));
        result.set_eligible_dollars(Some(500));
        assert_eq!(result.sqc(), Some(0));
        assert_eq!(result.base_points(), Some(0));
        assert_eq!(result.bonus_points(), Some(0));
    }

    #[test]
    fn floor_lifts_base_points_but_not_the_bonus() {
        let earning = DistanceEarning {
            distance: DistanceResult::haversine(120),
            earning_percent: 100,
            minimum_points: 500,
            bonus_percent: 50,
            earns_status_credit: true,
            eligible_dollars: None,
        };
        assert_eq!(earning.base_points(), Some(500));
        assert_eq!(earning.bonus_points(), Some(60));
        assert_eq!(earning.sqc(), Some(120));
    }

    #[test]
    fn distance_earning_without_distance_is_unknown() {
        let earning = EarningResult::Distance(DistanceEarning {
            distance: DistanceResult::failed("XXX not found"),
            earning_percent: 100,
            minimum_points: 0,
            bonus_percent: 0,
            earns_status_credit: true,
            eligible_dollars: Some(10),
        });
        assert_eq!(earning.sqc(), None);
        assert_eq!(earning.total_points(), None);
        assert_eq!(earning.eligible_dollars(), Some(10));
    }

    #[test]
    fn unknown_partner_has_no_metrics() {
        let mut result = EarningResult::UnknownPartner(UnknownPartner {
            airline: "XX".to_string(),
            distance: DistanceResult::published(100),
            eligible_dollars: None,
        });
        result.set_eligible_dollars(Some(50));
        assert_eq!(result.eligible_dollars(), Some(50));
        assert_eq!(result.sqc(), None);
        assert_eq!(result.base_multiplier(), None);
        assert!(result.is_unknown_partner());
    }
}
