use super::calculator::EarningCalculator;
use super::context::{EarningContext, TicketNumber};
use super::fare::{is_zero_credit_basis, FareBrand};
use super::result::{EarningResult, SpendEarning};

const NORTH_AMERICA: &str = "North America";
const LONG_HAUL_CONTINENTS: &[&str] = &["Europe", "Asia", "Oceania"];

/// Air Canada's own-metal rules: status-qualifying credit per eligible dollar.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnCarrierCalculator;

impl OwnCarrierCalculator {
    /// Precedence: zero-credit markers, then branded suffix, then booking class.
    pub fn sqc_multiplier(&self, context: &EarningContext<'_>) -> Option<u32> {
        if let Some(basis) = context.fare_basis {
            if is_zero_credit_basis(basis) {
                return Some(0);
            }
            if let Some(brand) = FareBrand::from_basis_suffix(basis) {
                return Some(brand_multiplier(brand, context));
            }
        }

        class_multiplier(context.fare_class?, context, true)
    }
}

fn brand_multiplier(brand: FareBrand, context: &EarningContext<'_>) -> u32 {
    match brand {
        FareBrand::Basic if context.connects(NORTH_AMERICA, LONG_HAUL_CONTINENTS) => 2,
        FareBrand::Basic => 1,
        FareBrand::Standard if context.is_domestic() => 2,
        FareBrand::Standard => 3,
        FareBrand::Flex | FareBrand::PremiumLowest => 3,
        FareBrand::Comfort | FareBrand::Latitude | FareBrand::PremiumFlexible => 4,
        FareBrand::BusinessLowest => 5,
        FareBrand::BusinessFlexible => 6,
    }
}

fn class_multiplier(fare_class: char, context: &EarningContext<'_>, follow_reduced: bool) -> Option<u32> {
    let multiplier = match fare_class.to_ascii_uppercase() {
        'J' | 'C' => 6,
        'D' | 'Z' | 'P' => 5,
        'O' | 'Y' | 'B' => 4,
        'E' | 'N' | 'M' | 'U' => 3,
        'H' | 'Q' | 'V' | 'W' if context.is_domestic() => 2,
        'H' | 'Q' | 'V' | 'W' => 3,
        'G' | 'S' | 'T' | 'L' | 'A' | 'K' if context.is_domestic() => 1,
        'G' | 'S' | 'T' | 'L' | 'A' | 'K' => 2,
        // Reduced fares earn as the class that leads the fare basis.
        'R' if follow_reduced => {
            let basis_class = context.fare_basis?.trim().chars().next()?;
            return class_multiplier(basis_class, context, false);
        }
        _ => 0,
    };
    Some(multiplier)
}

impl EarningCalculator for OwnCarrierCalculator {
    fn name(&self) -> &str {
        "Air Canada"
    }

    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult> {
        let multiplier = self.sqc_multiplier(context)?;
        let bonus = if multiplier > 0 && self.is_eligible_for_elite_bonus(context.ticket) {
            context.elite_status.bonus_multiplier()
        } else {
            0
        };

        Some(EarningResult::Spend(SpendEarning::new(
            context.distance.clone(),
            multiplier,
            bonus,
        )))
    }

    fn is_eligible_for_elite_bonus(&self, _ticket: &TicketNumber) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earnings::context::EliteStatus;
    use crate::reference::DistanceResult;

    struct Route {
        countries: (&'static str, &'static str),
        continents: (&'static str, &'static str),
    }

    const DOMESTIC: Route = Route {
        countries: ("Canada", "Canada"),
        continents: ("North America", "North America"),
    };
    const TRANSBORDER: Route = Route {
        countries: ("United States", "Canada"),
        continents: ("North America", "North America"),
    };
    const TRANSATLANTIC: Route = Route {
        countries: ("Canada", "France"),
        continents: ("North America", "Europe"),
    };

    fn multiplier(route: &Route, fare_class: Option<char>, fare_basis: Option<&str>) -> Option<u32> {
        let ticket = TicketNumber::new("014");
        let distance = DistanceResult::published(1000);
        let context = EarningContext {
            operating_airline: "AC",
            marketing_airline: None,
            origin: "AAA",
            destination: "BBB",
            origin_country: Some(route.countries.0),
            destination_country: Some(route.countries.1),
            origin_continent: Some(route.continents.0),
            destination_continent: Some(route.continents.1),
            fare_class,
            fare_basis,
            ticket: &ticket,
            elite_status: EliteStatus::SuperElite,
            distance: &distance,
        };
        OwnCarrierCalculator.sqc_multiplier(&context)
    }

    #[test]
    fn award_markers_override_everything() {
        assert_eq!(multiplier(&DOMESTIC, Some('J'), Some("JAERO")), Some(0));
        assert_eq!(multiplier(&DOMESTIC, Some('Y'), Some("YAWDLT")), Some(0));
        assert_eq!(multiplier(&DOMESTIC, Some('Y'), Some("YID90")), Some(0));
    }

    #[test]
    fn brand_suffix_beats_fare_class() {
        assert_eq!(multiplier(&TRANSBORDER, Some('Y'), Some("LT")), Some(4));
        assert_eq!(multiplier(&TRANSBORDER, Some('J'), Some("KNA0A0BA")), Some(1));
        assert_eq!(multiplier(&DOMESTIC, Some('K'), Some("EF")), Some(6));
    }

    #[test]
    fn basic_earns_more_only_on_long_haul_pairs() {
        assert_eq!(multiplier(&DOMESTIC, Some('G'), Some("BA")), Some(1));
        assert_eq!(multiplier(&TRANSATLANTIC, Some('G'), Some("BA")), Some(2));
    }

    #[test]
    fn standard_distinguishes_domestic_from_international() {
        assert_eq!(multiplier(&DOMESTIC, Some('K'), Some("TG")), Some(2));
        assert_eq!(multiplier(&TRANSBORDER, Some('K'), Some("TG")), Some(3));
    }

    #[test]
    fn discount_classes_depend_on_border_crossing() {
        assert_eq!(multiplier(&DOMESTIC, Some('Q'), None), Some(2));
        assert_eq!(multiplier(&TRANSBORDER, Some('Q'), None), Some(3));
        assert_eq!(multiplier(&DOMESTIC, Some('k'), None), Some(1));
        assert_eq!(multiplier(&TRANSATLANTIC, Some('K'), None), Some(2));
        assert_eq!(multiplier(&DOMESTIC, Some('J'), None), Some(6));
    }

    #[test]
    fn reduced_class_follows_fare_basis() {
        assert_eq!(multiplier(&DOMESTIC, Some('R'), Some("YRED")), Some(4));
        assert_eq!(multiplier(&DOMESTIC, Some('R'), Some("RRED")), Some(0));
        assert_eq!(multiplier(&DOMESTIC, Some('R'), None), None);
    }

    #[test]
    fn unknown_and_missing_classes() {
        assert_eq!(multiplier(&DOMESTIC, Some('F'), None), Some(0));
        assert_eq!(multiplier(&DOMESTIC, None, None), None);
        assert_eq!(multiplier(&DOMESTIC, None, Some("LT")), Some(4));
    }
}
