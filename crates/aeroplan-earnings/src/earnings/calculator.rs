use super::context::{EarningContext, TicketNumber};
use super::fare::is_zero_credit_basis;
use super::result::{DistanceEarning, EarningResult, SpendEarning};

/// Rule set for one operating airline (or a family of them).
pub trait EarningCalculator: Send + Sync {
    fn name(&self) -> &str;

    /// `None` when the fare cannot be classified, e.g. no fare class was given.
    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult>;

    fn is_eligible_for_elite_bonus(&self, ticket: &TicketNumber) -> bool;
}

/// Booking-class letters to percent of distance. Letters missing from every
/// row earn nothing.
#[derive(Debug, Clone, Copy)]
pub struct PercentTable(&'static [(&'static str, u32)]);

impl PercentTable {
    pub const fn new(rows: &'static [(&'static str, u32)]) -> Self {
        Self(rows)
    }

    pub fn percent_for(&self, fare_class: char) -> u32 {
        let fare_class = fare_class.to_ascii_uppercase();
        self.0
            .iter()
            .find(|(classes, _)| classes.contains(fare_class))
            .map(|(_, percent)| *percent)
            .unwrap_or(0)
    }
}

/// How a partner passes the member's elite bonus through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusPolicy {
    /// Full tier bonus on every ticket stock.
    Tiered,
    /// Fixed 25% for any status holder, partner ticket stock only.
    Flat25,
    Ineligible,
}

impl BonusPolicy {
    pub fn is_eligible(self, ticket: &TicketNumber) -> bool {
        match self {
            Self::Tiered => true,
            Self::Flat25 => !ticket.is_own_stock(),
            Self::Ineligible => false,
        }
    }
}

/// Minimum base points on distance earning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorPolicy {
    Disabled,
    /// Only for members holding status.
    Elite(u32),
    Always(u32),
}

impl FloorPolicy {
    /// `round(percent × floor miles / 100)`, or zero when no floor applies.
    pub fn minimum_points(self, percent: u32, context: &EarningContext<'_>) -> u32 {
        let floor_miles = match self {
            Self::Disabled => return 0,
            Self::Elite(miles) if context.elite_status.has_status() => miles,
            Self::Elite(_) => return 0,
            Self::Always(miles) => miles,
        };
        (percent * floor_miles + 50) / 100
    }
}

/// Earning terms shared by table-driven partner calculators.
#[derive(Debug, Clone, Copy)]
pub struct PartnerTerms {
    pub bonus: BonusPolicy,
    pub floor: FloorPolicy,
    pub status_credit: bool,
}

impl PartnerTerms {
    pub const fn alliance(bonus: BonusPolicy, floor: FloorPolicy) -> Self {
        Self {
            bonus,
            floor,
            status_credit: true,
        }
    }

    /// Pure mileage partners: no status credit and no elite bonus.
    pub const fn mileage_only(floor: FloorPolicy) -> Self {
        Self {
            bonus: BonusPolicy::Ineligible,
            floor,
            status_credit: false,
        }
    }
}

/// SQC per eligible dollar for a partner segment sold on own ticket stock.
pub fn spend_multiplier_for_percent(percent: u32) -> u32 {
    match percent {
        0 => 0,
        1..=49 => 1,
        50..=99 => 2,
        100..=124 => 3,
        _ => 4,
    }
}

/// Percent for the booked class, zeroed for award and discount fare bases.
pub(crate) fn table_percent(table: &PercentTable, context: &EarningContext<'_>) -> Option<u32> {
    let fare_class = context.fare_class?;
    if context.fare_basis.is_some_and(is_zero_credit_basis) {
        return Some(0);
    }
    Some(table.percent_for(fare_class))
}

/// Own ticket stock earns on spend, partner stock on distance.
pub(crate) fn partner_credit(
    context: &EarningContext<'_>,
    percent: u32,
    terms: &PartnerTerms,
) -> EarningResult {
    let eligible = terms.bonus.is_eligible(context.ticket);

    if terms.status_credit && context.ticket.is_own_stock() {
        let multiplier = spend_multiplier_for_percent(percent);
        let bonus = if eligible {
            context.elite_status.bonus_multiplier()
        } else {
            0
        };
        return EarningResult::Spend(SpendEarning::new(context.distance.clone(), multiplier, bonus));
    }

    let bonus_percent = match terms.bonus {
        _ if !eligible => 0,
        BonusPolicy::Tiered => context.elite_status.bonus_percent(),
        BonusPolicy::Flat25 if context.elite_status.has_status() => 25,
        BonusPolicy::Flat25 | BonusPolicy::Ineligible => 0,
    };

    EarningResult::Distance(DistanceEarning {
        distance: context.distance.clone(),
        earning_percent: percent,
        minimum_points: terms.floor.minimum_points(percent, context),
        bonus_percent,
        earns_status_credit: terms.status_credit,
        eligible_dollars: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: PercentTable = PercentTable::new(&[("JCD", 125), ("YB", 100), ("KL", 25)]);

    #[test]
    fn percent_lookup_is_case_insensitive_and_defaults_to_zero() {
        assert_eq!(TABLE.percent_for('c'), 125);
        assert_eq!(TABLE.percent_for('Y'), 100);
        assert_eq!(TABLE.percent_for('L'), 25);
        assert_eq!(TABLE.percent_for('F'), 0);
    }

    #[test]
    fn spend_multiplier_bands() {
        assert_eq!(spend_multiplier_for_percent(0), 0);
        assert_eq!(spend_multiplier_for_percent(25), 1);
        assert_eq!(spend_multiplier_for_percent(50), 2);
        assert_eq!(spend_multiplier_for_percent(100), 3);
        assert_eq!(spend_multiplier_for_percent(150), 4);
    }

    #[test]
    fn flat_bonus_only_on_partner_stock() {
        assert!(!BonusPolicy::Flat25.is_eligible(&TicketNumber::new("014")));
        assert!(BonusPolicy::Flat25.is_eligible(&TicketNumber::new("016")));
        assert!(BonusPolicy::Tiered.is_eligible(&TicketNumber::new("014")));
        assert!(!BonusPolicy::Ineligible.is_eligible(&TicketNumber::new("016")));
    }
}
