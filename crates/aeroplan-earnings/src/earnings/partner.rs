use super::calculator::{partner_credit, table_percent, EarningCalculator, PartnerTerms, PercentTable};
use super::context::{EarningContext, TicketNumber};
use super::result::EarningResult;

/// Fare-class percentage table plus the partner's bonus and floor terms.
/// Covers both alliance partners and pure mileage partners.
#[derive(Debug, Clone)]
pub struct TableCalculator {
    name: &'static str,
    table: PercentTable,
    terms: PartnerTerms,
}

impl TableCalculator {
    pub const fn new(name: &'static str, table: PercentTable, terms: PartnerTerms) -> Self {
        Self { name, table, terms }
    }
}

impl EarningCalculator for TableCalculator {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult> {
        let percent = table_percent(&self.table, context)?;
        Some(partner_credit(context, percent, &self.terms))
    }

    fn is_eligible_for_elite_bonus(&self, ticket: &TicketNumber) -> bool {
        self.terms.bonus.is_eligible(ticket)
    }
}

/// Earns only on routes between `hub` and one of `spokes`, and only when the
/// ticket was issued on own stock. Anything else is a zero-credit result.
#[derive(Debug, Clone)]
pub struct HubRouteCalculator {
    name: &'static str,
    hub: &'static str,
    spokes: &'static [&'static str],
    table: PercentTable,
    terms: PartnerTerms,
}

impl HubRouteCalculator {
    pub const fn new(
        name: &'static str,
        hub: &'static str,
        spokes: &'static [&'static str],
        table: PercentTable,
        terms: PartnerTerms,
    ) -> Self {
        Self {
            name,
            hub,
            spokes,
            table,
            terms,
        }
    }

    fn qualifies(&self, context: &EarningContext<'_>) -> bool {
        context.ticket.is_own_stock()
            && context
                .other_endpoint(self.hub)
                .is_some_and(|other| self.spokes.contains(&other))
    }
}

impl EarningCalculator for HubRouteCalculator {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult> {
        let percent = table_percent(&self.table, context)?;
        let percent = if self.qualifies(context) { percent } else { 0 };
        Some(partner_credit(context, percent, &self.terms))
    }

    fn is_eligible_for_elite_bonus(&self, ticket: &TicketNumber) -> bool {
        self.terms.bonus.is_eligible(ticket)
    }
}

/// Three-way table choice: within one country, within one continent, or beyond.
#[derive(Debug, Clone)]
pub struct RegionalCalculator {
    name: &'static str,
    domestic: PercentTable,
    regional: PercentTable,
    international: PercentTable,
    terms: PartnerTerms,
}

impl RegionalCalculator {
    pub const fn new(
        name: &'static str,
        domestic: PercentTable,
        regional: PercentTable,
        international: PercentTable,
        terms: PartnerTerms,
    ) -> Self {
        Self {
            name,
            domestic,
            regional,
            international,
            terms,
        }
    }

    fn table_for(&self, context: &EarningContext<'_>) -> &PercentTable {
        if context.is_domestic() {
            &self.domestic
        } else if context.is_same_continent() {
            &self.regional
        } else {
            &self.international
        }
    }
}

impl EarningCalculator for RegionalCalculator {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult> {
        let percent = table_percent(self.table_for(context), context)?;
        Some(partner_credit(context, percent, &self.terms))
    }

    fn is_eligible_for_elite_bonus(&self, ticket: &TicketNumber) -> bool {
        self.terms.bonus.is_eligible(ticket)
    }
}

/// Multiplies the table percent when both endpoints lie in a closed set of cities.
#[derive(Debug, Clone)]
pub struct CorridorCalculator {
    name: &'static str,
    corridor: &'static [&'static str],
    factor: u32,
    table: PercentTable,
    terms: PartnerTerms,
}

impl CorridorCalculator {
    pub const fn new(
        name: &'static str,
        corridor: &'static [&'static str],
        factor: u32,
        table: PercentTable,
        terms: PartnerTerms,
    ) -> Self {
        Self {
            name,
            corridor,
            factor,
            table,
            terms,
        }
    }
}

impl EarningCalculator for CorridorCalculator {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, context: &EarningContext<'_>) -> Option<EarningResult> {
        let percent = table_percent(&self.table, context)?;
        let percent = if context.within(self.corridor) {
            percent * self.factor
        } else {
            percent
        };
        Some(partner_credit(context, percent, &self.terms))
    }

    fn is_eligible_for_elite_bonus(&self, ticket: &TicketNumber) -> bool {
        self.terms.bonus.is_eligible(ticket)
    }
}
