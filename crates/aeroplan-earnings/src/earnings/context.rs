use crate::reference::DistanceResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticket stock prefix of the primary carrier's own tickets.
pub const OWN_TICKET_STOCK: &str = "014";

/// Ticket number as entered; only the three-digit stock prefix matters for earning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketNumber(String);

impl TicketNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A missing ticket number counts as partner stock.
    pub fn is_own_stock(&self) -> bool {
        self.0.starts_with(OWN_TICKET_STOCK)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aeroplan elite tier, named by its qualifying threshold in thousands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliteStatus {
    #[default]
    None,
    Elite25K,
    Elite35K,
    Elite50K,
    Elite75K,
    SuperElite,
}

impl EliteStatus {
    pub const ALL: [EliteStatus; 6] = [
        EliteStatus::None,
        EliteStatus::Elite25K,
        EliteStatus::Elite35K,
        EliteStatus::Elite50K,
        EliteStatus::Elite75K,
        EliteStatus::SuperElite,
    ];

    /// Extra points per eligible dollar on spend-based earning.
    pub const fn bonus_multiplier(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Elite25K => 1,
            Self::Elite35K => 2,
            Self::Elite50K => 3,
            Self::Elite75K => 4,
            Self::SuperElite => 5,
        }
    }

    /// Bonus percentage of base points on distance-based earning.
    pub const fn bonus_percent(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Elite25K => 25,
            Self::Elite35K => 35,
            Self::Elite50K => 50,
            Self::Elite75K => 75,
            Self::SuperElite => 100,
        }
    }

    pub const fn has_status(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Elite25K => "25",
            Self::Elite35K => "35",
            Self::Elite50K => "50",
            Self::Elite75K => "75",
            Self::SuperElite => "100",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No status",
            Self::Elite25K => "25K",
            Self::Elite35K => "35K",
            Self::Elite50K => "50K",
            Self::Elite75K => "75K",
            Self::SuperElite => "Super Elite",
        }
    }

    /// Multipliers above the top tier clamp to Super Elite.
    pub fn from_bonus_multiplier(multiplier: u32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|status| status.bonus_multiplier() <= multiplier)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown elite status '{0}' (expected 0, 25, 35, 50, 75, or 100)")]
pub struct UnknownEliteStatus(pub String);

impl FromStr for EliteStatus {
    type Err = UnknownEliteStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::None);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.code() == trimmed)
            .ok_or_else(|| UnknownEliteStatus(trimmed.to_string()))
    }
}

/// Everything a calculator may inspect about one flown segment.
#[derive(Debug, Clone)]
pub struct EarningContext<'a> {
    pub operating_airline: &'a str,
    pub marketing_airline: Option<&'a str>,
    pub origin: &'a str,
    pub destination: &'a str,
    pub origin_country: Option<&'a str>,
    pub destination_country: Option<&'a str>,
    pub origin_continent: Option<&'a str>,
    pub destination_continent: Option<&'a str>,
    pub fare_class: Option<char>,
    pub fare_basis: Option<&'a str>,
    pub ticket: &'a TicketNumber,
    pub elite_status: EliteStatus,
    pub distance: &'a DistanceResult,
}

impl EarningContext<'_> {
    /// Both endpoints in the same known country.
    pub fn is_domestic(&self) -> bool {
        matches!(
            (self.origin_country, self.destination_country),
            (Some(a), Some(b)) if a == b
        )
    }

    pub fn is_same_continent(&self) -> bool {
        matches!(
            (self.origin_continent, self.destination_continent),
            (Some(a), Some(b)) if a == b
        )
    }

    /// One endpoint on `continent` and the other on any of `others`.
    pub fn connects(&self, continent: &str, others: &[&str]) -> bool {
        match (self.origin_continent, self.destination_continent) {
            (Some(a), Some(b)) => {
                (a == continent && others.contains(&b)) || (b == continent && others.contains(&a))
            }
            _ => false,
        }
    }

    pub fn touches(&self, airport: &str) -> bool {
        self.origin == airport || self.destination == airport
    }

    /// The endpoint opposite `airport`, if the segment touches it.
    pub fn other_endpoint(&self, airport: &str) -> Option<&str> {
        if self.origin == airport {
            Some(self.destination)
        } else if self.destination == airport {
            Some(self.origin)
        } else {
            None
        }
    }

    pub fn within(&self, airports: &[&str]) -> bool {
        airports.contains(&self.origin) && airports.contains(&self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_codes() {
        assert_eq!("".parse::<EliteStatus>(), Ok(EliteStatus::None));
        assert_eq!("0".parse::<EliteStatus>(), Ok(EliteStatus::None));
        assert_eq!(" 35 ".parse::<EliteStatus>(), Ok(EliteStatus::Elite35K));
        assert_eq!("100".parse::<EliteStatus>(), Ok(EliteStatus::SuperElite));
        assert!("40".parse::<EliteStatus>().is_err());
    }

    #[test]
    fn bonus_multiplier_round_trips_through_status() {
        for status in EliteStatus::ALL {
            assert_eq!(
                EliteStatus::from_bonus_multiplier(status.bonus_multiplier()),
                status
            );
        }
        assert_eq!(EliteStatus::from_bonus_multiplier(9), EliteStatus::SuperElite);
        assert_eq!(EliteStatus::SuperElite.bonus_percent(), 100);
    }

    #[test]
    fn ticket_stock_prefix() {
        assert!(TicketNumber::new("0142345678901").is_own_stock());
        assert!(TicketNumber::new(" 014 ").is_own_stock());
        assert!(!TicketNumber::new("0162345678901").is_own_stock());
        assert!(!TicketNumber::new("").is_own_stock());
    }
}
