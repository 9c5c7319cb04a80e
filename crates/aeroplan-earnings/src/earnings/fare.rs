use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Substrings that mark reward bookings anywhere in a fare basis.
const AWARD_MARKERS: &[&str] = &["AERO", "AWD"];

/// Industry and agent discount suffixes.
const DISCOUNT_SUFFIXES: &[&str] = &["ID00", "ID50", "ID75", "ID90", "AD75", "ZED"];

/// Fare bases that never earn, regardless of booking class.
pub fn is_zero_credit_basis(basis: &str) -> bool {
    let basis = basis.trim().to_ascii_uppercase();
    AWARD_MARKERS.iter().any(|marker| basis.contains(marker))
        || DISCOUNT_SUFFIXES.iter().any(|suffix| basis.ends_with(suffix))
}

/// Branded fare families, encoded as the last two letters of the fare basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FareBrand {
    Basic,
    Standard,
    Flex,
    Comfort,
    Latitude,
    PremiumLowest,
    PremiumFlexible,
    BusinessLowest,
    BusinessFlexible,
}

impl FareBrand {
    pub const ALL: [FareBrand; 9] = [
        FareBrand::Basic,
        FareBrand::Standard,
        FareBrand::Flex,
        FareBrand::Comfort,
        FareBrand::Latitude,
        FareBrand::PremiumLowest,
        FareBrand::PremiumFlexible,
        FareBrand::BusinessLowest,
        FareBrand::BusinessFlexible,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Basic => "BA",
            Self::Standard => "TG",
            Self::Flex => "FL",
            Self::Comfort => "CO",
            Self::Latitude => "LT",
            Self::PremiumLowest => "PL",
            Self::PremiumFlexible => "PF",
            Self::BusinessLowest => "EL",
            Self::BusinessFlexible => "EF",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Economy Basic",
            Self::Standard => "Economy Standard",
            Self::Flex => "Economy Flex",
            Self::Comfort => "Economy Comfort",
            Self::Latitude => "Economy Latitude",
            Self::PremiumLowest => "Premium Economy (lowest)",
            Self::PremiumFlexible => "Premium Economy (flexible)",
            Self::BusinessLowest => "Business (lowest)",
            Self::BusinessFlexible => "Business (flexible)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|brand| brand.code().eq_ignore_ascii_case(code))
    }

    /// Brand carried in the trailing two characters of a fare basis.
    pub fn from_basis_suffix(basis: &str) -> Option<Self> {
        let basis = basis.trim();
        let start = basis.len().checked_sub(2)?;
        basis.get(start..).and_then(Self::from_code)
    }
}

impl fmt::Display for FareBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized fare brand '{0}'")]
pub struct UnknownFareBrand(pub String);

impl FromStr for FareBrand {
    type Err = UnknownFareBrand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value).ok_or_else(|| UnknownFareBrand(value.trim().to_string()))
    }
}
