use super::calculator::{BonusPolicy, EarningCalculator, FloorPolicy, PartnerTerms, PercentTable};
use super::own_carrier::OwnCarrierCalculator;
use super::partner::{CorridorCalculator, HubRouteCalculator, RegionalCalculator, TableCalculator};
use std::collections::HashMap;

pub const OWN_CARRIER: &str = "AC";

/// Star Alliance style partner: name, earning chart, elite bonus, floor.
struct AlliancePartner {
    code: &'static str,
    name: &'static str,
    table: &'static [(&'static str, u32)],
    bonus: BonusPolicy,
    floor: FloorPolicy,
}

const fn partner(
    code: &'static str,
    name: &'static str,
    table: &'static [(&'static str, u32)],
    bonus: BonusPolicy,
    floor: FloorPolicy,
) -> AlliancePartner {
    AlliancePartner {
        code,
        name,
        table,
        bonus,
        floor,
    }
}

use BonusPolicy::{Flat25, Ineligible, Tiered};
use FloorPolicy::{Always, Disabled, Elite};

const ALLIANCE_PARTNERS: &[AlliancePartner] = &[
    partner(
        "A3",
        "Aegean Airlines",
        &[("CDZA", 125), ("YB", 100), ("MH", 75), ("KLV", 50), ("SP", 25)],
        Tiered,
        Elite(250),
    ),
    partner(
        "AI",
        "Air India",
        &[("FA", 150), ("CDJZ", 125), ("YB", 100), ("MHK", 75), ("QVWGLU", 50), ("ST", 25)],
        Tiered,
        Disabled,
    ),
    partner(
        "BR",
        "EVA Air",
        &[("CJD", 125), ("KLT", 110), ("YB", 100), ("MH", 75), ("QS", 50), ("VW", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "CA",
        "Air China",
        &[("FA", 150), ("JCDZR", 125), ("GE", 110), ("YB", 100), ("MUH", 75), ("QVWS", 50), ("TLK", 25)],
        Tiered,
        Disabled,
    ),
    partner(
        "CM",
        "Copa Airlines",
        &[("JCDR", 125), ("YBM", 100), ("HQKV", 75), ("UWSE", 50), ("LO", 25)],
        Flat25,
        Disabled,
    ),
    partner(
        "EN",
        "Air Dolomiti",
        &[("JCDZP", 125), ("YB", 100), ("MUHQV", 50), ("WSTLK", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "ET",
        "Ethiopian Airlines",
        &[("CJDP", 125), ("YGSB", 100), ("MKLVH", 75), ("UQT", 50), ("E", 25)],
        Flat25,
        Disabled,
    ),
    partner(
        "LH",
        "Lufthansa",
        &[("FA", 150), ("JCDZP", 125), ("GE", 100), ("NYB", 100), ("MUHQV", 50), ("WST", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "LO",
        "LOT Polish Airlines",
        &[("CDZ", 125), ("FAP", 100), ("YB", 100), ("MEHK", 75), ("QTV", 50), ("SWLG", 25)],
        Tiered,
        Elite(250),
    ),
    partner(
        "LX",
        "Swiss International Air Lines",
        &[("FA", 150), ("JCDZP", 125), ("GE", 100), ("YB", 100), ("MUHQV", 50), ("WSTLK", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "MS",
        "EgyptAir",
        &[("CJDZ", 125), ("YB", 100), ("MHQK", 75), ("UTL", 50), ("VWS", 25)],
        Flat25,
        Disabled,
    ),
    partner(
        "NH",
        "All Nippon Airways",
        &[("FA", 150), ("JCDZP", 125), ("GEN", 100), ("YB", 100), ("MUH", 70), ("QVW", 50), ("SLK", 30)],
        Tiered,
        Elite(500),
    ),
    partner(
        "NZ",
        "Air New Zealand",
        &[("CJDZ", 125), ("UE", 100), ("OY", 100), ("BM", 75), ("HQV", 50), ("WTSL", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "OS",
        "Austrian Airlines",
        &[("JCDZP", 125), ("GE", 100), ("YB", 100), ("MUHQV", 50), ("WSTLK", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "OU",
        "Croatia Airlines",
        &[("CDZJ", 125), ("YB", 100), ("MHKV", 50), ("LTQS", 25)],
        Tiered,
        Elite(250),
    ),
    partner(
        "OZ",
        "Asiana Airlines",
        &[("CDJZU", 125), ("YBM", 100), ("HEQ", 75), ("KS", 50), ("VWT", 25)],
        Tiered,
        Disabled,
    ),
    partner(
        "SK",
        "Scandinavian Airlines",
        &[("CJDZP", 125), ("YSB", 100), ("EMHQ", 75), ("KLTV", 50), ("WU", 25)],
        Tiered,
        Elite(250),
    ),
    partner(
        "SN",
        "Brussels Airlines",
        &[("JCDZP", 125), ("YB", 100), ("MHUQ", 50), ("VWSTLK", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "SQ",
        "Singapore Airlines",
        &[("FA", 150), ("ZCJU", 125), ("SY", 100), ("BE", 75), ("MHW", 50), ("KQV", 25)],
        Ineligible,
        Disabled,
    ),
    partner(
        "TG",
        "Thai Airways",
        &[("FA", 150), ("CDJZ", 125), ("YB", 100), ("MH", 75), ("QTKS", 50), ("VW", 25)],
        Tiered,
        Disabled,
    ),
    partner(
        "TK",
        "Turkish Airlines",
        &[("CJDZK", 125), ("YB", 100), ("MAHS", 75), ("OEQT", 50), ("LVP", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "TP",
        "TAP Air Portugal",
        &[("CDJZR", 125), ("YB", 100), ("MHQK", 75), ("VLUS", 50), ("WOG", 25)],
        Ineligible,
        Disabled,
    ),
    partner(
        "UA",
        "United Airlines",
        &[("FA", 150), ("JCDZP", 125), ("OR", 100), ("YB", 100), ("MEUHQ", 75), ("VWS", 50), ("TLKG", 25)],
        Tiered,
        Elite(500),
    ),
    partner(
        "ZH",
        "Shenzhen Airlines",
        &[("FA", 150), ("JCDZ", 125), ("YB", 100), ("MUH", 75), ("QVWS", 50), ("TLK", 25)],
        Flat25,
        Disabled,
    ),
];

/// Non-alliance partners credited purely as a share of distance.
const MILEAGE_PARTNERS: &[(&str, &str, &[(&str, u32)], FloorPolicy)] = &[
    (
        "EY",
        "Etihad Airways",
        &[("FA", 150), ("JCDW", 125), ("YBH", 100), ("KMQ", 50), ("LVU", 25)],
        Disabled,
    ),
    (
        "GF",
        "Gulf Air",
        &[("FAP", 150), ("JCDI", 125), ("YB", 100), ("MHK", 50), ("QTVL", 25)],
        Disabled,
    ),
    (
        "5T",
        "Canadian North",
        &[("JC", 150), ("YB", 100), ("MHQ", 75), ("KLV", 50)],
        Always(250),
    ),
    (
        "AD",
        "Azul",
        &[("JCD", 125), ("YBH", 100), ("QKM", 50), ("ULO", 25)],
        Disabled,
    ),
    (
        "WK",
        "Edelweiss",
        &[("JCDZP", 100), ("YB", 50), ("MHQ", 25)],
        Disabled,
    ),
];

/// (operating, marketing) pairs evaluated under the marketing carrier's rules.
const CODESHARE_OVERRIDES: &[(&str, &str, &str)] = &[
    ("WK", "LX", "LX"),
    ("EN", "LH", "LH"),
    ("CL", "LH", "LH"),
    ("4Y", "LH", "LH"),
    ("QK", "AC", "AC"),
    ("ZX", "AC", "AC"),
    ("PB", "AC", "AC"),
];

/// Operating codes that always fly under another carrier's rules.
const ALIASES: &[(&str, &str)] = &[("RV", "AC")];

/// Immutable map from airline code to calculator, built once and shared by
/// reference with every calculation.
pub struct CalculatorRegistry {
    calculators: HashMap<String, Box<dyn EarningCalculator>>,
    aliases: HashMap<String, String>,
    overrides: HashMap<(String, String), String>,
}

impl CalculatorRegistry {
    pub fn empty() -> Self {
        Self {
            calculators: HashMap::new(),
            aliases: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// The full production rule set.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(OWN_CARRIER, OwnCarrierCalculator);

        for carrier in ALLIANCE_PARTNERS {
            registry.register(
                carrier.code,
                TableCalculator::new(
                    carrier.name,
                    PercentTable::new(carrier.table),
                    PartnerTerms::alliance(carrier.bonus, carrier.floor),
                ),
            );
        }

        for &(code, name, table, floor) in MILEAGE_PARTNERS {
            registry.register(
                code,
                TableCalculator::new(name, PercentTable::new(table), PartnerTerms::mileage_only(floor)),
            );
        }

        registry.register(
            "4N",
            HubRouteCalculator::new(
                "Air North",
                "YXY",
                &["YVR", "YYC", "YEG", "YZF", "YDA", "YOW"],
                PercentTable::new(&[("YBMH", 100), ("QKLV", 50), ("TSWG", 25)]),
                PartnerTerms::alliance(Tiered, Elite(250)),
            ),
        );

        registry.register(
            "AV",
            RegionalCalculator::new(
                "Avianca",
                PercentTable::new(&[("CJDAK", 125), ("YBM", 100), ("HQ", 50), ("VWS", 25)]),
                PercentTable::new(&[("CJDAK", 125), ("YBMH", 100), ("QVW", 50), ("STL", 25)]),
                PercentTable::new(&[("CJDAK", 125), ("YBMH", 100), ("QVWS", 75), ("TLO", 50)]),
                PartnerTerms::alliance(Tiered, Disabled),
            ),
        );

        registry.register(
            "SA",
            RegionalCalculator::new(
                "South African Airways",
                PercentTable::new(&[("CJZD", 100), ("YB", 75), ("MKHSQ", 25)]),
                PercentTable::new(&[("CJZD", 125), ("YB", 100), ("MKH", 50), ("SQTV", 25)]),
                PercentTable::new(&[("CJZD", 125), ("YB", 100), ("MKHS", 75), ("QTVL", 50)]),
                PartnerTerms::alliance(Flat25, Disabled),
            ),
        );

        registry.register(
            "EK",
            CorridorCalculator::new(
                "Emirates",
                &["DXB", "YYZ"],
                2,
                PercentTable::new(&[("FA", 150), ("JCIO", 125), ("YREW", 100), ("BMUK", 50), ("QLTX", 25)]),
                PartnerTerms::mileage_only(Disabled),
            ),
        );

        for (operating, marketing, target) in CODESHARE_OVERRIDES {
            registry.codeshare_override(operating, marketing, target);
        }
        for (code, target) in ALIASES {
            registry.alias(code, target);
        }

        registry
    }

    pub fn register<C>(&mut self, code: &str, calculator: C)
    where
        C: EarningCalculator + 'static,
    {
        self.calculators
            .insert(code.to_ascii_uppercase(), Box::new(calculator));
    }

    pub fn alias(&mut self, code: &str, target: &str) {
        self.aliases
            .insert(code.to_ascii_uppercase(), target.to_ascii_uppercase());
    }

    pub fn codeshare_override(&mut self, operating: &str, marketing: &str, target: &str) {
        self.overrides.insert(
            (operating.to_ascii_uppercase(), marketing.to_ascii_uppercase()),
            target.to_ascii_uppercase(),
        );
    }

    /// Airline code whose rules apply to the flight.
    pub fn rule_code(&self, operating: &str, marketing: Option<&str>) -> String {
        let operating = operating.trim().to_ascii_uppercase();

        if let Some(marketing) = marketing {
            let key = (operating.clone(), marketing.trim().to_ascii_uppercase());
            if let Some(target) = self.overrides.get(&key) {
                return target.clone();
            }
        }

        self.aliases.get(&operating).cloned().unwrap_or(operating)
    }

    /// Calculator for the flight, with the codeshare override applied.
    pub fn resolve(&self, operating: &str, marketing: Option<&str>) -> Option<&dyn EarningCalculator> {
        let code = self.rule_code(operating, marketing);
        self.calculators.get(&code).map(|calculator| calculator.as_ref())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.calculators.contains_key(&code.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes: Vec<_> = self.calculators.keys().collect();
        codes.sort();
        f.debug_struct("CalculatorRegistry")
            .field("calculators", &codes)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}
