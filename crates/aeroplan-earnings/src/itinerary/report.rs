//! Row views of a calculated itinerary and a fixed-width text rendering.
//! Anything unknown prints as `???`.

use super::{Itinerary, Segment, TotalRow};
use crate::earnings::EarningResult;
use serde::Serialize;
use std::fmt::{self, Display, Write};

pub const UNKNOWN: &str = "???";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentView {
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub fare_class: char,
    pub fare_brand: Option<String>,
    pub distance: Option<u64>,
    pub distance_source: Option<String>,
    /// `4x` for spend earning, `100%` for distance earning.
    pub earning_rate: Option<String>,
    pub bonus_rate: Option<String>,
    pub eligible_dollars: Option<u64>,
    pub sqc: Option<u64>,
    pub base_points: Option<u64>,
    pub bonus_points: Option<u64>,
    pub total_points: Option<u64>,
}

impl SegmentView {
    pub fn from_segment(segment: &Segment) -> Self {
        let (earning_rate, bonus_rate) = match &segment.earning {
            Some(EarningResult::Spend(spend)) => (
                Some(format!("{}x", spend.sqc_multiplier)),
                Some(format!("{}x", spend.elite_bonus_multiplier)),
            ),
            Some(EarningResult::Distance(distance)) => (
                Some(format!("{}%", distance.earning_percent)),
                Some(format!("{}%", distance.bonus_percent)),
            ),
            Some(EarningResult::UnknownPartner(_)) | None => (None, None),
        };

        Self {
            airline: segment.operating_airline.clone(),
            origin: segment.origin.clone(),
            destination: segment.destination.clone(),
            fare_class: segment.fare_class,
            fare_brand: segment.fare_brand.map(|brand| brand.code().to_string()),
            distance: segment.miles(),
            distance_source: segment.distance.source.map(|source| source.label().to_string()),
            earning_rate,
            bonus_rate,
            eligible_dollars: segment.eligible_dollars(),
            sqc: segment.sqc(),
            base_points: segment.base_points(),
            bonus_points: segment.bonus_points(),
            total_points: segment.total_points(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryReport {
    pub ticket: String,
    pub elite_status: String,
    pub total_fare: String,
    pub segments: Vec<SegmentView>,
    pub total: TotalRow,
}

impl ItineraryReport {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            ticket: itinerary.ticket.to_string(),
            elite_status: itinerary.elite_status.label().to_string(),
            total_fare: format_cents(itinerary.total_fare_cents()),
            segments: itinerary.segments.iter().map(SegmentView::from_segment).collect(),
            total: itinerary.total,
        }
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_table(&mut out);
        out
    }

    fn write_table(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "Ticket {}  Status {}  Fare {}",
            cell(Some(self.ticket.as_str()).filter(|t| !t.is_empty())),
            self.elite_status,
            self.total_fare
        )?;
        writeln!(
            out,
            "{:<4} {:<7} {:<5} {:<5} {:>6} {:<9} {:>6} {:>5} {:>8} {:>7} {:>7} {:>7} {:>7}",
            "Air", "Route", "Class", "Brand", "Miles", "Source", "Rate", "Bonus", "Dollars", "SQC", "Base",
            "Bonus", "Total"
        )?;

        for row in &self.segments {
            writeln!(
                out,
                "{:<4} {:<7} {:<5} {:<5} {:>6} {:<9} {:>6} {:>5} {:>8} {:>7} {:>7} {:>7} {:>7}",
                row.airline,
                format!("{}-{}", row.origin, row.destination),
                row.fare_class,
                row.fare_brand.as_deref().unwrap_or(""),
                cell(row.distance),
                cell(row.distance_source.as_deref()),
                cell(row.earning_rate.as_deref()),
                cell(row.bonus_rate.as_deref()),
                cell(row.eligible_dollars),
                cell(row.sqc),
                cell(row.base_points),
                cell(row.bonus_points),
                cell(row.total_points),
            )?;
        }

        writeln!(
            out,
            "{:<4} {:<7} {:<5} {:<5} {:>6} {:<9} {:>6} {:>5} {:>8} {:>7} {:>7} {:>7} {:>7}",
            "",
            "Total",
            "",
            "",
            cell(self.total.distance),
            "",
            "",
            "",
            cell(self.total.eligible_dollars),
            cell(self.total.sqc),
            cell(self.total.base_points),
            cell(self.total.bonus_points),
            cell(self.total.total_points),
        )
    }
}

pub fn cell<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |value| value.to_string())
}

/// `82900` -> `829.00`.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earnings::EarningsEngine;
    use crate::itinerary::ItineraryRequest;

    fn report(segments: &str) -> ItineraryReport {
        let engine = EarningsEngine::bundled().expect("bundled engine builds");
        let request = ItineraryRequest {
            ticket: Some("014".to_string()),
            elite_status: "100".to_string(),
            segments: segments.to_string(),
            base_fare: Some(829.0),
            surcharges: Some(0.0),
        };
        let itinerary = Itinerary::calculate(&engine, &request).expect("itinerary calculates");
        ItineraryReport::from_itinerary(&itinerary)
    }

    #[test]
    fn segment_view_shows_rates() {
        let report = report("AC,SFO,YVR,Y,LT");
        let row = &report.segments[0];
        assert_eq!(row.earning_rate.as_deref(), Some("4x"));
        assert_eq!(row.bonus_rate.as_deref(), Some("5x"));
        assert_eq!(row.distance_source.as_deref(), Some("Published"));
        assert_eq!(row.fare_brand.as_deref(), Some("LT"));
        assert_eq!(report.total_fare, "829.00");
        assert_eq!(report.elite_status, "Super Elite");
    }

    #[test]
    fn unknown_values_render_as_placeholders() {
        let table = report("XX,SFO,YVR,Y").render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains(UNKNOWN));
        assert!(lines[3].contains(UNKNOWN));
        assert!(lines[3].contains("802"));
    }

    #[test]
    fn cell_and_cents_formatting() {
        assert_eq!(cell(Some(12)), "12");
        assert_eq!(cell::<u64>(None), "???");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(123_456), "1234.56");
    }
}
