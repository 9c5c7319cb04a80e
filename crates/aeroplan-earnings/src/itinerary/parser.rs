use crate::earnings::FareBrand;
use crate::reference::ReferenceData;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentParseError {
    #[error("expected 4 or 5 comma-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("'{value}' is not a two-character airline code")]
    InvalidAirline { value: String },
    #[error("unknown airport code '{code}'")]
    UnknownAirport { code: String },
    #[error("fare class must be a single letter (got '{value}')")]
    InvalidFareClass { value: String },
    #[error("unrecognized fare brand '{value}'")]
    UnknownFareBrand { value: String },
}

/// One `airline,origin,destination,class[,brand]` line, normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLine {
    pub operating_airline: String,
    pub origin: String,
    pub destination: String,
    pub fare_class: char,
    pub fare_brand: Option<FareBrand>,
}

/// Segment lines are separated by any run of whitespace.
pub fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn parse_segment(line: &str, reference: &ReferenceData) -> Result<SegmentLine, SegmentParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (airline, origin, destination, fare_class, brand) = match fields.as_slice() {
        [airline, origin, destination, fare_class] => (*airline, *origin, *destination, *fare_class, None),
        [airline, origin, destination, fare_class, brand] => {
            (*airline, *origin, *destination, *fare_class, Some(*brand))
        }
        other => return Err(SegmentParseError::FieldCount { found: other.len() }),
    };

    Ok(SegmentLine {
        operating_airline: parse_airline(airline)?,
        origin: parse_airport(origin, reference)?,
        destination: parse_airport(destination, reference)?,
        fare_class: parse_fare_class(fare_class)?,
        fare_brand: brand.filter(|b| !b.is_empty()).map(parse_brand).transpose()?,
    })
}

fn parse_airline(value: &str) -> Result<String, SegmentParseError> {
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(value.to_ascii_uppercase())
    } else {
        Err(SegmentParseError::InvalidAirline {
            value: value.to_string(),
        })
    }
}

fn parse_airport(value: &str, reference: &ReferenceData) -> Result<String, SegmentParseError> {
    reference
        .airport(value)
        .map(|airport| airport.code.clone())
        .ok_or_else(|| SegmentParseError::UnknownAirport {
            code: value.to_ascii_uppercase(),
        })
}

fn parse_fare_class(value: &str) -> Result<char, SegmentParseError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_uppercase()),
        _ => Err(SegmentParseError::InvalidFareClass {
            value: value.to_string(),
        }),
    }
}

fn parse_brand(value: &str) -> Result<FareBrand, SegmentParseError> {
    FareBrand::from_code(value).ok_or_else(|| SegmentParseError::UnknownFareBrand {
        value: value.to_string(),
    })
}
