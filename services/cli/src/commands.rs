use crate::cli::{CalculateArgs, SegmentArgs};
use aeroplan_earnings::config::OutputFormat;
use aeroplan_earnings::earnings::{EarningResult, EarningsEngine, SegmentRequest};
use aeroplan_earnings::error::AppError;
use aeroplan_earnings::itinerary::report::{cell, ItineraryReport};
use aeroplan_earnings::{Itinerary, ItineraryRequest};
use serde::Serialize;

pub(crate) fn run_calculate(
    engine: &EarningsEngine,
    args: CalculateArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let request = ItineraryRequest {
        ticket: args.ticket,
        elite_status: args.status,
        segments: args.segments,
        base_fare: args.base_fare,
        surcharges: Some(args.surcharges),
    };

    let itinerary = Itinerary::calculate(engine, &request)?;
    let report = ItineraryReport::from_itinerary(&itinerary);

    match format {
        OutputFormat::Table => print!("{}", report.render_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SegmentOutput<'a> {
    operating_airline: &'a str,
    origin: &'a str,
    destination: &'a str,
    result: Option<&'a EarningResult>,
    sqc: Option<u64>,
    base_points: Option<u64>,
    bonus_points: Option<u64>,
    total_points: Option<u64>,
}

pub(crate) fn run_segment(
    engine: &EarningsEngine,
    args: SegmentArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let request = SegmentRequest {
        operating_airline: args.operating,
        marketing_airline: args.marketing,
        origin: args.origin,
        destination: args.destination,
        fare_class: args.fare_class,
        fare_basis: args.fare_basis,
        ticket_number: args.ticket,
        elite_bonus_multiplier: args.bonus_multiplier,
    };

    let mut result = engine.earning_result(&request)?;
    if let (Some(result), Some(dollars)) = (result.as_mut(), args.eligible_dollars) {
        result.set_eligible_dollars(Some(dollars));
    }

    let output = SegmentOutput {
        operating_airline: &request.operating_airline,
        origin: &request.origin,
        destination: &request.destination,
        result: result.as_ref(),
        sqc: result.as_ref().and_then(EarningResult::sqc),
        base_points: result.as_ref().and_then(EarningResult::base_points),
        bonus_points: result.as_ref().and_then(EarningResult::bonus_points),
        total_points: result.as_ref().and_then(EarningResult::total_points),
    };

    match format {
        OutputFormat::Table => print_segment(&output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}

fn print_segment(output: &SegmentOutput<'_>) {
    let rules = match output.result {
        Some(EarningResult::Spend(spend)) => format!(
            "spend: {}x SQC, {}x elite bonus",
            spend.sqc_multiplier, spend.elite_bonus_multiplier
        ),
        Some(EarningResult::Distance(distance)) => format!(
            "distance: {}% of miles, {}% elite bonus",
            distance.earning_percent, distance.bonus_percent
        ),
        Some(EarningResult::UnknownPartner(partner)) => {
            format!("no earning rules for {}", partner.airline)
        }
        None => "fare could not be classified".to_string(),
    };
    let miles = output
        .result
        .and_then(|result| result.distance().distance);

    println!(
        "{} {}-{}  {} miles",
        output.operating_airline.to_ascii_uppercase(),
        output.origin.to_ascii_uppercase(),
        output.destination.to_ascii_uppercase(),
        cell(miles)
    );
    println!("Earning  {rules}");
    println!("SQC      {}", cell(output.sqc));
    println!("Base     {}", cell(output.base_points));
    println!("Bonus    {}", cell(output.bonus_points));
    println!("Total    {}", cell(output.total_points));
}
