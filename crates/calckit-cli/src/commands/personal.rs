use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use calckit_core::personal::age::{self, AgeInput};
use calckit_core::personal::bmi::{self, BmiInput, BodyMeasurements, UnitSystem};

use super::CommandResult;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Units {
    /// kg and cm
    Metric,
    /// lb and inches
    Imperial,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Metric => UnitSystem::Metric,
            Units::Imperial => UnitSystem::Imperial,
        }
    }
}

/// Arguments for the age calculator
#[derive(Args)]
pub struct AgeArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long = "birth-date", required_unless_present = "input")]
    pub birth_date: Option<String>,

    /// Date to measure age at (YYYY-MM-DD, defaults to today)
    #[arg(long = "end-date")]
    pub end_date: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the BMI calculator
#[derive(Args)]
pub struct BmiArgs {
    /// Body weight (kg or lb)
    #[arg(long, default_value = "75")]
    pub weight: Decimal,

    /// Height (cm or inches)
    #[arg(long, default_value = "173")]
    pub height: Decimal,

    /// Unit system of weight and height
    #[arg(long, value_enum, default_value = "metric")]
    pub units: Units,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for converting body measurements between unit systems
#[derive(Args)]
pub struct ConvertUnitsArgs {
    /// Body weight in the source system
    #[arg(long)]
    pub weight: Decimal,

    /// Height in the source system
    #[arg(long)]
    pub height: Decimal,

    /// Source unit system
    #[arg(long, value_enum)]
    pub from: Units,

    /// Target unit system
    #[arg(long, value_enum)]
    pub to: Units,
}

pub fn run_age(args: AgeArgs) -> CommandResult {
    let age_input: AgeInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let birth = args
                .birth_date
                .as_deref()
                .ok_or("--birth-date is required")?;
            AgeInput::parse(birth, args.end_date.as_deref())?
        }
    };
    let result = age::calculate_age(&age_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_bmi(args: BmiArgs) -> CommandResult {
    let bmi_input: BmiInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BmiInput {
            weight: args.weight,
            height: args.height,
            unit_system: args.units.into(),
        },
    };
    let result = bmi::calculate_bmi(&bmi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_convert_units(args: ConvertUnitsArgs) -> CommandResult {
    let converted = bmi::convert_units(
        BodyMeasurements {
            weight: args.weight,
            height: args.height,
        },
        args.from.into(),
        args.to.into(),
    )?;
    Ok(serde_json::to_value(converted)?)
}
