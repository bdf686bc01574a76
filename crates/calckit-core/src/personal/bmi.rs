use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::CalcError;
use crate::types::{
    checked_div, checked_mul, round_to, with_metadata, ComputationOutput, Quantity,
};
use crate::CalcResult;

const CM_PER_INCH: Decimal = dec!(2.54);
const LB_PER_KG: Decimal = dec!(2.205);
const IMPERIAL_FACTOR: Decimal = dec!(703);

const UNDERWEIGHT_BELOW: Decimal = dec!(18.5);
const NORMAL_BELOW: Decimal = dec!(25);
const OVERWEIGHT_BELOW: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metric is kg and cm, imperial is lb and inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// Half-open bands: [0, 18.5), [18.5, 25), [25, 30), [30, ∞).
    pub fn from_bmi(bmi: Decimal) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < NORMAL_BELOW {
            BmiCategory::Normal
        } else if bmi < OVERWEIGHT_BELOW {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        }
    }

    pub fn status_message(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Time to gain some weight!",
            BmiCategory::Normal => "Great job! You have a healthy weight.",
            BmiCategory::Overweight | BmiCategory::Obesity => "Time to run!",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight: Quantity,
    pub height: Quantity,
    #[serde(default)]
    pub unit_system: UnitSystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiOutput {
    /// Rounded to two decimals; the category is taken from this value
    pub bmi: Decimal,
    pub category: BmiCategory,
    pub status: String,
    /// Marker position on a 0-100% gauge split into four equal bands
    pub scale_position_pct: Decimal,
}

/// Weight and height in one unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub weight: Quantity,
    pub height: Quantity,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Metric: kg / m². Imperial: 703 * lb / in².
pub fn calculate_bmi(input: &BmiInput) -> CalcResult<ComputationOutput<BmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.height <= Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field: "height".into(),
            reason: "Height must be positive".into(),
        });
    }
    if input.weight.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "weight".into(),
            reason: "Weight cannot be negative".into(),
        });
    }

    tracing::debug!(
        weight = %input.weight,
        height = %input.height,
        units = ?input.unit_system,
        "calculating BMI"
    );

    let (mass, height) = match input.unit_system {
        UnitSystem::Metric => (input.weight, input.height / dec!(100)),
        UnitSystem::Imperial => (
            checked_mul(IMPERIAL_FACTOR, input.weight, "BMI")?,
            input.height,
        ),
    };
    let raw = checked_div(mass, checked_mul(height, height, "height squared")?, "BMI")?;
    let bmi = round_to(raw, 2);
    let category = BmiCategory::from_bmi(bmi);

    if bmi > dec!(100) {
        warnings.push(format!(
            "BMI of {bmi} is implausible; check that the {:?} units match the values",
            input.unit_system
        ));
    }

    let output = BmiOutput {
        bmi,
        category,
        status: category.status_message().to_string(),
        scale_position_pct: scale_position(bmi),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Body mass index with WHO adult categories",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Position of the BMI marker on a gauge of four 25% bands.
/// The obesity band spans ten BMI points and is capped at 100%.
pub fn scale_position(bmi: Decimal) -> Decimal {
    let quarter = dec!(25);
    let position = if bmi < UNDERWEIGHT_BELOW {
        bmi / UNDERWEIGHT_BELOW * quarter
    } else if bmi < NORMAL_BELOW {
        quarter + (bmi - UNDERWEIGHT_BELOW) / (NORMAL_BELOW - UNDERWEIGHT_BELOW) * quarter
    } else if bmi < OVERWEIGHT_BELOW {
        dec!(50) + (bmi - NORMAL_BELOW) / (OVERWEIGHT_BELOW - NORMAL_BELOW) * quarter
    } else {
        dec!(75) + ((bmi - OVERWEIGHT_BELOW) / dec!(10)).min(Decimal::ONE) * quarter
    };
    round_to(position, 2)
}

/// Convert measurements when the unit toggle is flipped.
///
/// Each value is rounded to the nearest whole unit, so a round trip can
/// drift by one unit.
pub fn convert_units(
    measurements: BodyMeasurements,
    from: UnitSystem,
    to: UnitSystem,
) -> CalcResult<BodyMeasurements> {
    let converted = match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => BodyMeasurements {
            weight: round_to(checked_mul(measurements.weight, LB_PER_KG, "weight in lb")?, 0),
            height: round_to(measurements.height / CM_PER_INCH, 0),
        },
        (UnitSystem::Imperial, UnitSystem::Metric) => BodyMeasurements {
            weight: round_to(measurements.weight / LB_PER_KG, 0),
            height: round_to(checked_mul(measurements.height, CM_PER_INCH, "height in cm")?, 0),
        },
        _ => measurements,
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn metric(weight: Decimal, height: Decimal) -> BmiInput {
        BmiInput {
            weight,
            height,
            unit_system: UnitSystem::Metric,
        }
    }

    #[test]
    fn test_default_metric() {
        let out = calculate_bmi(&metric(dec!(75), dec!(173))).unwrap().result;
        assert_eq!(out.bmi, dec!(25.06));
        assert_eq!(out.category, BmiCategory::Overweight);
        assert_eq!(out.status, "Time to run!");
    }

    #[test]
    fn test_imperial() {
        let input = BmiInput {
            weight: dec!(165),
            height: dec!(68),
            unit_system: UnitSystem::Imperial,
        };
        let out = calculate_bmi(&input).unwrap().result;
        assert_eq!(out.bmi, dec!(25.09));
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(dec!(18.49)), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(dec!(18.5)), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(dec!(24.99)), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(dec!(25.0)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(dec!(30)), BmiCategory::Obesity);
        assert_eq!(BmiCategory::Obesity.to_string(), "Obesity");
    }

    #[test]
    fn test_scale_position() {
        assert_eq!(scale_position(dec!(18.5)), dec!(25));
        assert_eq!(scale_position(dec!(25.06)), dec!(50.3));
        assert_eq!(scale_position(dec!(30)), dec!(75));
        assert_eq!(scale_position(dec!(45)), dec!(100));
    }

    #[test]
    fn test_unit_round_trip_within_one_unit() {
        let start = BodyMeasurements {
            weight: dec!(75),
            height: dec!(173),
        };
        let imperial = convert_units(start, UnitSystem::Metric, UnitSystem::Imperial).unwrap();
        assert_eq!(imperial.height, dec!(68));
        assert_eq!(imperial.weight, dec!(165));

        let back = convert_units(imperial, UnitSystem::Imperial, UnitSystem::Metric).unwrap();
        assert!((back.height - start.height).abs() <= Decimal::ONE);
        assert!((back.weight - start.weight).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_same_system_is_identity() {
        let m = BodyMeasurements {
            weight: dec!(70.4),
            height: dec!(180.2),
        };
        assert_eq!(convert_units(m, UnitSystem::Metric, UnitSystem::Metric).unwrap(), m);
    }

    #[test]
    fn test_extreme_measurements_are_errors() {
        let huge = dec!(70000000000000000000000000000);
        assert!(matches!(
            calculate_bmi(&metric(huge, dec!(0.0000000001))),
            Err(CalcError::Overflow { .. })
        ));
        let imperial = BmiInput {
            weight: huge,
            height: dec!(70),
            unit_system: UnitSystem::Imperial,
        };
        assert!(matches!(calculate_bmi(&imperial), Err(CalcError::Overflow { .. })));
        let big = BodyMeasurements {
            weight: huge,
            height: dec!(170),
        };
        assert!(convert_units(big, UnitSystem::Metric, UnitSystem::Imperial).is_err());
        assert_eq!(scale_position(Decimal::MAX), dec!(100));
    }

    #[test]
    fn test_zero_height_rejected() {
        assert!(calculate_bmi(&metric(dec!(70), Decimal::ZERO)).is_err());
    }
}
