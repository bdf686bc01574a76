use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::types::{with_metadata, ComputationOutput};
use crate::CalcResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input for the age calculator. `end_date` defaults to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl AgeInput {
    /// Build from `YYYY-MM-DD` strings.
    pub fn parse(birth_date: &str, end_date: Option<&str>) -> CalcResult<Self> {
        Ok(Self {
            birth_date: parse_date("birth_date", birth_date)?,
            end_date: end_date.map(|d| parse_date("end_date", d)).transpose()?,
        })
    }
}

fn parse_date(field: &str, value: &str) -> CalcResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| CalcError::InvalidInput {
        field: field.into(),
        reason: format!("'{value}' is not a valid YYYY-MM-DD date ({e})"),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeOutput {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Calendar days from birth date to end date
    pub total_days: i64,
    pub birth_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Age between the birth date and the end date (today when unset).
pub fn calculate_age(input: &AgeInput) -> CalcResult<ComputationOutput<AgeOutput>> {
    let end_date = input
        .end_date
        .unwrap_or_else(|| Local::now().date_naive());
    calculate_age_between(input.birth_date, end_date)
}

/// Calendar-exact years/months/days between two dates.
///
/// Whole months are counted first and split into years and months; the
/// remaining days run from `birth_date` advanced by that many months to
/// `end_date`. Month arithmetic clamps to the last day of shorter months,
/// so 31 Jan + 1 month is 28/29 Feb.
pub fn calculate_age_between(
    birth_date: NaiveDate,
    end_date: NaiveDate,
) -> CalcResult<ComputationOutput<AgeOutput>> {
    let start = Instant::now();

    if birth_date > end_date {
        return Err(CalcError::InvalidDateRange(format!(
            "birth date {birth_date} is after end date {end_date}"
        )));
    }

    tracing::debug!(%birth_date, %end_date, "calculating age");

    let total_months = full_months_between(birth_date, end_date);
    let years = total_months / 12;
    let months = total_months % 12;

    let anchor = birth_date
        .checked_add_months(Months::new(total_months))
        .ok_or_else(|| CalcError::Overflow {
            context: "advancing birth date".into(),
        })?;
    let days = (end_date - anchor).num_days();
    let days = u32::try_from(days).map_err(|_| CalcError::Overflow {
        context: "remaining days".into(),
    })?;

    let output = AgeOutput {
        years,
        months,
        days,
        total_days: (end_date - birth_date).num_days(),
        birth_date,
        end_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Calendar difference: whole years, then whole months, then days",
        &serde_json::json!({
            "birth_date": birth_date.to_string(),
            "end_date": end_date.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Whole calendar months from `from` to `to` (`from <= to`).
fn full_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let span = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let candidate = span.max(0) as u32;
    if candidate == 0 {
        return 0;
    }
    match from.checked_add_months(Months::new(candidate)) {
        Some(date) if date <= to => candidate,
        _ => candidate - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ymd(out: &AgeOutput) -> (u32, u32, u32) {
        (out.years, out.months, out.days)
    }

    #[test]
    fn test_same_day() {
        let out = calculate_age_between(date(1990, 6, 15), date(1990, 6, 15)).unwrap();
        assert_eq!(ymd(&out.result), (0, 0, 0));
        assert_eq!(out.result.total_days, 0);
    }

    #[test]
    fn test_exact_year() {
        let out = calculate_age_between(date(2020, 1, 1), date(2021, 1, 1)).unwrap();
        assert_eq!(ymd(&out.result), (1, 0, 0));
        assert_eq!(out.result.total_days, 366);
    }

    #[test]
    fn test_months_and_days() {
        let out = calculate_age_between(date(2023, 3, 15), date(2024, 1, 1)).unwrap();
        assert_eq!(ymd(&out.result), (0, 9, 17));
    }

    #[test]
    fn test_month_end_clamping() {
        // 31 Jan + 1 month = 29 Feb 2024, then one day to 1 Mar
        let out = calculate_age_between(date(2024, 1, 31), date(2024, 3, 1)).unwrap();
        assert_eq!(ymd(&out.result), (0, 1, 1));
    }

    #[test]
    fn test_leap_day_birthday() {
        let out = calculate_age_between(date(2020, 2, 29), date(2021, 2, 28)).unwrap();
        assert_eq!(ymd(&out.result), (1, 0, 0));
        let out = calculate_age_between(date(2020, 2, 29), date(2024, 2, 28)).unwrap();
        assert_eq!(ymd(&out.result), (3, 11, 30));
    }

    #[test]
    fn test_day_before_birthday() {
        let out = calculate_age_between(date(1990, 5, 20), date(2025, 5, 19)).unwrap();
        assert_eq!(ymd(&out.result), (34, 11, 29));
    }

    #[test]
    fn test_birth_after_end_rejected() {
        assert!(matches!(
            calculate_age_between(date(2025, 1, 2), date(2025, 1, 1)),
            Err(CalcError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_parse_strings() {
        let input = AgeInput::parse("2023-03-15", Some("2024-01-01")).unwrap();
        let out = calculate_age(&input).unwrap();
        assert_eq!(ymd(&out.result), (0, 9, 17));
        assert!(AgeInput::parse("2023-02-30", None).is_err());
        assert!(AgeInput::parse("not a date", None).is_err());
    }

    #[test]
    fn test_end_defaults_to_today() {
        let today = Local::now().date_naive();
        let input = AgeInput {
            birth_date: today,
            end_date: None,
        };
        let out = calculate_age(&input).unwrap();
        assert_eq!(out.result.end_date, today);
    }
}
