use calckit_core::loans::emi::{self, EmiInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_emi_home_loan_reference() {
    // 50 lakh at 8.5% for 20 years => EMI ~43,391
    let input = EmiInput {
        principal: dec!(5000000),
        annual_rate_pct: dec!(8.5),
        tenure_years: 20,
    };
    let out = emi::calculate_emi(&input).unwrap().result;
    assert!(
        (out.emi - dec!(43391.16)).abs() < dec!(0.5),
        "Expected EMI ~43,391, got {}",
        out.emi
    );
    assert_eq!(out.months, 240);
    assert_eq!(out.schedule.len(), 20);
}

#[test]
fn test_emi_zero_rate_is_exact_division() {
    for (principal, years) in [(dec!(100000), 1u32), (dec!(250000), 5), (dec!(1), 30)] {
        let input = EmiInput {
            principal,
            annual_rate_pct: Decimal::ZERO,
            tenure_years: years,
        };
        let out = emi::calculate_emi(&input).unwrap().result;
        assert_eq!(out.emi, principal / Decimal::from(years * 12));
    }
}

#[test]
fn test_emi_totals_are_consistent() {
    let input = EmiInput {
        principal: dec!(300000),
        annual_rate_pct: dec!(12),
        tenure_years: 3,
    };
    let out = emi::calculate_emi(&input).unwrap().result;
    assert_eq!(out.total_amount, out.emi * dec!(36));
    assert_eq!(out.total_interest, out.total_amount - dec!(300000));
    assert!(out.total_interest > Decimal::ZERO);
}

#[test]
fn test_emi_is_pure() {
    let input = EmiInput {
        principal: dec!(750000),
        annual_rate_pct: dec!(9.25),
        tenure_years: 7,
    };
    let first = emi::calculate_emi(&input).unwrap().result;
    let second = emi::calculate_emi(&input).unwrap().result;
    assert_eq!(first.emi, second.emi);
    assert_eq!(first.total_interest, second.total_interest);
}
