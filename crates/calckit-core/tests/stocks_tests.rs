use calckit_core::stocks::average::{self, StockAverageInput, StockLot};
use calckit_core::stocks::split::{self, SplitRatio, StockSplitInput};
use calckit_core::CalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Stock average
// ===========================================================================

#[test]
fn test_average_of_two_purchases() {
    let input = StockAverageInput {
        lots: vec![
            StockLot { units: dec!(50), price: dec!(1200) },
            StockLot { units: dec!(25), price: dec!(900) },
        ],
    };
    let out = average::calculate_stock_average(&input).unwrap();
    assert_eq!(out.result.total_units, dec!(75));
    assert_eq!(out.result.total_amount, dec!(82500));
    assert_eq!(out.result.average_price, dec!(1100));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_average_total_amount_is_sum_of_lot_costs() {
    let lots = vec![
        StockLot { units: dec!(3), price: dec!(101.25) },
        StockLot { units: dec!(7), price: dec!(99.10) },
        StockLot { units: dec!(11), price: dec!(97.40) },
        StockLot { units: dec!(1), price: dec!(120) },
    ];
    let expected: Decimal = lots.iter().map(|l| l.units * l.price).sum();
    let out = average::calculate_stock_average(&StockAverageInput { lots }).unwrap();
    assert_eq!(out.result.total_amount, expected);
    assert_eq!(out.result.lots.len(), 4);
    assert_eq!(out.result.lots[3].lot, 4);
}

#[test]
fn test_average_zero_units_never_faults() {
    for lots in [
        vec![],
        vec![StockLot { units: Decimal::ZERO, price: dec!(10) }],
        vec![
            StockLot { units: dec!(5), price: dec!(10) },
            StockLot { units: dec!(-5), price: dec!(12) },
        ],
    ] {
        let out = average::calculate_stock_average(&StockAverageInput { lots }).unwrap();
        assert_eq!(out.result.average_price, Decimal::ZERO);
    }
}

// ===========================================================================
// Stock split
// ===========================================================================

#[test]
fn test_split_total_is_owned_plus_floored_additional() {
    let cases = [
        ("1:2", dec!(100)),
        ("2:1", dec!(33)),
        ("3:7", dec!(10)),
        ("5:3", dec!(1)),
        ("1:1", dec!(0)),
    ];
    for (ratio, owned) in cases {
        let r: SplitRatio = ratio.parse().unwrap();
        let input = StockSplitInput {
            current_price: dec!(250),
            split_ratio: r,
            shares_owned: owned,
        };
        let out = split::calculate_stock_split(&input).unwrap().result;
        let expected_additional =
            (owned / Decimal::from(r.old_shares()) * Decimal::from(r.new_shares())).floor();
        assert_eq!(out.total_shares, owned + expected_additional, "ratio {ratio}");
        assert!(out.refund_amount >= Decimal::ZERO, "ratio {ratio}");
    }
}

#[test]
fn test_split_preserves_value_of_holding() {
    let input = StockSplitInput {
        current_price: dec!(300),
        split_ratio: "3:7".parse().unwrap(),
        shares_owned: dec!(10),
    };
    let out = split::calculate_stock_split(&input).unwrap().result;
    // 10/7*3 = 4.2857 => 4 issued
    assert_eq!(out.additional_shares, dec!(4));
    assert_eq!(out.total_shares, dec!(14));
    let value_after = out.new_price * out.total_shares;
    assert!((value_after - dec!(3000)).abs() < dec!(0.0000001));
    assert!(out.refund_amount > Decimal::ZERO);
}

#[test]
fn test_split_rejects_malformed_ratio() {
    for bad in ["1/2", "x:2", "0:3", "4:0", ":", "1:"] {
        assert!(matches!(
            bad.parse::<SplitRatio>(),
            Err(CalcError::MalformedRatio(_))
        ));
    }
}
