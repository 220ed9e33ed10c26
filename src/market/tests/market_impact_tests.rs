use super::{fresh_book, trader};

#[test]
fn aggressing_market_order_reports_price_impact() {
    let mut book = fresh_book();
    book.buy_limit_order(trader(1), 50, 99.00, 0).unwrap();
    book.sell_limit_order(trader(2), 50, 101.00, 0).unwrap();
    let mid_before = book.mid_price();
    assert_eq!(mid_before, 100.00);

    let outcome = book.sell_market_order(trader(3), 50, 1).unwrap();
    let impact = outcome.impact.expect("a fill against resting bids must measure impact");

    assert_eq!(impact.mid_before, mid_before);
    // The bid side is now empty, collapsing the mid to the zero sentinel.
    assert_eq!(impact.mid_after, 0.0);
    assert!(impact.log_impact() < 0.0);
}

#[test]
fn rejected_order_measures_no_impact() {
    let mut book = fresh_book();
    let err = book.buy_market_order(trader(4), 0, 2);
    assert!(err.is_err());
}

#[test]
fn non_aggressing_order_produces_no_impact_record() {
    let mut book = fresh_book();
    let outcome = book.buy_limit_order(trader(1), 10, 99.0, 0).unwrap();
    assert!(outcome.outcome.impact.is_none());
}

#[test]
fn log_impact_is_zero_for_an_unchanged_mid_price() {
    let mut book = fresh_book();
    book.buy_limit_order(trader(1), 100, 99.00, 0).unwrap();
    book.sell_limit_order(trader(2), 100, 101.00, 0).unwrap();

    let outcome = book.buy_market_order(trader(4), 5, 2).unwrap();
    let impact = outcome.impact.unwrap();
    assert_eq!(impact.mid_before, impact.mid_after);
    assert_eq!(impact.log_impact(), 0.0);
}
