use super::{fresh_book, trader};

#[test]
fn empty_book_reports_zero_prices() {
    let book = fresh_book();
    assert_eq!(book.bid_price(), 0.0);
    assert_eq!(book.ask_price(), 0.0);
    assert_eq!(book.mid_price(), 0.0);
    assert_eq!(book.bid_size(), 0);
    assert_eq!(book.ask_size(), 0);
}

#[test]
fn mid_price_averages_best_quotes() {
    let mut book = fresh_book();
    book.buy_limit_order(trader(1), 10, 99.50, 0).unwrap();
    book.sell_limit_order(trader(2), 10, 100.50, 0).unwrap();
    assert_eq!(book.mid_price(), 100.00);
}

#[test]
fn best_n_bid_levels_are_ordered_worst_to_best() {
    let mut book = fresh_book();
    book.buy_limit_order(trader(1), 5, 98.00, 0).unwrap();
    book.buy_limit_order(trader(2), 5, 99.00, 1).unwrap();
    book.buy_limit_order(trader(3), 5, 97.00, 2).unwrap();

    let levels = book.highest_bid_prices();
    assert_eq!(levels, vec![97.00, 98.00, 99.00]);
}

#[test]
fn best_n_ask_levels_are_ordered_worst_to_best() {
    let mut book = fresh_book();
    book.sell_limit_order(trader(1), 5, 102.00, 0).unwrap();
    book.sell_limit_order(trader(2), 5, 101.00, 1).unwrap();
    book.sell_limit_order(trader(3), 5, 103.00, 2).unwrap();

    let levels = book.lowest_ask_prices();
    assert_eq!(levels, vec![103.00, 102.00, 101.00]);
}

#[test]
fn best_n_caps_at_five_levels() {
    let mut book = fresh_book();
    for i in 0..8u32 {
        book.buy_limit_order(trader(i), 1, 90.0 + i as f64, i as u64).unwrap();
    }
    assert_eq!(book.highest_bid_prices().len(), 5);
    assert_eq!(book.highest_bid_sizes().len(), 5);
    // The nearest-to-best entry must be the true best bid.
    assert_eq!(*book.highest_bid_prices().last().unwrap(), book.bid_price());
}
