use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::{PlatformQuote, RawQuote, Restaurant};
use crate::error::{empty_quote_set_error, Error};

/// Price comparison across every platform that quoted a restaurant.
///
/// Built only through [`compare`]; `best_deal` is always one of `prices` and
/// `max_savings` is never negative.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ComparisonResult {
    pub restaurant: Restaurant,
    pub prices: Vec<PlatformQuote>,
    pub best_deal: PlatformQuote,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_savings: Decimal,
}

/// Validates and totals every quote, then picks the cheapest one.
///
/// Any invalid quote fails the whole comparison. Ties on the total go to the
/// quote that came first.
#[tracing::instrument(skip(restaurant, quotes), fields(restaurant_id = %restaurant.id, quotes = quotes.len()))]
pub fn compare(restaurant: Restaurant, quotes: &[RawQuote]) -> Result<ComparisonResult, Error> {
    if quotes.is_empty() {
        return Err(empty_quote_set_error());
    }

    let prices = quotes
        .iter()
        .map(PlatformQuote::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            tracing::warn!(error = %err, "rejecting quote set");
            err
        })?;

    let mut best = 0;
    let mut max_total = prices[0].total;

    for (index, quote) in prices.iter().enumerate().skip(1) {
        if quote.total < prices[best].total {
            best = index;
        }
        if quote.total > max_total {
            max_total = quote.total;
        }
    }

    let best_deal = prices[best].clone();
    let max_savings = max_total - best_deal.total;

    Ok(ComparisonResult {
        restaurant,
        prices,
        best_deal,
        max_savings,
    })
}

#[cfg(test)]
fn restaurant() -> Restaurant {
    Restaurant {
        id: "1".into(),
        name: "Burger Barn".into(),
        cuisine_type: "Fast Food".into(),
        image_url: "https://images.example.com/burger.jpg".into(),
        average_rating: 4.2,
        estimated_delivery_time: "25-35 min".into(),
        location: "Downtown".into(),
    }
}

#[cfg(test)]
fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[test]
fn singleton_has_no_savings_test() {
    let quotes = vec![RawQuote::new("Wolt", 10.0, 2.0, 1.0, 0.5)];

    let result = compare(restaurant(), &quotes).unwrap();

    assert_eq!(result.best_deal.platform, "Wolt");
    assert_eq!(result.best_deal.total, money(1350));
    assert_eq!(result.max_savings, money(0));
    assert_eq!(result.max_savings.to_string(), "0.00");
}

#[test]
fn cheapest_platform_wins_test() {
    let quotes = vec![
        RawQuote::new("Wolt", 12.0, 2.0, 0.5, 0.5),
        RawQuote::new("Foody", 11.0, 1.0, 0.7, 0.5),
        RawQuote::new("Bolt", 12.0, 1.25, 1.0, 0.5),
    ];

    let result = compare(restaurant(), &quotes).unwrap();

    assert_eq!(result.prices[0].total, money(1500));
    assert_eq!(result.prices[1].total, money(1320));
    assert_eq!(result.prices[2].total, money(1475));
    assert_eq!(result.best_deal.platform, "Foody");
    assert_eq!(result.max_savings, money(180));
    assert_eq!(result.max_savings.to_string(), "1.80");
}

#[test]
fn first_quote_wins_ties_test() {
    let quotes = vec![
        RawQuote::new("Bolt", 14.0, 1.0, 1.0, 1.0),
        RawQuote::new("Wolt", 15.0, 1.0, 2.0, 1.0),
        RawQuote::new("Foody", 13.0, 2.0, 1.0, 1.0),
    ];

    let result = compare(restaurant(), &quotes).unwrap();

    assert_eq!(result.best_deal.platform, "Bolt");
    assert_eq!(result.best_deal, result.prices[0]);
    assert_eq!(result.max_savings, money(200));
}

#[test]
fn prices_keep_input_order_test() {
    let quotes = vec![
        RawQuote::new("Bolt", 9.0, 0.0, 0.0, 0.0),
        RawQuote::new("Wolt", 8.0, 0.0, 0.0, 0.0),
    ];

    let result = compare(restaurant(), &quotes).unwrap();
    let platforms: Vec<&str> = result.prices.iter().map(|q| q.platform.as_str()).collect();

    assert_eq!(platforms, vec!["Bolt", "Wolt"]);
}

#[test]
fn best_deal_is_minimum_member_test() {
    let quotes = vec![
        RawQuote::new("Wolt", 18.99, 3.99, 2.5, 2.3),
        RawQuote::new("Foody", 17.99, 1.99, 2.75, 2.18),
        RawQuote::new("Bolt", 19.49, 4.49, 2.25, 2.37),
        RawQuote::new("Courier", 17.0, 4.0, 2.0, 2.0),
    ];

    let result = compare(restaurant(), &quotes).unwrap();
    let min = result.prices.iter().map(|q| q.total).min().unwrap();
    let max = result.prices.iter().map(|q| q.total).max().unwrap();

    assert!(result.prices.contains(&result.best_deal));
    assert_eq!(result.best_deal.total, min);
    assert_eq!(result.max_savings, max - min);
    assert!(!result.max_savings.is_sign_negative());
}

#[test]
fn empty_quote_set_fails_test() {
    let err = compare(restaurant(), &[]).unwrap_err();

    assert!(err.is_empty_quote_set_error());
}

#[test]
fn one_invalid_quote_fails_everything_test() {
    let quotes = vec![
        RawQuote::new("Wolt", 10.0, 2.0, 1.0, 0.5),
        RawQuote::new("Foody", 10.0, -1.0, 1.0, 0.5),
    ];

    let err = compare(restaurant(), &quotes).unwrap_err();

    assert!(err.is_invalid_quote_error());
    assert!(err.message.contains("Foody"));
}

#[test]
fn repeated_comparison_is_byte_identical_test() {
    let quotes = vec![
        RawQuote::new("Wolt", 12.99, 2.99, 1.5, 1.52),
        RawQuote::new("Foody", 12.99, 0.99, 2.0, 1.52),
    ];

    let first = serde_json::to_string(&compare(restaurant(), &quotes).unwrap()).unwrap();
    let second = serde_json::to_string(&compare(restaurant(), &quotes).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn wire_shape_test() {
    let quotes = vec![RawQuote::new("Wolt", 10.0, 2.0, 1.0, 0.5)];

    let value = serde_json::to_value(compare(restaurant(), &quotes).unwrap()).unwrap();

    assert_eq!(value["restaurant"]["id"], "1");
    assert_eq!(value["prices"][0]["total"], "13.50");
    assert_eq!(value["best_deal"]["platform"], "Wolt");
    assert_eq!(value["max_savings"], "0.00");
}
