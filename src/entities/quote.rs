use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{invalid_quote_error, Error};

/// Currency precision used for every displayed amount.
pub const MONEY_SCALE: u32 = 2;

/// A price breakdown exactly as a quote source reports it. Fields are
/// optional so that incomplete upstream data can be told apart from zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawQuote {
    pub platform: String,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub delivery_fee: Option<f64>,
    #[serde(default)]
    pub service_fee: Option<f64>,
    #[serde(default)]
    pub tax: Option<f64>,
}

impl RawQuote {
    pub fn new(
        platform: &str,
        base_price: f64,
        delivery_fee: f64,
        service_fee: f64,
        tax: f64,
    ) -> Self {
        Self {
            platform: platform.into(),
            base_price: Some(base_price),
            delivery_fee: Some(delivery_fee),
            service_fee: Some(service_fee),
            tax: Some(tax),
        }
    }
}

/// One platform's validated price breakdown for one restaurant. Only built
/// through [`PlatformQuote::new`] so `total` always matches its parts.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlatformQuote {
    pub platform: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub service_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

impl PlatformQuote {
    pub fn new(
        platform: &str,
        base_price: Decimal,
        delivery_fee: Decimal,
        service_fee: Decimal,
        tax: Decimal,
    ) -> Result<Self, Error> {
        let components = [
            ("base_price", base_price),
            ("delivery_fee", delivery_fee),
            ("service_fee", service_fee),
            ("tax", tax),
        ];

        for (field, amount) in components.iter() {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(invalid_quote_error(
                    platform,
                    &format!("{} is negative", field),
                ));
            }
        }

        let sum = base_price
            .checked_add(delivery_fee)
            .and_then(|sum| sum.checked_add(service_fee))
            .and_then(|sum| sum.checked_add(tax))
            .ok_or_else(|| invalid_quote_error(platform, "total overflows"))?;

        Ok(Self {
            platform: platform.into(),
            base_price: pad_scale(base_price),
            delivery_fee: pad_scale(delivery_fee),
            service_fee: pad_scale(service_fee),
            tax: pad_scale(tax),
            total: round_money(sum),
        })
    }
}

impl TryFrom<&RawQuote> for PlatformQuote {
    type Error = Error;

    fn try_from(raw: &RawQuote) -> Result<Self, Self::Error> {
        let platform = raw.platform.as_str();

        Self::new(
            platform,
            to_amount(platform, "base_price", raw.base_price)?,
            to_amount(platform, "delivery_fee", raw.delivery_fee)?,
            to_amount(platform, "service_fee", raw.service_fee)?,
            to_amount(platform, "tax", raw.tax)?,
        )
    }
}

fn to_amount(platform: &str, field: &str, value: Option<f64>) -> Result<Decimal, Error> {
    let value = value.ok_or_else(|| invalid_quote_error(platform, &format!("{} is missing", field)))?;

    if !value.is_finite() {
        return Err(invalid_quote_error(
            platform,
            &format!("{} is not finite", field),
        ));
    }

    if value < 0.0 {
        return Err(invalid_quote_error(
            platform,
            &format!("{} is negative", field),
        ));
    }

    Decimal::from_f64(value)
        .ok_or_else(|| invalid_quote_error(platform, &format!("{} is out of range", field)))
}

/// Rounds half-up to currency precision and fixes the scale so the amount
/// always renders with two decimals.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

// widens the scale without ever dropping digits
fn pad_scale(amount: Decimal) -> Decimal {
    let mut padded = amount;
    if padded.scale() < MONEY_SCALE {
        padded.rescale(MONEY_SCALE);
    }
    padded
}

#[test]
fn total_is_sum_of_components_test() {
    let quote = PlatformQuote::try_from(&RawQuote::new("Wolt", 10.0, 2.0, 1.0, 0.5)).unwrap();

    assert_eq!(quote.total, Decimal::new(1350, 2));
    assert_eq!(quote.total.to_string(), "13.50");
    assert_eq!(quote.delivery_fee.to_string(), "2.00");
}

#[test]
fn total_rounds_half_up_once_test() {
    let quote = PlatformQuote::new(
        "Foody",
        Decimal::new(10005, 3),
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .unwrap();
    assert_eq!(quote.total.to_string(), "10.01");

    let quote = PlatformQuote::new(
        "Foody",
        Decimal::new(1001, 3),
        Decimal::new(1001, 3),
        Decimal::new(1001, 3),
        Decimal::new(1001, 3),
    )
    .unwrap();
    // components keep their precision; only the total is rounded
    assert_eq!(quote.base_price.to_string(), "1.001");
    assert_eq!(quote.total.to_string(), "4.00");
}

#[test]
fn negative_component_is_rejected_test() {
    let err = PlatformQuote::try_from(&RawQuote::new("Bolt", 10.0, -1.0, 1.0, 0.5)).unwrap_err();

    assert!(err.is_invalid_quote_error());
    assert!(err.message.contains("delivery_fee"));
}

#[test]
fn missing_component_is_rejected_test() {
    let raw = RawQuote {
        tax: None,
        ..RawQuote::new("Bolt", 10.0, 1.0, 1.0, 0.5)
    };

    let err = PlatformQuote::try_from(&raw).unwrap_err();
    assert!(err.is_invalid_quote_error());
    assert!(err.message.contains("tax is missing"));
}

#[test]
fn non_finite_component_is_rejected_test() {
    let raw = RawQuote::new("Wolt", f64::NAN, 1.0, 1.0, 0.5);
    assert!(PlatformQuote::try_from(&raw).unwrap_err().is_invalid_quote_error());

    let raw = RawQuote::new("Wolt", 1.0, f64::INFINITY, 1.0, 0.5);
    assert!(PlatformQuote::try_from(&raw).unwrap_err().is_invalid_quote_error());
}

#[test]
fn missing_fields_deserialize_as_none_test() {
    let raw: RawQuote =
        serde_json::from_str(r#"{"platform": "Wolt", "base_price": 12.99}"#).unwrap();

    assert_eq!(raw.base_price, Some(12.99));
    assert_eq!(raw.delivery_fee, None);
}

#[test]
fn money_serializes_as_fixed_point_string_test() {
    let quote = PlatformQuote::try_from(&RawQuote::new("Wolt", 12.99, 2.99, 1.5, 1.52)).unwrap();
    let value = serde_json::to_value(&quote).unwrap();

    assert_eq!(value["service_fee"], "1.50");
    assert_eq!(value["total"], "19.00");
}
