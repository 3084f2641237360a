//! Technical indicator engine.
//!
//! Pure, stateless transforms of a finite price sequence into derived
//! series. No I/O, no side effects, and no panics: insufficient input
//! degrades to documented sentinel values (`None` for series positions,
//! a neutral `50` for RSI) rather than errors, so sparse history never
//! crashes downstream consumers.
//!
//! Domain types carry prices as `Decimal`; the engine works in `f64`,
//! converting once at the boundary via [`close_prices`].

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod stats;

pub use ema::ema;
pub use macd::{macd, macd_default, Macd, MACD_FAST, MACD_SIGNAL, MACD_SLOW};
pub use rsi::{rsi, rsi_default, RSI_PERIOD};
pub use stats::{mean, moving_average, std_dev};

use mcal_core::MarketDataPoint;

/// Extract closing prices from a chronological slice of points.
pub fn close_prices(points: &[MarketDataPoint]) -> Vec<f64> {
    points.iter().map(|p| p.close_price.to_f64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mcal_core::Price;
    use rust_decimal_macros::dec;

    #[test]
    fn test_close_prices_preserves_order() {
        let points: Vec<MarketDataPoint> = (1..=3)
            .map(|day| {
                MarketDataPoint::from_ohlcv(
                    "BTCUSDT",
                    NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    Price::new(dec!(100)),
                    Price::new(dec!(110)),
                    Price::new(dec!(99)),
                    Price::new(rust_decimal::Decimal::from(100 + day)),
                    dec!(1),
                    None,
                )
            })
            .collect();

        assert_eq!(close_prices(&points), vec![101.0, 102.0, 103.0]);
    }
}
