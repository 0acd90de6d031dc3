//! Unit tests for the indicator table

use std::str::FromStr;

use pumpwatch::config::IndicatorConfig;
use pumpwatch::indicators::{price_change_percent, IndicatorCategory, IndicatorKind, INDICATORS};
use pumpwatch::models::indicators::{IndicatorReading, PriceSeries};

use crate::support::series_from_closes;

#[test]
fn test_table_is_indexed_by_kind() {
    assert_eq!(INDICATORS.len(), IndicatorKind::COUNT);
    for kind in IndicatorKind::ALL {
        assert_eq!(kind.definition().kind, kind);
    }
}

#[test]
fn test_keys_round_trip() {
    for kind in IndicatorKind::ALL {
        assert_eq!(IndicatorKind::from_key(kind.key()), Some(kind));
        assert_eq!(IndicatorKind::from_str(&kind.to_string()).unwrap(), kind);
    }
    assert!(IndicatorKind::from_str("stochastic").is_err());
}

#[test]
fn test_serde_uses_config_keys() {
    let json = serde_json::to_string(&IndicatorKind::RsiMacdDivergence).unwrap();
    assert_eq!(json, "\"rsi_macd_divergence\"");
    assert_eq!(IndicatorKind::RsiMacdDivergence.key(), "rsi_macd_divergence");
}

#[test]
fn test_labels_and_categories() {
    assert_eq!(IndicatorKind::VolumePreSurge.label(), "Volume Pre-Surge");
    assert_eq!(IndicatorKind::Obv.category(), IndicatorCategory::Volume);
    assert_eq!(IndicatorKind::CandlePatterns.category(), IndicatorCategory::Pattern);
}

#[test]
fn test_price_change_percent() {
    assert_eq!(price_change_percent(&series_from_closes(&[100.0, 105.0])), 5.0);
    assert_eq!(price_change_percent(&series_from_closes(&[100.0])), 0.0);
    assert_eq!(price_change_percent(&PriceSeries::empty()), 0.0);
    assert_eq!(price_change_percent(&series_from_closes(&[0.0, 5.0])), 0.0);
}

#[test]
fn test_price_change_threshold_is_strict() {
    let config = IndicatorConfig::default().with_price_change_threshold(2.0);
    let def = IndicatorKind::PriceChange.definition();

    let at_threshold = IndicatorReading::PriceChange { percent: 2.0 };
    assert!(!def.pump_triggered(&at_threshold, &config));

    let above = IndicatorReading::PriceChange { percent: 2.5 };
    assert!(def.pump_triggered(&above, &config));
    assert!(!def.dump_triggered(&above, &config));

    let below = IndicatorReading::PriceChange { percent: -2.5 };
    assert!(def.dump_triggered(&below, &config));
}

#[test]
fn test_undefined_readings_never_trigger() {
    let config = IndicatorConfig::default();
    let readings = [
        (IndicatorKind::Rsi, IndicatorReading::Rsi { value: None }),
        (IndicatorKind::Adx, IndicatorReading::Adx { value: None }),
        (IndicatorKind::VolumeSurge, IndicatorReading::VolumeSurge { ratio: None }),
        (IndicatorKind::Obv, IndicatorReading::Obv { delta: None }),
    ];
    for (kind, reading) in readings {
        let def = kind.definition();
        assert!(!def.pump_triggered(&reading, &config), "{} pump", kind);
        assert!(!def.dump_triggered(&reading, &config), "{} dump", kind);
    }
}

#[test]
fn test_direction_neutral_indicators_fire_both_ways() {
    let config = IndicatorConfig::default();
    let adx = IndicatorKind::Adx.definition();
    let strong = IndicatorReading::Adx { value: Some(30.0) };
    assert!(adx.pump_triggered(&strong, &config));
    assert!(adx.dump_triggered(&strong, &config));

    let weak = IndicatorReading::Adx { value: Some(25.0) };
    assert!(!adx.pump_triggered(&weak, &config));

    let surge = IndicatorKind::VolumeSurge.definition();
    let ratio = IndicatorReading::VolumeSurge { ratio: Some(1.6) };
    assert!(surge.pump_triggered(&ratio, &config));
    assert!(surge.dump_triggered(&ratio, &config));
}

#[test]
fn test_rsi_zones() {
    let config = IndicatorConfig::default();
    let rsi = IndicatorKind::Rsi.definition();
    assert!(rsi.pump_triggered(&IndicatorReading::Rsi { value: Some(29.9) }, &config));
    assert!(!rsi.pump_triggered(&IndicatorReading::Rsi { value: Some(30.0) }, &config));
    assert!(rsi.dump_triggered(&IndicatorReading::Rsi { value: Some(70.1) }, &config));
    assert!(!rsi.dump_triggered(&IndicatorReading::Rsi { value: Some(70.0) }, &config));
}

#[test]
fn test_bollinger_breakouts() {
    let config = IndicatorConfig::default();
    let def = IndicatorKind::Bollinger.definition();
    let above = IndicatorReading::Bollinger {
        close: 11.0,
        upper: Some(10.0),
        middle: Some(8.0),
        lower: Some(6.0),
    };
    assert!(def.pump_triggered(&above, &config));
    assert!(!def.dump_triggered(&above, &config));
    assert_eq!(above.describe(), "above upper band");

    let warmup = IndicatorReading::Bollinger {
        close: 11.0,
        upper: None,
        middle: None,
        lower: None,
    };
    assert!(!def.pump_triggered(&warmup, &config));
    assert_eq!(warmup.describe(), "n/a");
}
