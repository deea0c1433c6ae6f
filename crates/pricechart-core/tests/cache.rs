// File: crates/pricechart-core/tests/cache.rs
// Purpose: Validate render memoization and superseded-request detection.

use pricechart_core::cache::render_key;
use pricechart_core::{ChartConfig, ChartController, RawSample, RenderCache, RenderMode, RequestTokens};

fn raw() -> Vec<RawSample> {
    (0..50i64).map(|i| RawSample::new(i * 60_000, 10.0, 11.0, 9.0, 10.0 + i as f64 * 0.1)).collect()
}

const NOW: i64 = 49 * 60_000;

#[test]
fn identical_inputs_hit_the_cache() {
    let cfg = ChartConfig::default();
    let data = raw();
    let mut cache = RenderCache::new();

    let first = cache.render(&data, &cfg, NOW).clone();
    let second = cache.render(&data, &cfg, NOW).clone();
    assert_eq!(first, second);
    assert_eq!(first, ChartController::render(&data, &cfg, NOW));
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
}

#[test]
fn any_input_change_misses() {
    let cfg = ChartConfig::default();
    let data = raw();
    let mut cache = RenderCache::new();
    cache.render(&data, &cfg, NOW);

    let candle = cfg.clone().with_mode(RenderMode::Candle);
    assert!(matches!(cache.render(&data, &candle, NOW).body, pricechart_core::ModelBody::Candles(_)));
    cache.render(&data, &candle, NOW + 1);

    let mut moved = data.clone();
    moved[3].close += 0.5;
    cache.render(&moved, &candle, NOW + 1);
    assert_eq!((cache.hits(), cache.misses()), (0, 4));

    cache.clear();
    cache.render(&moved, &candle, NOW + 1);
    assert_eq!(cache.misses(), 5);
}

#[test]
fn render_key_is_stable() {
    let cfg = ChartConfig::default();
    let data = raw();
    assert_eq!(render_key(&data, &cfg, NOW), render_key(&data.clone(), &cfg.clone(), NOW));
    assert_ne!(render_key(&data, &cfg, NOW), render_key(&data[1..], &cfg, NOW));
}

#[test]
fn only_the_latest_request_is_current() {
    let mut tokens = RequestTokens::new();
    let a = tokens.issue();
    assert!(tokens.is_current(a));
    let b = tokens.issue();
    assert!(b > a);
    assert!(!tokens.is_current(a));
    assert!(tokens.is_current(b));
}
