use std::io::Write;

use approx::assert_relative_eq;

use cropwise_core::color::ColorAlgorithm;
use cropwise_core::config::CropConfig;
use cropwise_core::error::CropError;
use cropwise_core::features::BoostRegion;
use cropwise_core::search::SearchOptions;

fn customized() -> CropConfig {
    let mut config = CropConfig::default();
    config.color = ColorAlgorithm::Dominant;
    config.ratio.min_ratio = Some(1.0);
    config.ratio.max_ratio = Some(1.5);
    config.ratio.min_width = Some(320.0);
    config.search.step = 4;
    config.search.weights.boost = 250.0;
    config.search.importance.rule_of_thirds = false;
    config.search.boost = vec![BoostRegion::new(10.0, 20.0, 30.0, 40.0, 0.75)];
    config
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_search_defaults() {
    let opts = SearchOptions::default();
    assert_eq!(opts.step, 8);
    assert_eq!(opts.score_down_sample, 8);
    assert_relative_eq!(opts.scale_step, 0.1);
    assert_relative_eq!(opts.weights.detail, 0.2);
    assert_relative_eq!(opts.weights.skin, 1.8);
    assert_relative_eq!(opts.weights.saturation, 0.1);
    assert_relative_eq!(opts.weights.boost, 100.0);
    assert_relative_eq!(opts.importance.edge_weight, -20.0);
    assert_relative_eq!(opts.importance.outside_importance, -0.5);
    assert!(opts.importance.rule_of_thirds);
    assert!(opts.prescale);
}

#[test]
fn test_color_algorithm_default_is_sqrt() {
    assert_eq!(CropConfig::default().color, ColorAlgorithm::Sqrt);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let config = customized();
    let text = config.to_toml_string().unwrap();
    assert_eq!(CropConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[ratio]\nmin_ratio = 2.0\n\n[search]\nprescale_target = 128.0\n")
        .unwrap();
    file.flush().unwrap();

    let config = CropConfig::load(file.path()).unwrap();
    assert_eq!(config.ratio.min_ratio, Some(2.0));
    assert_relative_eq!(config.search.prescale_target, 128.0);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CropConfig::load(&dir.path().join("none.toml")).unwrap_err();
    assert!(matches!(err, CropError::Io(_)));
}

#[test]
fn test_unknown_color_algorithm_rejected() {
    assert!(CropConfig::from_toml_str("color = \"median\"\n").is_err());
}

#[test]
fn test_invalid_boost_in_config_rejected() {
    let text = "[[search.boost]]\nx = 0.0\ny = 0.0\nwidth = 5.0\nheight = 5.0\nweight = 2.0\n";
    let err = CropConfig::from_toml_str(text).unwrap_err();
    assert!(matches!(err, CropError::InvalidBoost(_)));
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn test_json_round_trip() {
    let config = customized();
    let json = serde_json::to_string(&config).unwrap();
    let back: CropConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.color, config.color);
    assert_eq!(back.ratio.min_width, Some(320.0));
    assert_eq!(back.search.step, 4);
    assert_relative_eq!(back.search.weights.boost, 250.0);
    assert!(!back.search.importance.rule_of_thirds);
    assert_eq!(back.search.boost.len(), 1);
    assert_relative_eq!(back.search.boost[0].weight, 0.75);
}

#[test]
fn test_crop_size_not_serialized() {
    let opts = SearchOptions {
        crop_width: Some(10.0),
        crop_height: Some(10.0),
        ..SearchOptions::default()
    };
    let value = serde_json::to_value(&opts).unwrap();
    assert!(value.get("crop_width").is_none());
    assert!(value.get("step").is_some());
}
