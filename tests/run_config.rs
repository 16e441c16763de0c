use requant_core::config::RunConfig;
use requant_core::error::ConfigError;
use requant_core::{ChannelParameters, OutputStage, ParameterStore};
use std::fs;

const SAMPLE: &str = r#"{
    "offset": -5,
    "activation_min": -128,
    "activation_max": 127,
    "channels": [
        { "bias": 10, "multiplier": 1073741824, "shift": -1 },
        { "bias": -20, "multiplier": 1073741824, "shift": 1 }
    ],
    "accumulators": [100, -300]
}"#;

#[test]
fn parses_flattened_output_stage() {
    let cfg = RunConfig::from_json(SAMPLE).unwrap();
    assert_eq!(cfg.output, OutputStage { offset: -5, activation_min: -128, activation_max: 127 });
    assert_eq!(cfg.channels[1], ChannelParameters { bias: -20, multiplier: 1 << 30, shift: 1 });
    assert_eq!(cfg.accumulators, vec![100, -300]);
    assert_eq!(cfg.param_store().bias(), 10);
}

#[test]
fn accumulators_default_to_empty() {
    let cfg = RunConfig::from_json(
        r#"{ "offset": 0, "activation_min": 0, "activation_max": 255,
             "channels": [{ "bias": 0, "multiplier": 1, "shift": 0 }] }"#,
    ).unwrap();
    assert!(cfg.accumulators.is_empty());
}

#[test]
fn rejects_unrepresentable_shift() {
    let text = SAMPLE.replace(r#""shift": 1 }"#, r#""shift": 32 }"#);
    match RunConfig::from_json(&text) {
        Err(ConfigError::ShiftOutOfRange { channel, shift }) => assert_eq!((channel, shift), (1, 32)),
        other => panic!("expected ShiftOutOfRange, got {:?}", other),
    }
}

#[test]
fn rejects_empty_channel_list() {
    let text = r#"{ "offset": 0, "activation_min": 0, "activation_max": 1, "channels": [] }"#;
    assert!(matches!(RunConfig::from_json(text), Err(ConfigError::NoChannels)));
}

#[test]
fn inverted_bounds_are_left_to_the_caller() {
    let text = SAMPLE.replace(r#""activation_min": -128"#, r#""activation_min": 500"#);
    let cfg = RunConfig::from_json(&text).unwrap();
    assert!(cfg.output.activation_min > cfg.output.activation_max);
}

#[test]
fn bad_json_and_missing_file_are_reported() {
    assert!(matches!(RunConfig::from_json("{ not json"), Err(ConfigError::Json(_))));
    let err = RunConfig::load("target/does-not-exist/run.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn load_round_trips_through_a_file() {
    fs::create_dir_all("target").unwrap();
    let path = "target/run_config_test.json";
    fs::write(path, SAMPLE).unwrap();
    let cfg = RunConfig::load(path).unwrap();
    assert_eq!(cfg, RunConfig::from_json(SAMPLE).unwrap());
}
