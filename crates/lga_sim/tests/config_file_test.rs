//! Integration test for config files and the run driver.

use std::path::PathBuf;

use lga_core::{FillRegion, PartitionPolicy};
use lga_sim::{run_simulation, CliArgs, ConfigError, SimulationConfig};

fn sample_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/lga.toml")
}

fn temp_config_path(name: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("lga_{name}_{id}.toml"))
}

#[test]
fn test_sample_config_is_valid() {
    let config = SimulationConfig::from_file(sample_config_path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.grid.size, 256);
    assert_eq!(config.engine.threads, 8);
    assert_eq!(config.engine.partition, PartitionPolicy::RemainderToLast);
    assert!(config.layout.divider);
    assert_eq!(config.layout.fill, FillRegion::LeftHalf);
}

#[test]
fn test_cli_overrides_file() {
    let path = temp_config_path("override");
    std::fs::write(
        &path,
        "[grid]\nsize = 32\n\n[engine]\nthreads = 2\niterations = 8\n",
    )
    .unwrap();

    let cli = CliArgs::parse([
        "--config".to_string(),
        path.display().to_string(),
        "--threads".to_string(),
        "4".to_string(),
    ])
    .unwrap();
    let config = cli.resolve_config().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.grid.size, 32);
    assert_eq!(config.engine.threads, 4);
    assert_eq!(config.engine.iterations, 8);

    let outcome = run_simulation(&config, true).unwrap();
    assert_eq!(outcome.verified, Some(true));
    assert_eq!(outcome.report.workers.len(), 4);
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let path = temp_config_path("malformed");
    std::fs::write(&path, "[engine]\nthreads = \"eight\"\n").unwrap();

    let err = SimulationConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse config"));
}
