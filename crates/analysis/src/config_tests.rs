use super::*;
use std::io::Write;

#[test]
fn test_defaults_use_one_second_budget() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.engine.think_time(), Duration::from_secs(1));
    assert_eq!(config.engine.program, PathBuf::from("stockfish"));
    assert_eq!(config.thresholds, Thresholds::default());
}

#[test]
fn test_load_partial_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[engine]
program = "/opt/engines/stockfish"
think_time_ms = 250

[engine.options]
Threads = "2"
Hash = "64"
"#
    )
    .unwrap();

    let config = AnalyzerConfig::load(file.path()).unwrap();
    assert_eq!(config.engine.program, PathBuf::from("/opt/engines/stockfish"));
    assert_eq!(config.engine.think_time_ms, 250);
    assert_eq!(config.engine.options.get("Hash").map(String::as_str), Some("64"));
    assert_eq!(config.engine.shutdown_grace_ms, DEFAULT_SHUTDOWN_GRACE_MS);
    assert_eq!(config.thresholds, Thresholds::default());
}

#[test]
fn test_load_rejects_bad_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\nthink_time_ms = 0").unwrap();
    assert!(matches!(
        AnalyzerConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine\nprogram = 1").unwrap();
    assert!(matches!(
        AnalyzerConfig::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));

    assert!(matches!(
        AnalyzerConfig::load(Path::new("/definitely/not/here.toml")),
        Err(ConfigError::Read { .. })
    ));
}

#[test]
fn test_env_overrides() {
    let mut config = AnalyzerConfig::default();
    config.apply_overrides(|name| match name {
        "SKILL_ENGINE_PATH" => Some("/usr/games/stockfish".to_string()),
        "SKILL_THINK_TIME_MS" => Some("300".to_string()),
        _ => None,
    });
    assert_eq!(config.engine.program, PathBuf::from("/usr/games/stockfish"));
    assert_eq!(config.engine.think_time_ms, 300);

    config.apply_overrides(|name| (name == "SKILL_THINK_TIME_MS").then(|| "soon".to_string()));
    assert_eq!(config.engine.think_time_ms, 300);
}
