use super::*;
use std::collections::HashMap;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.server.bind, DEFAULT_BIND_ADDR);
    assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(config.analysis, AnalyzerConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_combined_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
bind = "0.0.0.0:9000"
guides_dir = "/srv/guides"

[engine]
program = "/usr/games/stockfish"
think_time_ms = 400

[thresholds]
professional = 0.8
"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.server.guides_dir, PathBuf::from("/srv/guides"));
    assert_eq!(config.server.upload_dir, PathBuf::from("uploads"));
    assert_eq!(config.analysis.engine.program, PathBuf::from("/usr/games/stockfish"));
    assert_eq!(config.analysis.engine.think_time_ms, 400);
    assert_eq!(config.analysis.thresholds.professional, 0.8);
}

#[test]
fn test_load_rejects_bad_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    fs::write(&path, "[thresholds]\nbeginner = 0.5\n").unwrap();

    assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_env_overrides() {
    let vars: HashMap<&str, &str> = [
        ("SKILL_BIND_ADDR", "127.0.0.1:3000"),
        ("SKILL_UPLOAD_DIR", "/tmp/pgn"),
        ("SKILL_MAX_UPLOAD_BYTES", "2048"),
        ("SKILL_ENGINE_PATH", "/opt/sf"),
        ("SKILL_GUIDES_DIR", "  "),
    ]
    .into_iter()
    .collect();

    let mut config = AppConfig::default();
    config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.server.upload_dir, PathBuf::from("/tmp/pgn"));
    assert_eq!(config.server.max_upload_bytes, 2048);
    assert_eq!(config.server.guides_dir, PathBuf::from("guides"));
    assert_eq!(config.analysis.engine.program, PathBuf::from("/opt/sf"));
}

#[test]
fn test_invalid_upload_limit_keeps_default() {
    let mut config = AppConfig::default();
    config.apply_overrides(|name| (name == "SKILL_MAX_UPLOAD_BYTES").then(|| "0".to_string()));
    assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
}
