use std::path::PathBuf;

use figment::Jail;
use moon_runner::config::Config;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults_without_environment() {
    Jail::expect_with(|_| {
        let config: Config = Config::figment().extract()?;
        assert_eq!(config, Config::default());
        assert_eq!(config.save_path, PathBuf::from("moon_runner_save.json"));
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.seed, None);
        assert!(!config.muted);
        Ok(())
    });
}

#[test]
fn test_environment_overrides() {
    Jail::expect_with(|jail| {
        jail.set_env("MOON_RUNNER_SAVE_PATH", "/tmp/runner.json");
        jail.set_env("MOON_RUNNER_SEED", "42");
        jail.set_env("MOON_RUNNER_MUTED", "true");
        jail.set_env("MOON_RUNNER_LOG_FILTER", "moon_runner=debug");

        let config: Config = Config::figment().extract()?;
        assert_eq!(config.save_path, PathBuf::from("/tmp/runner.json"));
        assert_eq!(config.seed, Some(42));
        assert!(config.muted);
        assert_eq!(config.log_filter, "moon_runner=debug");
        Ok(())
    });
}

#[test]
fn test_scale_is_clamped() {
    Jail::expect_with(|jail| {
        jail.set_env("MOON_RUNNER_SCALE", "10");
        let config: Config = Config::figment().extract()?;
        assert_eq!(config.scale, 4.0);

        jail.set_env("MOON_RUNNER_SCALE", "0.1");
        let config: Config = Config::figment().extract()?;
        assert_eq!(config.scale, 0.5);
        Ok(())
    });
}

#[test]
fn test_malformed_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("MOON_RUNNER_SEED", "not-a-number");
        assert!(Config::load().is_err());
        Ok(())
    });
}
