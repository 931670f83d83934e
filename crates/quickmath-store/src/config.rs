//! quickmath configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quickmath_core::equation::DEFAULT_OPERAND_BOUND;
use quickmath_core::model::DEFAULT_TIERS;
use quickmath_core::scoring::DEFAULT_PENALTY_SECS;
use quickmath_core::SessionConfig;

/// Environment variable that overrides `scores_path`.
pub const SCORES_PATH_ENV: &str = "QUICKMATH_SCORES_PATH";

/// Top-level quickmath configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickmathConfig {
    /// Question amounts offered to the player, each with a best score.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<u32>,
    /// Seconds added per wrong answer.
    #[serde(default = "default_penalty")]
    pub penalty_secs: f64,
    /// Timer tick in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Exclusive upper bound for equation operands.
    #[serde(default = "default_operand_bound")]
    pub operand_bound: u32,
    /// Delay between the last answer and the results, in milliseconds.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Length of the 3, 2, 1, GO! countdown in seconds (0 disables it).
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
    /// Where best scores are stored.
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
}

fn default_tiers() -> Vec<u32> {
    DEFAULT_TIERS.to_vec()
}
fn default_penalty() -> f64 {
    DEFAULT_PENALTY_SECS
}
fn default_tick_ms() -> u64 {
    100
}
fn default_operand_bound() -> u32 {
    DEFAULT_OPERAND_BOUND
}
fn default_reveal_delay_ms() -> u64 {
    600
}
fn default_countdown_secs() -> u32 {
    3
}
fn default_scores_path() -> PathBuf {
    dirs_path()
        .map(|dir| dir.join("best_scores.json"))
        .unwrap_or_else(|| PathBuf::from("quickmath-scores.json"))
}

impl Default for QuickmathConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            penalty_secs: default_penalty(),
            tick_ms: default_tick_ms(),
            operand_bound: default_operand_bound(),
            reveal_delay_ms: default_reveal_delay_ms(),
            countdown_secs: default_countdown_secs(),
            scores_path: default_scores_path(),
        }
    }
}

impl QuickmathConfig {
    /// Reject settings the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.tiers.is_empty(), "at least one tier is required");
        anyhow::ensure!(
            self.tiers.iter().all(|&t| t > 0),
            "tiers must be greater than zero"
        );
        anyhow::ensure!(
            self.penalty_secs.is_finite() && self.penalty_secs >= 0.0,
            "penalty_secs must be a non-negative number"
        );
        anyhow::ensure!(self.tick_ms > 0, "tick_ms must be at least 1");
        anyhow::ensure!(self.operand_bound > 0, "operand_bound must be at least 1");
        Ok(())
    }

    /// Settings that are legal but probably not what was meant.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut sorted = self.tiers.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.tiers.len() {
            warnings.push("tiers contain duplicates".to_string());
        }
        if self.penalty_secs == 0.0 {
            warnings.push("penalty_secs is 0, wrong answers cost nothing".to_string());
        }
        if self.tick_ms > 1000 {
            warnings.push(format!(
                "tick_ms is {}, times will be coarser than one second",
                self.tick_ms
            ));
        }
        if self.operand_bound > 13 {
            warnings.push(format!(
                "operand_bound is {}, equations go past the times tables",
                self.operand_bound
            ));
        }
        warnings
    }

    /// Session settings derived from this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tiers: self.tiers.clone(),
            penalty_secs: self.penalty_secs,
            tick: Duration::from_millis(self.tick_ms),
            operand_bound: self.operand_bound,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quickmath.toml` in the current directory
/// 2. `~/.config/quickmath/config.toml`
///
/// `QUICKMATH_SCORES_PATH` overrides the scores path.
pub fn load_config() -> Result<QuickmathConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuickmathConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quickmath.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuickmathConfig::default(),
    };

    if let Ok(scores_path) = std::env::var(SCORES_PATH_ENV) {
        config.scores_path = PathBuf::from(scores_path);
    }
    config.scores_path = PathBuf::from(resolve_env_vars(&config.scores_path.to_string_lossy()));

    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a configuration (useful for testing).
pub fn parse_config_str(content: &str) -> Result<QuickmathConfig> {
    Ok(toml::from_str::<QuickmathConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quickmath"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUICKMATH_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUICKMATH_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUICKMATH_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("${unclosed"), "${unclosed");
        std::env::remove_var("_QUICKMATH_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuickmathConfig::default();
        assert_eq!(config.tiers, vec![10, 25, 50, 99]);
        assert_eq!(config.penalty_secs, 0.5);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.operand_bound, 9);
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            r#"
tiers = [5, 10]
penalty_secs = 1.0
scores_path = "/tmp/qm.json"
"#,
        )
        .unwrap();
        assert_eq!(config.tiers, vec![5, 10]);
        assert_eq!(config.penalty_secs, 1.0);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.countdown_secs, 3);
        assert_eq!(config.scores_path, PathBuf::from("/tmp/qm.json"));
    }

    #[test]
    fn session_config_conversion() {
        let config = QuickmathConfig {
            tick_ms: 50,
            reveal_delay_ms: 0,
            ..Default::default()
        };
        let session = config.session_config();
        assert_eq!(session.tick, Duration::from_millis(50));
        assert_eq!(session.reveal_delay, Duration::ZERO);
        assert_eq!(session.tiers, config.tiers);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let empty = QuickmathConfig {
            tiers: vec![],
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let zero_tier = QuickmathConfig {
            tiers: vec![0, 10],
            ..Default::default()
        };
        assert!(zero_tier.validate().is_err());

        let negative = QuickmathConfig {
            penalty_secs: -0.5,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let no_tick = QuickmathConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(no_tick.validate().is_err());
    }

    #[test]
    fn warnings_for_odd_values() {
        let config = QuickmathConfig {
            tiers: vec![10, 10],
            penalty_secs: 0.0,
            ..Default::default()
        };
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("duplicates"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickmath.toml");
        std::fs::write(&path, "tiers = [20]\ncountdown_secs = 0\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.tiers, vec![20]);
        assert_eq!(config.countdown_secs, 0);
    }

    #[test]
    fn invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickmath.toml");
        std::fs::write(&path, "tiers = []\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
