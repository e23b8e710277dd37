//! Server configuration parsed from environment variables.
//!
//! Every variable is optional. Values that fail to parse fall back to their
//! defaults; combinations the generator cannot work with are rejected at
//! startup.

use ladder::{GeneratorConfig, LadderError};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LEVELS_PER_LINE: usize = 3;
pub const DEFAULT_MAX_LEVELS: usize = 1000;
pub const DEFAULT_START_GAP: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LADDER_LEVELS_PER_LINE must be positive")]
    LevelsPerLine,
    #[error("LADDER_MAX_LEVELS must exceed LADDER_START_GAP")]
    MaxLevels,
    #[error("LADDER_LEVELS_PER_LINE x LADDER_MAX_LINES must not exceed LADDER_MAX_LEVELS")]
    DefaultLevels,
    #[error("invalid generator settings: {0}")]
    Generator(#[from] LadderError),
}

/// Request-shaping limits plus the generator's tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderConfig {
    /// Level count used when a request omits `levels`, per vertical line.
    pub levels_per_line: usize,
    pub max_levels: usize,
    pub generator: GeneratorConfig,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            levels_per_line: DEFAULT_LEVELS_PER_LINE,
            max_levels: DEFAULT_MAX_LEVELS,
            generator: GeneratorConfig { start_gap: DEFAULT_START_GAP, ..GeneratorConfig::default() },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub ladder: LadderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, ladder: LadderConfig::default() }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LADDER_MAX_LINES`: default 50
    /// - `LADDER_MAX_LEVELS`: default 1000
    /// - `LADDER_LEVELS_PER_LINE`: default 3
    /// - `LADDER_MIN_RUNGS_PER_PAIR`: default 2
    /// - `LADDER_START_GAP`: default 1
    /// - `LADDER_TARGET_RUNGS_PER_PAIR`: default 4.0
    /// - `LADDER_AUTO_DENSITY_MIN` / `LADDER_AUTO_DENSITY_MAX`: default 0.05 / 0.60
    /// - `LADDER_MAX_DENSITY`: default 0.95
    /// - `LADDER_REPAIR_ATTEMPTS_PER_LEVEL`: default 2
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the parsed values are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (tests pass a map).
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let gen_defaults = defaults.ladder.generator;

        let generator = GeneratorConfig {
            max_lines: parse_or(&lookup, "LADDER_MAX_LINES", gen_defaults.max_lines),
            min_rungs_per_pair: parse_or(&lookup, "LADDER_MIN_RUNGS_PER_PAIR", gen_defaults.min_rungs_per_pair),
            start_gap: parse_or(&lookup, "LADDER_START_GAP", gen_defaults.start_gap),
            target_rungs_per_pair: parse_or(&lookup, "LADDER_TARGET_RUNGS_PER_PAIR", gen_defaults.target_rungs_per_pair),
            auto_density_min: parse_or(&lookup, "LADDER_AUTO_DENSITY_MIN", gen_defaults.auto_density_min),
            auto_density_max: parse_or(&lookup, "LADDER_AUTO_DENSITY_MAX", gen_defaults.auto_density_max),
            max_density: parse_or(&lookup, "LADDER_MAX_DENSITY", gen_defaults.max_density),
            repair_attempts_per_level: parse_or(
                &lookup,
                "LADDER_REPAIR_ATTEMPTS_PER_LEVEL",
                gen_defaults.repair_attempts_per_level,
            ),
        };
        generator.validate()?;

        let ladder = LadderConfig {
            levels_per_line: parse_or(&lookup, "LADDER_LEVELS_PER_LINE", defaults.ladder.levels_per_line),
            max_levels: parse_or(&lookup, "LADDER_MAX_LEVELS", defaults.ladder.max_levels),
            generator,
        };
        if ladder.levels_per_line == 0 {
            return Err(ConfigError::LevelsPerLine);
        }
        if ladder.max_levels <= generator.start_gap {
            return Err(ConfigError::MaxLevels);
        }
        let widest_default = ladder.levels_per_line.checked_mul(generator.max_lines);
        if widest_default.is_none_or(|levels| levels > ladder.max_levels) {
            return Err(ConfigError::DefaultLevels);
        }

        Ok(Self { port: parse_or(&lookup, "PORT", defaults.port), ladder })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
