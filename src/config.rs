//! Match tuning
//!
//! Every number the simulation depends on lives here. Defaults come from
//! [`crate::consts`]; a JSON file can override any subset of fields. A config
//! is validated before a match can be built from it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Projectile launch point
    pub shooter_x: f32,
    pub shooter_y: f32,
    /// Column the target moves along
    pub target_x: f32,
    pub target_min_y: f32,
    pub target_max_y: f32,
    /// Starting height of the target (midpoint of the travel when unset)
    pub target_start_y: Option<f32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            shooter_x: SHOOTER_X,
            shooter_y: SHOOTER_Y,
            target_x: TARGET_X,
            target_min_y: TARGET_MIN_Y,
            target_max_y: TARGET_MAX_Y,
            target_start_y: None,
        }
    }
}

impl FieldConfig {
    /// Starting height, clamped into the travel range
    pub fn start_y(&self) -> f32 {
        self.target_start_y
            .unwrap_or((self.target_min_y + self.target_max_y) / 2.0)
            .clamp(self.target_min_y, self.target_max_y)
    }
}

/// Clock and projectile timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub match_duration_secs: u32,
    pub countdown_period_ms: u64,
    pub flight_duration_ms: u64,
    /// Progress at which a projectile is considered arrived
    pub resolve_threshold: f32,
    pub hit_linger_ms: u64,
    pub miss_linger_ms: u64,
    pub max_frame_delta_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            match_duration_secs: MATCH_DURATION_SECS,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
            flight_duration_ms: FLIGHT_DURATION_MS,
            resolve_threshold: RESOLVE_THRESHOLD,
            hit_linger_ms: HIT_LINGER_MS,
            miss_linger_ms: MISS_LINGER_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

/// Distance rings and their point values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub bullseye_radius: f32,
    pub inner_radius: f32,
    pub bullseye_points: u32,
    pub inner_points: u32,
    pub outer_points: u32,
    /// Scale ring radii by `size / base_target_size` instead of keeping them fixed
    pub scale_tiers_with_size: bool,
    pub base_target_size: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bullseye_radius: BULLSEYE_RADIUS,
            inner_radius: INNER_RADIUS,
            bullseye_points: BULLSEYE_POINTS,
            inner_points: INNER_POINTS,
            outer_points: OUTER_POINTS,
            scale_tiers_with_size: false,
            base_target_size: BASE_TARGET_SIZE,
        }
    }
}

/// Target behaviour at one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Pixels moved per motion tick
    pub speed: f32,
    /// Edge length of the (square) target
    pub size: f32,
    /// Motion tick period
    pub motion_period_ms: u64,
}

/// Level-up rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub hits_per_level: u32,
    /// Row `n` describes level `n + 1`; the row count is the level cap
    pub levels: Vec<LevelParams>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            hits_per_level: HITS_PER_LEVEL,
            levels: LEVEL_TABLE
                .iter()
                .map(|&(speed, size, motion_period_ms)| LevelParams {
                    speed,
                    size,
                    motion_period_ms,
                })
                .collect(),
        }
    }
}

impl ProgressionConfig {
    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Parameters for a 1-based level, clamped to the table.
    /// Panics on an empty table; validated configs never have one.
    pub fn params(&self, level: u32) -> LevelParams {
        let idx = (level.max(1) as usize - 1).min(self.levels.len().saturating_sub(1));
        self.levels[idx]
    }
}

/// Complete match configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field: FieldConfig,
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub progression: ProgressionConfig,
}

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    /// A value that must be strictly positive is not
    NonPositive(&'static str),
    /// Target travel range is empty or inverted
    InvalidBounds { min_y: f32, max_y: f32 },
    /// A point that must lie inside the field does not
    OutsideField(&'static str),
    EmptyLevelTable,
    InvalidLevel { level: u32, reason: &'static str },
    ThresholdOutOfRange(f32),
    TierRadii { bullseye: f32, inner: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::NonPositive(name) => write!(f, "{} must be positive", name),
            ConfigError::InvalidBounds { min_y, max_y } => {
                write!(f, "target bounds inverted or empty: min_y={} max_y={}", min_y, max_y)
            }
            ConfigError::OutsideField(what) => write!(f, "{} lies outside the play field", what),
            ConfigError::EmptyLevelTable => write!(f, "level table is empty"),
            ConfigError::InvalidLevel { level, reason } => {
                write!(f, "level {}: {}", level, reason)
            }
            ConfigError::ThresholdOutOfRange(t) => {
                write!(f, "resolve threshold {} not in (0, 1]", t)
            }
            ConfigError::TierRadii { bullseye, inner } => write!(
                f,
                "scoring radii must satisfy 0 < bullseye ({}) <= inner ({})",
                bullseye, inner
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

fn positive_f32(value: f32, name: &'static str) -> Result<(), ConfigError> {
    // NaN fails this too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name))
    }
}

fn positive_u64(value: u64, name: &'static str) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name))
    }
}

impl MatchConfig {
    /// Parse JSON (missing fields take defaults) and validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        positive_f32(field.width, "field.width")?;
        positive_f32(field.height, "field.height")?;
        if !(field.target_min_y < field.target_max_y) {
            return Err(ConfigError::InvalidBounds {
                min_y: field.target_min_y,
                max_y: field.target_max_y,
            });
        }
        if field.target_min_y < 0.0 || field.target_max_y > field.height {
            return Err(ConfigError::OutsideField("target travel range"));
        }
        if !(0.0..=field.width).contains(&field.target_x) {
            return Err(ConfigError::OutsideField("target column"));
        }
        if !(0.0..=field.width).contains(&field.shooter_x)
            || !(0.0..=field.height).contains(&field.shooter_y)
        {
            return Err(ConfigError::OutsideField("shooter"));
        }

        let timing = &self.timing;
        positive_u64(timing.match_duration_secs as u64, "timing.match_duration_secs")?;
        positive_u64(timing.countdown_period_ms, "timing.countdown_period_ms")?;
        positive_u64(timing.flight_duration_ms, "timing.flight_duration_ms")?;
        positive_u64(timing.max_frame_delta_ms, "timing.max_frame_delta_ms")?;
        if !(timing.resolve_threshold > 0.0 && timing.resolve_threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(timing.resolve_threshold));
        }

        let scoring = &self.scoring;
        if !(scoring.bullseye_radius > 0.0 && scoring.bullseye_radius <= scoring.inner_radius) {
            return Err(ConfigError::TierRadii {
                bullseye: scoring.bullseye_radius,
                inner: scoring.inner_radius,
            });
        }
        positive_f32(scoring.base_target_size, "scoring.base_target_size")?;

        let progression = &self.progression;
        positive_u64(progression.hits_per_level as u64, "progression.hits_per_level")?;
        if progression.levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        let mut prev: Option<LevelParams> = None;
        for (i, params) in progression.levels.iter().enumerate() {
            let level = i as u32 + 1;
            if !(params.speed > 0.0) {
                return Err(ConfigError::InvalidLevel { level, reason: "speed must be positive" });
            }
            if !(params.size > 0.0) {
                return Err(ConfigError::InvalidLevel { level, reason: "size must be positive" });
            }
            if params.motion_period_ms == 0 {
                return Err(ConfigError::InvalidLevel {
                    level,
                    reason: "motion period must be positive",
                });
            }
            if let Some(prev) = prev {
                if params.speed < prev.speed {
                    return Err(ConfigError::InvalidLevel {
                        level,
                        reason: "speed must not decrease as level rises",
                    });
                }
                if params.size > prev.size {
                    return Err(ConfigError::InvalidLevel {
                        level,
                        reason: "size must not grow as level rises",
                    });
                }
            }
            prev = Some(*params);
        }

        Ok(())
    }
}
