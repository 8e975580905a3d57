use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Genres ordered from calmest to most intense.
pub const DEFAULT_ENERGY_LADDER: &[&str] = &[
    "Classical",
    "Cinematic",
    "R&B",
    "Pop",
    "K-Pop",
    "Electronic/Indie",
    "Tropical House",
    "Future Bass",
    "Melodic Bass",
    "House",
    "Progressive House",
    "Trance",
    "Tech House",
    "Bass House",
    "Trap/Bass",
    "Drum & Bass",
    "Dubstep/Bass",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MixGraphConfig {
    pub layout: LayoutConfig,
    pub sets: SetBuilderConfig,
    pub recommendations: RecommendationConfig,
    pub highlight: HighlightConfig,
}

impl MixGraphConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.sets.validate()?;
        self.recommendations.validate()
    }
}

/// Tuning for the force simulation. Strengths follow d3-force conventions:
/// a negative charge repels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub center_strength: f32,
    pub link_distance: f32,
    pub charge_strength: f32,
    pub charge_distance_min: f32,
    /// Unbounded when absent.
    pub charge_distance_max: Option<f32>,
    pub theta: f32,
    pub node_radius_base: f32,
    pub node_radius_scale: f32,
    pub collide_padding: f32,
    pub collide_strength: f32,
    pub cluster_cohesion: f32,
    pub cluster_separation: f32,
    pub separation_threshold: f32,
    pub alpha_min: f32,
    pub alpha_target: f32,
    /// Derived from `alpha_min` over 300 ticks when absent.
    pub alpha_decay: Option<f32>,
    pub velocity_decay: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            center_strength: 0.1,
            link_distance: 60.0,
            charge_strength: -120.0,
            charge_distance_min: 1.0,
            charge_distance_max: None,
            theta: 0.9,
            node_radius_base: 5.0,
            node_radius_scale: 1.5,
            collide_padding: 2.0,
            collide_strength: 0.7,
            cluster_cohesion: 0.2,
            cluster_separation: 0.5,
            separation_threshold: 200.0,
            alpha_min: 0.001,
            alpha_target: 0.0,
            alpha_decay: None,
            velocity_decay: 0.4,
        }
    }
}

impl LayoutConfig {
    pub fn alpha_decay(&self) -> f32 {
        self.alpha_decay
            .unwrap_or_else(|| 1.0 - self.alpha_min.powf(1.0 / 300.0))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(invalid("layout.velocity_decay must be within 0..=1"));
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return Err(invalid("layout.alpha_min must be within 0..1"));
        }
        if !(0.0..=1.0).contains(&self.alpha_target) {
            return Err(invalid("layout.alpha_target must be within 0..=1"));
        }
        if let Some(decay) = self.alpha_decay {
            if !(0.0..=1.0).contains(&decay) {
                return Err(invalid("layout.alpha_decay must be within 0..=1"));
            }
        }
        if self.link_distance < 0.0 || self.separation_threshold < 0.0 {
            return Err(invalid("layout distances must not be negative"));
        }
        if self.theta <= 0.0 {
            return Err(invalid("layout.theta must be positive"));
        }
        if self.charge_distance_min <= 0.0 {
            return Err(invalid("layout.charge_distance_min must be positive"));
        }
        if matches!(self.charge_distance_max, Some(max) if max <= self.charge_distance_min) {
            return Err(invalid(
                "layout.charge_distance_max must exceed charge_distance_min",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBuilderConfig {
    pub energy_ladder: Vec<String>,
    pub max_set_len: usize,
}

impl Default for SetBuilderConfig {
    fn default() -> Self {
        Self {
            energy_ladder: DEFAULT_ENERGY_LADDER.iter().map(|g| g.to_string()).collect(),
            max_set_len: 10,
        }
    }
}

impl SetBuilderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_set_len == 0 {
            return Err(invalid("sets.max_set_len must be at least 1"));
        }
        if self.energy_ladder.is_empty() {
            return Err(invalid("sets.energy_ladder must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// How many top library artists seed the search.
    pub seed_count: usize,
    pub limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            seed_count: 20,
            limit: 10,
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_count == 0 || self.limit == 0 {
            return Err(invalid("recommendations counts must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub duration_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { duration_ms: 5_000 }
    }
}

impl HighlightConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
