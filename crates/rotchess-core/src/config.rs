use crate::constants::{DEFAULT_COLLISION_RADIUS, DIAL_CENTER, DIAL_RADIUS, MAX_COLLISION_RADIUS};
use crate::types::{SetupMode, Skin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("collision radius {0} must lie in (0, {max}]", max = MAX_COLLISION_RADIUS)]
    CollisionRadius(f64),
    #[error("dial radius {0} must be positive and finite")]
    DialRadius(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Radius of a piece's hit circle. Pieces overlap within twice this distance.
    pub collision_radius: f64,
    /// When false, selecting a second piece drops the first.
    pub allow_multi_select: bool,
    pub setup: SetupMode,
    pub skin: Skin,
    pub dial_center: (f64, f64),
    pub dial_radius: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            collision_radius: DEFAULT_COLLISION_RADIUS,
            allow_multi_select: false,
            setup: SetupMode::Standard,
            skin: Skin::default(),
            dial_center: DIAL_CENTER,
            dial_radius: DIAL_RADIUS,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.collision_radius;
        if !(radius > 0.0 && radius <= MAX_COLLISION_RADIUS) {
            return Err(ConfigError::CollisionRadius(radius));
        }
        if !(self.dial_radius.is_finite() && self.dial_radius > 0.0) {
            return Err(ConfigError::DialRadius(self.dial_radius));
        }
        Ok(())
    }

    pub fn with_collision_radius(mut self, radius: f64) -> Result<Self, ConfigError> {
        self.collision_radius = radius;
        self.validate()?;
        Ok(self)
    }

    pub fn with_setup(mut self, setup: SetupMode) -> Self {
        self.setup = setup;
        self
    }

    pub fn with_multi_select(mut self, allow: bool) -> Self {
        self.allow_multi_select = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = GameConfig::from_json(r#"{"allow_multi_select": true, "setup": "chess960"}"#)
            .unwrap();
        assert!(config.allow_multi_select);
        assert_eq!(config.setup, SetupMode::Chess960);
        assert_eq!(config.collision_radius, DEFAULT_COLLISION_RADIUS);
        assert_eq!(config.skin, Skin::Wood);
        assert_eq!(config.dial_center, (500.0, 200.0));
    }

    #[test]
    fn rejects_unknown_setup() {
        assert!(matches!(
            GameConfig::from_json(r#"{"setup": "shogi"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn rejects_out_of_scale_collision_radius() {
        for json in [
            r#"{"collision_radius": 1e12}"#,
            r#"{"collision_radius": 0}"#,
            r#"{"collision_radius": -5}"#,
            r#"{"collision_radius": 25.5}"#,
        ] {
            assert!(
                matches!(GameConfig::from_json(json), Err(ConfigError::CollisionRadius(_))),
                "{json} should be rejected"
            );
        }
        let config = GameConfig::from_json(r#"{"collision_radius": 25}"#).unwrap();
        assert_eq!(config.collision_radius, MAX_COLLISION_RADIUS);
    }

    #[test]
    fn rejects_degenerate_dial() {
        assert!(matches!(
            GameConfig::from_json(r#"{"dial_radius": 0}"#),
            Err(ConfigError::DialRadius(_))
        ));
    }

    #[test]
    fn builder_validates_radius() {
        assert!(GameConfig::default().with_collision_radius(15.0).is_ok());
        assert!(matches!(
            GameConfig::default().with_collision_radius(f64::NAN),
            Err(ConfigError::CollisionRadius(_))
        ));
        assert!(GameConfig::default().validate().is_ok());
    }
}
