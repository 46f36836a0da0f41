//! Game settings and tuning
//!
//! Everything the simulation reads at session start: quality preset, ship and
//! enemy tuning, spawn cadence, pool limits and audio levels. Loaded from
//! JSON in LocalStorage on the web; read from the file named by
//! `STAR_SHOOTER_SETTINGS` on native builds.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Background star count for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }

    /// Triangles per tessellated circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    pub health: i32,
    /// Horizontal speed (world units/s)
    pub speed: f32,
    pub radius: f32,
    /// Seconds between shots
    pub reload_interval: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_radius: f32,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            health: SHIP_HEALTH,
            speed: SHIP_SPEED,
            radius: SHIP_RADIUS,
            reload_interval: SHIP_RELOAD_INTERVAL,
            bullet_speed: PLAYER_BULLET_SPEED,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            bullet_radius: PLAYER_BULLET_RADIUS,
        }
    }
}

/// One enemy archetype the emitter can roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyKind {
    pub name: String,
    /// Relative spawn weight
    pub weight: f32,
    pub health: i32,
    /// Damage dealt to the ship on contact
    pub contact_damage: i32,
    pub radius: f32,
    /// Cruise speed once fully on screen (world units/s, downward)
    pub speed: f32,
    pub reload_interval: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_radius: f32,
    pub color: [f32; 4],
}

impl EnemyKind {
    pub fn small() -> Self {
        Self {
            name: "small".into(),
            weight: 0.5,
            health: 1,
            contact_damage: 1,
            radius: 0.05,
            speed: 0.2,
            reload_interval: 3.0,
            bullet_speed: 0.3,
            bullet_damage: 1,
            bullet_radius: 0.005,
            color: [0.9, 0.3, 0.3, 1.0],
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "medium".into(),
            weight: 0.3,
            health: 5,
            contact_damage: 5,
            radius: 0.06,
            speed: 0.03,
            reload_interval: 4.0,
            bullet_speed: 0.25,
            bullet_damage: 5,
            bullet_radius: 0.01,
            color: [0.95, 0.6, 0.2, 1.0],
        }
    }

    pub fn big() -> Self {
        Self {
            name: "big".into(),
            weight: 0.2,
            health: 10,
            contact_damage: 10,
            radius: 0.1,
            speed: 0.005,
            reload_interval: 1.0,
            bullet_speed: 0.3,
            bullet_damage: 10,
            bullet_radius: 0.02,
            color: [0.7, 0.25, 0.85, 1.0],
        }
    }
}

/// Enemy spawn cadence and roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    /// Seconds between spawns
    pub interval: f32,
    pub kinds: Vec<EnemyKind>,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            interval: EMITTER_INTERVAL,
            kinds: vec![EnemyKind::small(), EnemyKind::medium(), EnemyKind::big()],
        }
    }
}

/// Optional caps on pooled objects (`None` lets a pool grow)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub bullets: Option<usize>,
    pub enemies: Option<usize>,
    pub explosions: Option<usize>,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Overrides the preset's star count
    pub star_count: Option<usize>,

    // === Gameplay ===
    /// Ship fires on its reload cadence without holding the fire key
    pub auto_fire: bool,
    pub ship: ShipSettings,
    pub emitter: EmitterSettings,
    pub pools: PoolSettings,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            star_count: None,

            auto_fire: true,
            ship: ShipSettings::default(),
            emitter: EmitterSettings::default(),
            pools: PoolSettings::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective star count
    pub fn star_count(&self) -> usize {
        self.star_count.unwrap_or_else(|| self.quality.star_count())
    }

    /// Parse settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "star_shooter_settings";

    /// Environment variable naming a JSON settings file (native only)
    pub const ENV_PATH: &'static str = "STAR_SHOOTER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `STAR_SHOOTER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_PATH) {
            Ok(path) => Self::load_file(std::path::Path::new(&path)),
            Err(_) => Self::default(),
        }
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        let shown = path.display();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {shown}");
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {shown}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {shown}: {e}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "auto_fire": false, "ship": { "health": 5 } }"#)
            .expect("valid json");
        assert!(!settings.auto_fire);
        assert_eq!(settings.ship.health, 5);
        assert_eq!(settings.ship.speed, SHIP_SPEED);
        assert_eq!(settings.emitter.kinds.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        settings.pools.bullets = Some(64);
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parse back"), settings);
    }

    #[test]
    fn test_load_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir();

        let missing = dir.join("star_shooter_missing_settings.json");
        assert_eq!(Settings::load_file(&missing), Settings::default());

        let broken = dir.join("star_shooter_broken_settings.json");
        std::fs::write(&broken, "{ not json").expect("write temp file");
        assert_eq!(Settings::load_file(&broken), Settings::default());

        let valid = dir.join("star_shooter_valid_settings.json");
        std::fs::write(&valid, r#"{ "auto_fire": false }"#).expect("write temp file");
        assert!(!Settings::load_file(&valid).auto_fire);

        let _ = std::fs::remove_file(&broken);
        let _ = std::fs::remove_file(&valid);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_star_count_override() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.star_count(), 32);
        settings.star_count = Some(3);
        assert_eq!(settings.star_count(), 3);
    }

    #[test]
    fn test_quality_preset_detail_scales() {
        assert_eq!(QualityPreset::High.as_str(), "High");
        assert!(QualityPreset::Low.circle_segments() < QualityPreset::High.circle_segments());
        assert!(QualityPreset::Low.star_count() < QualityPreset::Medium.star_count());
    }
}
