use crate::animation::Easing;
use crate::chart::ColorTemplate;
use crate::gesture::{DEFAULT_FRICTION, DRAG_THRESHOLD, GestureSettings};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds.
    pub duration: f64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: 1.4,
            easing: Easing::EaseInOutSine,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TickConfig {
    pub rate_hz: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { rate_hz: 60.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rotation_enabled: bool,
    pub drag_deceleration_enabled: bool,
    pub friction: f64,
    /// Initial rotation in degrees.
    pub rotation_angle: f64,
    pub highlight_per_tap: bool,
    pub drag_threshold: f64,
    pub color_template: ColorTemplate,
    pub animation: AnimationConfig,
    pub ticks: TickConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rotation_enabled: true,
            drag_deceleration_enabled: true,
            friction: DEFAULT_FRICTION,
            rotation_angle: 0.0,
            highlight_per_tap: true,
            drag_threshold: DRAG_THRESHOLD,
            color_template: ColorTemplate::default(),
            animation: AnimationConfig::default(),
            ticks: TickConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn gesture_settings(&self) -> GestureSettings {
        let mut settings = GestureSettings::default();
        settings.rotation_enabled = self.rotation_enabled;
        settings.drag_deceleration_enabled = self.drag_deceleration_enabled;
        settings.drag_threshold = self.drag_threshold;
        settings.with_friction(self.friction)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "rotary", "rotary").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ROTARY")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Falls back to defaults when the file is missing or broken.
pub fn load_or_default() -> EngineConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            EngineConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
