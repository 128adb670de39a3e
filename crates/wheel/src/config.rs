use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use steer::{Direction, Settings};
use strum::IntoEnumIterator;
use thiserror::Error;

pub const DEFAULT_SIZE: i32 = 200;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct DirectionLabel(String);

crate::impl_label_newtype!(DirectionLabel);

/// Sprite files. Unset entries fall back to the generated defaults in the
/// config directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct SpriteConfig {
    pub ball: Option<PathBuf>,
    pub ball_pressed: Option<PathBuf>,
    pub arrow: Option<PathBuf>,
}

impl SpriteConfig {
    pub const BALL_FILE: &'static str = "ball.png";
    pub const BALL_PRESSED_FILE: &'static str = "ball_pressed.png";
    pub const ARROW_FILE: &'static str = "arrow_right.png";

    pub fn resolve(&self, dir: Option<&Path>) -> Self {
        let pick = |explicit: &Option<PathBuf>, file: &str| {
            explicit.clone().or_else(|| dir.map(|d| d.join(file)))
        };
        Self {
            ball: pick(&self.ball, Self::BALL_FILE),
            ball_pressed: pick(&self.ball_pressed, Self::BALL_PRESSED_FILE),
            arrow: pick(&self.arrow, Self::ARROW_FILE),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub wheel: Settings,
    /// Requested widget size when the window does not dictate one.
    pub size: i32,
    pub padding: i32,
    /// Stroke colour as `#rrggbb`; the theme foreground is used when unset.
    pub color: Option<String>,
    pub sprites: SpriteConfig,
    pub labels: HashMap<Direction, DirectionLabel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wheel: Settings::default(),
            size: DEFAULT_SIZE,
            padding: 0,
            color: None,
            sprites: SpriteConfig::default(),
            labels: default_labels(),
        }
    }
}

impl Config {
    pub fn label(&self, direction: Direction) -> DirectionLabel {
        self.labels
            .get(&direction)
            .cloned()
            .unwrap_or_else(|| DirectionLabel::new(direction.to_string().to_lowercase()))
    }
}

fn default_labels() -> HashMap<Direction, DirectionLabel> {
    Direction::iter()
        .map(|d| (d, DirectionLabel::new(d.to_string().to_lowercase())))
        .collect()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "steer", "wheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("WHEEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    match write_default_config() {
        Ok(path) => log::debug!("Using config at {}", path.display()),
        Err(e) => log::error!("Failed to write default config: {}", e),
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = get_config_dir()?;
    fs_err::create_dir_all(&config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}
