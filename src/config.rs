use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use fandial_core::{Color, DialColors, LabelTable};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An opaque sRGB color written as `#RRGGBB` or `#RGB`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn to_color(self) -> Color {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidColor(trimmed.to_string());
        let digits = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        digits.parse::<Srgb<u8>>().map(Self).map_err(|_| invalid())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(alias = "lowColor")]
    pub low_color: HexColor,
    #[serde(alias = "mediumColor")]
    pub medium_color: HexColor,
    #[serde(alias = "highColor")]
    pub high_color: HexColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            low_color: HexColor::rgb(0xFF, 0xEB, 0x3B),
            medium_color: HexColor::rgb(0xCD, 0xDC, 0x39),
            high_color: HexColor::rgb(0x00, 0x96, 0x88),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelConfig {
    pub off: String,
    pub low: String,
    pub medium: String,
    pub high: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            off: "off".to_string(),
            low: "1".to_string(),
            medium: "2".to_string(),
            high: "3".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl Config {
    pub fn dial_colors(&self) -> DialColors {
        DialColors::new(
            self.colors.low_color.to_color(),
            self.colors.medium_color.to_color(),
            self.colors.high_color.to_color(),
        )
    }

    pub fn label_table(&self) -> LabelTable {
        let LabelConfig {
            off,
            low,
            medium,
            high,
        } = self.labels.clone();
        LabelTable::from_levels([off, low, medium, high])
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Invalid color '{0}', expected #RRGGBB or #RGB")]
    InvalidColor(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fandial", "fandial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// The `--config` override or the per-user default, always absolute so the
/// loader, the watcher and `init-config` agree on one file.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let path = match explicit {
        Some(path) => path,
        None => get_config_path()?,
    };
    Ok(std::path::absolute(path)?)
}

/// `FANDIAL_<SECTION>__<KEY>`, e.g. `FANDIAL_COLORS__HIGH_COLOR`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("FANDIAL")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, environment())
}

fn load_config_with(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}; using defaults", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn is_config_change(event: &notify::Event, config_file: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_file)
}

/// Sends `ConfigReload` whenever the config file is written, created or
/// removed. The parent directory is watched so editors that replace the file
/// are still seen.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_file = match std::path::absolute(&config_path) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Cannot resolve {}: {}", config_path.display(), e);
            return;
        }
    };
    let Some(watch_dir) = config_file.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&watch_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (fs_tx, fs_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| w.watch(&watch_dir, RecursiveMode::NonRecursive).map(|()| w));

    // Dropping the watcher stops the notifications.
    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Cannot watch {}: {}", watch_dir.display(), ConfigError::from(e));
            return;
        }
    };
    log::info!("Watching {} for changes", config_file.display());

    while let Ok(res) = fs_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !is_config_change(&event, &config_file) {
            continue;
        }
        log::debug!("{} changed", config_file.display());
        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let cases = vec![
            ("#FFEB3B", HexColor::rgb(0xFF, 0xEB, 0x3B)),
            ("#ffeb3b", HexColor::rgb(0xFF, 0xEB, 0x3B)),
            ("  #009688 ", HexColor::rgb(0x00, 0x96, 0x88)),
            ("#fff", HexColor::rgb(0xFF, 0xFF, 0xFF)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<HexColor>().unwrap(), expected);
        }

        for bad in ["", "#12", "teal", "#GGGGGG", "fff", "009688"] {
            assert!(matches!(
                bad.parse::<HexColor>(),
                Err(ConfigError::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn test_hex_color_display() {
        assert_eq!(HexColor::rgb(0xCD, 0xDC, 0x39).to_string(), "#CDDC39");
    }

    #[test]
    fn test_color_deserialization() {
        let json = r##"{ "colors": { "lowColor": "#010203", "high_color": "#0a0b0c" } }"##;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.colors.low_color, HexColor::rgb(1, 2, 3));
        assert_eq!(config.colors.medium_color, ColorConfig::default().medium_color);
        assert_eq!(config.colors.high_color, HexColor::rgb(10, 11, 12));
        assert_eq!(config.labels, LabelConfig::default());

        assert!(serde_json::from_str::<Config>(r#"{ "colors": { "low_color": "red" } }"#).is_err());
    }

    #[test]
    fn test_defaults_match_documented_config() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("fandial-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(
            &path,
            "[colors]\nhigh_color = \"#FF0000\"\n\n[labels]\nhigh = \"max\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.colors.high_color, HexColor::rgb(0xFF, 0, 0));
        assert_eq!(config.colors.low_color, ColorConfig::default().low_color);
        assert_eq!(config.label_table().label_for(fandial_core::Level::High), "max");

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("fandial-does-not-exist/config.toml");
        assert_eq!(load_or_default(&path), Config::default());
    }

    #[test]
    fn test_dial_colors_convert_to_unit_range() {
        let colors = Config::default().dial_colors();
        let (r, g, b, a) = colors.high.into_components();
        assert_eq!(r, 0.0);
        assert!((g - 150.0 / 255.0).abs() < 1e-9);
        assert!((b - 136.0 / 255.0).abs() < 1e-9);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join("fandial-env-test-does-not-exist/config.toml");
        let vars = [
            ("FANDIAL_COLORS__HIGH_COLOR", "#0A0B0C"),
            ("FANDIAL_LABELS__OFF", "stop"),
            // Missing the single `_` after the prefix; not ours.
            ("FANDIAL__COLORS__LOW_COLOR", "#010101"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = load_config_with(&path, environment().source(Some(vars))).unwrap();
        assert_eq!(config.colors.high_color, HexColor::rgb(0x0A, 0x0B, 0x0C));
        assert_eq!(config.colors.low_color, ColorConfig::default().low_color);
        assert_eq!(config.labels.off, "stop");
    }

    #[test]
    fn test_resolved_path_is_absolute() {
        let cases = vec![
            PathBuf::from("config.toml"),
            PathBuf::from("sub/config.toml"),
            std::env::temp_dir().join("config.toml"),
        ];

        for explicit in cases {
            let resolved = resolve_config_path(Some(explicit.clone())).unwrap();
            assert!(resolved.is_absolute(), "{}", resolved.display());
            assert!(resolved.ends_with(&explicit) || explicit.is_absolute());
        }
    }

    #[test]
    fn test_config_change_filter() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let file = std::env::temp_dir().join("fandial/config.toml");
        let other = std::env::temp_dir().join("fandial/other.toml");
        let cases = vec![
            (EventKind::Modify(ModifyKind::Any), file.clone(), true),
            (EventKind::Create(CreateKind::File), file.clone(), true),
            (EventKind::Modify(ModifyKind::Any), other, false),
            (EventKind::Access(AccessKind::Any), file.clone(), false),
        ];

        for (kind, path, expected) in cases {
            let event = notify::Event::new(kind).add_path(path);
            assert_eq!(is_config_change(&event, &file), expected, "{:?}", event);
        }
    }

    /// Starts the watcher on `watched` and rewrites `written` until a reload
    /// arrives or the deadline passes.
    async fn reload_after_write(watched: PathBuf, written: &Path) -> bool {
        let (tx, rx) = async_channel::unbounded();
        let task = tokio::spawn(run_async_watcher(watched, tx));

        let delivered = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            for attempt in 0u32.. {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                fs_err::write(written, format!("[labels]\noff = \"v{attempt}\"\n")).unwrap();
                if let Ok(Ok(event)) =
                    tokio::time::timeout(std::time::Duration::from_millis(200), rx.recv()).await
                {
                    return matches!(event, AppEvent::ConfigReload);
                }
            }
            false
        })
        .await
        .unwrap_or(false);

        task.abort();
        delivered
    }

    #[tokio::test]
    async fn test_watcher_reports_write() {
        let dir = std::env::temp_dir().join(format!("fandial-watch-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();

        assert!(reload_after_write(path.clone(), &path).await);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_watcher_accepts_relative_path() {
        let relative = PathBuf::from(format!("target/fandial-watch-rel-{}", std::process::id()));
        let path = relative.join("config.toml");
        fs_err::create_dir_all(&relative).unwrap();

        assert!(path.is_relative());
        assert!(reload_after_write(path.clone(), &path).await);

        fs_err::remove_dir_all(&relative).unwrap();
    }
}
