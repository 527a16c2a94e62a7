use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

// --- Enums for Choices ---
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EncodingType {
    #[default]
    Ppm,
    Png,
    Json,
    None,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkType {
    Directory,
    Stdout,
    #[default]
    Null,
}

/// File format of a config document, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

// --- Configuration Sections ---

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParticleSettings {
    /// Viewport area (px²) that earns one background particle.
    #[serde(default = "default_area_per_particle")]
    pub area_per_particle: f32,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default = "default_attraction_radius")]
    pub attraction_radius: f32,
    #[serde(default = "default_link_distance")]
    pub link_distance: f32,
}

fn default_area_per_particle() -> f32 { 15_000.0 }
fn default_max_count() -> usize { 150 }
fn default_attraction_radius() -> f32 { 100.0 }
fn default_link_distance() -> f32 { 120.0 }

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            area_per_particle: default_area_per_particle(),
            max_count: default_max_count(),
            attraction_radius: default_attraction_radius(),
            link_distance: default_link_distance(),
        }
    }
}

/// Frame-rate feedback on the particle count.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AdaptiveSettings {
    #[serde(default = "default_sample_ms")]
    pub sample_ms: f64,
    #[serde(default = "default_low_fps")]
    pub low_fps: u32,
    #[serde(default = "default_high_fps")]
    pub high_fps: u32,
    /// Shrinking only happens above this count.
    #[serde(default = "default_min_count_to_shrink")]
    pub min_count_to_shrink: usize,
    /// Refilling only happens below this count.
    #[serde(default = "default_max_count_to_refill")]
    pub max_count_to_refill: usize,
    #[serde(default = "default_shrink_factor")]
    pub shrink_factor: f32,
}

fn default_sample_ms() -> f64 { 1000.0 }
fn default_low_fps() -> u32 { 30 }
fn default_high_fps() -> u32 { 50 }
fn default_min_count_to_shrink() -> usize { 50 }
fn default_max_count_to_refill() -> usize { 100 }
fn default_shrink_factor() -> f32 { 0.8 }

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            sample_ms: default_sample_ms(),
            low_fps: default_low_fps(),
            high_fps: default_high_fps(),
            min_count_to_shrink: default_min_count_to_shrink(),
            max_count_to_refill: default_max_count_to_refill(),
            shrink_factor: default_shrink_factor(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SnakeSettings {
    #[serde(default = "default_snake_step")]
    pub step: f32,
    #[serde(default = "default_turn_probability")]
    pub turn_probability: f32,
    /// How long a brand-mark hover keeps the snake on screen.
    #[serde(default = "default_visible_ms")]
    pub visible_ms: f64,
}

fn default_snake_step() -> f32 { 10.0 }
fn default_turn_probability() -> f32 { 0.1 }
fn default_visible_ms() -> f64 { 5000.0 }

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            step: default_snake_step(),
            turn_probability: default_turn_probability(),
            visible_ms: default_visible_ms(),
        }
    }
}

/// Behaviour of the headless video device standing in for the phone demo.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct VideoSettings {
    #[serde(default = "default_true")]
    pub available: bool,
    /// Refuse unmuted playback, like a browser autoplay policy would.
    #[serde(default)]
    pub autoplay_blocked: bool,
}

fn default_true() -> bool { true }

impl Default for VideoSettings {
    fn default() -> Self {
        Self { available: true, autoplay_blocked: false }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OutputSettings {
    #[serde(default)]
    pub encoding: EncodingType,
    #[serde(default)]
    pub sink: SinkType,
    #[serde(default = "default_every_n_frames")]
    pub every_n_frames: u32,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

fn default_every_n_frames() -> u32 { 60 }
fn default_directory() -> PathBuf { PathBuf::from("frames") }

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            encoding: EncodingType::default(),
            sink: SinkType::default(),
            every_n_frames: default_every_n_frames(),
            directory: default_directory(),
        }
    }
}

/// Axis-aligned page region in viewport coordinates.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RectSettings {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A card revealed on scroll, by its page class and document offset.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CardSettings {
    pub kind: String,
    pub top: f32,
}

/// Where the page's interactive elements sit. Absent elements disable the
/// features that need them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    #[serde(default)]
    pub phone_frame: Option<RectSettings>,
    #[serde(default)]
    pub support_section: Option<RectSettings>,
    /// Full scrollable document height.
    #[serde(default = "default_document_height")]
    pub document_height: f32,
    #[serde(default = "default_parallax_shapes")]
    pub parallax_shapes: usize,
    #[serde(default)]
    pub cards: Vec<CardSettings>,
}

fn default_document_height() -> f32 { 4000.0 }
fn default_parallax_shapes() -> usize { 3 }

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            phone_frame: None,
            support_section: None,
            document_height: default_document_height(),
            parallax_shapes: default_parallax_shapes(),
            cards: Vec::new(),
        }
    }
}

/// Text content the page effects animate.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PageSettings {
    /// Typed out on load; no typewriter when absent.
    #[serde(default = "default_hero_title")]
    pub hero_title: Option<String>,
    /// Stat labels such as "50M+"; only labels with a number and a `+` or
    /// `M` animate.
    #[serde(default = "default_counters")]
    pub counters: Vec<String>,
}

fn default_hero_title() -> Option<String> { Some("Connecting People".to_string()) }
fn default_counters() -> Vec<String> { vec!["100M+".to_string(), "25+".to_string()] }

impl Default for PageSettings {
    fn default() -> Self {
        Self { hero_title: default_hero_title(), counters: default_counters() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RunSettings {
    /// Stop after this many frames; run until interrupted when absent.
    #[serde(default)]
    pub max_frames: Option<u64>,
    #[serde(default)]
    pub input_script: Option<PathBuf>,
}

// --- Top-Level Config Struct ---

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub mobile: bool,
    #[serde(default)]
    pub particles: ParticleSettings,
    #[serde(default)]
    pub adaptive: AdaptiveSettings,
    #[serde(default)]
    pub snake: SnakeSettings,
    #[serde(default)]
    pub video: VideoSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub page: PageSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub run: RunSettings,
}

fn default_framerate() -> u32 { 60 }

impl Default for Config {
    fn default() -> Self {
        Self {
            framerate: default_framerate(),
            viewport: ViewportSettings::default(),
            seed: None,
            reduced_motion: false,
            mobile: false,
            particles: ParticleSettings::default(),
            adaptive: AdaptiveSettings::default(),
            snake: SnakeSettings::default(),
            video: VideoSettings::default(),
            layout: LayoutSettings::default(),
            page: PageSettings::default(),
            output: OutputSettings::default(),
            run: RunSettings::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.framerate == 0 {
            return Err(ConfigError::Validation("Framerate cannot be zero.".to_string()));
        }

        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Validation("Viewport dimensions must be positive.".to_string()));
        }

        if self.particles.area_per_particle <= 0.0 {
            return Err(ConfigError::Validation("Area per particle must be positive.".to_string()));
        }

        let adaptive = &self.adaptive;
        if !(adaptive.shrink_factor > 0.0 && adaptive.shrink_factor < 1.0) {
            return Err(ConfigError::Validation(format!(
                "Shrink factor must be in (0, 1), got {}.",
                adaptive.shrink_factor
            )));
        }
        if adaptive.low_fps >= adaptive.high_fps {
            return Err(ConfigError::Validation(format!(
                "low_fps ({}) must be below high_fps ({}).",
                adaptive.low_fps, adaptive.high_fps
            )));
        }
        if adaptive.sample_ms <= 0.0 {
            return Err(ConfigError::Validation("Sample window must be positive.".to_string()));
        }

        if !(0.0..=1.0).contains(&self.snake.turn_probability) {
            return Err(ConfigError::Validation("Snake turn probability must be in [0, 1].".to_string()));
        }

        let regions = [&self.layout.phone_frame, &self.layout.support_section];
        if regions.iter().filter_map(|r| r.as_ref()).any(|r| r.width <= 0.0 || r.height <= 0.0) {
            return Err(ConfigError::Validation("Layout regions must have a positive size.".to_string()));
        }

        if self.output.every_n_frames == 0 {
            return Err(ConfigError::Validation("every_n_frames cannot be zero.".to_string()));
        }

        Ok(())
    }
}

// --- Loading Functions ---

pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, ConfigFormat::from_path(path))
}
