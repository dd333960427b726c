use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("color pattern is valid")
});

const BRAND_THRESHOLDS: [(&str, u32); 6] = [
    ("chanel", 23),
    ("dior", 22),
    ("yves-saint-laurent", 21),
    ("tom-ford", 8),
    ("jo-malone-london", 5),
    ("gucci", 11),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid color for `{field}`: {value}")]
    InvalidColor { field: &'static str, value: String },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite, non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// `radius = min(width, height) / radius_divisor`.
    pub radius_divisor: f64,
    /// Distance from the node circle to the label anchor.
    pub label_offset: f64,
    pub brand_label_font_size: f64,
    pub overview_label_font_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius_divisor: 2.6667,
            label_offset: 20.0,
            brand_label_font_size: 10.0,
            overview_label_font_size: 14.0,
        }
    }
}

impl LayoutConfig {
    pub fn label_font_size(&self, brand: Option<&str>) -> f64 {
        match brand {
            Some(_) => self.brand_label_font_size,
            None => self.overview_label_font_size,
        }
    }
}

/// Link weights must exceed these values to be drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub brands: BTreeMap<String, u32>,
    /// Brands missing from `brands`.
    pub default_threshold: u32,
    /// The unfiltered view. Aggregate counts run higher, so this sits above every brand.
    pub all_brands: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            brands: BRAND_THRESHOLDS
                .iter()
                .map(|(brand, threshold)| (brand.to_string(), *threshold))
                .collect(),
            default_threshold: 20,
            all_brands: 40,
        }
    }
}

impl ThresholdConfig {
    pub fn threshold_for(&self, brand: Option<&str>) -> u32 {
        match brand {
            Some(brand) => self
                .brands
                .get(brand)
                .copied()
                .unwrap_or(self.default_threshold),
            None => self.all_brands,
        }
    }

    pub fn brand_names(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Canvas size for per-brand views when every brand is rendered at once.
    pub brand_width: f64,
    pub brand_height: f64,
    pub node_radius: f64,
    pub highlighted_node_radius: f64,
    pub node_stroke_width: f64,
    pub link_min_width: f64,
    pub link_width_scale: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            brand_width: 500.0,
            brand_height: 500.0,
            node_radius: 6.0,
            highlighted_node_radius: 8.0,
            node_stroke_width: 1.5,
            link_min_width: 1.0,
            link_width_scale: 4.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub thresholds: ThresholdConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            thresholds: ThresholdConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    label_color: Option<String>,
    link_color: Option<String>,
    node_stroke: Option<String>,
    selected_stroke: Option<String>,
    dimmed_color: Option<String>,
    highlight_top: Option<String>,
    highlight_middle: Option<String>,
    highlight_base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    radius_divisor: Option<f64>,
    label_offset: Option<f64>,
    brand_label_font_size: Option<f64>,
    overview_label_font_size: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThresholdConfigFile {
    brands: Option<BTreeMap<String, u32>>,
    default_threshold: Option<u32>,
    all_brands: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    brand_width: Option<f64>,
    brand_height: Option<f64>,
    node_radius: Option<f64>,
    highlighted_node_radius: Option<f64>,
    node_stroke_width: Option<f64>,
    link_min_width: Option<f64>,
    link_width_scale: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    thresholds: Option<ThresholdConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON (or JSON5) config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = checked_color("background", v)?;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = checked_color("labelColor", v)?;
        }
        if let Some(v) = vars.link_color {
            config.theme.link_color = checked_color("linkColor", v)?;
        }
        if let Some(v) = vars.node_stroke {
            config.theme.node_stroke = checked_color("nodeStroke", v)?;
        }
        if let Some(v) = vars.selected_stroke {
            config.theme.selected_stroke = checked_color("selectedStroke", v)?;
        }
        if let Some(v) = vars.dimmed_color {
            config.theme.dimmed_color = checked_color("dimmedColor", v)?;
        }
        if let Some(v) = vars.highlight_top {
            config.theme.highlight_top = checked_color("highlightTop", v)?;
        }
        if let Some(v) = vars.highlight_middle {
            config.theme.highlight_middle = checked_color("highlightMiddle", v)?;
        }
        if let Some(v) = vars.highlight_base {
            config.theme.highlight_base = checked_color("highlightBase", v)?;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.radius_divisor {
            config.layout.radius_divisor = positive("radiusDivisor", v)?;
        }
        if let Some(v) = layout.label_offset {
            config.layout.label_offset = non_negative("labelOffset", v)?;
        }
        if let Some(v) = layout.brand_label_font_size {
            config.layout.brand_label_font_size = positive("brandLabelFontSize", v)?;
        }
        if let Some(v) = layout.overview_label_font_size {
            config.layout.overview_label_font_size = positive("overviewLabelFontSize", v)?;
        }
    }

    if let Some(thresholds) = parsed.thresholds {
        if let Some(brands) = thresholds.brands {
            config.thresholds.brands.extend(brands);
        }
        if let Some(v) = thresholds.default_threshold {
            config.thresholds.default_threshold = v;
        }
        if let Some(v) = thresholds.all_brands {
            config.thresholds.all_brands = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = positive("width", v)?;
        }
        if let Some(v) = render.height {
            config.render.height = positive("height", v)?;
        }
        if let Some(v) = render.brand_width {
            config.render.brand_width = positive("brandWidth", v)?;
        }
        if let Some(v) = render.brand_height {
            config.render.brand_height = positive("brandHeight", v)?;
        }
        if let Some(v) = render.node_radius {
            config.render.node_radius = positive("nodeRadius", v)?;
        }
        if let Some(v) = render.highlighted_node_radius {
            config.render.highlighted_node_radius = positive("highlightedNodeRadius", v)?;
        }
        if let Some(v) = render.node_stroke_width {
            config.render.node_stroke_width = non_negative("nodeStrokeWidth", v)?;
        }
        if let Some(v) = render.link_min_width {
            config.render.link_min_width = non_negative("linkMinWidth", v)?;
        }
        if let Some(v) = render.link_width_scale {
            config.render.link_width_scale = non_negative("linkWidthScale", v)?;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}

fn checked_color(field: &'static str, value: String) -> Result<String, ConfigError> {
    if COLOR_RE.is_match(value.trim()) {
        Ok(value.trim().to_string())
    } else {
        Err(ConfigError::InvalidColor { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
