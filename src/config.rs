//! Render configuration loaded from TOML.
//!
//! ```toml
//! [field]
//! preset = "college"      # or "nfl" / "cfl"; omit and give every dimension
//! hashes = [60.0, 100.0]  # any dimension may override the preset
//!
//! [style]
//! arrow_width = 6.0
//! rank_color = "#202080"
//! rank_label_background = "none"
//!
//! [layout]
//! columns = 4
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DrillError, Result};
use crate::model::{Color, Field, FieldStyle};
use crate::renderer::text_layout::LayoutOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPreset {
    College,
    Nfl,
    Cfl,
}

impl FieldPreset {
    pub fn field(self) -> Field {
        match self {
            FieldPreset::College => Field::college_football(),
            FieldPreset::Nfl => Field::nfl(),
            FieldPreset::Cfl => Field::cfl(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub preset: Option<FieldPreset>,
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub endzone_width: Option<f64>,
    pub sideline_width: Option<f64>,
    pub increment: Option<f64>,
    pub major_increment_frequency: Option<u32>,
    pub minor_increment_frequency: Option<u32>,
    pub hashes: Option<Vec<f64>>,
}

/// Style overrides; anything left out keeps the builder default.
/// Colors are `#rrggbb`; `rank_label_background` also accepts `"none"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    pub arrow_width: Option<f64>,
    pub rank_end_diameter: Option<f64>,
    pub rank_label_size: Option<f64>,
    pub rank_stroke_width: Option<f64>,
    pub field_number_size: Option<f64>,
    pub hash_width: Option<f64>,
    pub hash_period: Option<f64>,
    pub major_increment_width: Option<f64>,
    pub minor_increment_width: Option<f64>,
    pub grid_width: Option<f64>,
    pub rank_color: Option<String>,
    pub rank_label_color: Option<String>,
    pub rank_label_background: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub layout: LayoutOptions,
}

impl RenderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "render config loaded");
        Ok(config)
    }

    /// Resolve and validate everything the renderer needs.
    pub fn into_parts(self) -> Result<(Field, FieldStyle, LayoutOptions)> {
        let field = self.field.resolve()?;
        let style = self.style.resolve()?;
        self.layout.validate()?;
        Ok((field, style, self.layout))
    }
}

impl FieldConfig {
    fn resolve(self) -> Result<Field> {
        let base = self.preset.map(FieldPreset::field);
        let pick = |value: Option<f64>, name: &str, preset: Option<f64>| {
            value
                .or(preset)
                .ok_or_else(|| DrillError::config(format!("field {name} is required without a preset")))
        };

        Field::new(
            pick(self.length, "length", base.as_ref().map(|f| f.length))?,
            pick(self.height, "height", base.as_ref().map(|f| f.height))?,
            pick(self.endzone_width, "endzone_width", base.as_ref().map(|f| f.endzone_width))?,
            pick(self.sideline_width, "sideline_width", base.as_ref().map(|f| f.sideline_width))?,
            pick(self.increment, "increment", base.as_ref().map(|f| f.increment))?,
            self.major_increment_frequency
                .or(base.as_ref().map(|f| f.major_increment_frequency))
                .ok_or_else(|| DrillError::config("field major_increment_frequency is required without a preset"))?,
            self.minor_increment_frequency
                .or(base.as_ref().map(|f| f.minor_increment_frequency))
                .ok_or_else(|| DrillError::config("field minor_increment_frequency is required without a preset"))?,
            self.hashes
                .or_else(|| base.as_ref().map(|f| f.hashes.clone()))
                .unwrap_or_default(),
        )
    }
}

impl StyleConfig {
    fn resolve(self) -> Result<FieldStyle> {
        let defaults = FieldStyle::default();
        let mut builder = FieldStyle::builder()
            .arrow_width(self.arrow_width.unwrap_or(defaults.arrow_width))
            .rank_end_diameter(self.rank_end_diameter.unwrap_or(defaults.rank_end_diameter))
            .rank_label_size(self.rank_label_size.unwrap_or(defaults.rank_label_size))
            .rank_stroke_width(self.rank_stroke_width.unwrap_or(defaults.rank_stroke_width))
            .field_number_size(self.field_number_size.unwrap_or(defaults.field_number_size))
            .hashes(
                self.hash_width.unwrap_or(defaults.hash_width),
                self.hash_period.unwrap_or(defaults.hash_period),
            )
            .grid(
                self.major_increment_width.unwrap_or(defaults.major_increment_width),
                self.minor_increment_width.unwrap_or(defaults.minor_increment_width),
                self.grid_width.unwrap_or(defaults.grid_width),
            );

        if let Some(hex) = &self.rank_color {
            builder = builder.rank_color(parse_color("rank_color", hex)?);
        }
        if let Some(hex) = &self.rank_label_color {
            builder = builder.rank_label_color(parse_color("rank_label_color", hex)?);
        }
        if let Some(value) = &self.rank_label_background {
            let color = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_color("rank_label_background", value)?)
            };
            builder = builder.rank_label_background(color);
        }
        builder.build()
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color> {
    Color::from_hex(value)
        .ok_or_else(|| DrillError::config(format!("style {name}: {value:?} is not a #rrggbb color")))
}
