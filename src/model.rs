//! Data model for a drill: the field it is charted on, the drawing style,
//! and the moves with their per-rank positions and commands.
//!
//! Everything here is a plain value built upstream by the charting tool and
//! consumed read-only by the renderer for one document pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::geometry::Point;

/// Rank coordinates are charted in yards; the field is measured in feet.
pub const FEET_PER_YARD: f64 = 3.0;

/// Musical beats per measure. Fixed for now; meter changes are not modelled.
pub const COUNTS_PER_MEASURE: u32 = 4;

// ═══════════════════════════════════════════════════════════════════════
// Color
// ═══════════════════════════════════════════════════════════════════════

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Field
// ═══════════════════════════════════════════════════════════════════════

/// Physical dimensions of a field, all in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Goal line to goal line
    pub length: f64,
    /// Sideline to sideline
    pub height: f64,
    /// Depth of each endzone
    pub endzone_width: f64,
    /// Margin drawn outside each sideline
    pub sideline_width: f64,
    /// Spacing of the grid lines (8-to-5 steps)
    pub increment: f64,
    /// Every Nth increment is a major (10 yd) line
    pub major_increment_frequency: u32,
    /// Every Nth increment is a minor (5 yd) line
    pub minor_increment_frequency: u32,
    /// Hash offsets measured from the near (front) sideline
    pub hashes: Vec<f64>,
}

impl Field {
    /// Build a field and check its invariants.
    pub fn new(
        length: f64,
        height: f64,
        endzone_width: f64,
        sideline_width: f64,
        increment: f64,
        major_increment_frequency: u32,
        minor_increment_frequency: u32,
        hashes: Vec<f64>,
    ) -> Result<Self> {
        let field = Self {
            length,
            height,
            endzone_width,
            sideline_width,
            increment,
            major_increment_frequency,
            minor_increment_frequency,
            hashes,
        };
        field.validate()?;
        Ok(field)
    }

    /// 100 yd × 160 ft college field, hashes 20 yd in from each sideline.
    pub fn college_football() -> Self {
        Self {
            length: 100.0 * FEET_PER_YARD,
            height: 160.0,
            endzone_width: 10.0 * FEET_PER_YARD,
            sideline_width: 15.0,
            increment: 10.0 * FEET_PER_YARD / 4.0,
            major_increment_frequency: 4,
            minor_increment_frequency: 2,
            hashes: vec![20.0 * FEET_PER_YARD, 20.0 * FEET_PER_YARD + 40.0],
        }
    }

    /// NFL field: same outline as college, hashes 18.5 ft apart.
    pub fn nfl() -> Self {
        Self {
            hashes: vec![70.75, 70.75 + 18.5],
            ..Self::college_football()
        }
    }

    /// Canadian field: 110 × 65 yd with 20 yd endzones.
    pub fn cfl() -> Self {
        Self {
            length: 110.0 * FEET_PER_YARD,
            height: 65.0 * FEET_PER_YARD,
            endzone_width: 20.0 * FEET_PER_YARD,
            sideline_width: 15.0,
            increment: 10.0 * FEET_PER_YARD / 4.0,
            major_increment_frequency: 4,
            minor_increment_frequency: 2,
            hashes: vec![24.0 * FEET_PER_YARD, 24.0 * FEET_PER_YARD + 51.0],
        }
    }

    pub fn total_length(&self) -> f64 {
        self.length + 2.0 * self.endzone_width
    }

    pub fn total_height(&self) -> f64 {
        self.height + 2.0 * self.sideline_width
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.total_length() / self.total_height()
    }

    /// Top-left corner of the playing surface in field feet.
    pub fn surface_origin(&self) -> Point {
        Point::new(self.endzone_width, self.sideline_width)
    }

    /// Convert a charted rank coordinate (yards from the playing-surface
    /// corner) into field feet.
    pub fn rank_to_feet(&self, p: Point) -> Point {
        p.multiply(FEET_PER_YARD).add(self.surface_origin())
    }

    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("length", self.length),
            ("height", self.height),
            ("endzone width", self.endzone_width),
            ("sideline width", self.sideline_width),
            ("increment", self.increment),
        ];
        for (name, value) in lengths {
            if !(value > 0.0 && value.is_finite()) {
                return Err(DrillError::config(format!(
                    "field {name} must be positive, got {value}"
                )));
            }
        }
        if self.major_increment_frequency == 0 || self.minor_increment_frequency == 0 {
            return Err(DrillError::config("increment frequencies must be positive"));
        }
        let total_height = self.total_height();
        if let Some(bad) = self
            .hashes
            .iter()
            .find(|&&h| !(0.0..=total_height).contains(&h))
        {
            return Err(DrillError::config(format!(
                "hash offset {bad} lies outside the field (0..={total_height})"
            )));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FieldStyle
// ═══════════════════════════════════════════════════════════════════════

/// Stroke widths, sizes and colors for drawing a field. Sizes are in feet so
/// they scale with the field.
///
/// Build with [`FieldStyle::builder`]; `FieldStyle::default()` is the
/// builder's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStyle {
    pub arrow_width: f64,
    pub rank_end_diameter: f64,
    pub rank_label_size: f64,
    pub rank_stroke_width: f64,

    pub field_number_size: f64,
    pub hash_width: f64,
    pub hash_period: f64,
    pub major_increment_width: f64,
    pub minor_increment_width: f64,
    pub grid_width: f64,

    pub rank_color: Color,
    pub rank_label_color: Color,
    /// Outline drawn behind rank labels; `None` draws the label unoutlined
    pub rank_label_background: Option<Color>,
}

impl FieldStyle {
    pub fn builder() -> FieldStyleBuilder {
        FieldStyleBuilder::default()
    }

    /// Every width and size must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("arrow width", self.arrow_width),
            ("rank end diameter", self.rank_end_diameter),
            ("rank label size", self.rank_label_size),
            ("rank stroke width", self.rank_stroke_width),
            ("field number size", self.field_number_size),
            ("hash width", self.hash_width),
            ("hash period", self.hash_period),
            ("major increment width", self.major_increment_width),
            ("minor increment width", self.minor_increment_width),
            ("grid width", self.grid_width),
        ];
        for (name, value) in sizes {
            if !(value > 0.0 && value.is_finite()) {
                return Err(DrillError::config(format!(
                    "style {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for FieldStyle {
    fn default() -> Self {
        FieldStyleBuilder::default().style
    }
}

/// Fluent builder for [`FieldStyle`].
///
/// Defaults: arrow 7.0, rank end 5.0, label 10.0, rank stroke 2.5,
/// field numbers 8.0, hash width 1.0 / period 5.2, grid 1.0 / 0.5 / 0.3,
/// blue ranks with red labels on a white outline.
#[derive(Debug, Clone)]
pub struct FieldStyleBuilder {
    style: FieldStyle,
}

impl Default for FieldStyleBuilder {
    fn default() -> Self {
        Self {
            style: FieldStyle {
                arrow_width: 7.0,
                rank_end_diameter: 5.0,
                rank_label_size: 10.0,
                rank_stroke_width: 2.5,
                field_number_size: 8.0,
                hash_width: 1.0,
                hash_period: 5.2,
                major_increment_width: 1.0,
                minor_increment_width: 0.5,
                grid_width: 0.3,
                rank_color: Color::BLUE,
                rank_label_color: Color::RED,
                rank_label_background: Some(Color::WHITE),
            },
        }
    }
}

impl FieldStyleBuilder {
    pub fn arrow_width(mut self, width: f64) -> Self {
        self.style.arrow_width = width;
        self
    }

    pub fn rank_end_diameter(mut self, diameter: f64) -> Self {
        self.style.rank_end_diameter = diameter;
        self
    }

    pub fn rank_label_size(mut self, size: f64) -> Self {
        self.style.rank_label_size = size;
        self
    }

    pub fn rank_stroke_width(mut self, width: f64) -> Self {
        self.style.rank_stroke_width = width;
        self
    }

    pub fn field_number_size(mut self, size: f64) -> Self {
        self.style.field_number_size = size;
        self
    }

    pub fn hashes(mut self, width: f64, period: f64) -> Self {
        self.style.hash_width = width;
        self.style.hash_period = period;
        self
    }

    pub fn grid(mut self, major: f64, minor: f64, grid: f64) -> Self {
        self.style.major_increment_width = major;
        self.style.minor_increment_width = minor;
        self.style.grid_width = grid;
        self
    }

    pub fn rank_color(mut self, color: Color) -> Self {
        self.style.rank_color = color;
        self
    }

    pub fn rank_label_color(mut self, color: Color) -> Self {
        self.style.rank_label_color = color;
        self
    }

    pub fn rank_label_background(mut self, color: Option<Color>) -> Self {
        self.style.rank_label_background = color;
        self
    }

    pub fn build(self) -> Result<FieldStyle> {
        self.style.validate()?;
        Ok(self.style)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Ranks
// ═══════════════════════════════════════════════════════════════════════

/// Shape of a rank's path. Only curves carry a control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RankPath {
    Line,
    Curve { control: Point },
    Corner,
}

/// End-of-move placement of one rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankPosition {
    pub path: RankPath,
    /// Where the front of the rank stands; the arrowhead is drawn here
    pub front: Point,
    pub end: Point,
    /// Label anchor. For corners this is the corner vertex.
    pub midpoint: Point,
}

impl RankPosition {
    pub fn line(front: Point, end: Point) -> Self {
        Self {
            path: RankPath::Line,
            front,
            end,
            midpoint: front.interpolate(end, 0.5),
        }
    }

    /// Quadratic curve; the label sits on the curve at `t = 0.5`.
    pub fn curve(front: Point, control: Point, end: Point) -> Self {
        let midpoint = front.interpolate(control, 0.5).interpolate(control.interpolate(end, 0.5), 0.5);
        Self {
            path: RankPath::Curve { control },
            front,
            end,
            midpoint,
        }
    }

    pub fn corner(front: Point, vertex: Point, end: Point) -> Self {
        Self {
            path: RankPath::Corner,
            front,
            end,
            midpoint: vertex,
        }
    }

    /// Build from the tag-based form used by charting tools
    /// (`"line"`, `"curve"`, `"corner"`, case-insensitive).
    pub fn from_tagged(
        rank: &str,
        line_type: &str,
        front: Point,
        midpoint: Point,
        end: Point,
        control: Option<Point>,
    ) -> Result<Self> {
        let path = match line_type.to_ascii_lowercase().as_str() {
            "line" => RankPath::Line,
            "corner" => RankPath::Corner,
            "curve" => match control {
                Some(control) => RankPath::Curve { control },
                None => return Err(DrillError::data(rank, "curve has no control point")),
            },
            other => {
                return Err(DrillError::data(rank, format!("unknown path type {other:?}")));
            }
        };
        Ok(Self { path, front, end, midpoint })
    }

    /// The point the arrowhead direction is measured from.
    pub fn arrow_reference(&self) -> Point {
        match self.path {
            RankPath::Line => self.end,
            RankPath::Curve { control } => control,
            RankPath::Corner => self.midpoint,
        }
    }

    /// Apply `f` to every point, including the curve control.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        let path = match self.path {
            RankPath::Curve { control } => RankPath::Curve { control: f(control) },
            other => other,
        };
        Self {
            path,
            front: f(self.front),
            end: f(self.end),
            midpoint: f(self.midpoint),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Moves and commands
// ═══════════════════════════════════════════════════════════════════════

/// One instruction a rank executes, e.g. `Forward 4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandPair {
    pub command: String,
    pub counts: u32,
}

impl CommandPair {
    pub fn new(command: impl Into<String>, counts: u32) -> Self {
        Self {
            command: command.into(),
            counts,
        }
    }
}

impl fmt::Display for CommandPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.command, self.counts)
    }
}

/// One formation change. Ranks are keyed by name, so iteration is in
/// rank-name order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Move {
    pub end_positions: BTreeMap<String, RankPosition>,
    pub commands: BTreeMap<String, Vec<CommandPair>>,
    /// Duration in counts
    pub counts: u32,
    #[serde(default)]
    pub comments: String,
}

impl Move {
    pub fn new(counts: u32) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }

    pub fn with_rank(mut self, name: &str, position: RankPosition) -> Self {
        self.end_positions.insert(name.to_string(), position);
        self
    }

    pub fn with_commands(mut self, name: &str, commands: Vec<CommandPair>) -> Self {
        self.commands.insert(name.to_string(), commands);
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Whole measures this move spans.
    pub fn measures(&self) -> u32 {
        self.counts / COUNTS_PER_MEASURE
    }
}

/// A whole drill: the song it is set to plus its moves in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrillInfo {
    pub song_name: String,
    pub moves: Vec<Move>,
}

impl DrillInfo {
    pub fn new(song_name: impl Into<String>) -> Self {
        Self {
            song_name: song_name.into(),
            moves: Vec::new(),
        }
    }

    pub fn with_move(mut self, mv: Move) -> Self {
        self.moves.push(mv);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(idx) = self.moves.iter().position(|m| m.counts == 0) {
            return Err(DrillError::config(format!("move {idx} has zero counts")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with_hashes(hashes: Vec<f64>) -> Result<Field> {
        Field::new(300.0, 160.0, 30.0, 15.0, 7.5, 4, 2, hashes)
    }

    #[test]
    fn hash_offsets_must_lie_on_the_field() {
        assert!(matches!(field_with_hashes(vec![-0.5]), Err(DrillError::Configuration(_))));
        // total height is 160 + 2 × 15
        assert!(matches!(field_with_hashes(vec![60.0, 190.5]), Err(DrillError::Configuration(_))));
    }

    #[test]
    fn hash_offset_bounds_are_inclusive() {
        let field = field_with_hashes(vec![0.0, 190.0]).unwrap();
        assert_eq!(field.hashes, vec![0.0, field.total_height()]);
    }

    #[test]
    fn increment_frequencies_must_be_positive() {
        let major = Field::new(300.0, 160.0, 30.0, 15.0, 7.5, 0, 2, vec![]);
        assert!(matches!(major, Err(DrillError::Configuration(_))));
        let minor = Field::new(300.0, 160.0, 30.0, 15.0, 7.5, 4, 0, vec![]);
        assert!(matches!(minor, Err(DrillError::Configuration(_))));
    }

    #[test]
    fn presets_are_valid() {
        for field in [Field::college_football(), Field::nfl(), Field::cfl()] {
            field.validate().unwrap();
        }
    }

    #[test]
    fn style_literal_is_checked_like_the_builder() {
        let style = FieldStyle {
            arrow_width: -7.0,
            ..FieldStyle::default()
        };
        assert!(matches!(style.validate(), Err(DrillError::Configuration(_))));

        let style = FieldStyle {
            grid_width: f64::NAN,
            ..FieldStyle::default()
        };
        assert!(style.validate().is_err());
        assert!(FieldStyle::builder().rank_label_size(0.0).build().is_err());
        FieldStyle::default().validate().unwrap();
    }
}
