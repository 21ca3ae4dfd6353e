//! Text layout for a move's page: the comments line and the grouped,
//! column-flowed command listing.
//!
//! Ranks that share an identical command sequence are listed together. Each
//! group is a bold label (`"A, B:"`) followed on the same line by its
//! commands, wrapped with a hanging indent inside one column. Groups fill a
//! row of columns left to right, then the cursor drops below the tallest
//! entry of that row.
//!
//! Coordinates are page points with y up (PDF user space).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::geometry::Point;
use crate::model::Move;
use super::constants::*;
use super::fonts::{FontFace, TextMeasure};
use super::wrap::wrap;

// ═══════════════════════════════════════════════════════════════════════
// Options and output types
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub columns: usize,
    pub body_font_size: f64,
    pub comment_font_size: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            body_font_size: BODY_FONT_SIZE,
            comment_font_size: COMMENT_FONT_SIZE,
        }
    }
}

impl LayoutOptions {
    pub fn line_spacing(&self) -> f64 {
        LINE_SPACING_FACTOR * self.body_font_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(DrillError::config("layout needs at least one column"));
        }
        if !(self.body_font_size > 0.0 && self.comment_font_size > 0.0) {
            return Err(DrillError::config("font sizes must be positive"));
        }
        Ok(())
    }
}

/// Region of the page the listing may use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextArea {
    /// Left edge of the first column
    pub left: f64,
    /// Width shared by all columns
    pub width: f64,
    /// Baseline the block hangs from (before the comments adjustment)
    pub top: f64,
    /// No baseline may fall below this
    pub bottom: f64,
}

/// A single positioned run of text in one face and size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub face: FontFace,
    pub size: f64,
    pub at: Point,
    pub text: String,
}

/// Ranks sharing one command sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandGroup {
    pub ranks: Vec<String>,
    /// Commands joined with ", "
    pub body: String,
}

impl CommandGroup {
    /// Rank names joined with ", " and a trailing colon.
    pub fn label(&self) -> String {
        format!("{}:", self.ranks.join(", "))
    }
}

/// One laid-out group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEntry {
    pub label: String,
    pub body: String,
    pub label_lines: Vec<String>,
    pub body_lines: Vec<String>,
    /// Label and body share the label's last line
    pub lines_used: usize,
    /// Baseline start of the entry's first label line
    pub origin: Point,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MoveTextLayout {
    pub comments: Option<TextRun>,
    pub entries: Vec<LayoutEntry>,
    /// Every run to draw, comments first, in drawing order
    pub runs: Vec<TextRun>,
}

impl MoveTextLayout {
    /// Lowest baseline used, if anything was laid out.
    pub fn lowest_baseline(&self) -> Option<f64> {
        self.runs.iter().map(|r| r.at.y).reduce(f64::min)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Grouping
// ═══════════════════════════════════════════════════════════════════════

/// Group a move's ranks by the display text of their command sequence.
///
/// Groups come out in the order their first rank appears in the move's
/// (name-ordered) rank set, and ranks inside a group keep that order too.
pub fn group_commands(mv: &Move) -> Vec<CommandGroup> {
    let mut groups: Vec<CommandGroup> = Vec::new();
    let mut by_body: HashMap<String, usize> = HashMap::new();

    for (rank, commands) in &mv.commands {
        let body = commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match by_body.get(&body) {
            Some(&idx) => groups[idx].ranks.push(rank.clone()),
            None => {
                by_body.insert(body.clone(), groups.len());
                groups.push(CommandGroup {
                    ranks: vec![rank.clone()],
                    body,
                });
            }
        }
    }
    groups
}

// ═══════════════════════════════════════════════════════════════════════
// Column flow
// ═══════════════════════════════════════════════════════════════════════

/// Lay out the comments line and command listing for one move.
///
/// Fails with [`DrillError::LayoutOverflow`] when the listing would run
/// below `area.bottom`.
pub fn layout_move_text<M: TextMeasure + ?Sized>(
    move_index: usize,
    mv: &Move,
    area: &TextArea,
    options: &LayoutOptions,
    metrics: &M,
) -> Result<MoveTextLayout> {
    options.validate()?;

    let body_size = options.body_font_size;
    let line_spacing = options.line_spacing();
    let mut layout = MoveTextLayout::default();
    let mut y = area.top;

    if !mv.comments.trim().is_empty() {
        y -= options.comment_font_size - body_size;
        let run = TextRun {
            face: FontFace::Regular,
            size: options.comment_font_size,
            at: Point::new(area.left, y),
            text: format!("Comments: {}", mv.comments.trim()),
        };
        layout.runs.push(run.clone());
        layout.comments = Some(run);
        y -= 2.0 * body_size;
    }

    let column_width = area.width / options.columns as f64;
    let max_width = column_width * COLUMN_FILL_RATIO;
    let bold = |s: &str| metrics.text_width(FontFace::Bold, body_size, s);
    let regular = |s: &str| metrics.text_width(FontFace::Regular, body_size, s);

    let mut x = area.left;
    let mut row_max_lines = 1;

    for (k, group) in group_commands(mv).into_iter().enumerate() {
        let label = group.label();
        let label_lines = wrap(&label, max_width, 0.0, RANK_BREAK_CHARS, bold);
        let last_label = label_lines.last().map(String::as_str).unwrap_or("");
        let body_offset = bold(&format!("{last_label} "));
        let body_lines = wrap(&group.body, max_width, body_offset, COMMAND_BREAK_CHARS, regular);

        for (i, line) in label_lines.iter().enumerate() {
            push_run(&mut layout.runs, FontFace::Bold, body_size, x, y - i as f64 * line_spacing, line);
        }
        let body_top = y - (label_lines.len() - 1) as f64 * line_spacing;
        for (j, line) in body_lines.iter().enumerate() {
            let indent = if j == 0 { body_offset } else { 0.0 };
            push_run(
                &mut layout.runs,
                FontFace::Regular,
                body_size,
                x + indent,
                body_top - j as f64 * line_spacing,
                line,
            );
        }

        let lines_used = label_lines.len() + body_lines.len() - 1;
        row_max_lines = row_max_lines.max(lines_used);
        layout.entries.push(LayoutEntry {
            label,
            body: group.body,
            label_lines,
            body_lines,
            lines_used,
            origin: Point::new(x, y),
        });

        if (k + 1) % options.columns == 0 {
            y -= (row_max_lines + 1) as f64 * line_spacing;
            x = area.left;
            row_max_lines = 1;
        } else {
            x += column_width;
        }
    }

    if let Some(lowest) = layout.lowest_baseline() {
        if lowest < area.bottom {
            return Err(DrillError::LayoutOverflow {
                move_index,
                lowest_baseline: lowest,
                bottom_margin: area.bottom,
            });
        }
    }

    Ok(layout)
}

fn push_run(runs: &mut Vec<TextRun>, face: FontFace, size: f64, x: f64, y: f64, text: &str) {
    if text.is_empty() {
        return;
    }
    runs.push(TextRun {
        face,
        size,
        at: Point::new(x, y),
        text: text.to_string(),
    });
}
