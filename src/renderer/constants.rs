//! Shared constants for page composition (all in PDF points, 1/72 in).

// ── Page ────────────────────────────────────────────────────────────
/// US Letter, portrait as it sits in the printer.
pub(crate) const PAGE_PORTRAIT_WIDTH: f64 = 612.0;
pub(crate) const PAGE_PORTRAIT_HEIGHT: f64 = 792.0;

// ── Drill drawing area ──────────────────────────────────────────────
pub(super) const DRILL_WIDTH_RATIO: f64 = 0.85; // of page width
pub(super) const DRILL_MARGIN_Y_RATIO: f64 = 0.08; // of page height, top and bottom
pub(super) const IMAGE_DPI: f64 = 300.0;
pub(super) const POINTS_PER_INCH: f64 = 72.0;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const BODY_FONT_SIZE: f64 = 10.0;
pub(super) const COMMENT_FONT_SIZE: f64 = 12.0;
pub(super) const LINE_SPACING_FACTOR: f64 = 1.5; // of body font size
pub(super) const DEFAULT_COLUMNS: usize = 3;
pub(super) const COLUMN_FILL_RATIO: f64 = 0.95; // rest is gutter
pub(super) const RANK_BREAK_CHARS: &[char] = &[','];
pub(super) const COMMAND_BREAK_CHARS: &[char] = &[','];

// ── Field drawing (feet) ────────────────────────────────────────────
pub(super) const FIELD_NUMBER_INSET: f64 = 20.0; // from each sideline
pub(super) const LABEL_OUTLINE_RATIO: f64 = 0.1; // of label size
pub(super) const ARROW_APEX_ANGLE_DEG: f64 = 60.0;
