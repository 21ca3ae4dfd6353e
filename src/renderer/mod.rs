//! Drill renderer: turns a drill into one composed page per move.
//!
//! The field image is described as a [`DrawingPlan`](plan::DrawingPlan) in
//! render coordinates; the page text (header, comments, grouped command
//! listing) is laid out in logical landscape page coordinates. Both are
//! handed to a [`DocumentSink`] through the page transform.

pub(crate) mod constants;
pub mod composer;
pub mod field_view;
pub mod fonts;
pub mod paths;
pub mod plan;
pub mod text_layout;
pub mod transform;
pub mod wrap;

use crate::document::DocumentSink;
use crate::error::Result;
use crate::model::{DrillInfo, Field, FieldStyle};

pub use composer::{measure_ranges, MeasureRange, PageComposer, PageGeometry, PagePlan};
pub use field_view::render_field_image;
pub use fonts::{FontFace, FontMetrics, TextMeasure};
pub use paths::{arrowhead, Arrowhead};
pub use plan::{DrawOp, DrawingPlan, FieldImage, Stroke, TextAnchor};
pub use text_layout::{
    group_commands, layout_move_text, CommandGroup, LayoutEntry, LayoutOptions, MoveTextLayout,
    TextArea, TextRun,
};
pub use transform::{PageRotation, PageTransform, Rect, RenderTransform, Size};
pub use wrap::wrap;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Compose every move of `drill` into `sink`, one page per move, in order.
///
/// Nothing is saved; the caller decides when (and whether) to call
/// [`DocumentSink::save`]. Any error stops generation at that move.
pub fn compose_document<S: DocumentSink + ?Sized>(
    drill: &DrillInfo,
    field: &Field,
    style: &FieldStyle,
    sink: &mut S,
) -> Result<()> {
    PageComposer::new(field, style)?.compose(drill, sink)
}

/// Same output as [`compose_document`], with page plans built on the rayon
/// thread pool before being appended to `sink` in move order. Text is
/// measured through the sink from every worker, hence the `Sync` bound.
pub fn compose_document_parallel<S: DocumentSink + Sync + ?Sized>(
    drill: &DrillInfo,
    field: &Field,
    style: &FieldStyle,
    sink: &mut S,
) -> Result<()> {
    PageComposer::new(field, style)?.compose_parallel(drill, sink)
}
