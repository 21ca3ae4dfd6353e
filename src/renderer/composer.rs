//! Page composer: one landscape page per move.
//!
//! Page plans are pure data built from the field, the style, the drill and
//! the move's precomputed measure range, so they can be produced in any
//! order (or in parallel) and then appended to the sink in move order.

use rayon::prelude::*;
use serde::Serialize;

use crate::document::{DocumentSink, PageHandle};
use crate::error::{DrillError, Result};
use crate::geometry::Point;
use crate::model::{DrillInfo, Field, FieldStyle, Move};
use super::constants::*;
use super::field_view::render_field_image;
use super::fonts::{FontFace, FontMetrics, TextMeasure};
use super::plan::FieldImage;
use super::text_layout::{layout_move_text, LayoutOptions, MoveTextLayout, TextArea, TextRun};
use super::transform::{PageRotation, PageTransform, Rect, Size};

// ═══════════════════════════════════════════════════════════════════════
// Measure ranges
// ═══════════════════════════════════════════════════════════════════════

/// Measures a move spans: `begin` is the count of measures before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeasureRange {
    pub begin: u32,
    pub end: u32,
}

impl MeasureRange {
    /// Header text, e.g. `Measures: 3 - 4`.
    pub fn label(&self) -> String {
        if self.begin == self.end {
            format!("Measures: {} - {}", self.begin, self.end)
        } else {
            format!("Measures: {} - {}", self.begin + 1, self.end)
        }
    }
}

/// Prefix sum of whole measures over the moves.
///
/// Fails when the running total no longer fits a measure number.
pub fn measure_ranges(moves: &[Move]) -> Result<Vec<MeasureRange>> {
    let mut end = 0u32;
    moves
        .iter()
        .enumerate()
        .map(|(i, mv)| {
            let begin = end;
            end = begin.checked_add(mv.measures()).ok_or_else(|| {
                DrillError::config(format!("measure count overflows at move {i}"))
            })?;
            Ok(MeasureRange { begin, end })
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Page geometry
// ═══════════════════════════════════════════════════════════════════════

/// Where things go on a logical (landscape, y-up) page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub drill_width: f64,
    pub drill_height: f64,
    pub drill_margin_x: f64,
    /// Left edge of the playing surface inside the drawing area
    pub field_margin_x: f64,
    pub drill_margin_y: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
}

impl PageGeometry {
    pub fn new(field: &Field, page: Size) -> Self {
        let drill_width = DRILL_WIDTH_RATIO * page.width;
        let drill_height = drill_width / field.aspect_ratio();
        let drill_margin_x = (page.width - drill_width) / 2.0;
        let px_per_point = IMAGE_DPI / POINTS_PER_INCH;
        Self {
            page_width: page.width,
            page_height: page.height,
            drill_width,
            drill_height,
            drill_margin_x,
            field_margin_x: drill_margin_x
                + field.endzone_width / field.total_length() * drill_width,
            drill_margin_y: DRILL_MARGIN_Y_RATIO * page.height,
            image_width_px: (drill_width * px_per_point) as u32,
            image_height_px: (drill_height * px_per_point) as u32,
        }
    }

    /// Baseline of the header line.
    pub fn header_y(&self) -> f64 {
        self.page_height - self.drill_margin_y
    }

    pub fn image_rect(&self) -> Rect {
        Rect::new(
            self.drill_margin_x,
            self.page_height - self.drill_height - self.drill_margin_y,
            self.drill_width,
            self.drill_height,
        )
    }

    /// Space below the image for comments and the command listing.
    pub fn text_area(&self, options: &LayoutOptions) -> TextArea {
        TextArea {
            left: self.field_margin_x,
            width: self.page_width - 2.0 * self.field_margin_x,
            top: self.page_height - (self.drill_margin_y + self.drill_height + options.body_font_size),
            bottom: self.drill_margin_y,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Page plans
// ═══════════════════════════════════════════════════════════════════════

/// Everything drawn on one page, in logical page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan {
    pub move_index: usize,
    pub measures: MeasureRange,
    pub image: FieldImage,
    pub image_rect: Rect,
    /// Title, measure range and move label
    pub header: Vec<TextRun>,
    /// Comments and command listing; absent on the opening move
    pub text: Option<MoveTextLayout>,
}

impl PagePlan {
    /// Header runs followed by listing runs.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.header
            .iter()
            .chain(self.text.iter().flat_map(|t| t.runs.iter()))
    }
}

/// Adapts a sink's text measurement to the layout engine.
struct SinkMetrics<'a, S: ?Sized>(&'a S);

impl<S: DocumentSink + ?Sized> TextMeasure for SinkMetrics<'_, S> {
    fn text_width(&self, face: FontFace, size: f64, text: &str) -> f64 {
        self.0.measure_text_width(face, size, text)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Composer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct PageComposer<'a> {
    field: &'a Field,
    style: &'a FieldStyle,
    options: LayoutOptions,
    page: Size,
}

impl<'a> PageComposer<'a> {
    /// Composer for US Letter pages shown landscape.
    pub fn new(field: &'a Field, style: &'a FieldStyle) -> Result<Self> {
        field.validate()?;
        style.validate()?;
        Ok(Self {
            field,
            style,
            options: LayoutOptions::default(),
            page: Size::new(PAGE_PORTRAIT_HEIGHT, PAGE_PORTRAIT_WIDTH),
        })
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.field, self.page)
    }

    /// Build the plan for `drill.moves[move_index]`.
    pub fn plan_page<M: TextMeasure + ?Sized>(
        &self,
        drill: &DrillInfo,
        move_index: usize,
        measures: MeasureRange,
        metrics: &M,
    ) -> Result<PagePlan> {
        let mv = drill
            .moves
            .get(move_index)
            .ok_or(DrillError::UnknownMove(move_index))?;
        let geo = self.geometry();

        let image = render_field_image(
            self.field,
            self.style,
            &mv.end_positions,
            geo.image_width_px,
            geo.image_height_px,
        )?;

        let size = self.options.body_font_size;
        let header_y = geo.header_y();
        let measure_text = measures.label();
        let move_label = format!("Move {move_index}");
        let measure_w = metrics.text_width(FontFace::Regular, size, &measure_text);
        let move_w = metrics.text_width(FontFace::Regular, size, &move_label);

        let header = vec![
            header_run(size, geo.field_margin_x, header_y, drill.song_name.clone()),
            header_run(size, (geo.page_width - measure_w) / 2.0, header_y, measure_text),
            header_run(size, geo.page_width - geo.field_margin_x - move_w, header_y, move_label),
        ];

        let text = if move_index > 0 {
            let area = geo.text_area(&self.options);
            Some(layout_move_text(move_index, mv, &area, &self.options, metrics)?)
        } else {
            None
        };

        tracing::debug!(
            move_index,
            begin = measures.begin,
            end = measures.end,
            entries = text.as_ref().map_or(0, |t| t.entries.len()),
            "page planned"
        );

        Ok(PagePlan {
            move_index,
            measures,
            image,
            image_rect: geo.image_rect(),
            header,
            text,
        })
    }

    /// Plans for every move, built one after another with the built-in
    /// Helvetica metrics.
    pub fn plan_pages(&self, drill: &DrillInfo) -> Result<Vec<PagePlan>> {
        drill.validate()?;
        measure_ranges(&drill.moves)?
            .into_iter()
            .enumerate()
            .map(|(i, range)| self.plan_page(drill, i, range, &FontMetrics))
            .collect()
    }

    /// Plans for every move, built on the rayon pool with the built-in
    /// Helvetica metrics. Output is in move order.
    pub fn plan_pages_parallel(&self, drill: &DrillInfo) -> Result<Vec<PagePlan>> {
        self.plan_pages_parallel_with(drill, &FontMetrics)
    }

    /// Like [`plan_pages_parallel`](Self::plan_pages_parallel), measuring
    /// text with `metrics`.
    pub fn plan_pages_parallel_with<M: TextMeasure + Sync + ?Sized>(
        &self,
        drill: &DrillInfo,
        metrics: &M,
    ) -> Result<Vec<PagePlan>> {
        drill.validate()?;
        measure_ranges(&drill.moves)?
            .into_par_iter()
            .enumerate()
            .map(|(i, range)| self.plan_page(drill, i, range, metrics))
            .collect()
    }

    /// Append one planned page to the sink.
    pub fn emit_page<S: DocumentSink + ?Sized>(&self, sink: &mut S, plan: &PagePlan) -> Result<PageHandle> {
        let page = sink.create_page(PageRotation::Landscape)?;
        let to_page = PageTransform::rotated(PageRotation::Landscape, self.page.height);

        sink.draw_image(page, &plan.image, to_page.rect_to_page(plan.image_rect))?;
        for run in plan.runs() {
            sink.draw_text_run(page, run.face, run.size, to_page.to_page(run.at), &run.text)?;
        }
        Ok(page)
    }

    /// Compose the whole drill into `sink`, one page per move, measuring
    /// text with the sink's own metrics.
    pub fn compose<S: DocumentSink + ?Sized>(&self, drill: &DrillInfo, sink: &mut S) -> Result<()> {
        drill.validate()?;
        for (i, range) in measure_ranges(&drill.moves)?.into_iter().enumerate() {
            let plan = self.plan_page(drill, i, range, &SinkMetrics(&*sink))?;
            self.emit_page(sink, &plan)?;
        }
        Ok(())
    }

    /// Like [`compose`](Self::compose), but pages are planned in parallel.
    /// Text is still measured by the sink, so line breaks match.
    pub fn compose_parallel<S: DocumentSink + Sync + ?Sized>(&self, drill: &DrillInfo, sink: &mut S) -> Result<()> {
        let plans = self.plan_pages_parallel_with(drill, &SinkMetrics(&*sink))?;
        for plan in &plans {
            self.emit_page(sink, plan)?;
        }
        Ok(())
    }
}

fn header_run(size: f64, x: f64, y: f64, text: String) -> TextRun {
    TextRun {
        face: FontFace::Regular,
        size,
        at: Point::new(x, y),
        text,
    }
}
