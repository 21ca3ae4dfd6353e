//! drillsheet: renders a marching-band drill as printable pages.
//!
//! Each move of a drill becomes one landscape page: a scaled football-field
//! diagram with every rank drawn at its end position, a header with the song
//! title and measure range, and a column-flowed listing of the commands each
//! group of ranks performs.
//!
//! # Example
//! ```no_run
//! use drillsheet::{render_drill_to_file, CommandPair, DrillInfo, Field, FieldStyle, Move, Point, RankPosition};
//!
//! let drill = DrillInfo::new("Fight Song")
//!     .with_move(Move::new(8).with_rank("A", RankPosition::line(Point::new(10.0, 10.0), Point::new(14.0, 10.0))))
//!     .with_move(
//!         Move::new(8)
//!             .with_rank("A", RankPosition::line(Point::new(10.0, 14.0), Point::new(14.0, 14.0)))
//!             .with_commands("A", vec![CommandPair::new("Forward", 4)]),
//!     );
//! render_drill_to_file(&drill, &Field::college_football(), &FieldStyle::default(), "drill.svg").unwrap();
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod model;
pub mod renderer;

use std::path::Path;

pub use config::RenderConfig;
pub use document::{DocumentSink, PageHandle, SvgDocument};
pub use error::{DrillError, GeometryError, Result};
pub use geometry::Point;
pub use model::*;
pub use renderer::{compose_document, compose_document_parallel, PageComposer, PagePlan};

/// Render every move of `drill` and save the pages as one SVG file.
pub fn render_drill_to_file<P: AsRef<Path>>(
    drill: &DrillInfo,
    field: &Field,
    style: &FieldStyle,
    path: P,
) -> Result<()> {
    let mut doc = SvgDocument::new();
    compose_document(drill, field, style, &mut doc)?;
    doc.save(path.as_ref())
}

/// Page plans for every move as pretty-printed JSON, for inspection and
/// golden comparisons.
pub fn page_plans_to_json(drill: &DrillInfo, field: &Field, style: &FieldStyle) -> Result<String> {
    let plans = PageComposer::new(field, style)?.plan_pages(drill)?;
    Ok(serde_json::to_string_pretty(&plans)?)
}
