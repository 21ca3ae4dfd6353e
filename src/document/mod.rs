//! Document sinks: where composed pages end up.
//!
//! The composer only needs to create pages, place an image, draw text runs,
//! measure text and save. [`SvgDocument`] is the bundled implementation.

mod svg_builder;
mod svg_document;

use std::path::Path;

use crate::error::Result;
use crate::geometry::Point;
use crate::renderer::fonts::FontFace;
use crate::renderer::plan::FieldImage;
use crate::renderer::transform::{PageRotation, Rect};

pub use svg_document::SvgDocument;

/// Opaque reference to a page created by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(pub(crate) usize);

impl PageHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Output document the composer draws into.
///
/// Coordinates passed to drawing calls are physical page coordinates in
/// points, origin bottom-left, y up. Dropping the sink releases every page.
pub trait DocumentSink {
    /// Append a new page shown with `orientation`.
    fn create_page(&mut self, orientation: PageRotation) -> Result<PageHandle>;

    fn draw_image(&mut self, page: PageHandle, image: &FieldImage, rect: Rect) -> Result<()>;

    fn draw_text_run(
        &mut self,
        page: PageHandle,
        face: FontFace,
        size: f64,
        at: Point,
        text: &str,
    ) -> Result<()>;

    fn measure_text_width(&self, face: FontFace, size: f64, text: &str) -> f64;

    fn page_count(&self) -> usize;

    fn save(&mut self, path: &Path) -> Result<()>;
}
