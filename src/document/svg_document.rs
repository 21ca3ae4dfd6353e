//! In-memory SVG document: pages stacked vertically in one SVG file.
//!
//! Drawing calls arrive in physical page coordinates (y up). Each page is
//! emitted the way a viewer shows it, so a page created landscape appears
//! upright and text is positioned, never transformed, to avoid mirroring.

use std::io::Write;
use std::path::Path;

use crate::error::{DrillError, Result};
use crate::geometry::Point;
use crate::renderer::constants::{PAGE_PORTRAIT_HEIGHT, PAGE_PORTRAIT_WIDTH};
use crate::renderer::fonts::{FontFace, FontMetrics, TextMeasure};
use crate::renderer::plan::{FieldImage, TextAnchor};
use crate::renderer::transform::{PageRotation, Rect, Size};
use crate::model::Color;
use super::svg_builder::SvgBuilder;
use super::{DocumentSink, PageHandle};

/// Vertical gap between stacked pages in the saved file.
const PAGE_GAP: f64 = 24.0;
const PAGE_BACKDROP: &str = "#d0d0d0";

#[derive(Debug)]
struct SvgPage {
    rotation: PageRotation,
    svg: SvgBuilder,
}

#[derive(Debug)]
pub struct SvgDocument {
    media: Size,
    metrics: FontMetrics,
    pages: Vec<SvgPage>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument {
    /// US Letter pages.
    pub fn new() -> Self {
        Self::with_media_box(Size::new(PAGE_PORTRAIT_WIDTH, PAGE_PORTRAIT_HEIGHT))
    }

    pub fn with_media_box(media: Size) -> Self {
        Self {
            media,
            metrics: FontMetrics,
            pages: Vec::new(),
        }
    }

    fn page_mut(&mut self, page: PageHandle) -> Result<&mut SvgPage> {
        self.pages.get_mut(page.0).ok_or(DrillError::UnknownPage(page.0))
    }

    fn display_size(&self, rotation: PageRotation) -> Size {
        match rotation {
            PageRotation::Portrait => self.media,
            PageRotation::Landscape => Size::new(self.media.height, self.media.width),
        }
    }

    /// Map a physical (y-up) point to where it shows on screen (y-down).
    fn to_display(&self, rotation: PageRotation, p: Point) -> Point {
        match rotation {
            PageRotation::Portrait => Point::new(p.x, self.media.height - p.y),
            // Viewer turns the page 90° clockwise
            PageRotation::Landscape => Point::new(p.y, p.x),
        }
    }

    /// The whole document as one SVG string.
    pub fn to_svg_string(&self) -> String {
        let sizes: Vec<Size> = self.pages.iter().map(|p| self.display_size(p.rotation)).collect();
        let width = sizes.iter().map(|s| s.width).fold(0.0, f64::max);
        let height = sizes.iter().map(|s| s.height).sum::<f64>()
            + PAGE_GAP * sizes.len().saturating_sub(1) as f64;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width, height, PAGE_BACKDROP
        ));
        svg.push('\n');

        let mut y = 0.0;
        for (page, size) in self.pages.iter().zip(&sizes) {
            let mut body = SvgBuilder::new();
            body.rect(0.0, 0.0, size.width, size.height, Some(Color::WHITE), None);
            body.elements.extend(page.svg.elements.iter().cloned());
            svg.push_str("  ");
            svg.push_str(&body.nested(0.0, y, size.width, size.height, size.width, size.height));
            svg.push('\n');
            y += size.height + PAGE_GAP;
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl DocumentSink for SvgDocument {
    fn create_page(&mut self, orientation: PageRotation) -> Result<PageHandle> {
        self.pages.push(SvgPage {
            rotation: orientation,
            svg: SvgBuilder::new(),
        });
        Ok(PageHandle(self.pages.len() - 1))
    }

    fn draw_image(&mut self, page: PageHandle, image: &FieldImage, rect: Rect) -> Result<()> {
        let rotation = self.page_mut(page)?.rotation;
        let a = self.to_display(rotation, Point::new(rect.x, rect.y));
        let b = self.to_display(rotation, Point::new(rect.x + rect.width, rect.y + rect.height));

        let mut content = SvgBuilder::new();
        content.plan(&image.plan);
        let element = content.nested(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
            image.width_px as f64,
            image.height_px as f64,
        );
        self.page_mut(page)?.svg.elements.push(element);
        Ok(())
    }

    fn draw_text_run(
        &mut self,
        page: PageHandle,
        face: FontFace,
        size: f64,
        at: Point,
        text: &str,
    ) -> Result<()> {
        let rotation = self.page_mut(page)?.rotation;
        let at = self.to_display(rotation, at);
        self.page_mut(page)?
            .svg
            .text(at, text, size, face, Color::BLACK, None, TextAnchor::Start);
        Ok(())
    }

    fn measure_text_width(&self, face: FontFace, size: f64, text: &str) -> f64 {
        self.metrics.text_width(face, size, text)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write through a temporary file next to `path` so a failed save never
    /// leaves a partial document behind.
    fn save(&mut self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_svg_string().as_bytes())?;
        tmp.flush()?;
        tmp.persist(path)?;
        tracing::info!(path = %path.display(), pages = self.pages.len(), "document saved");
        Ok(())
    }
}
