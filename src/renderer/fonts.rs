//! Text width measurement for the two faces used on a page.
//!
//! Widths come from the standard Helvetica / Helvetica-Bold AFM advance
//! tables (1/1000 em), so measured text matches what a PDF viewer renders
//! with the base-14 fonts. Characters outside printable ASCII fall back to
//! an average advance.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub fn family(self) -> &'static str {
        "Helvetica, Arial, sans-serif"
    }

    pub fn weight(self) -> &'static str {
        match self {
            FontFace::Regular => "normal",
            FontFace::Bold => "bold",
        }
    }
}

/// Anything that can tell how wide a run of text is.
pub trait TextMeasure {
    fn text_width(&self, face: FontFace, size: f64, text: &str) -> f64;
}

/// Base-14 Helvetica metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics;

const FALLBACK_ADVANCE: u16 = 556;

// Advances for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // p..~
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn advance(face: FontFace, c: char) -> u16 {
    let table = match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    match c as u32 {
        code @ 0x20..=0x7e => table[(code - 0x20) as usize],
        _ => FALLBACK_ADVANCE,
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, face: FontFace, size: f64, text: &str) -> f64 {
        let units: u32 = text.chars().map(|c| advance(face, c) as u32).sum();
        units as f64 / 1000.0 * size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(FontMetrics.text_width(FontFace::Regular, 10.0, ""), 0.0);
    }

    #[test]
    fn known_widths() {
        // "Move 1": M 833 + o 556 + v 500 + e 556 + space 278 + 1 556 = 3279
        let w = FontMetrics.text_width(FontFace::Regular, 10.0, "Move 1");
        assert!((w - 32.79).abs() < 1e-9);

        // Bold "A, B:": A 722 + , 278 + space 278 + B 722 + : 333 = 2333
        let w = FontMetrics.text_width(FontFace::Bold, 10.0, "A, B:");
        assert!((w - 23.33).abs() < 1e-9);
    }

    #[test]
    fn bold_is_never_narrower_for_letters() {
        let text = "Forward Left Right Backward";
        let regular = FontMetrics.text_width(FontFace::Regular, 12.0, text);
        let bold = FontMetrics.text_width(FontFace::Bold, 12.0, text);
        assert!(bold >= regular);
    }

    #[test]
    fn width_scales_with_size() {
        let a = FontMetrics.text_width(FontFace::Regular, 10.0, "Forward 4");
        let b = FontMetrics.text_width(FontFace::Regular, 20.0, "Forward 4");
        assert!((b - 2.0 * a).abs() < 1e-9);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        let w = FontMetrics.text_width(FontFace::Regular, 1000.0, "é");
        assert_eq!(w, FALLBACK_ADVANCE as f64);
    }
}
