//! Rendering tests: compose whole drills into page plans and SVG documents.

use drillsheet::renderer::{FieldImage, FontFace, FontMetrics, PageRotation, Rect, TextMeasure};
use drillsheet::{
    compose_document, compose_document_parallel, page_plans_to_json, render_drill_to_file,
    CommandPair, DocumentSink, DrillError, DrillInfo, Field, FieldStyle, Move, PageComposer,
    PageHandle, Point, RankPosition, SvgDocument,
};
use pretty_assertions::assert_eq;

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> RankPosition {
    RankPosition::line(Point::new(x0, y0), Point::new(x1, y1))
}

/// Two moves of eight counts: an opening set, then three ranks where A and
/// B share their commands.
fn fight_song() -> DrillInfo {
    DrillInfo::new("Fight Song")
        .with_move(
            Move::new(8)
                .with_rank("A", line(20.0, 10.0, 24.0, 10.0))
                .with_rank("B", line(20.0, 14.0, 24.0, 14.0))
                .with_rank("C", line(30.0, 10.0, 30.0, 14.0)),
        )
        .with_move(
            Move::new(8)
                .with_rank("A", line(20.0, 14.0, 24.0, 14.0))
                .with_rank("B", line(20.0, 18.0, 24.0, 18.0))
                .with_rank(
                    "C",
                    RankPosition::corner(Point::new(32.0, 10.0), Point::new(32.0, 12.0), Point::new(34.0, 12.0)),
                )
                .with_commands("A", vec![CommandPair::new("Forward", 4)])
                .with_commands("B", vec![CommandPair::new("Forward", 4)])
                .with_commands(
                    "C",
                    vec![CommandPair::new("Left", 2), CommandPair::new("Forward", 2)],
                ),
        )
}

fn header_texts(plan: &drillsheet::PagePlan) -> Vec<&str> {
    plan.header.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn two_move_drill_pages() {
    let field = Field::college_football();
    let style = FieldStyle::default();
    let plans = PageComposer::new(&field, &style).unwrap().plan_pages(&fight_song()).unwrap();
    assert_eq!(plans.len(), 2);

    assert_eq!(header_texts(&plans[0]), vec!["Fight Song", "Measures: 1 - 2", "Move 0"]);
    assert!(plans[0].text.is_none(), "opening move has no command listing");

    assert_eq!(header_texts(&plans[1]), vec!["Fight Song", "Measures: 3 - 4", "Move 1"]);
    let text = plans[1].text.as_ref().unwrap();
    let entries: Vec<(&str, &str)> = text
        .entries
        .iter()
        .map(|e| (e.label.as_str(), e.body.as_str()))
        .collect();
    assert_eq!(entries, vec![("A, B:", "Forward 4"), ("C:", "Left 2, Forward 2")]);
    assert!(text.comments.is_none());
}

#[test]
fn header_is_spread_across_the_page() {
    let field = Field::college_football();
    let style = FieldStyle::default();
    let composer = PageComposer::new(&field, &style).unwrap();
    let geo = composer.geometry();
    let plans = composer.plan_pages(&fight_song()).unwrap();

    let header = &plans[1].header;
    let width = |s: &str| FontMetrics.text_width(FontFace::Regular, 10.0, s);
    assert!(header.iter().all(|r| r.at.y == geo.header_y()));
    assert_eq!(header[0].at.x, geo.field_margin_x);
    assert!((header[1].at.x + width(&header[1].text) / 2.0 - 396.0).abs() < 1e-9);
    assert!((header[2].at.x + width(&header[2].text) - (792.0 - geo.field_margin_x)).abs() < 1e-9);
}

#[test]
fn field_image_sits_under_the_header() {
    let field = Field::college_football();
    let style = FieldStyle::default();
    let composer = PageComposer::new(&field, &style).unwrap();
    let plans = composer.plan_pages(&fight_song()).unwrap();
    let geo = composer.geometry();

    let plan = &plans[0];
    assert_eq!(plan.image_rect, geo.image_rect());
    assert_eq!(plan.image.width_px, geo.image_width_px);
    assert_eq!(plan.image.height_px, geo.image_height_px);
    assert!(!plan.image.plan.is_empty());

    let text = plans[1].text.as_ref().unwrap();
    let first = &text.entries[0];
    assert!(first.origin.y < plan.image_rect.y, "listing starts below the image");
    assert_eq!(first.origin.x, geo.field_margin_x);
}

#[test]
fn parallel_planning_matches_sequential() {
    let field = Field::nfl();
    let style = FieldStyle::default();
    let mut drill = fight_song();
    for i in 0..10u32 {
        drill = drill.with_move(
            Move::new(4 * (i + 1))
                .with_rank("A", line(10.0 + i as f64, 10.0, 14.0 + i as f64, 10.0))
                .with_commands("A", vec![CommandPair::new("Right", 4 * (i + 1))])
                .with_comments(format!("Set {i}")),
        );
    }

    let composer = PageComposer::new(&field, &style).unwrap();
    assert_eq!(composer.plan_pages(&drill).unwrap(), composer.plan_pages_parallel(&drill).unwrap());

    let mut sequential = SvgDocument::new();
    compose_document(&drill, &field, &style, &mut sequential).unwrap();
    let mut parallel = SvgDocument::new();
    compose_document_parallel(&drill, &field, &style, &mut parallel).unwrap();
    assert_eq!(sequential.page_count(), 12);
    assert_eq!(sequential.to_svg_string(), parallel.to_svg_string());
}

#[test]
fn rendering_is_deterministic() {
    let field = Field::college_football();
    let style = FieldStyle::default();
    let first = page_plans_to_json(&fight_song(), &field, &style).unwrap();
    let second = page_plans_to_json(&fight_song(), &field, &style).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\"Measures: 3 - 4\""));
}

#[test]
fn save_writes_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fight-song.svg");
    render_drill_to_file(&fight_song(), &Field::college_football(), &FieldStyle::default(), &out).unwrap();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.trim_end().ends_with("</svg>"), "SVG should be closed");
    assert_eq!(svg.matches(">Fight Song</text>").count(), 2);
    assert!(svg.contains(">Move 1</text>"));
    assert!(svg.contains(">A, B:</text>"));
    assert!(svg.contains(">Left 2, Forward 2</text>"));
    // Rank labels inside the field image
    assert!(svg.contains(">C</text>"));
}

#[test]
fn save_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("drill.svg");
    let err = render_drill_to_file(&fight_song(), &Field::college_football(), &FieldStyle::default(), &out)
        .unwrap_err();
    assert!(matches!(err, DrillError::Io(_)));
    assert!(!out.exists());
}

#[test]
fn zero_count_move_is_rejected_before_any_page() {
    let drill = fight_song().with_move(Move::new(0));
    let mut doc = SvgDocument::new();
    let err = compose_document(&drill, &Field::college_football(), &FieldStyle::default(), &mut doc).unwrap_err();
    assert!(matches!(err, DrillError::Configuration(_)));
    assert_eq!(doc.page_count(), 0);
}

#[test]
fn crowded_move_reports_overflow() {
    let mut crowded = Move::new(8);
    for i in 0..40u32 {
        crowded = crowded.with_commands(&format!("R{i:02}"), vec![CommandPair::new("Forward", i + 1)]);
    }
    let drill = fight_song().with_move(crowded);

    let mut doc = SvgDocument::new();
    let err = compose_document(&drill, &Field::college_football(), &FieldStyle::default(), &mut doc).unwrap_err();
    match err {
        DrillError::LayoutOverflow { move_index, lowest_baseline, bottom_margin } => {
            assert_eq!(move_index, 2);
            assert!(lowest_baseline < bottom_margin);
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

#[test]
fn unknown_path_tag_is_a_data_error() {
    let err = RankPosition::from_tagged("A", "spiral", Point::ORIGIN, Point::ORIGIN, Point::new(1.0, 0.0), None)
        .unwrap_err();
    assert!(matches!(err, DrillError::Data { ref rank, .. } if rank == "A"));

    let err = RankPosition::from_tagged("B", "Curve", Point::ORIGIN, Point::ORIGIN, Point::new(1.0, 0.0), None)
        .unwrap_err();
    assert!(matches!(err, DrillError::Data { .. }));
}

#[test]
fn invalid_style_literal_is_rejected_before_any_page() {
    let style = FieldStyle {
        arrow_width: -7.0,
        rank_end_diameter: f64::NAN,
        ..FieldStyle::default()
    };
    let mut doc = SvgDocument::new();
    let err = compose_document(&fight_song(), &Field::college_football(), &style, &mut doc).unwrap_err();
    assert!(matches!(err, DrillError::Configuration(_)));
    assert_eq!(doc.page_count(), 0);
}

/// SVG sink that measures text as if it were set in a wider face.
struct WideSvg(SvgDocument);

impl DocumentSink for WideSvg {
    fn create_page(&mut self, orientation: PageRotation) -> drillsheet::Result<PageHandle> {
        self.0.create_page(orientation)
    }

    fn draw_image(&mut self, page: PageHandle, image: &FieldImage, rect: Rect) -> drillsheet::Result<()> {
        self.0.draw_image(page, image, rect)
    }

    fn draw_text_run(
        &mut self,
        page: PageHandle,
        face: FontFace,
        size: f64,
        at: Point,
        text: &str,
    ) -> drillsheet::Result<()> {
        self.0.draw_text_run(page, face, size, at, text)
    }

    fn measure_text_width(&self, face: FontFace, size: f64, text: &str) -> f64 {
        1.6 * self.0.measure_text_width(face, size, text)
    }

    fn page_count(&self) -> usize {
        self.0.page_count()
    }

    fn save(&mut self, path: &std::path::Path) -> drillsheet::Result<()> {
        self.0.save(path)
    }
}

#[test]
fn parallel_composition_measures_through_the_sink() {
    let field = Field::college_football();
    let style = FieldStyle::default();
    let drill = fight_song().with_move(
        Move::new(16)
            .with_commands("D", vec![CommandPair::new("Forward", 8), CommandPair::new("Left", 4)])
            .with_commands("E", vec![CommandPair::new("Forward", 8), CommandPair::new("Left", 4)])
            .with_comments("Horns up on 9"),
    );

    let mut sequential = WideSvg(SvgDocument::new());
    compose_document(&drill, &field, &style, &mut sequential).unwrap();
    let mut parallel = WideSvg(SvgDocument::new());
    compose_document_parallel(&drill, &field, &style, &mut parallel).unwrap();
    assert_eq!(sequential.0.to_svg_string(), parallel.0.to_svg_string());

    // The wider metrics really moved the centered header
    let mut plain = SvgDocument::new();
    compose_document_parallel(&drill, &field, &style, &mut plain).unwrap();
    assert_ne!(plain.to_svg_string(), parallel.0.to_svg_string());
}
