//! Rank path rendering: the path itself, the end marker, the arrowhead at
//! the front of the rank, and the rank's label.

use crate::error::GeometryError;
use crate::geometry::Point;
use crate::model::{FieldStyle, RankPath, RankPosition};
use super::constants::*;
use super::plan::{DrawOp, DrawingPlan, Stroke, TextAnchor};
use super::transform::RenderTransform;

/// Filled triangle marking the front of a rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub apex: Point,
    pub base_left: Point,
    pub base_right: Point,
}

impl Arrowhead {
    pub fn points(&self) -> Vec<Point> {
        vec![self.apex, self.base_left, self.base_right]
    }
}

/// Equilateral-proportioned arrowhead centered on `front`, pointing along
/// `direction`.
pub fn arrowhead(front: Point, direction: Point, arrow_width: f64) -> Result<Arrowhead, GeometryError> {
    let dir = direction.normalize()?;
    let arrow_height = ARROW_APEX_ANGLE_DEG.to_radians().sin() * arrow_width;
    let half_height = dir.multiply(arrow_height / 2.0);
    let half_base = dir.orthogonal().multiply(arrow_width / 2.0);

    let base_center = front.subtract(half_height);
    Ok(Arrowhead {
        apex: front.add(half_height),
        base_left: base_center.subtract(half_base),
        base_right: base_center.add(half_base),
    })
}

/// Draw one rank whose points are already in render coordinates.
///
/// Everything but the arrowhead is always drawn. A degenerate arrow
/// direction (front on top of its reference point) is returned as an error
/// after the rest of the rank has been emitted.
pub(super) fn render_rank(
    plan: &mut DrawingPlan,
    name: &str,
    rank: &RankPosition,
    style: &FieldStyle,
    transform: &RenderTransform,
) -> Result<(), GeometryError> {
    let stroke = Stroke::solid(style.rank_color, transform.length(style.rank_stroke_width));

    match rank.path {
        RankPath::Line => plan.push(DrawOp::Line {
            from: rank.front,
            to: rank.end,
            stroke,
        }),
        RankPath::Curve { control } => plan.push(DrawOp::QuadCurve {
            from: rank.front,
            control,
            to: rank.end,
            stroke,
        }),
        RankPath::Corner => plan.push(DrawOp::Polyline {
            points: vec![rank.front, rank.midpoint, rank.end],
            stroke,
        }),
    }

    plan.push(DrawOp::Circle {
        center: rank.end,
        radius: transform.length(style.rank_end_diameter) / 2.0,
        fill: style.rank_color,
    });

    let direction = rank.front.subtract(rank.arrow_reference());
    let head = arrowhead(rank.front, direction, transform.length(style.arrow_width));
    if let Ok(ref head) = head {
        plan.push(DrawOp::Polygon {
            points: head.points(),
            fill: style.rank_color,
        });
    }

    let label_size = transform.length(style.rank_label_size);
    plan.push(DrawOp::Text {
        at: rank.midpoint,
        text: name.to_string(),
        size: label_size,
        bold: true,
        fill: style.rank_label_color,
        outline: style
            .rank_label_background
            .map(|bg| Stroke::solid(bg, LABEL_OUTLINE_RATIO * label_size)),
        anchor: TextAnchor::Start,
    });

    head.map(|_| ())
}
