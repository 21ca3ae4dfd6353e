//! Field view builds the drawing plan for one field image: the static
//! markings (outline, yard grid, numbers, hashes) plus every rank.
//!
//! All geometry is computed in field feet and mapped through a single
//! [`RenderTransform`], so the same code serves any output resolution.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::geometry::Point;
use crate::model::{Color, Field, FieldStyle, RankPosition};
use super::constants::*;
use super::paths::render_rank;
use super::plan::{DrawOp, DrawingPlan, FieldImage, Stroke, TextAnchor};
use super::transform::{Rect, RenderTransform, Size};

/// Build the complete field image for a set of end positions.
///
/// Rank coordinates are charted in yards from the playing-surface corner.
pub fn render_field_image(
    field: &Field,
    style: &FieldStyle,
    ranks: &BTreeMap<String, RankPosition>,
    width_px: u32,
    height_px: u32,
) -> Result<FieldImage> {
    let transform = RenderTransform::fit(field, Size::new(width_px as f64, height_px as f64))?;
    let mut plan = DrawingPlan::new();

    plan.push(DrawOp::Rect {
        rect: Rect::new(0.0, 0.0, width_px as f64, height_px as f64),
        fill: Some(Color::WHITE),
        stroke: None,
    });
    draw_field(&mut plan, field, style, &transform);
    draw_field_lines(&mut plan, field, style, &transform);
    draw_numbers(&mut plan, field, style, &transform);
    draw_hashes(&mut plan, field, style, &transform);
    draw_ranks(&mut plan, field, style, &transform, ranks);

    Ok(FieldImage { width_px, height_px, plan })
}

fn draw_field(plan: &mut DrawingPlan, field: &Field, style: &FieldStyle, t: &RenderTransform) {
    let corner = t.to_render(field.surface_origin());
    plan.push(DrawOp::Rect {
        rect: Rect::new(corner.x, corner.y, t.length(field.length), t.length(field.height)),
        fill: Some(Color::WHITE),
        stroke: Some(Stroke::solid(Color::BLACK, t.length(style.major_increment_width))),
    });
}

/// Yard lines across the field and the lateral grid lines along it.
fn draw_field_lines(plan: &mut DrawingPlan, field: &Field, style: &FieldStyle, t: &RenderTransform) {
    let increments = (field.length / field.increment) as u32;
    for i in 0..=increments {
        let width = if i % field.major_increment_frequency == 0 {
            style.major_increment_width
        } else if i % field.minor_increment_frequency == 0 {
            style.minor_increment_width
        } else {
            style.grid_width
        };
        let x = field.endzone_width + field.increment * i as f64;
        plan.push(DrawOp::Line {
            from: t.to_render(Point::new(x, field.sideline_width)),
            to: t.to_render(Point::new(x, field.sideline_width + field.height)),
            stroke: Stroke::solid(Color::BLACK, t.length(width)),
        });
    }

    // Lateral lines count up from the front sideline and never get the
    // major weight.
    let increments = (field.height / field.increment) as u32;
    let front = field.total_height() - field.sideline_width;
    for i in 0..=increments {
        let width = if i % field.minor_increment_frequency == 0 {
            style.minor_increment_width
        } else {
            style.grid_width
        };
        let y = front - field.increment * i as f64;
        plan.push(DrawOp::Line {
            from: t.to_render(Point::new(field.endzone_width, y)),
            to: t.to_render(Point::new(field.endzone_width + field.length, y)),
            stroke: Stroke::solid(Color::BLACK, t.length(width)),
        });
    }
}

/// Yard numbers along both sidelines, counting up to midfield and back down.
fn draw_numbers(plan: &mut DrawingPlan, field: &Field, style: &FieldStyle, t: &RenderTransform) {
    let increments = (field.length / field.increment) as u32;
    let marked = increments / field.major_increment_frequency;
    let size = t.length(style.field_number_size);

    for i in 1..marked {
        let tens = if i <= marked / 2 { i } else { marked - i };
        let label = format!("{tens} 0");
        let x = field.endzone_width
            + (i * field.major_increment_frequency) as f64 * field.increment;

        for y in [
            field.sideline_width + FIELD_NUMBER_INSET,
            field.total_height() - field.sideline_width - FIELD_NUMBER_INSET,
        ] {
            plan.push(DrawOp::Text {
                at: t.to_render(Point::new(x, y)),
                text: label.clone(),
                size,
                bold: false,
                fill: Color::BLACK,
                outline: None,
                anchor: TextAnchor::Middle,
            });
        }
    }
}

fn draw_hashes(plan: &mut DrawingPlan, field: &Field, style: &FieldStyle, t: &RenderTransform) {
    let stroke = Stroke::dashed(
        Color::BLACK,
        t.length(style.hash_width),
        t.length(style.hash_period),
    );
    let front = field.total_height() - field.sideline_width;
    for &hash in &field.hashes {
        plan.push(DrawOp::Line {
            from: t.to_render(Point::new(field.endzone_width, front - hash)),
            to: t.to_render(Point::new(field.endzone_width + field.length, front - hash)),
            stroke,
        });
    }
}

fn draw_ranks(
    plan: &mut DrawingPlan,
    field: &Field,
    style: &FieldStyle,
    t: &RenderTransform,
    ranks: &BTreeMap<String, RankPosition>,
) {
    for (name, rank) in ranks {
        let render = rank.map_points(|p| t.to_render(field.rank_to_feet(p)));
        if let Err(e) = render_rank(plan, name, &render, style, t) {
            tracing::warn!(rank = %name, error = %e, "arrowhead skipped");
        }
    }
}
