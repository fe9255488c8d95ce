//! Gizmo rendering of committed zones and the shape being drawn, plus egui
//! labels anchored at zone centroids.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::{ARROWHEAD_SIZE, HATCH_SPACING, VERTEX_HANDLE_SIZE};
use crate::theme;
use crate::zones::geometry::{arrowhead, bounds, centroid, rectangle_from_corners, scanline_spans};
use crate::zones::{Point, Zone, ZoneKind};

use super::controller::ZoneEditors;
use super::gizmo::ZoneGizmoGroup;
use super::params::CameraParams;
use super::session::SessionState;
use super::surface::SurfaceFrame;

/// Horizontal hatch lines covering the polygon interior, in surface space
pub fn hatch_segments(vertices: &[Point], spacing: f32) -> Vec<(Point, Point)> {
    let Some((min, max)) = bounds(vertices) else {
        return Vec::new();
    };
    if spacing <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut y = min.y + spacing / 2.0;
    while y < max.y {
        for (x0, x1) in scanline_spans(vertices, y) {
            segments.push((Point::new(x0, y), Point::new(x1, y)));
        }
        y += spacing;
    }
    segments
}

fn draw_outline(
    gizmos: &mut Gizmos<ZoneGizmoGroup>,
    frame: &SurfaceFrame,
    points: &[Point],
    closed: bool,
    color: Color,
) {
    let world: Vec<Vec2> = points.iter().map(|p| frame.surface_to_world(*p)).collect();
    for pair in world.windows(2) {
        gizmos.line_2d(pair[0], pair[1], color);
    }
    if closed
        && world.len() > 2
        && let (Some(first), Some(last)) = (world.first(), world.last())
    {
        gizmos.line_2d(*last, *first, color);
    }
}

fn draw_arrow(
    gizmos: &mut Gizmos<ZoneGizmoGroup>,
    frame: &SurfaceFrame,
    tail: Point,
    head: Point,
    color: Color,
) {
    gizmos.line_2d(frame.surface_to_world(tail), frame.surface_to_world(head), color);
    if let Some((left, right)) = arrowhead(tail, head, ARROWHEAD_SIZE) {
        let tip = frame.surface_to_world(head);
        gizmos.line_2d(tip, frame.surface_to_world(left), color);
        gizmos.line_2d(tip, frame.surface_to_world(right), color);
    }
}

fn draw_zone(gizmos: &mut Gizmos<ZoneGizmoGroup>, frame: &SurfaceFrame, zone: &Zone) {
    let color = zone.kind.color();
    if let Some((tail, head)) = zone.segment() {
        draw_arrow(gizmos, frame, tail, head, color);
        return;
    }

    let fill = color.with_alpha(theme::ZONE_FILL_ALPHA);
    for (start, end) in hatch_segments(&zone.points, HATCH_SPACING) {
        gizmos.line_2d(frame.surface_to_world(start), frame.surface_to_world(end), fill);
    }
    draw_outline(gizmos, frame, &zone.points, true, color);
}

/// Draw every committed zone of the active camera, selected one highlighted
pub fn draw_zones(
    mut gizmos: Gizmos<ZoneGizmoGroup>,
    editors: Res<ZoneEditors>,
    camera: CameraParams,
) {
    let Some(editor) = editors.active() else {
        return;
    };
    let frame = SurfaceFrame::for_camera(editor.camera());
    let store = editor.store();

    for zone in store.zones() {
        draw_zone(&mut gizmos, &frame, zone);
    }

    let Some(selected) = store.selected_zone() else {
        return;
    };
    draw_outline(
        &mut gizmos,
        &frame,
        &selected.points,
        !selected.kind.is_line(),
        theme::SELECTION_COLOR,
    );
    // Handles keep a constant on-screen size
    let handle = Vec2::splat(VERTEX_HANDLE_SIZE * camera.zoom_scale());
    for point in &selected.points {
        gizmos.rect_2d(
            Isometry2d::from_translation(frame.surface_to_world(*point)),
            handle,
            theme::VERTEX_HANDLE,
        );
    }
}

/// Draw the in-progress buffer and the segment following the cursor
pub fn draw_draft(
    mut gizmos: Gizmos<ZoneGizmoGroup>,
    editors: Res<ZoneEditors>,
    camera: CameraParams,
) {
    let Some(editor) = editors.active() else {
        return;
    };
    let session = editor.session();
    let buffer = session.buffer();
    let Some(&last) = buffer.last() else {
        return;
    };

    let frame = SurfaceFrame::for_camera(editor.camera());
    let kind = match session.state() {
        SessionState::CollectingLine => ZoneKind::Entrance,
        _ => session.draft_kind(),
    };
    let color = kind.color().with_alpha(theme::DRAFT_ALPHA);
    let rubber_band = kind.color().with_alpha(theme::RUBBER_BAND_ALPHA);
    let scale = camera.zoom_scale();

    draw_outline(&mut gizmos, &frame, buffer, false, color);
    for point in buffer {
        gizmos.circle_2d(
            Isometry2d::from_translation(frame.surface_to_world(*point)),
            4.0 * scale,
            color,
        );
    }

    let Some(cursor) = camera
        .cursor_world_pos()
        .map(|world| frame.clamp(frame.world_to_surface(world)))
    else {
        return;
    };

    match session.state() {
        SessionState::CollectingRectangle => {
            if let Some(corners) = rectangle_from_corners(last, cursor) {
                draw_outline(&mut gizmos, &frame, &corners, true, rubber_band);
            }
        }
        SessionState::CollectingLine => {
            draw_arrow(&mut gizmos, &frame, last, cursor, rubber_band);
        }
        SessionState::CollectingPolygon => {
            gizmos.line_2d(
                frame.surface_to_world(last),
                frame.surface_to_world(cursor),
                rubber_band,
            );
            // Closing edge preview once the polygon could be finished
            if buffer.len() >= 2 {
                gizmos.line_2d(
                    frame.surface_to_world(cursor),
                    frame.surface_to_world(buffer[0]),
                    rubber_band.with_alpha(theme::RUBBER_BAND_ALPHA * 0.5),
                );
            }
        }
        SessionState::Idle | SessionState::Selecting => {}
    }
}

/// Thin border around the video surface
pub fn draw_surface_border(
    mut gizmos: Gizmos<ZoneGizmoGroup>,
    editors: Res<ZoneEditors>,
) {
    let Some(editor) = editors.active() else {
        return;
    };
    let frame = SurfaceFrame::for_camera(editor.camera());
    gizmos.rect_2d(Isometry2d::IDENTITY, frame.size, theme::SURFACE_BORDER);
}

/// Text shown at a zone's centroid
pub fn zone_caption(zone: &Zone) -> String {
    match zone.capacity {
        Some(capacity) => format!("{} ({} seats)", zone.display_label(), capacity),
        None => zone.display_label().to_string(),
    }
}

/// Render zone labels at their centroids using egui
pub fn render_zone_labels(
    mut contexts: EguiContexts,
    editors: Res<ZoneEditors>,
    camera: CameraParams,
) -> Result {
    let Some(editor) = editors.active() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let frame = SurfaceFrame::for_camera(editor.camera());

    for zone in editor.store().zones() {
        let Some(anchor) = centroid(zone) else {
            continue;
        };
        let Some(screen_pos) = camera.world_to_screen(frame.surface_to_world(anchor)) else {
            continue;
        };

        egui::Area::new(egui::Id::new(("zone_label", zone.id.as_str())))
            .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .interactable(false)
            .order(egui::Order::Background)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::ui::HINT_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(4, 1))
                    .corner_radius(3.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(zone_caption(zone))
                                .color(theme::bevy_to_egui_opaque(zone.kind.color()))
                                .size(12.0)
                                .strong(),
                        );
                    });
            });
    }
    Ok(())
}
