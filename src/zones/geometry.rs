//! Geometric queries over zone shapes.
//!
//! Everything here works in camera surface pixel space and is pure: rendering,
//! hit testing and the drawing session all build on these helpers.

use bevy::prelude::Vec2;

use super::{Point, Zone, ZoneKind};

/// Check that a zone satisfies the point-count rule of its kind and that
/// every coordinate is finite
pub fn is_valid(zone: &Zone) -> bool {
    zone.kind.accepts_point_count(zone.points.len()) && zone.points.iter().all(Point::is_finite)
}

/// Label anchor of a zone.
///
/// Polygons use the mean of their vertices (not the area centroid), entrance
/// lines use their midpoint. Returns `None` when the zone has no points.
pub fn centroid(zone: &Zone) -> Option<Point> {
    mean_point(&zone.points)
}

/// Arithmetic mean of a point list
pub fn mean_point(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + Vec2::from(*p));
    Some((sum / points.len() as f32).into())
}

/// Even-odd point-in-polygon test (ray cast towards +x)
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from a point to a line segment
pub fn distance_to_segment(point: Point, seg_start: Point, seg_end: Point) -> f32 {
    let (p, a, b) = (Vec2::from(point), Vec2::from(seg_start), Vec2::from(seg_end));
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return p.distance(a);
    }

    // Project point onto line, clamped to segment
    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    p.distance(a + line_vec * t)
}

/// Check if a point is within `threshold` of a line segment
pub fn point_near_segment(point: Point, seg_start: Point, seg_end: Point, threshold: f32) -> bool {
    distance_to_segment(point, seg_start, seg_end) <= threshold
}

/// Check whether a point hits a zone's rendered shape.
///
/// Entrance lines use the distance threshold, polygons use containment.
pub fn zone_contains(zone: &Zone, point: Point, line_threshold: f32) -> bool {
    match zone.kind {
        ZoneKind::Entrance => zone
            .segment()
            .is_some_and(|(tail, head)| point_near_segment(point, tail, head, line_threshold)),
        ZoneKind::Table | ZoneKind::Walkway | ZoneKind::Ignore => {
            point_in_polygon(point, &zone.points)
        }
    }
}

/// Build the four vertices of an axis-aligned rectangle from two opposite
/// corners.
///
/// Vertices wind clockwise as seen on screen (y down), starting at `first`.
/// Returns `None` for a degenerate rectangle (zero width or height).
pub fn rectangle_from_corners(first: Point, opposite: Point) -> Option<[Point; 4]> {
    if first.x == opposite.x || first.y == opposite.y {
        return None;
    }

    let (min_x, max_x) = (first.x.min(opposite.x), first.x.max(opposite.x));
    let (min_y, max_y) = (first.y.min(opposite.y), first.y.max(opposite.y));

    // Top-left, top-right, bottom-right, bottom-left is clockwise with y down
    let cycle = [
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ];
    let start = cycle.iter().position(|c| *c == first).unwrap_or(0);

    Some(std::array::from_fn(|i| cycle[(start + i) % 4]))
}

/// Axis-aligned bounds of a point list (min, max corners)
pub fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = Vec2::from(*points.first()?);
    let (min, max) = points.iter().fold((first, first), |(min, max), p| {
        let v = Vec2::from(*p);
        (min.min(v), max.max(v))
    });
    Some((min.into(), max.into()))
}

/// Signed shoelace area. Positive for clockwise winding on a y-down surface.
pub fn signed_area(vertices: &[Point]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Interior spans of a polygon along the horizontal line at `y`.
///
/// Uses the even-odd rule, spans are returned as sorted `(x_start, x_end)`
/// pairs. Rendering uses this to hatch-fill zone polygons.
pub fn scanline_spans(vertices: &[Point], y: f32) -> Vec<(f32, f32)> {
    if vertices.len() < 3 {
        return Vec::new();
    }

    let mut crossings: Vec<f32> = Vec::new();
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > y) != (b.y > y) {
            crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
        }
        j = i;
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// The two barb points of an arrowhead drawn at `head`, pointing away from
/// `tail`. Returns `None` for a zero-length segment.
pub fn arrowhead(tail: Point, head: Point, size: f32) -> Option<(Point, Point)> {
    let (t, h) = (Vec2::from(tail), Vec2::from(head));
    let dir = (h - t).try_normalize()?;
    let back = h - dir * size;
    let normal = dir.perp() * (size * 0.6);
    Some(((back + normal).into(), (back - normal).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::ZoneId;

    fn square() -> Vec<Point> {
        vec![
            Point::new(100.0, 100.0),
            Point::new(180.0, 100.0),
            Point::new(180.0, 180.0),
            Point::new(100.0, 180.0),
        ]
    }

    fn zone(kind: ZoneKind, points: Vec<Point>) -> Zone {
        Zone::new(ZoneId::new("test"), kind, points)
    }

    #[test]
    fn test_centroid_of_square() {
        let c = centroid(&zone(ZoneKind::Table, square())).unwrap();
        assert_eq!(c, Point::new(140.0, 140.0));
    }

    #[test]
    fn test_centroid_is_vertex_mean_not_area_centroid() {
        // Extra vertex on the top edge pulls the mean up, the area centroid would not move
        let mut points = square();
        points.insert(1, Point::new(140.0, 100.0));
        let c = centroid(&zone(ZoneKind::Table, points)).unwrap();
        assert_eq!(c, Point::new(140.0, 132.0));
    }

    #[test]
    fn test_centroid_of_entrance_is_midpoint() {
        let line = zone(
            ZoneKind::Entrance,
            vec![Point::new(400.0, 50.0), Point::new(400.0, 350.0)],
        );
        assert_eq!(centroid(&line), Some(Point::new(400.0, 200.0)));
    }

    #[test]
    fn test_centroid_empty() {
        assert!(mean_point(&[]).is_none());
    }

    #[test]
    fn test_is_valid_point_counts() {
        assert!(is_valid(&zone(ZoneKind::Table, square())));
        assert!(!is_valid(&zone(ZoneKind::Table, square()[..2].to_vec())));
        assert!(!is_valid(&zone(ZoneKind::Entrance, square())));
        assert!(is_valid(&zone(ZoneKind::Entrance, square()[..2].to_vec())));
        assert!(!is_valid(&zone(ZoneKind::Entrance, square()[..1].to_vec())));
    }

    #[test]
    fn test_is_valid_rejects_non_finite() {
        let mut points = square();
        points[2] = Point::new(f32::NAN, 10.0);
        assert!(!is_valid(&zone(ZoneKind::Walkway, points)));
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square();
        assert!(point_in_polygon(Point::new(140.0, 140.0), &sq));
        assert!(!point_in_polygon(Point::new(90.0, 140.0), &sq));
        assert!(!point_in_polygon(Point::new(140.0, 200.0), &sq));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 40.0),
            Point::new(0.0, 40.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 10.0), &u));
        assert!(!point_in_polygon(Point::new(15.0, 10.0), &u));
        assert!(point_in_polygon(Point::new(15.0, 35.0), &u));
    }

    #[test]
    fn test_point_in_degenerate_polygon() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &square()[..2]));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end, distance is to the endpoint
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
        // Zero-length segment
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_zone_contains_line_uses_threshold() {
        let line = zone(
            ZoneKind::Entrance,
            vec![Point::new(400.0, 50.0), Point::new(400.0, 350.0)],
        );
        assert!(zone_contains(&line, Point::new(405.0, 200.0), 8.0));
        assert!(!zone_contains(&line, Point::new(420.0, 200.0), 8.0));
        assert!(zone_contains(&line, Point::new(420.0, 200.0), 25.0));
    }

    #[test]
    fn test_zone_contains_polygon_ignores_threshold() {
        let table = zone(ZoneKind::Table, square());
        assert!(zone_contains(&table, Point::new(150.0, 150.0), 0.0));
        assert!(!zone_contains(&table, Point::new(185.0, 150.0), 50.0));
    }

    #[test]
    fn test_rectangle_clockwise_from_first_click() {
        let rect = rectangle_from_corners(Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        assert_eq!(
            rect,
            [
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(50.0, 30.0),
                Point::new(10.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_rectangle_starts_at_first_click_for_any_drag_direction() {
        let first = Point::new(50.0, 30.0);
        let rect = rectangle_from_corners(first, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(rect[0], first);
        assert_eq!(rect[2], Point::new(10.0, 10.0));

        let first = Point::new(50.0, 10.0);
        let rect = rectangle_from_corners(first, Point::new(10.0, 30.0)).unwrap();
        assert_eq!(rect[0], first);
        assert_eq!(rect[1], Point::new(50.0, 30.0));
    }

    #[test]
    fn test_rectangle_winding_is_consistent() {
        let corners = [
            (Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            (Point::new(10.0, 10.0), Point::new(0.0, 0.0)),
            (Point::new(10.0, 0.0), Point::new(0.0, 10.0)),
            (Point::new(0.0, 10.0), Point::new(10.0, 0.0)),
        ];
        for (a, b) in corners {
            let rect = rectangle_from_corners(a, b).unwrap();
            assert!(signed_area(&rect) > 0.0, "rectangle from {:?} should wind clockwise", a);
        }
    }

    #[test]
    fn test_rectangle_degenerate() {
        assert!(rectangle_from_corners(Point::new(5.0, 5.0), Point::new(5.0, 20.0)).is_none());
        assert!(rectangle_from_corners(Point::new(5.0, 5.0), Point::new(20.0, 5.0)).is_none());
    }

    #[test]
    fn test_bounds() {
        let (min, max) = bounds(&square()).unwrap();
        assert_eq!(min, Point::new(100.0, 100.0));
        assert_eq!(max, Point::new(180.0, 180.0));
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn test_scanline_spans_square() {
        let spans = scanline_spans(&square(), 140.0);
        assert_eq!(spans, vec![(100.0, 180.0)]);
        assert!(scanline_spans(&square(), 90.0).is_empty());
    }

    #[test]
    fn test_scanline_spans_concave() {
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 40.0),
            Point::new(0.0, 40.0),
        ];
        assert_eq!(scanline_spans(&u, 10.0), vec![(0.0, 10.0), (20.0, 30.0)]);
        assert_eq!(scanline_spans(&u, 35.0), vec![(0.0, 30.0)]);
    }

    #[test]
    fn test_arrowhead_points_back_from_head() {
        let (left, right) = arrowhead(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0).unwrap();
        assert_eq!(left.x, 90.0);
        assert_eq!(right.x, 90.0);
        assert!((left.y - 6.0).abs() < 0.001);
        assert!((right.y + 6.0).abs() < 0.001);
    }

    #[test]
    fn test_arrowhead_zero_length() {
        assert!(arrowhead(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 10.0).is_none());
    }
}
