//! Demo zones seeded into cameras that have no saved configuration yet.

use super::{Point, Zone, ZoneId, ZoneKind};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ]
}

pub fn demo_zones() -> Vec<Zone> {
    vec![
        Zone::new(ZoneId::new("zone1"), ZoneKind::Table, rect(100.0, 100.0, 80.0, 80.0))
            .with_label("A1")
            .with_capacity(4),
        Zone::new(ZoneId::new("zone2"), ZoneKind::Table, rect(220.0, 100.0, 80.0, 80.0))
            .with_label("A2")
            .with_capacity(6),
        Zone::new(
            ZoneId::new("zone3"),
            ZoneKind::Entrance,
            vec![Point::new(400.0, 50.0), Point::new(400.0, 350.0)],
        )
        .with_label("Counting line"),
        Zone::new(ZoneId::new("zone4"), ZoneKind::Ignore, rect(500.0, 100.0, 100.0, 100.0))
            .with_label("Cashier area"),
    ]
}
