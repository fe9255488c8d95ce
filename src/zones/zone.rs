use std::num::NonZeroU32;

use bevy::prelude::Vec2;
use serde::{Deserialize, Serialize};

use super::ZoneKind;

/// A point in the camera surface's pixel space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f32 {
        Vec2::from(*self).distance(Vec2::from(other))
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Opaque zone identifier, unique within one camera's zone set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A region or counting line authored over a camera frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    /// Vertex order defines the polygon edges, or tail→head for entrance lines
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Seat count, tables only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<NonZeroU32>,
}

impl Zone {
    pub fn new(id: ZoneId, kind: ZoneKind, points: Vec<Point>) -> Self {
        Self {
            id,
            kind,
            points,
            label: None,
            capacity: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = NonZeroU32::new(capacity);
        self
    }

    /// Label to draw on the canvas (falls back to the id)
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }

    /// Tail and head of an entrance line, `None` for polygonal zones
    pub fn segment(&self) -> Option<(Point, Point)> {
        match (self.kind, self.points.as_slice()) {
            (ZoneKind::Entrance, [tail, head]) => Some((*tail, *head)),
            _ => None,
        }
    }
}
