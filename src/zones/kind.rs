use bevy::prelude::Color;
use serde::{Deserialize, Serialize};

use crate::theme;

/// Semantic type of a zone. Drives rendering, validation and how the
/// downstream vision pipeline interprets the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Seating region, occupancy is tracked per table
    #[default]
    Table,
    Walkway,
    /// Exclusion region (cashier desk, kitchen pass, ...)
    Ignore,
    /// Directed counting line, crossings are counted as entries/exits
    Entrance,
}

impl ZoneKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneKind::Table => "Table",
            ZoneKind::Walkway => "Walkway",
            ZoneKind::Ignore => "Exclusion zone",
            ZoneKind::Entrance => "Entrance/exit",
        }
    }

    /// Label given to freshly drawn zones of this kind
    pub fn default_label(&self) -> String {
        format!("New {}", self.display_name().to_lowercase())
    }

    /// Legend caption shown under the canvas
    pub fn legend_caption(&self) -> &'static str {
        match self {
            ZoneKind::Table => "Table zones",
            ZoneKind::Walkway => "Walkways",
            ZoneKind::Ignore => "Excluded",
            ZoneKind::Entrance => "Entry/exit counting",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ZoneKind::Table => theme::ZONE_TABLE,
            ZoneKind::Walkway => theme::ZONE_WALKWAY,
            ZoneKind::Ignore => theme::ZONE_IGNORE,
            ZoneKind::Entrance => theme::ZONE_ENTRANCE,
        }
    }

    /// True for kinds stored as a directed two-point line
    pub fn is_line(&self) -> bool {
        matches!(self, ZoneKind::Entrance)
    }

    /// Whether `count` points form a valid zone of this kind
    pub fn accepts_point_count(&self, count: usize) -> bool {
        match self {
            ZoneKind::Entrance => count == 2,
            ZoneKind::Table | ZoneKind::Walkway | ZoneKind::Ignore => count >= 3,
        }
    }

    /// Human readable form of the point-count rule, used in error messages
    pub fn point_requirement(&self) -> &'static str {
        match self {
            ZoneKind::Entrance => "exactly 2 points",
            ZoneKind::Table | ZoneKind::Walkway | ZoneKind::Ignore => "at least 3 points",
        }
    }

    pub fn supports_capacity(&self) -> bool {
        matches!(self, ZoneKind::Table)
    }

    pub fn all() -> &'static [ZoneKind] {
        &[
            ZoneKind::Table,
            ZoneKind::Walkway,
            ZoneKind::Ignore,
            ZoneKind::Entrance,
        ]
    }

    /// Kinds that can be produced by the polygon and rectangle tools
    pub fn polygonal() -> &'static [ZoneKind] {
        &[ZoneKind::Table, ZoneKind::Walkway, ZoneKind::Ignore]
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
