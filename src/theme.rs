//! Zone kind colours and the editor palette.
//!
//! Kind colours match the ones the analytics dashboard uses for the same zones.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Zone Colors
// ============================================================================

/// Green (#2ECC71) for table zones
pub const ZONE_TABLE: Color = Color::srgb(0.180, 0.800, 0.443);

/// Blue (#3498DB) for walkway zones
pub const ZONE_WALKWAY: Color = Color::srgb(0.204, 0.596, 0.859);

/// Grey (#95A5A6) for exclusion zones
pub const ZONE_IGNORE: Color = Color::srgb(0.584, 0.647, 0.651);

/// Orange (#F2A03D) for entrance/exit counting lines
pub const ZONE_ENTRANCE: Color = Color::srgb(0.949, 0.627, 0.239);

/// Alpha of the hatch lines filling polygon zones
pub const ZONE_FILL_ALPHA: f32 = 0.35;

// ============================================================================
// Selection Colors
// ============================================================================

/// White outline drawn over the selected zone
pub const SELECTION_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Fill of the vertex handles on the selected zone
pub const VERTEX_HANDLE: Color = Color::srgb(1.0, 0.85, 0.2);

// ============================================================================
// Drawing Preview Colors
// ============================================================================

/// Alpha applied to the kind color for the in-progress outline
pub const DRAFT_ALPHA: f32 = 0.9;

/// Alpha applied to the kind color for the segment following the cursor
pub const RUBBER_BAND_ALPHA: f32 = 0.5;

// ============================================================================
// Video Surface
// ============================================================================

/// Dark placeholder drawn when a camera has no still frame
pub const SURFACE_PLACEHOLDER: Color = Color::srgb(0.09, 0.10, 0.12);

/// Thin border around the video surface
pub const SURFACE_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background (tool settings bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Amber dot marking unsaved changes
    pub const UNSAVED: egui::Color32 = egui::Color32::from_rgb(240, 180, 60);

    /// Translucent black behind the drawing hint overlay
    pub const HINT_BACKGROUND: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 180);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgb(
        (srgba.red * 255.0).round() as u8,
        (srgba.green * 255.0).round() as u8,
        (srgba.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_colors_match_hex() {
        assert_eq!(bevy_to_egui_opaque(ZONE_TABLE), egui::Color32::from_rgb(0x2E, 0xCC, 0x71));
        assert_eq!(bevy_to_egui_opaque(ZONE_WALKWAY), egui::Color32::from_rgb(0x34, 0x98, 0xDB));
        assert_eq!(bevy_to_egui_opaque(ZONE_IGNORE), egui::Color32::from_rgb(0x95, 0xA5, 0xA6));
        assert_eq!(bevy_to_egui_opaque(ZONE_ENTRANCE), egui::Color32::from_rgb(0xF2, 0xA0, 0x3D));
    }
}
