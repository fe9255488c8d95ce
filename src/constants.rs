//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Surface size assumed for cameras that do not report one
pub const DEFAULT_SURFACE_WIDTH: f32 = 1280.0;
pub const DEFAULT_SURFACE_HEIGHT: f32 = 720.0;

/// Screen-space distance (pixels) within which a click selects an entrance line
pub const DEFAULT_LINE_HIT_THRESHOLD: f32 = 8.0;

/// Maximum delay between two clicks counted as a double-click
pub const DOUBLE_CLICK_SECONDS: f64 = 0.35;

/// Maximum pointer travel (screen pixels) between the two clicks of a double-click
pub const DOUBLE_CLICK_RADIUS: f32 = 6.0;

/// Radius of the square handles drawn on the selected zone's vertices
pub const VERTEX_HANDLE_SIZE: f32 = 8.0;

/// Spacing of the hatch lines used to fill polygon zones
pub const HATCH_SPACING: f32 = 10.0;

/// Length of the arrowhead at the end of entrance lines
pub const ARROWHEAD_SIZE: f32 = 18.0;

/// Zoom limits for the editor camera (orthographic scale)
pub const MIN_ZOOM: f32 = 0.2;
pub const MAX_ZOOM: f32 = 5.0;
