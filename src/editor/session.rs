//! Drawing session: turns pointer clicks into zone drafts.
//!
//! The session only tracks the active tool and the in-progress point buffer.
//! It never touches the zone store; completed drafts are handed back to the
//! caller, which commits them and then calls [`DrawingSession::commit`].

use crate::zones::geometry::rectangle_from_corners;
use crate::zones::{Point, ZoneKind};

use super::tools::DrawingTool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selecting,
    CollectingPolygon,
    CollectingLine,
    CollectingRectangle,
}

impl SessionState {
    fn for_tool(tool: Option<DrawingTool>) -> Self {
        match tool {
            None => SessionState::Idle,
            Some(DrawingTool::Select) => SessionState::Selecting,
            Some(DrawingTool::Polygon) => SessionState::CollectingPolygon,
            Some(DrawingTool::Line) => SessionState::CollectingLine,
            Some(DrawingTool::Rectangle) => SessionState::CollectingRectangle,
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(
            self,
            SessionState::CollectingPolygon
                | SessionState::CollectingLine
                | SessionState::CollectingRectangle
        )
    }
}

/// A finished shape waiting to become a zone
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDraft {
    pub kind: ZoneKind,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing happened (no tool, non-finite point, degenerate rectangle)
    Ignored,
    /// Point appended to the buffer
    Captured,
    /// The click completed a shape
    Completed(ZoneDraft),
    /// Select tool: the caller should hit-test this point
    Select(Point),
}

#[derive(Debug)]
pub struct DrawingSession {
    tool: Option<DrawingTool>,
    state: SessionState,
    buffer: Vec<Point>,
    /// Kind for polygon and rectangle completions
    draft_kind: ZoneKind,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self {
            tool: Some(DrawingTool::Select),
            state: SessionState::Selecting,
            buffer: Vec::new(),
            draft_kind: ZoneKind::Table,
        }
    }
}

impl DrawingSession {
    pub fn tool(&self) -> Option<DrawingTool> {
        self.tool
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Points captured so far for the zone under construction
    pub fn buffer(&self) -> &[Point] {
        &self.buffer
    }

    pub fn draft_kind(&self) -> ZoneKind {
        self.draft_kind
    }

    /// Switch tools. Any in-progress buffer is discarded.
    pub fn set_tool(&mut self, tool: Option<DrawingTool>) {
        self.buffer.clear();
        self.tool = tool;
        self.state = SessionState::for_tool(tool);
        if let Some(kind) = tool.and_then(|t| t.default_kind()) {
            self.draft_kind = kind;
        }
    }

    /// Choose the kind for the polygon or rectangle being drawn.
    ///
    /// Returns false (and changes nothing) when the active tool cannot
    /// produce that kind.
    pub fn set_draft_kind(&mut self, kind: ZoneKind) -> bool {
        let allowed = self.tool.is_some_and(|t| t.has_kind_choice()) && !kind.is_line();
        if allowed {
            self.draft_kind = kind;
        }
        allowed
    }

    pub fn click(&mut self, point: Point) -> ClickOutcome {
        if !point.is_finite() {
            return ClickOutcome::Ignored;
        }

        match self.state {
            // Idle after a completion still has the select tool armed
            SessionState::Idle if self.tool == Some(DrawingTool::Select) => {
                ClickOutcome::Select(point)
            }
            SessionState::Idle => ClickOutcome::Ignored,
            SessionState::Selecting => ClickOutcome::Select(point),
            SessionState::CollectingPolygon => {
                self.buffer.push(point);
                ClickOutcome::Captured
            }
            SessionState::CollectingLine => {
                self.buffer.push(point);
                if self.buffer.len() == 2 {
                    ClickOutcome::Completed(ZoneDraft {
                        kind: ZoneKind::Entrance,
                        points: self.buffer.clone(),
                    })
                } else {
                    ClickOutcome::Captured
                }
            }
            SessionState::CollectingRectangle => match self.buffer.first() {
                None => {
                    self.buffer.push(point);
                    ClickOutcome::Captured
                }
                Some(&first) => match rectangle_from_corners(first, point) {
                    Some(corners) => {
                        self.buffer.push(point);
                        ClickOutcome::Completed(ZoneDraft {
                            kind: self.draft_kind,
                            points: corners.to_vec(),
                        })
                    }
                    None => ClickOutcome::Ignored,
                },
            },
        }
    }

    /// Explicit finish signal (double-click, Enter, "Finish" button).
    ///
    /// Only polygon collection responds; with fewer than 3 points this is a
    /// no-op and the buffer is kept.
    pub fn finish(&self) -> Option<ZoneDraft> {
        if self.state != SessionState::CollectingPolygon || self.buffer.len() < 3 {
            return None;
        }
        Some(ZoneDraft {
            kind: self.draft_kind,
            points: self.buffer.clone(),
        })
    }

    /// Called once a draft became a zone: clears the buffer and returns to
    /// idle with the select tool.
    pub fn commit(&mut self) {
        self.buffer.clear();
        self.tool = Some(DrawingTool::Select);
        self.state = SessionState::Idle;
    }

    /// Undo the click that produced a draft the store refused
    pub fn rollback_click(&mut self) {
        if matches!(
            self.state,
            SessionState::CollectingLine | SessionState::CollectingRectangle
        ) {
            self.buffer.pop();
        }
    }

    /// Drop the in-progress buffer but keep the current tool
    pub fn cancel(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn session_with(tool: DrawingTool) -> DrawingSession {
        let mut session = DrawingSession::default();
        session.set_tool(Some(tool));
        session
    }

    #[test]
    fn test_default_is_selecting() {
        let session = DrawingSession::default();
        assert_eq!(session.tool(), Some(DrawingTool::Select));
        assert_eq!(session.state(), SessionState::Selecting);
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_tool_sets_state() {
        let mut session = DrawingSession::default();
        session.set_tool(Some(DrawingTool::Polygon));
        assert_eq!(session.state(), SessionState::CollectingPolygon);
        session.set_tool(Some(DrawingTool::Line));
        assert_eq!(session.state(), SessionState::CollectingLine);
        session.set_tool(Some(DrawingTool::Rectangle));
        assert_eq!(session.state(), SessionState::CollectingRectangle);
        session.set_tool(None);
        assert_eq!(session.state(), SessionState::Idle);
        session.set_tool(Some(DrawingTool::Select));
        assert_eq!(session.state(), SessionState::Selecting);
    }

    #[test]
    fn test_idle_ignores_clicks() {
        let mut session = DrawingSession::default();
        session.set_tool(None);
        assert_eq!(session.click(p(1.0, 1.0)), ClickOutcome::Ignored);
    }

    #[test]
    fn test_selecting_routes_to_hit_test() {
        let mut session = DrawingSession::default();
        assert_eq!(session.click(p(3.0, 4.0)), ClickOutcome::Select(p(3.0, 4.0)));
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_polygon_collects_until_finish() {
        let mut session = session_with(DrawingTool::Polygon);
        for i in 0..5 {
            assert_eq!(session.click(p(i as f32, (i * i) as f32)), ClickOutcome::Captured);
        }
        assert_eq!(session.buffer().len(), 5);
        assert_eq!(session.state(), SessionState::CollectingPolygon);
    }

    #[test]
    fn test_polygon_finish_with_too_few_points_keeps_buffer() {
        let mut session = session_with(DrawingTool::Polygon);
        session.click(p(10.0, 10.0));
        session.click(p(50.0, 10.0));

        assert!(session.finish().is_none());
        assert_eq!(session.buffer(), &[p(10.0, 10.0), p(50.0, 10.0)]);
        assert_eq!(session.state(), SessionState::CollectingPolygon);

        // Operator keeps adding points after the rejected finish
        session.click(p(50.0, 50.0));
        let draft = session.finish().unwrap();
        assert_eq!(draft.points.len(), 3);
    }

    #[test]
    fn test_polygon_finish_defaults_to_table() {
        let mut session = session_with(DrawingTool::Polygon);
        session.click(p(10.0, 10.0));
        session.click(p(50.0, 10.0));
        session.click(p(50.0, 50.0));

        let draft = session.finish().unwrap();
        assert_eq!(draft.kind, ZoneKind::Table);
        assert_eq!(draft.points, vec![p(10.0, 10.0), p(50.0, 10.0), p(50.0, 50.0)]);
    }

    #[test]
    fn test_polygon_uses_chosen_kind() {
        let mut session = session_with(DrawingTool::Polygon);
        assert!(session.set_draft_kind(ZoneKind::Walkway));
        session.click(p(0.0, 0.0));
        session.click(p(10.0, 0.0));
        session.click(p(10.0, 10.0));
        assert_eq!(session.finish().unwrap().kind, ZoneKind::Walkway);
    }

    #[test]
    fn test_draft_kind_cannot_be_entrance() {
        let mut session = session_with(DrawingTool::Polygon);
        assert!(!session.set_draft_kind(ZoneKind::Entrance));
        assert_eq!(session.draft_kind(), ZoneKind::Table);
    }

    #[test]
    fn test_draft_kind_rejected_for_line_and_select() {
        let mut session = session_with(DrawingTool::Line);
        assert!(!session.set_draft_kind(ZoneKind::Walkway));
        let mut session = DrawingSession::default();
        assert!(!session.set_draft_kind(ZoneKind::Walkway));
    }

    #[test]
    fn test_draft_kind_resets_on_tool_change() {
        let mut session = session_with(DrawingTool::Polygon);
        session.set_draft_kind(ZoneKind::Ignore);
        session.set_tool(Some(DrawingTool::Polygon));
        assert_eq!(session.draft_kind(), ZoneKind::Table);
        session.set_tool(Some(DrawingTool::Rectangle));
        assert_eq!(session.draft_kind(), ZoneKind::Ignore);
    }

    #[test]
    fn test_line_completes_exactly_on_second_point() {
        let mut session = session_with(DrawingTool::Line);
        assert_eq!(session.click(p(400.0, 50.0)), ClickOutcome::Captured);

        match session.click(p(400.0, 350.0)) {
            ClickOutcome::Completed(draft) => {
                assert_eq!(draft.kind, ZoneKind::Entrance);
                assert_eq!(draft.points, vec![p(400.0, 50.0), p(400.0, 350.0)]);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_line_ignores_finish_signal() {
        let mut session = session_with(DrawingTool::Line);
        session.click(p(1.0, 1.0));
        assert!(session.finish().is_none());
        assert_eq!(session.buffer().len(), 1);
    }

    #[test]
    fn test_rectangle_completes_on_second_corner() {
        let mut session = session_with(DrawingTool::Rectangle);
        assert_eq!(session.click(p(10.0, 10.0)), ClickOutcome::Captured);
        match session.click(p(50.0, 40.0)) {
            ClickOutcome::Completed(draft) => {
                assert_eq!(draft.kind, ZoneKind::Ignore);
                assert_eq!(
                    draft.points,
                    vec![p(10.0, 10.0), p(50.0, 10.0), p(50.0, 40.0), p(10.0, 40.0)]
                );
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_rectangle_ignores_degenerate_second_corner() {
        let mut session = session_with(DrawingTool::Rectangle);
        session.click(p(10.0, 10.0));
        assert_eq!(session.click(p(10.0, 40.0)), ClickOutcome::Ignored);
        assert_eq!(session.buffer(), &[p(10.0, 10.0)]);
    }

    #[test]
    fn test_non_finite_clicks_ignored() {
        let mut session = session_with(DrawingTool::Polygon);
        assert_eq!(session.click(p(f32::NAN, 1.0)), ClickOutcome::Ignored);
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_tool_switch_discards_buffer() {
        let mut session = session_with(DrawingTool::Polygon);
        session.click(p(10.0, 10.0));
        session.click(p(50.0, 10.0));

        session.set_tool(Some(DrawingTool::Select));
        assert_eq!(session.state(), SessionState::Selecting);
        assert!(session.buffer().is_empty());

        session.set_tool(Some(DrawingTool::Polygon));
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_switching_between_drawing_tools_discards_buffer() {
        let mut session = session_with(DrawingTool::Line);
        session.click(p(10.0, 10.0));
        session.set_tool(Some(DrawingTool::Polygon));
        assert!(session.buffer().is_empty());
    }

    #[test]
    fn test_commit_returns_to_idle_select() {
        let mut session = session_with(DrawingTool::Polygon);
        session.click(p(0.0, 0.0));
        session.click(p(10.0, 0.0));
        session.click(p(10.0, 10.0));
        session.commit();

        assert!(session.buffer().is_empty());
        assert_eq!(session.tool(), Some(DrawingTool::Select));
        assert_eq!(session.state(), SessionState::Idle);

        // Clicking after a completion selects zones
        assert_eq!(session.click(p(5.0, 5.0)), ClickOutcome::Select(p(5.0, 5.0)));
    }

    #[test]
    fn test_rollback_click_restores_line_buffer() {
        let mut session = session_with(DrawingTool::Line);
        session.click(p(0.0, 0.0));
        session.click(p(5.0, 5.0));
        session.rollback_click();
        assert_eq!(session.buffer(), &[p(0.0, 0.0)]);
    }

    #[test]
    fn test_cancel_keeps_tool() {
        let mut session = session_with(DrawingTool::Polygon);
        session.click(p(0.0, 0.0));
        session.cancel();
        assert!(session.buffer().is_empty());
        assert_eq!(session.state(), SessionState::CollectingPolygon);
    }

    #[test]
    fn test_is_collecting() {
        assert!(!SessionState::Idle.is_collecting());
        assert!(!SessionState::Selecting.is_collecting());
        assert!(SessionState::CollectingPolygon.is_collecting());
        assert!(SessionState::CollectingLine.is_collecting());
        assert!(SessionState::CollectingRectangle.is_collecting());
    }
}
