//! Per-camera zone editor.
//!
//! A [`ZoneEditor`] owns the drawing session and the zone store for one
//! camera and is the only place where a finished draft becomes a zone.
//! Editors for every opened camera live in the [`ZoneEditors`] resource.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::config::CameraInfo;
use crate::zones::error::{PersistenceError, ZoneError, ZoneResult};
use crate::zones::{Point, Zone, ZoneConfiguration, ZoneEdit, ZoneId, ZoneKind, ZoneStore};

use super::session::{ClickOutcome, DrawingSession, ZoneDraft};
use super::tools::DrawingTool;

/// What a pointer or keyboard action did to the editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Ignored,
    /// A point was added to the shape being drawn
    Captured,
    /// A new zone was committed and selected
    Created(ZoneId),
    /// The select tool hit-tested; `None` means the selection was cleared
    Selected(Option<ZoneId>),
    /// A completed shape was refused by the store
    Rejected(ZoneError),
}

#[derive(Debug)]
pub struct ZoneEditor {
    camera: CameraInfo,
    session: DrawingSession,
    store: ZoneStore,
    dirty: bool,
    /// Bumped by every change to the zones
    revision: u64,
}

impl ZoneEditor {
    pub fn new(camera: CameraInfo) -> Self {
        Self {
            camera,
            session: DrawingSession::default(),
            store: ZoneStore::default(),
            dirty: false,
            revision: 0,
        }
    }

    pub fn camera(&self) -> &CameraInfo {
        &self.camera
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    /// Whether zones changed since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Revision of the zones as they are now. Pair it with
    /// [`Self::configuration`] when starting a save.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// A save of `revision` finished. Edits made while it was being
    /// written keep the editor dirty.
    pub fn mark_saved(&mut self, revision: u64) {
        if revision == self.revision {
            self.dirty = false;
        } else {
            debug!(
                "Camera {}: saved revision {} but zones are at {}",
                self.camera.id, revision, self.revision
            );
        }
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    pub fn set_tool(&mut self, tool: Option<DrawingTool>) {
        if self.session.tool() != tool {
            debug!("Camera {}: tool {:?}", self.camera.id, tool);
        }
        self.session.set_tool(tool);
    }

    pub fn set_draft_kind(&mut self, kind: ZoneKind) -> bool {
        self.session.set_draft_kind(kind)
    }

    /// Primary click on the surface at `point` (surface pixels)
    pub fn click(&mut self, point: Point, line_threshold: f32) -> EditorOutcome {
        match self.session.click(point) {
            ClickOutcome::Ignored => EditorOutcome::Ignored,
            ClickOutcome::Captured => EditorOutcome::Captured,
            ClickOutcome::Select(point) => {
                let hit = self
                    .store
                    .hit_test(point, line_threshold)
                    .map(|zone| zone.id.clone());
                match &hit {
                    Some(id) => {
                        self.store.select(id);
                    }
                    None => self.store.clear_selection(),
                }
                EditorOutcome::Selected(hit)
            }
            ClickOutcome::Completed(draft) => match self.commit_draft(draft) {
                Ok(id) => EditorOutcome::Created(id),
                Err(e) => {
                    self.session.rollback_click();
                    EditorOutcome::Rejected(e)
                }
            },
        }
    }

    /// Finish signal (double-click, Enter). Only completes polygons.
    pub fn finish(&mut self) -> EditorOutcome {
        let Some(draft) = self.session.finish() else {
            return EditorOutcome::Ignored;
        };
        match self.commit_draft(draft) {
            Ok(id) => EditorOutcome::Created(id),
            Err(e) => EditorOutcome::Rejected(e),
        }
    }

    /// Drop the shape being drawn, keeping the tool
    pub fn cancel_drawing(&mut self) {
        self.session.cancel();
    }

    fn commit_draft(&mut self, draft: ZoneDraft) -> ZoneResult<ZoneId> {
        let id = self.store.allocate_id();
        let zone = Zone::new(id.clone(), draft.kind, draft.points)
            .with_label(draft.kind.default_label());

        if let Err(e) = self.store.add(zone) {
            warn!("Camera {}: rejected new zone: {}", self.camera.id, e);
            return Err(e);
        }

        self.store.select(&id);
        self.session.commit();
        self.touch();
        info!("Camera {}: created {} zone {}", self.camera.id, draft.kind, id);
        Ok(id)
    }

    pub fn select(&mut self, id: &ZoneId) -> Option<&Zone> {
        self.store.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn update(&mut self, id: &ZoneId, edit: ZoneEdit) -> ZoneResult<()> {
        if edit.is_empty() {
            return Ok(());
        }
        match self.store.update(id, edit) {
            Ok(zone) => {
                debug!("Camera {}: updated zone {}", self.camera.id, zone.id);
                self.touch();
                Ok(())
            }
            Err(e) => {
                warn!("Camera {}: edit rejected: {}", self.camera.id, e);
                Err(e)
            }
        }
    }

    pub fn update_selected(&mut self, edit: ZoneEdit) -> ZoneResult<()> {
        let Some(id) = self.store.selected_id().cloned() else {
            return Ok(());
        };
        self.update(&id, edit)
    }

    pub fn remove(&mut self, id: &ZoneId) -> Option<Zone> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn remove_selected(&mut self) -> Option<Zone> {
        let id = self.store.selected_id().cloned()?;
        self.remove(&id)
    }

    /// Snapshot of the committed zones for save, export and deploy
    pub fn configuration(&self) -> ZoneConfiguration {
        ZoneConfiguration::new(&self.camera, self.store.snapshot())
    }

    /// Install zones from a saved configuration.
    ///
    /// Any in-progress drawing is discarded. Zones that fail validation are
    /// dropped and returned.
    pub fn load(
        &mut self,
        configuration: ZoneConfiguration,
    ) -> Result<Vec<ZoneError>, PersistenceError> {
        if configuration.camera_id != self.camera.id {
            return Err(PersistenceError::CameraMismatch {
                expected: self.camera.id.clone(),
                found: configuration.camera_id,
            });
        }

        self.session.set_tool(Some(DrawingTool::Select));
        let rejected = self.store.replace_all(configuration.zones);
        self.revision += 1;
        self.dirty = false;
        info!(
            "Camera {}: loaded {} zones ({} dropped)",
            self.camera.id,
            self.store.len(),
            rejected.len()
        );
        Ok(rejected)
    }

    /// Install zones that did not come from this camera's saved file
    /// (demo seed, import). Marks the editor dirty.
    pub fn replace_zones(&mut self, zones: Vec<Zone>) -> Vec<ZoneError> {
        self.session.set_tool(Some(DrawingTool::Select));
        let rejected = self.store.replace_all(zones);
        self.touch();
        rejected
    }
}

/// Editors for every camera opened this run, keyed by camera id
#[derive(Resource, Default, Debug)]
pub struct ZoneEditors {
    editors: HashMap<String, ZoneEditor>,
    active: Option<String>,
}

impl ZoneEditors {
    /// Make `camera` the active editor.
    ///
    /// Returns true when no editor existed yet for it, in which case the
    /// caller should load its saved zones.
    pub fn open(&mut self, camera: CameraInfo) -> bool {
        let id = camera.id.clone();
        let created = !self.editors.contains_key(&id);
        if created {
            self.editors.insert(id.clone(), ZoneEditor::new(camera));
        }
        info!("Opened camera {}", id);
        self.active = Some(id);
        created
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&ZoneEditor> {
        self.active.as_ref().and_then(|id| self.editors.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut ZoneEditor> {
        self.active.as_ref().and_then(|id| self.editors.get_mut(id))
    }

    pub fn get(&self, camera_id: &str) -> Option<&ZoneEditor> {
        self.editors.get(camera_id)
    }

    pub fn get_mut(&mut self, camera_id: &str) -> Option<&mut ZoneEditor> {
        self.editors.get_mut(camera_id)
    }

    pub fn is_dirty(&self, camera_id: &str) -> bool {
        self.editors.get(camera_id).is_some_and(|e| e.is_dirty())
    }

    pub fn any_dirty(&self) -> bool {
        self.editors.values().any(|e| e.is_dirty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::fixtures::demo_zones;
    use std::num::NonZeroU32;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn editor() -> ZoneEditor {
        ZoneEditor::new(CameraInfo::new("1", "Main hall", "Main hall", "d1"))
    }

    #[test]
    fn test_end_to_end_polygon() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Polygon));

        assert_eq!(editor.click(p(10.0, 10.0), 8.0), EditorOutcome::Captured);
        assert_eq!(editor.click(p(50.0, 10.0), 8.0), EditorOutcome::Captured);
        assert_eq!(editor.click(p(50.0, 50.0), 8.0), EditorOutcome::Captured);

        let EditorOutcome::Created(id) = editor.finish() else {
            panic!("finish should create a zone");
        };

        let zones = editor.store().zones();
        assert_eq!(zones.len(), 1);
        let zone = &zones[0];
        assert_eq!(zone.id, id);
        assert_eq!(zone.kind, ZoneKind::Table);
        assert_eq!(zone.points, vec![p(10.0, 10.0), p(50.0, 10.0), p(50.0, 50.0)]);
        assert_eq!(zone.label.as_deref(), Some("New table"));
        assert_eq!(zone.capacity, None);
        assert_eq!(editor.store().selected_id(), Some(&id));
        assert!(editor.session().buffer().is_empty());
        assert_eq!(editor.session().tool(), Some(DrawingTool::Select));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_finish_with_two_points_creates_nothing() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Polygon));
        editor.click(p(10.0, 10.0), 8.0);
        editor.click(p(50.0, 10.0), 8.0);

        assert_eq!(editor.finish(), EditorOutcome::Ignored);
        assert!(editor.store().is_empty());
        assert_eq!(editor.session().buffer().len(), 2);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_line_creates_entrance_on_second_click() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Line));
        editor.click(p(400.0, 50.0), 8.0);
        let outcome = editor.click(p(400.0, 350.0), 8.0);
        assert!(matches!(outcome, EditorOutcome::Created(_)));

        let zone = editor.store().selected_zone().unwrap();
        assert_eq!(zone.kind, ZoneKind::Entrance);
        assert_eq!(zone.points.len(), 2);
        assert_eq!(zone.label.as_deref(), Some("New entrance/exit"));
    }

    #[test]
    fn test_rectangle_creates_four_point_zone() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Rectangle));
        editor.set_draft_kind(ZoneKind::Walkway);
        editor.click(p(10.0, 10.0), 8.0);
        editor.click(p(60.0, 30.0), 8.0);

        let zone = editor.store().selected_zone().unwrap();
        assert_eq!(zone.kind, ZoneKind::Walkway);
        assert_eq!(zone.points.len(), 4);
    }

    #[test]
    fn test_click_after_creation_selects() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Rectangle));
        editor.click(p(0.0, 0.0), 8.0);
        let EditorOutcome::Created(id) = editor.click(p(100.0, 100.0), 8.0) else {
            panic!("rectangle should be created");
        };

        assert_eq!(editor.click(p(500.0, 500.0), 8.0), EditorOutcome::Selected(None));
        assert!(editor.store().selected_id().is_none());
        assert_eq!(
            editor.click(p(50.0, 50.0), 8.0),
            EditorOutcome::Selected(Some(id.clone()))
        );
        assert_eq!(editor.store().selected_id(), Some(&id));
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        editor.select(&ZoneId::new("zone2"));

        let removed = editor.remove_selected().unwrap();
        assert_eq!(removed.id, ZoneId::new("zone2"));
        assert!(editor.store().selected_id().is_none());
        assert_eq!(editor.store().len(), 3);
    }

    #[test]
    fn test_update_selected_kind_change_clears_capacity() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        editor.select(&ZoneId::new("zone1"));

        editor.update_selected(ZoneEdit::kind(ZoneKind::Walkway)).unwrap();
        let zone = editor.store().selected_zone().unwrap();
        assert_eq!(zone.kind, ZoneKind::Walkway);
        assert_eq!(zone.capacity, None);
        assert_eq!(zone.label.as_deref(), Some("A1"));
        assert_eq!(zone.points.len(), 4);
    }

    #[test]
    fn test_update_rejection_keeps_zone() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        editor.mark_saved(editor.revision());
        let id = ZoneId::new("zone1");

        let err = editor.update(&id, ZoneEdit::kind(ZoneKind::Entrance)).unwrap_err();
        assert!(matches!(err, ZoneError::KindChangeRejected { .. }));
        let zone = editor.store().get(&id).unwrap();
        assert_eq!(zone.kind, ZoneKind::Table);
        assert_eq!(zone.capacity, NonZeroU32::new(4));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        editor.mark_saved(editor.revision());
        assert!(editor.update_selected(ZoneEdit::label("x")).is_ok());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_save_completion_matches_revision() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        let revision = editor.revision();
        let _written = editor.configuration();

        editor.mark_saved(revision);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_edit_during_save_stays_dirty() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        let revision = editor.revision();
        let written = editor.configuration();

        // Label change lands while the file is being written
        editor.update(&ZoneId::new("zone1"), ZoneEdit::label("Booth")).unwrap();
        editor.mark_saved(revision);
        assert!(editor.is_dirty());
        assert_eq!(written.zones[0].label.as_deref(), Some("A1"));

        editor.remove(&ZoneId::new("zone2"));
        editor.mark_saved(revision);
        assert!(editor.is_dirty());

        editor.mark_saved(editor.revision());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_rejected_edit_keeps_revision() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        let revision = editor.revision();

        assert!(editor.update(&ZoneId::new("zone1"), ZoneEdit::kind(ZoneKind::Entrance)).is_err());
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_load_rejects_other_camera() {
        let mut editor = editor();
        let other = CameraInfo::new("2", "Back", "Main hall", "d1");
        let configuration = ZoneConfiguration::new(&other, demo_zones());

        let err = editor.load(configuration).unwrap_err();
        assert!(matches!(err, PersistenceError::CameraMismatch { .. }));
        assert!(editor.store().is_empty());
    }

    #[test]
    fn test_load_discards_drawing_and_clears_dirty() {
        let mut editor = editor();
        editor.set_tool(Some(DrawingTool::Polygon));
        editor.click(p(1.0, 1.0), 8.0);

        let configuration = ZoneConfiguration::new(editor.camera(), demo_zones());
        let rejected = editor.load(configuration).unwrap();

        assert!(rejected.is_empty());
        assert_eq!(editor.store().len(), 4);
        assert!(editor.session().buffer().is_empty());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_configuration_round_trips_through_load() {
        let mut editor = editor();
        editor.replace_zones(demo_zones());
        let configuration = editor.configuration();
        assert_eq!(configuration.camera_id, "1");

        let mut fresh = ZoneEditor::new(editor.camera().clone());
        fresh.load(configuration).unwrap();
        assert_eq!(fresh.store().snapshot(), editor.store().snapshot());
    }

    #[test]
    fn test_editors_are_independent_per_camera() {
        let mut editors = ZoneEditors::default();
        assert!(editors.open(CameraInfo::new("1", "A", "", "d1")));
        editors
            .active_mut()
            .unwrap()
            .replace_zones(demo_zones());

        assert!(editors.open(CameraInfo::new("2", "B", "", "d1")));
        assert!(editors.active().unwrap().store().is_empty());
        assert_eq!(editors.active_id(), Some("2"));

        // Re-opening keeps the existing editor
        assert!(!editors.open(CameraInfo::new("1", "A", "", "d1")));
        assert_eq!(editors.active().unwrap().store().len(), 4);
        assert!(editors.is_dirty("1"));
        assert!(!editors.is_dirty("2"));
        assert!(editors.any_dirty());
    }
}
