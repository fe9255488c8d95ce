//! In-memory zone collection for one camera, with selection.

use std::num::NonZeroU32;

use bevy::prelude::*;

use super::error::{ZoneError, ZoneResult};
use super::geometry::{is_valid, zone_contains};
use super::{Point, Zone, ZoneId, ZoneKind};

/// Field-level edit applied through [`ZoneStore::update`].
///
/// `None` leaves a field untouched. `capacity: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneEdit {
    pub kind: Option<ZoneKind>,
    pub label: Option<String>,
    pub capacity: Option<Option<NonZeroU32>>,
}

impl ZoneEdit {
    pub fn kind(kind: ZoneKind) -> Self {
        Self {
            kind: Some(kind),
            ..default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..default()
        }
    }

    pub fn capacity(capacity: Option<NonZeroU32>) -> Self {
        Self {
            capacity: Some(capacity),
            ..default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.label.is_none() && self.capacity.is_none()
    }
}

#[derive(Debug, Default)]
pub struct ZoneStore {
    /// Insertion order doubles as paint order (last drawn is on top)
    zones: Vec<Zone>,
    selected: Option<ZoneId>,
    next_id: u64,
}

impl ZoneStore {
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    pub fn contains(&self, id: &ZoneId) -> bool {
        self.get(id).is_some()
    }

    /// Produce an id that no zone in this store uses
    pub fn allocate_id(&mut self) -> ZoneId {
        loop {
            self.next_id += 1;
            let id = ZoneId::new(format!("zone-{}", self.next_id));
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Append a zone. Invalid geometry or a duplicate id is rejected.
    pub fn add(&mut self, zone: Zone) -> ZoneResult<()> {
        if !is_valid(&zone) {
            return Err(ZoneError::InvalidGeometry {
                kind: zone.kind,
                found: zone.points.len(),
            });
        }
        if self.contains(&zone.id) {
            return Err(ZoneError::DuplicateId(zone.id));
        }
        if zone.capacity.is_some() && !zone.kind.supports_capacity() {
            return Err(ZoneError::CapacityRequiresTable(zone.kind));
        }

        debug!("Added {} zone {}", zone.kind, zone.id);
        self.zones.push(zone);
        Ok(())
    }

    /// Select a zone by id. Unknown ids clear the selection.
    pub fn select(&mut self, id: &ZoneId) -> Option<&Zone> {
        self.selected = self.contains(id).then(|| id.clone());
        self.selected_zone()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&ZoneId> {
        self.selected.as_ref()
    }

    pub fn selected_zone(&self) -> Option<&Zone> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Apply a field-level edit. All-or-nothing: on error the zone is unchanged.
    pub fn update(&mut self, id: &ZoneId, edit: ZoneEdit) -> ZoneResult<&Zone> {
        let index = self
            .zones
            .iter()
            .position(|z| &z.id == id)
            .ok_or_else(|| ZoneError::NotFound(id.clone()))?;

        let mut edited = self.zones[index].clone();

        if let Some(kind) = edit.kind {
            if !kind.accepts_point_count(edited.points.len()) {
                return Err(ZoneError::KindChangeRejected {
                    from: edited.kind,
                    to: kind,
                    points: edited.points.len(),
                });
            }
            edited.kind = kind;
        }
        if let Some(label) = edit.label {
            // Blank labels fall back to the id on the canvas
            edited.label = Some(label).filter(|l| !l.trim().is_empty());
        }
        if let Some(capacity) = edit.capacity {
            if capacity.is_some() && !edited.kind.supports_capacity() {
                return Err(ZoneError::CapacityRequiresTable(edited.kind));
            }
            edited.capacity = capacity;
        }
        if !edited.kind.supports_capacity() {
            edited.capacity = None;
        }

        self.zones[index] = edited;
        Ok(&self.zones[index])
    }

    /// Delete a zone, clearing the selection if it pointed at it
    pub fn remove(&mut self, id: &ZoneId) -> Option<Zone> {
        let index = self.zones.iter().position(|z| &z.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let zone = self.zones.remove(index);
        debug!("Removed zone {}", zone.id);
        Some(zone)
    }

    /// Topmost zone under `point`.
    ///
    /// Entrance lines are thin, so they win over polygons underneath them.
    /// Among shapes of the same family the most recently drawn wins.
    pub fn hit_test(&self, point: Point, line_threshold: f32) -> Option<&Zone> {
        let lines = self.zones.iter().rev().filter(|z| z.kind.is_line());
        let polygons = self.zones.iter().rev().filter(|z| !z.kind.is_line());
        lines
            .chain(polygons)
            .find(|z| zone_contains(z, point, line_threshold))
    }

    /// Copy of the committed zones, in insertion order
    pub fn snapshot(&self) -> Vec<Zone> {
        self.zones.clone()
    }

    /// Replace every zone, e.g. after loading a saved configuration.
    ///
    /// Zones that fail validation are dropped and returned as errors.
    pub fn replace_all(&mut self, zones: Vec<Zone>) -> Vec<ZoneError> {
        self.zones.clear();
        self.selected = None;

        let mut rejected = Vec::new();
        for zone in zones {
            if let Err(e) = self.add(zone) {
                warn!("Dropping zone from loaded configuration: {}", e);
                rejected.push(e);
            }
        }
        rejected
    }
}
