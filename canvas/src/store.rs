//! Target store: owns the live crop targets and tracks which one is active.
//!
//! The editor shows a single image at a time, so in practice the store holds
//! zero or one target. Replacing the asset removes the old target before the
//! new one is inserted; the store itself does not enforce that.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::target::{CropState, CropTarget, TargetId};

#[derive(Debug, Default)]
pub struct TargetStore {
    targets: HashMap<TargetId, CropTarget>,
    active: Option<TargetId>,
}

impl TargetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a target and make it active.
    pub fn insert(&mut self, target: CropTarget) -> TargetId {
        let id = target.id;
        self.targets.insert(id, target);
        self.active = Some(id);
        id
    }

    /// Remove a target by id. Clears the active id if it pointed at it.
    pub fn remove(&mut self, id: &TargetId) -> Option<CropTarget> {
        if self.active == Some(*id) {
            self.active = None;
        }
        self.targets.remove(id)
    }

    #[must_use]
    pub fn active_id(&self) -> Option<TargetId> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&CropTarget> {
        self.active.and_then(|id| self.targets.get(&id))
    }

    pub fn active_mut(&mut self) -> Option<&mut CropTarget> {
        self.active.and_then(|id| self.targets.get_mut(&id))
    }

    /// Restore a persisted crop window. Returns false if the target doesn't exist.
    pub fn apply_crop_state(&mut self, id: &TargetId, state: &CropState) -> bool {
        let Some(target) = self.targets.get_mut(id) else {
            return false;
        };
        target.apply_crop_state(state);
        true
    }

    /// Drop every target.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.active = None;
    }
}
