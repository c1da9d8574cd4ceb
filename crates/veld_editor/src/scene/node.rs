//! The local mirror of one engine object.

use crate::core::{Guid, Transform};
use crate::transfer::{BlueprintRef, EntityRecord, ParentLink, TransferRecord};

/// A renderable sub-part of an object, opaque to the reconciler.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialEntity {
    pub kind: String,
    pub instance_id: u64,
    pub transform: Transform,
    pub aabb: Option<crate::transfer::Aabb>,
}

/// Local mirror of one engine object.
///
/// Ownership of nodes lives in the [`SceneGraph`](super::SceneGraph) map;
/// `parent` is a lookup-only back-reference by guid (empty = root) and
/// `children` hold guids in attachment order. Nodes are created and mutated
/// only by the reconciliation path - UI code issues commands instead.
#[derive(Clone, Debug)]
pub struct ObjectNode {
    pub guid: Guid,
    pub name: String,
    pub transform: Transform,
    pub variation: u32,
    pub enabled: bool,
    pub blueprint: BlueprintRef,
    /// Guid of the parent node; empty means root.
    pub parent: Guid,
    /// Attached child objects, in attachment order.
    pub children: Vec<Guid>,
    /// Owned renderable sub-parts.
    pub entities: Vec<SpatialEntity>,
}

impl ObjectNode {
    /// Build a node from a confirmed spawn record, adopting its spatial
    /// child entities.
    pub fn from_record(record: &TransferRecord) -> Self {
        let entities = record
            .entities
            .iter()
            .filter(|e| e.is_spatial)
            .map(|e| SpatialEntity {
                kind: e.kind.clone(),
                instance_id: e.instance_id,
                transform: e.transform,
                aabb: e.aabb,
            })
            .collect();

        Self {
            guid: record.guid,
            name: record.name.clone(),
            transform: record.transform,
            variation: record.variation,
            enabled: record.is_enabled,
            blueprint: record.blueprint,
            parent: record.parent.guid,
            children: Vec::new(),
            entities,
        }
    }

    /// Snapshot this node back into a transfer record.
    ///
    /// Captured before a destroy so the inverse command can re-spawn the
    /// object, and by duplicate/copy which re-guid the copy.
    pub fn transfer_record(&self) -> TransferRecord {
        let parent = if self.parent.is_empty() {
            ParentLink::root()
        } else {
            ParentLink::under(self.parent)
        };

        TransferRecord {
            guid: self.guid,
            name: self.name.clone(),
            parent,
            blueprint: self.blueprint,
            transform: self.transform,
            variation: self.variation,
            is_deleted: false,
            is_enabled: self.enabled,
            entities: self
                .entities
                .iter()
                .map(|e| EntityRecord {
                    kind: e.kind.clone(),
                    instance_id: e.instance_id,
                    transform: e.transform,
                    aabb: e.aabb,
                    is_spatial: true,
                })
                .collect(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn set_variation(&mut self, variation: u32) {
        self.variation = variation;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}
