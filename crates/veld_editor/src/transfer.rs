//! Transfer records: serializable snapshots of one object's authoritative
//! state.
//!
//! A record is produced when a mutation is requested and echoed back
//! (possibly enriched with engine-side data such as spawned child entities)
//! when the engine confirms it. The transport layer owns the wire encoding;
//! this module only defines the shape.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Guid, Transform};

/// Parent linkage plus insertion metadata for a spawn request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParentLink {
    /// Guid of the parent object; empty means root.
    pub guid: Guid,
    /// Kind of the parent container, e.g. "root" or a sub-world name.
    pub kind: String,
    /// Partition owning the parent, as reported by the engine.
    pub owner_partition: Guid,
    /// Instance owning the parent, as reported by the engine.
    pub owner_instance: Guid,
}

impl ParentLink {
    /// Linkage placing the object at the root of the mirror graph.
    pub fn root() -> Self {
        Self {
            guid: Guid::EMPTY,
            kind: "root".to_string(),
            owner_partition: Guid::EMPTY,
            owner_instance: Guid::EMPTY,
        }
    }

    /// Linkage under a specific parent object.
    pub fn under(guid: Guid) -> Self {
        Self {
            guid,
            kind: "object".to_string(),
            owner_partition: Guid::EMPTY,
            owner_instance: Guid::EMPTY,
        }
    }
}

impl Default for ParentLink {
    fn default() -> Self {
        Self::root()
    }
}

/// Reference to the blueprint an object was instantiated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintRef {
    pub partition: Guid,
    pub instance: Guid,
}

/// Axis-aligned bounding box for spatial entities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Descriptor of one renderable sub-part of an object.
///
/// Entities are opaque to the reconciler; spatial ones carry a local pose
/// and bounds so the viewport can place them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Engine-side type name, e.g. "StaticModelEntity".
    pub kind: String,
    /// Engine instance id of the entity.
    pub instance_id: u64,
    /// Pose local to the owning object.
    pub transform: Transform,
    /// Bounds, present for spatial entities.
    pub aabb: Option<Aabb>,
    /// Whether the entity occupies space in the world.
    pub is_spatial: bool,
}

/// Serializable snapshot of one object's authoritative state.
///
/// The guid is immutable once assigned; a record describing a spawn always
/// carries a freshly generated guid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub guid: Guid,
    pub name: String,
    pub parent: ParentLink,
    pub blueprint: BlueprintRef,
    pub transform: Transform,
    pub variation: u32,
    pub is_deleted: bool,
    pub is_enabled: bool,
    pub entities: Vec<EntityRecord>,
}

impl TransferRecord {
    /// Build a spawn request record with a fresh guid.
    pub fn for_spawn(
        blueprint: &Blueprint,
        transform: Transform,
        variation: u32,
        parent: ParentLink,
    ) -> Self {
        Self {
            guid: Guid::new(),
            name: blueprint.name.clone(),
            parent,
            blueprint: blueprint.ctr_ref,
            transform,
            variation,
            is_deleted: false,
            is_enabled: true,
            entities: Vec::new(),
        }
    }

    /// Copy of this record under a freshly generated guid.
    ///
    /// Used by duplicate/copy/paste, which must never reuse an identifier.
    pub fn with_fresh_guid(&self) -> Self {
        let mut record = self.clone();
        record.guid = Guid::new();
        record
    }
}

/// Minimal catalog entry used as the input to a spawn.
///
/// Catalog management lives outside the core; commands only need the name,
/// the ctr-ref, and a default variation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub ctr_ref: BlueprintRef,
    pub default_variation: u32,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctr_ref: BlueprintRef {
                partition: Guid::new(),
                instance: Guid::new(),
            },
            default_variation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_record_fresh_guid() {
        let bp = Blueprint::new("Crate_01");
        let a = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        let b = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        assert_ne!(a.guid, b.guid);
        assert!(a.is_enabled);
        assert!(!a.is_deleted);
        assert!(a.parent.guid.is_empty());
    }

    #[test]
    fn test_with_fresh_guid_keeps_payload() {
        let bp = Blueprint::new("Crate_01");
        let a = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 3, ParentLink::root());
        let b = a.with_fresh_guid();
        assert_ne!(a.guid, b.guid);
        assert_eq!(a.name, b.name);
        assert_eq!(a.variation, b.variation);
        assert_eq!(a.blueprint, b.blueprint);
    }

    #[test]
    fn test_record_json_round_trip() {
        let bp = Blueprint::new("Crate_01");
        let mut record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 1, ParentLink::root());
        record.entities.push(EntityRecord {
            kind: "StaticModelEntity".to_string(),
            instance_id: 42,
            transform: Transform::IDENTITY,
            aabb: Some(Aabb {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            }),
            is_spatial: true,
        });

        let json = serde_json::to_string(&record).unwrap();
        let back: TransferRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
