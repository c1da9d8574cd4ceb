//! Scene graph reconciler.
//!
//! Builds the parent/child mirror from transfer records that may arrive in
//! any order. Cross-object ordering is not guaranteed by the engine - a
//! child's spawn may be observed before its parent's - so unresolved
//! children wait in the pending-parent buffer and are attached the moment
//! the parent appears. Per-object ordering is assumed reliable: a destroy
//! for X is never observed before X's own spawn.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::{Guid, Transform};
use crate::scene::ObjectNode;
use crate::transfer::TransferRecord;

/// Structural errors raised by the reconciler.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// A spawn notification named a guid that already has a node. Duplicate
    /// deliveries are expected under asynchronous transport and must be
    /// ignored, not double-applied.
    #[error("object {0} already exists")]
    DuplicateIdentifier(Guid),
    /// Attach target or subject is not in the graph.
    #[error("object {0} not found")]
    UnknownObject(Guid),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { child: Guid, parent: Guid },
}

/// The identifier-to-node mapping and the pending-parent buffer.
///
/// Both are exclusively owned and mutated here; other components observe
/// nodes read-only or go through the mutation operations below.
#[derive(Default)]
pub struct SceneGraph {
    nodes: HashMap<Guid, ObjectNode>,
    /// Children waiting for a parent guid that has no node yet. An entry
    /// exists only while its key has no node; it is drained and removed the
    /// instant the parent spawns.
    pending_parents: HashMap<Guid, Vec<Guid>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a confirmed spawn notification.
    ///
    /// Creates the node, links it under its declared parent (immediately,
    /// or through the pending-parent buffer if the parent has not been seen
    /// yet), then attaches any children that were already waiting for this
    /// guid. Attachment of waiters completes synchronously, so no node
    /// stays un-parented once its parent has arrived.
    pub fn register_spawn(&mut self, record: &TransferRecord) -> Result<Guid, SceneError> {
        let guid = record.guid;
        if self.nodes.contains_key(&guid) {
            return Err(SceneError::DuplicateIdentifier(guid));
        }

        let node = ObjectNode::from_record(record);
        let parent_guid = node.parent;
        self.nodes.insert(guid, node);

        if !parent_guid.is_empty() {
            if self.nodes.contains_key(&parent_guid) {
                if let Err(err) = self.attach(guid, parent_guid) {
                    // Malformed linkage from upstream; keep the node as a root.
                    log::warn!("could not link {} under {}: {}", guid, parent_guid, err);
                    if let Some(node) = self.nodes.get_mut(&guid) {
                        node.parent = Guid::EMPTY;
                    }
                }
            } else {
                self.pending_parents.entry(parent_guid).or_default().push(guid);
            }
        }

        // This node may itself be the parent others have been waiting for.
        if let Some(waiting) = self.pending_parents.remove(&guid) {
            for child in waiting {
                if !self.nodes.contains_key(&child) {
                    continue;
                }
                if let Err(err) = self.attach(child, guid) {
                    log::warn!("could not attach buffered child {}: {}", child, err);
                }
            }
        }

        Ok(guid)
    }

    /// Apply a confirmed destroy notification.
    ///
    /// Unknown guids are a no-op (`None`): late and duplicate destroys are
    /// expected. Children still mirrored locally go back to the
    /// pending-parent buffer keyed by this guid, so an inverse re-spawn
    /// picks them up again.
    pub fn register_destroy(&mut self, guid: Guid) -> Option<ObjectNode> {
        let node = self.nodes.remove(&guid)?;

        if let Some(parent) = self.nodes.get_mut(&node.parent) {
            parent.children.retain(|&c| c != guid);
        }

        // The node may still have been waiting for its own parent.
        for waiting in self.pending_parents.values_mut() {
            waiting.retain(|&c| c != guid);
        }
        self.pending_parents.retain(|_, waiting| !waiting.is_empty());

        let orphans: Vec<Guid> = node
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes.contains_key(c))
            .collect();
        if !orphans.is_empty() {
            self.pending_parents.entry(guid).or_default().extend(orphans);
        }

        Some(node)
    }

    /// Rename an object in place. `false` (with a warning) for unknown
    /// guids: the engine is authoritative and may reference objects the
    /// mirror has not learned about yet.
    pub fn set_name(&mut self, guid: Guid, name: &str) -> bool {
        match self.nodes.get_mut(&guid) {
            Some(node) => {
                node.set_name(name);
                true
            }
            None => {
                log::warn!("name change for unknown object {}", guid);
                false
            }
        }
    }

    /// Update an object's local transform in place.
    pub fn set_transform(&mut self, guid: Guid, transform: Transform) -> bool {
        match self.nodes.get_mut(&guid) {
            Some(node) => {
                node.set_transform(transform);
                true
            }
            None => {
                log::warn!("transform change for unknown object {}", guid);
                false
            }
        }
    }

    /// Update an object's variation index in place.
    pub fn set_variation(&mut self, guid: Guid, variation: u32) -> bool {
        match self.nodes.get_mut(&guid) {
            Some(node) => {
                node.set_variation(variation);
                true
            }
            None => {
                log::warn!("variation change for unknown object {}", guid);
                false
            }
        }
    }

    /// Enable or disable an object in place.
    pub fn set_enabled(&mut self, guid: Guid, enabled: bool) -> bool {
        match self.nodes.get_mut(&guid) {
            Some(node) => {
                if enabled {
                    node.enable();
                } else {
                    node.disable();
                }
                true
            }
            None => {
                log::warn!(
                    "{} for unknown object {}",
                    if enabled { "enable" } else { "disable" },
                    guid
                );
                false
            }
        }
    }

    /// Attach `child` under `parent`, detaching it from its current parent
    /// first. `parent` may be empty to re-root the child. Rejects
    /// self-attachment and ancestor cycles.
    pub fn attach(&mut self, child: Guid, parent: Guid) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&child) {
            return Err(SceneError::UnknownObject(child));
        }
        if !parent.is_empty() {
            if !self.nodes.contains_key(&parent) {
                return Err(SceneError::UnknownObject(parent));
            }
            if child == parent || self.is_ancestor(child, parent) {
                return Err(SceneError::WouldCycle { child, parent });
            }
        }

        let old_parent = match self.nodes.get(&child) {
            Some(node) => node.parent,
            None => return Err(SceneError::UnknownObject(child)),
        };
        if let Some(old) = self.nodes.get_mut(&old_parent) {
            old.children.retain(|&c| c != child);
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
        if let Some(new_parent) = self.nodes.get_mut(&parent) {
            if !new_parent.children.contains(&child) {
                new_parent.children.push(child);
            }
        }

        Ok(())
    }

    /// Whether `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: Guid, node: Guid) -> bool {
        let mut current = node;
        while let Some(n) = self.nodes.get(&current) {
            if n.parent == ancestor {
                return true;
            }
            if n.parent.is_empty() {
                return false;
            }
            current = n.parent;
        }
        false
    }

    /// Pure lookup, never mutates.
    pub fn get(&self, guid: Guid) -> Option<&ObjectNode> {
        self.nodes.get(&guid)
    }

    pub fn get_mut(&mut self, guid: Guid) -> Option<&mut ObjectNode> {
        self.nodes.get_mut(&guid)
    }

    pub fn contains(&self, guid: Guid) -> bool {
        self.nodes.contains_key(&guid)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Guids of all root nodes (unordered).
    pub fn roots(&self) -> impl Iterator<Item = Guid> + '_ {
        self.nodes
            .values()
            .filter(|n| n.is_root())
            .map(|n| n.guid)
    }

    /// Number of children waiting in the pending-parent buffer.
    pub fn pending_len(&self) -> usize {
        self.pending_parents.values().map(|v| v.len()).sum()
    }

    /// Children currently waiting for the given parent guid.
    pub fn pending_for(&self, parent: Guid) -> &[Guid] {
        self.pending_parents
            .get(&parent)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// World-space pose of a node, composed along its parent chain.
    pub fn world_transform(&self, guid: Guid) -> Option<Transform> {
        let node = self.nodes.get(&guid)?;
        let mut world = node.transform;
        let mut current = node.parent;
        while let Some(parent) = self.nodes.get(&current) {
            world = parent.transform.mul_transform(&world);
            current = parent.parent;
        }
        Some(world)
    }
}
