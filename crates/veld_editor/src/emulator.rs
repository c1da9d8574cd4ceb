//! Loopback engine emulator.
//!
//! Answers outbound requests with the confirmations a real engine would
//! send back, letting the whole command -> request -> confirmation ->
//! reconcile cycle run without an engine process. Used by the demo binary
//! and by tests.

use crate::core::Transform;
use crate::messages::{EngineMessage, EngineRequest, MessageMeta};
use crate::transfer::EntityRecord;

/// Fakes the engine side of the transport.
pub struct EngineEmulator {
    player_name: String,
}

impl EngineEmulator {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    /// Produce the confirmations for one request, in engine send order.
    pub fn respond(&self, request: EngineRequest) -> Vec<EngineMessage> {
        let meta = MessageMeta::from_player(self.player_name.clone());
        match request {
            EngineRequest::SpawnBlueprint { mut record } => {
                // A live engine reports the entities it actually created.
                // Keep caller-provided ones (re-spawns) so round-trips stay
                // stable; enrich fresh spawns with plausible sub-parts.
                if record.entities.is_empty() {
                    record.entities = vec![
                        EntityRecord {
                            kind: "StaticModelEntity".to_string(),
                            instance_id: 1,
                            transform: Transform::IDENTITY,
                            aabb: None,
                            is_spatial: true,
                        },
                        EntityRecord {
                            kind: "EffectEntity".to_string(),
                            instance_id: 2,
                            transform: Transform::IDENTITY,
                            aabb: None,
                            is_spatial: true,
                        },
                    ];
                }
                vec![
                    EngineMessage::BlueprintSpawnInvoked {
                        guid: record.guid,
                        name: record.name.clone(),
                    },
                    EngineMessage::SpawnedBlueprint { record, meta },
                ]
            }
            EngineRequest::DestroyBlueprint { guid } => {
                vec![EngineMessage::DestroyedBlueprint { guid, meta }]
            }
            EngineRequest::EnableBlueprint { guid } => {
                vec![EngineMessage::EnabledBlueprint { guid, meta }]
            }
            EngineRequest::DisableBlueprint { guid } => {
                vec![EngineMessage::DisabledBlueprint { guid, meta }]
            }
            EngineRequest::SetObjectName { guid, name } => {
                vec![EngineMessage::ObjectNameChanged { guid, name, meta }]
            }
            EngineRequest::MoveObject { guid, transform } => {
                vec![EngineMessage::ObjectTransformChanged {
                    guid,
                    transform,
                    meta,
                }]
            }
            EngineRequest::SetVariation { guid, variation } => {
                vec![EngineMessage::ObjectVariationChanged {
                    guid,
                    variation,
                    meta,
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{Blueprint, ParentLink, TransferRecord};

    #[test]
    fn test_spawn_response_enriches_entities() {
        let emulator = EngineEmulator::new("LocalPlayer");
        let bp = Blueprint::new("Crate_01");
        let record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        let guid = record.guid;

        let messages = emulator.respond(EngineRequest::SpawnBlueprint { record });
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            &messages[0],
            EngineMessage::BlueprintSpawnInvoked { guid: g, .. } if *g == guid
        ));
        match &messages[1] {
            EngineMessage::SpawnedBlueprint { record, meta } => {
                assert_eq!(record.guid, guid);
                assert!(!record.entities.is_empty());
                assert_eq!(meta.origin.as_str(), "LocalPlayer");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_spawn_response_keeps_provided_entities() {
        let emulator = EngineEmulator::new("LocalPlayer");
        let bp = Blueprint::new("Crate_01");
        let mut record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        record.entities.push(EntityRecord {
            kind: "StaticModelEntity".to_string(),
            instance_id: 99,
            transform: Transform::IDENTITY,
            aabb: None,
            is_spatial: true,
        });
        let expected = record.entities.clone();

        let messages = emulator.respond(EngineRequest::SpawnBlueprint { record });
        match &messages[1] {
            EngineMessage::SpawnedBlueprint { record, .. } => {
                assert_eq!(record.entities, expected);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
