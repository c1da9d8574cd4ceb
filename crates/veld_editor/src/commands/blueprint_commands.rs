//! Spawn, destroy, enable, and disable commands.
//!
//! These commands never touch the mirror directly: they publish requests
//! for the engine, and the mirror updates when the engine's confirmation
//! comes back through the reconciler.

use super::{Command, CommandResult};
use crate::core::Guid;
use crate::editor::Editor;
use crate::messages::EngineRequest;
use crate::transfer::TransferRecord;

/// Request the engine to spawn a blueprint; inverse destroys the spawned
/// object again.
pub struct SpawnBlueprintCommand {
    pub record: TransferRecord,
}

impl SpawnBlueprintCommand {
    pub fn new(record: TransferRecord) -> Self {
        Self { record }
    }
}

impl Command for SpawnBlueprintCommand {
    fn description(&self) -> &str {
        "Spawn Blueprint"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SpawnBlueprint {
            record: self.record.clone(),
        });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::DestroyBlueprint {
            guid: self.record.guid,
        });
        Ok(())
    }
}

/// Request the engine to destroy an object; inverse re-spawns it from the
/// captured record.
///
/// The record must be snapshotted *before* destruction - once the object is
/// gone there is nothing left to query.
pub struct DestroyBlueprintCommand {
    pub record: TransferRecord,
}

impl DestroyBlueprintCommand {
    pub fn new(record: TransferRecord) -> Self {
        Self { record }
    }
}

impl Command for DestroyBlueprintCommand {
    fn description(&self) -> &str {
        "Destroy Blueprint"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::DestroyBlueprint {
            guid: self.record.guid,
        });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SpawnBlueprint {
            record: self.record.clone(),
        });
        Ok(())
    }
}

/// Enable an object; inverse disables it.
pub struct EnableBlueprintCommand {
    pub guid: Guid,
}

impl EnableBlueprintCommand {
    pub fn new(guid: Guid) -> Self {
        Self { guid }
    }
}

impl Command for EnableBlueprintCommand {
    fn description(&self) -> &str {
        "Enable Blueprint"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::EnableBlueprint { guid: self.guid });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::DisableBlueprint { guid: self.guid });
        Ok(())
    }
}

/// Disable an object; inverse enables it.
pub struct DisableBlueprintCommand {
    pub guid: Guid,
}

impl DisableBlueprintCommand {
    pub fn new(guid: Guid) -> Self {
        Self { guid }
    }
}

impl Command for DisableBlueprintCommand {
    fn description(&self) -> &str {
        "Disable Blueprint"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::DisableBlueprint { guid: self.guid });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::EnableBlueprint { guid: self.guid });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transform;
    use crate::transfer::{Blueprint, ParentLink};

    #[test]
    fn test_spawn_inverse_is_destroy() {
        let mut editor = Editor::new("LocalPlayer");
        let bp = Blueprint::new("Crate_01");
        let record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        let guid = record.guid;

        let mut cmd = SpawnBlueprintCommand::new(record);
        cmd.execute(&mut editor).unwrap();
        cmd.undo(&mut editor).unwrap();

        let requests = editor.requests().drain();
        assert_eq!(requests.len(), 2);
        assert!(matches!(
            &requests[0],
            EngineRequest::SpawnBlueprint { record } if record.guid == guid
        ));
        assert!(matches!(
            &requests[1],
            EngineRequest::DestroyBlueprint { guid: g } if *g == guid
        ));
    }

    #[test]
    fn test_disable_inverse_is_enable() {
        let mut editor = Editor::new("LocalPlayer");
        let guid = Guid::new();

        let mut cmd = DisableBlueprintCommand::new(guid);
        cmd.execute(&mut editor).unwrap();
        cmd.undo(&mut editor).unwrap();

        let requests = editor.requests().drain();
        assert!(matches!(
            &requests[0],
            EngineRequest::DisableBlueprint { guid: g } if *g == guid
        ));
        assert!(matches!(
            &requests[1],
            EngineRequest::EnableBlueprint { guid: g } if *g == guid
        ));
    }

    #[test]
    fn test_destroy_inverse_respawns_captured_record() {
        let mut editor = Editor::new("LocalPlayer");
        let bp = Blueprint::new("Crate_01");
        let record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 4, ParentLink::root());

        let mut cmd = DestroyBlueprintCommand::new(record.clone());
        cmd.execute(&mut editor).unwrap();
        cmd.undo(&mut editor).unwrap();

        let requests = editor.requests().drain();
        assert!(matches!(
            &requests[1],
            EngineRequest::SpawnBlueprint { record: r } if *r == record
        ));
    }
}
