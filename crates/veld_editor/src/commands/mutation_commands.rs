//! Field-mutation commands: name, transform, variation.
//!
//! Old/new value pairs; forward publishes the new value, inverse the old.

use super::{Command, CommandResult};
use crate::core::{Guid, Transform};
use crate::editor::Editor;
use crate::messages::EngineRequest;

/// Rename an object.
pub struct SetNameCommand {
    pub guid: Guid,
    pub old_name: String,
    pub new_name: String,
}

impl Command for SetNameCommand {
    fn description(&self) -> &str {
        "Rename Object"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SetObjectName {
            guid: self.guid,
            name: self.new_name.clone(),
        });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SetObjectName {
            guid: self.guid,
            name: self.old_name.clone(),
        });
        Ok(())
    }
}

/// Move an object to a new pose.
pub struct SetTransformCommand {
    pub guid: Guid,
    pub old_transform: Transform,
    pub new_transform: Transform,
}

impl Command for SetTransformCommand {
    fn description(&self) -> &str {
        "Move Object"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::MoveObject {
            guid: self.guid,
            transform: self.new_transform,
        });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::MoveObject {
            guid: self.guid,
            transform: self.old_transform,
        });
        Ok(())
    }
}

/// Switch an object to a different blueprint variation.
pub struct SetVariationCommand {
    pub guid: Guid,
    pub old_variation: u32,
    pub new_variation: u32,
}

impl Command for SetVariationCommand {
    fn description(&self) -> &str {
        "Set Variation"
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SetVariation {
            guid: self.guid,
            variation: self.new_variation,
        });
        Ok(())
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.publish_request(EngineRequest::SetVariation {
            guid: self.guid,
            variation: self.old_variation,
        });
        Ok(())
    }
}
