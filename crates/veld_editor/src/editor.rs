//! Central editor state and control flow.
//!
//! The [`Editor`] owns the scene-graph mirror, the undo/redo history, the
//! selection and highlight groups, and the outbound channels. User actions
//! become commands executed through the history; inbound engine
//! notifications are applied to the mirror via [`Editor::apply`].

use std::collections::HashSet;

use veld_event::EventChannel;

use crate::commands::{
    BulkCommand, Command, DestroyBlueprintCommand, DisableBlueprintCommand,
    EnableBlueprintCommand, SetNameCommand, SetTransformCommand, SetVariationCommand,
    SpawnBlueprintCommand,
};
use crate::core::{Guid, HighlightGroup, History, SelectionGroup, Transform};
use crate::messages::{EditorNotification, EngineMessage, EngineRequest};
use crate::scene::SceneGraph;
use crate::transfer::{Blueprint, ParentLink, TransferRecord};

/// Central editor state - single source of truth for the local mirror.
pub struct Editor {
    player_name: String,
    pub scene: SceneGraph,
    pub history: History,
    pub selection: SelectionGroup,
    pub highlight: HighlightGroup,
    /// Records captured by copy; every paste stamps fresh guids on them.
    copy_buffer: Vec<TransferRecord>,
    /// Outbound mutation requests, drained by the transport layer.
    requests: EventChannel<EngineRequest>,
    /// Change events for the render/UI layer.
    notifications: EventChannel<EditorNotification>,
    /// Locally-spawned objects awaiting the settle-then-select phase.
    deferred_focus: Vec<Guid>,
    /// Nesting depth of bulk command replay.
    bulk_depth: u32,
    /// Guids of spawn requests published while a bulk command was running.
    /// Their confirmations arrive after the bulk has finished executing, so
    /// suppression of the deferred select has to be keyed by guid, not by
    /// the transient depth counter.
    bulk_spawn_guids: HashSet<Guid>,
}

impl Editor {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            scene: SceneGraph::new(),
            history: History::new(),
            selection: SelectionGroup::new(),
            highlight: HighlightGroup::new(),
            copy_buffer: Vec::new(),
            requests: EventChannel::new(),
            notifications: EventChannel::new(),
            deferred_focus: Vec::new(),
            bulk_depth: 0,
            bulk_spawn_guids: HashSet::new(),
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Outbound request channel, drained by the transport layer.
    pub fn requests(&self) -> &EventChannel<EngineRequest> {
        &self.requests
    }

    /// Change-event channel for the render/UI layer.
    pub fn notifications(&self) -> &EventChannel<EditorNotification> {
        &self.notifications
    }

    /// Publish a mutation request for the engine.
    pub fn publish_request(&mut self, request: EngineRequest) {
        if self.bulk_depth > 0 {
            if let EngineRequest::SpawnBlueprint { record } = &request {
                self.bulk_spawn_guids.insert(record.guid);
            }
        }
        log::debug!("request: {:?}", request);
        self.requests.send(request);
    }

    pub fn begin_bulk(&mut self) {
        self.bulk_depth += 1;
    }

    pub fn end_bulk(&mut self) {
        self.bulk_depth = self.bulk_depth.saturating_sub(1);
    }

    /// Whether a bulk command is currently replaying its children.
    pub fn is_bulk_replaying(&self) -> bool {
        self.bulk_depth > 0
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Execute a command and add it to history for undo/redo.
    pub fn execute_command(&mut self, mut cmd: Box<dyn Command>) -> bool {
        match cmd.execute(self) {
            Ok(()) => {
                self.history.push(cmd);
                true
            }
            Err(err) => {
                log::error!("command failed: {}", err);
                false
            }
        }
    }

    /// Undo the last command. No-op when the history is empty.
    pub fn undo(&mut self) -> bool {
        if let Some(mut cmd) = self.history.pop_undo() {
            let desc = cmd.description().to_string();
            match cmd.undo(self) {
                Ok(()) => {
                    self.history.push_to_redo(cmd);
                    log::info!("undo: {}", desc);
                    true
                }
                Err(err) => {
                    // Put the command back so state and history stay aligned.
                    self.history.push_to_undo(cmd);
                    log::error!("undo failed: {}", err);
                    false
                }
            }
        } else {
            log::debug!("nothing to undo");
            false
        }
    }

    /// Redo the last undone command. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        if let Some(mut cmd) = self.history.pop_redo() {
            let desc = cmd.description().to_string();
            match cmd.execute(self) {
                Ok(()) => {
                    self.history.push_to_undo(cmd);
                    log::info!("redo: {}", desc);
                    true
                }
                Err(err) => {
                    self.history.push_to_redo(cmd);
                    log::error!("redo failed: {}", err);
                    false
                }
            }
        } else {
            log::debug!("nothing to redo");
            false
        }
    }

    // ========================================================================
    // User-originated operations
    // ========================================================================

    /// Request a spawn of the given blueprint. Returns the guid the new
    /// object will get once the engine confirms.
    ///
    /// A missing blueprint is a user-facing failure: reported at error
    /// severity, aborted before any command is constructed.
    pub fn spawn_blueprint(
        &mut self,
        blueprint: Option<&Blueprint>,
        transform: Option<Transform>,
        variation: Option<u32>,
        parent: Option<ParentLink>,
    ) -> Option<Guid> {
        let blueprint = match blueprint {
            Some(bp) => bp,
            None => {
                log::error!("tried to spawn a nonexistent blueprint");
                return None;
            }
        };

        let record = TransferRecord::for_spawn(
            blueprint,
            transform.unwrap_or_default(),
            variation.unwrap_or(blueprint.default_variation),
            parent.unwrap_or_default(),
        );
        let guid = record.guid;
        log::debug!("spawning blueprint {} as {}", blueprint.name, guid);

        if self.execute_command(Box::new(SpawnBlueprintCommand::new(record))) {
            Some(guid)
        } else {
            None
        }
    }

    /// Destroy every selected object as one undoable unit.
    pub fn delete_selected(&mut self) {
        // Snapshot before destruction; afterwards there is nothing to query.
        let commands: Vec<Box<dyn Command>> = self
            .selection
            .members()
            .iter()
            .filter_map(|&guid| self.scene.get(guid))
            .map(|node| {
                Box::new(DestroyBlueprintCommand::new(node.transfer_record())) as Box<dyn Command>
            })
            .collect();

        if !commands.is_empty() {
            self.execute_command(Box::new(BulkCommand::with_description(
                "Delete Selected",
                commands,
            )));
        }
    }

    /// Spawn a copy of every selected object under fresh guids.
    pub fn duplicate(&mut self) {
        let commands: Vec<Box<dyn Command>> = self
            .selection
            .members()
            .iter()
            .filter_map(|&guid| self.scene.get(guid))
            .map(|node| {
                let record = node.transfer_record().with_fresh_guid();
                Box::new(SpawnBlueprintCommand::new(record)) as Box<dyn Command>
            })
            .collect();

        if !commands.is_empty() {
            self.execute_command(Box::new(BulkCommand::with_description(
                "Duplicate",
                commands,
            )));
        }
    }

    /// Capture the selection into the copy buffer.
    pub fn copy(&mut self) {
        self.copy_buffer = self
            .selection
            .members()
            .iter()
            .filter_map(|&guid| self.scene.get(guid))
            .map(|node| node.transfer_record().with_fresh_guid())
            .collect();
    }

    /// Spawn the copy buffer's contents. Every paste generates fresh guids,
    /// so pasting twice yields two independent sets of objects. Empty
    /// buffer is a silent no-op.
    pub fn paste(&mut self) {
        if self.copy_buffer.is_empty() {
            return;
        }

        let commands: Vec<Box<dyn Command>> = self
            .copy_buffer
            .iter()
            .map(|record| {
                Box::new(SpawnBlueprintCommand::new(record.with_fresh_guid())) as Box<dyn Command>
            })
            .collect();

        self.execute_command(Box::new(BulkCommand::with_description("Paste", commands)));
    }

    pub fn cut(&mut self) {
        self.copy();
        self.delete_selected();
    }

    /// Disable every selected object as one undoable unit.
    pub fn disable_selected(&mut self) {
        let commands: Vec<Box<dyn Command>> = self
            .selection
            .members()
            .iter()
            .filter(|&&guid| self.scene.contains(guid))
            .map(|&guid| Box::new(DisableBlueprintCommand::new(guid)) as Box<dyn Command>)
            .collect();

        if !commands.is_empty() {
            self.execute_command(Box::new(BulkCommand::with_description(
                "Disable Selected",
                commands,
            )));
        }
    }

    /// Enable every selected object as one undoable unit.
    pub fn enable_selected(&mut self) {
        let commands: Vec<Box<dyn Command>> = self
            .selection
            .members()
            .iter()
            .filter(|&&guid| self.scene.contains(guid))
            .map(|&guid| Box::new(EnableBlueprintCommand::new(guid)) as Box<dyn Command>)
            .collect();

        if !commands.is_empty() {
            self.execute_command(Box::new(BulkCommand::with_description(
                "Enable Selected",
                commands,
            )));
        }
    }

    /// Move an object to a new pose as an undoable command.
    ///
    /// The old pose is captured from the mirror so the inverse can restore
    /// it. Unknown guids are logged and skipped - the gizmo may still hold
    /// an object the engine already destroyed.
    pub fn move_object(&mut self, guid: Guid, transform: Transform) -> bool {
        let old_transform = match self.scene.get(guid) {
            Some(node) => node.transform,
            None => {
                log::warn!("move requested for unknown object {}", guid);
                return false;
            }
        };
        self.execute_command(Box::new(SetTransformCommand {
            guid,
            old_transform,
            new_transform: transform,
        }))
    }

    /// Rename an object as an undoable command.
    pub fn rename_object(&mut self, guid: Guid, name: impl Into<String>) -> bool {
        let old_name = match self.scene.get(guid) {
            Some(node) => node.name.clone(),
            None => {
                log::warn!("rename requested for unknown object {}", guid);
                return false;
            }
        };
        self.execute_command(Box::new(SetNameCommand {
            guid,
            old_name,
            new_name: name.into(),
        }))
    }

    /// Switch an object to a different blueprint variation as an undoable
    /// command.
    pub fn set_object_variation(&mut self, guid: Guid, variation: u32) -> bool {
        let old_variation = match self.scene.get(guid) {
            Some(node) => node.variation,
            None => {
                log::warn!("variation change requested for unknown object {}", guid);
                return false;
            }
        };
        self.execute_command(Box::new(SetVariationCommand {
            guid,
            old_variation,
            new_variation: variation,
        }))
    }

    // ========================================================================
    // Selection / highlight / focus
    // ========================================================================

    /// Make `guid` the only selected object.
    pub fn select(&mut self, guid: Guid) {
        self.selection.replace(guid);
        self.emit_selection_delta();
    }

    /// Add `guid` to the selection.
    pub fn select_additive(&mut self, guid: Guid) {
        self.selection.add(guid);
        self.emit_selection_delta();
    }

    pub fn deselect(&mut self, guid: Guid) {
        self.selection.remove(guid);
        self.emit_selection_delta();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.emit_selection_delta();
    }

    pub fn highlight_object(&mut self, guid: Guid) {
        self.highlight.add(guid);
        self.emit_highlight_delta();
    }

    pub fn unhighlight_object(&mut self, guid: Guid) {
        self.highlight.remove(guid);
        self.emit_highlight_delta();
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
        self.emit_highlight_delta();
    }

    /// Focus a specific object, or the primary selection when no guid is
    /// given. Nothing specified and nothing selected: silent no-op.
    pub fn focus(&mut self, guid: Option<Guid>) {
        let target = match guid.or_else(|| self.selection.primary()) {
            Some(target) => target,
            None => return,
        };
        if self.scene.contains(target) {
            self.notifications
                .send(EditorNotification::ObjectFocused(target));
        }
    }

    fn emit_selection_delta(&mut self) {
        if self.selection.take_dirty() {
            self.notifications.send(EditorNotification::SelectionChanged);
        }
    }

    fn emit_highlight_delta(&mut self) {
        if self.highlight.take_dirty() {
            self.notifications.send(EditorNotification::HighlightChanged);
        }
    }

    // ========================================================================
    // Inbound notifications (reconciliation path)
    // ========================================================================

    /// Apply one engine notification to the mirror.
    ///
    /// Phase 1 of the two-phase reaction: everything here is synchronous;
    /// selection of freshly spawned local objects is deferred to
    /// [`Editor::flush_deferred_focus`] so it runs after the whole batch of
    /// same-tick notifications has settled.
    pub fn apply(&mut self, message: EngineMessage) {
        match message {
            EngineMessage::SpawnedBlueprint { record, meta } => {
                let replayed = self.bulk_spawn_guids.remove(&record.guid);
                match self.scene.register_spawn(&record) {
                    Ok(guid) => {
                        self.notifications.send(EditorNotification::ObjectSpawned(guid));
                        self.notifications.send(EditorNotification::RenderInvalidated);

                        let local = meta.origin.as_str() == self.player_name;
                        if local && !replayed {
                            self.deferred_focus.push(guid);
                        }
                    }
                    Err(err) => {
                        // Duplicate deliveries are expected; ignore, never
                        // double-apply.
                        log::debug!("spawn ignored: {}", err);
                    }
                }
            }
            EngineMessage::DestroyedBlueprint { guid, .. } => {
                if self.scene.register_destroy(guid).is_some() {
                    self.selection.remove(guid);
                    self.highlight.remove(guid);
                    self.emit_selection_delta();
                    self.emit_highlight_delta();
                    self.notifications.send(EditorNotification::ObjectDestroyed(guid));
                    self.notifications.send(EditorNotification::RenderInvalidated);
                } else {
                    log::debug!("destroy for unknown object {}", guid);
                }
            }
            EngineMessage::EnabledBlueprint { guid, .. } => {
                if self.scene.set_enabled(guid, true) {
                    self.notifications.send(EditorNotification::RenderInvalidated);
                }
            }
            EngineMessage::DisabledBlueprint { guid, .. } => {
                if self.scene.set_enabled(guid, false) {
                    self.notifications.send(EditorNotification::RenderInvalidated);
                }
            }
            EngineMessage::ObjectNameChanged { guid, name, .. } => {
                self.scene.set_name(guid, &name);
            }
            EngineMessage::ObjectTransformChanged { guid, transform, .. } => {
                if self.scene.set_transform(guid, transform) {
                    self.notifications.send(EditorNotification::RenderInvalidated);
                }
            }
            EngineMessage::ObjectVariationChanged { guid, variation, .. } => {
                self.scene.set_variation(guid, variation);
            }
            EngineMessage::BlueprintSpawnInvoked { guid, name } => {
                log::info!("engine accepted spawn of {} ({})", name, guid);
            }
        }
    }

    /// Phase 2 of the two-phase reaction: select locally spawned objects
    /// now that their sibling/parent wiring from the same batch is
    /// complete. Targets that disappeared in the meantime are skipped.
    pub fn flush_deferred_focus(&mut self) {
        let pending = std::mem::take(&mut self.deferred_focus);
        for guid in pending {
            if self.scene.contains(guid) {
                self.select(guid);
            }
        }
    }

    /// Whether selections are waiting for the settle phase.
    pub fn has_deferred_focus(&self) -> bool {
        !self.deferred_focus.is_empty()
    }
}
