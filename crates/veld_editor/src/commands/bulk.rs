//! Composite command over an ordered list of child commands.

use super::{Command, CommandResult};
use crate::editor::Editor;

/// Composes many commands into one atomic undo unit.
///
/// `execute` runs children in insertion order; `undo` unwinds in reverse
/// insertion order, since later children may depend on state produced by
/// earlier ones (a parent spawned before its child). While a bulk runs, the
/// editor's replay flag is set so per-spawn focus reactions stay quiet.
pub struct BulkCommand {
    description: String,
    commands: Vec<Box<dyn Command>>,
}

impl BulkCommand {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self::with_description("Bulk Edit", commands)
    }

    pub fn with_description(description: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            description: description.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for BulkCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&mut self, editor: &mut Editor) -> CommandResult {
        editor.begin_bulk();
        let mut result = Ok(());
        for cmd in &mut self.commands {
            if let Err(err) = cmd.execute(editor) {
                result = Err(err);
                break;
            }
        }
        editor.end_bulk();
        result
    }

    fn undo(&mut self, editor: &mut Editor) -> CommandResult {
        editor.begin_bulk();
        let mut result = Ok(());
        for cmd in self.commands.iter_mut().rev() {
            if let Err(err) = cmd.undo(editor) {
                result = Err(err);
                break;
            }
        }
        editor.end_bulk();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct OrderProbe {
        tag: u32,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Command for OrderProbe {
        fn description(&self) -> &str {
            "Probe"
        }

        fn execute(&mut self, _editor: &mut Editor) -> CommandResult {
            self.log.lock().unwrap().push(format!("exec:{}", self.tag));
            Ok(())
        }

        fn undo(&mut self, _editor: &mut Editor) -> CommandResult {
            self.log.lock().unwrap().push(format!("undo:{}", self.tag));
            Ok(())
        }
    }

    fn probes(log: &Arc<Mutex<Vec<String>>>, count: u32) -> Vec<Box<dyn Command>> {
        (0..count)
            .map(|tag| {
                Box::new(OrderProbe {
                    tag,
                    log: log.clone(),
                }) as Box<dyn Command>
            })
            .collect()
    }

    #[test]
    fn test_bulk_forward_then_reverse_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut editor = Editor::new("LocalPlayer");
        let mut bulk = BulkCommand::new(probes(&log, 3));

        bulk.execute(&mut editor).unwrap();
        bulk.undo(&mut editor).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["exec:0", "exec:1", "exec:2", "undo:2", "undo:1", "undo:0"]
        );
    }

    #[test]
    fn test_bulk_sets_replay_flag() {
        struct FlagProbe {
            saw_replaying: Arc<Mutex<bool>>,
        }

        impl Command for FlagProbe {
            fn description(&self) -> &str {
                "FlagProbe"
            }

            fn execute(&mut self, editor: &mut Editor) -> CommandResult {
                *self.saw_replaying.lock().unwrap() = editor.is_bulk_replaying();
                Ok(())
            }

            fn undo(&mut self, _editor: &mut Editor) -> CommandResult {
                Ok(())
            }
        }

        let saw = Arc::new(Mutex::new(false));
        let mut editor = Editor::new("LocalPlayer");
        assert!(!editor.is_bulk_replaying());

        let mut bulk = BulkCommand::new(vec![Box::new(FlagProbe {
            saw_replaying: saw.clone(),
        }) as Box<dyn Command>]);
        bulk.execute(&mut editor).unwrap();

        assert!(*saw.lock().unwrap());
        assert!(!editor.is_bulk_replaying());
    }
}
