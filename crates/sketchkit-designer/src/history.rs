//! Command invoker and undo stack.
//!
//! Every mutation of the model goes through [`CommandInvoker::execute`]. The
//! stack is LIFO and unbounded; there is no redo stack.

use sketchkit_core::CommandError;
use tracing::{debug, warn};

use crate::commands::{Command, EditContext, UndoableCommand};

#[derive(Default)]
pub struct CommandInvoker {
    undo_stack: Vec<Box<dyn UndoableCommand>>,
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `cmd` and pushes it onto the undo stack.
    ///
    /// A command whose execution fails is dropped, not pushed.
    pub fn execute(
        &mut self,
        mut cmd: Box<dyn UndoableCommand>,
        ctx: &mut EditContext<'_>,
    ) -> Result<(), CommandError> {
        if let Err(e) = cmd.execute(ctx) {
            warn!("Command '{}' failed: {}", cmd.name(), e);
            return Err(e);
        }
        debug!("Executed '{}' (undo depth {})", cmd.name(), self.undo_stack.len() + 1);
        self.undo_stack.push(cmd);
        Ok(())
    }

    /// Runs a command that has no inverse. Nothing is recorded.
    pub fn run(&self, cmd: &mut dyn Command, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        cmd.execute(ctx)?;
        debug!("Ran '{}'", cmd.name());
        Ok(())
    }

    /// Undoes the most recent command.
    ///
    /// # Returns
    ///
    /// `Ok(false)` when the stack is empty. If the inverse fails the command
    /// stays on the stack and the error is returned.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<bool, CommandError> {
        let Some(mut cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = cmd.undo(ctx) {
            warn!("Undo of '{}' failed: {}", cmd.name(), e);
            self.undo_stack.push(cmd);
            return Err(e);
        }
        debug!("Undid '{}'", cmd.name());
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }

    /// Name of the command `undo` would revert.
    pub fn last_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Command names, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.undo_stack.iter().map(|c| c.name().to_string()).collect()
    }
}

impl std::fmt::Debug for CommandInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInvoker")
            .field("history", &self.history())
            .finish()
    }
}
