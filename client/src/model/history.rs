//! A linear undo history.
//!
//! Commands are kept in execution order together with a cursor on the last applied one.
//! Executing a new command after some undos drops everything past the cursor, so the
//! history never branches.

use super::recorder::Recorder;
use std::{fmt, num::NonZeroUsize};

/// A reversible unit of work.
///
/// The history never looks inside a command: it only calls [`redo`](Command::redo) to apply
/// the command's effect on `Target` and [`undo`](Command::undo) to take it back.
pub trait Command {
    type Target: ?Sized;

    fn redo(&mut self, target: &mut Self::Target) -> anyhow::Result<()>;

    fn undo(&mut self, target: &mut Self::Target) -> anyhow::Result<()>;
}

type Action<T> = Box<dyn FnMut(&mut T) -> anyhow::Result<()>>;

/// A command built from a pair of closures.
pub struct FnCommand<T> {
    redo: Action<T>,
    undo: Action<T>,
}

impl<T> FnCommand<T> {
    pub fn new(
        redo: impl FnMut(&mut T) -> anyhow::Result<()> + 'static,
        undo: impl FnMut(&mut T) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            redo: Box::new(redo),
            undo: Box::new(undo),
        }
    }
}

impl<T> fmt::Debug for FnCommand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand").finish_non_exhaustive()
    }
}

impl<T> Command for FnCommand<T> {
    type Target = T;

    fn redo(&mut self, target: &mut T) -> anyhow::Result<()> {
        (self.redo)(target)
    }

    fn undo(&mut self, target: &mut T) -> anyhow::Result<()> {
        (self.undo)(target)
    }
}

/// Which directions the history can currently move in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Status {
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug)]
pub struct History<C> {
    commands: Vec<C>,
    /// Number of commands currently applied, i.e. the cursor plus one.
    applied: usize,
    limit: Option<NonZeroUsize>,
    status: Recorder<Status>,
}

impl<C> Default for History<C> {
    fn default() -> Self {
        Self {
            commands: vec![],
            applied: 0,
            limit: None,
            status: Recorder::default(),
        }
    }
}

impl<C: Command> History<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `limit` commands, forgetting the oldest ones first.
    pub fn with_limit(limit: NonZeroUsize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Records `com` as the latest command and applies it.
    ///
    /// Commands that were undone before are discarded. The command is recorded before it is
    /// applied, so it stays in the history even if applying it fails.
    pub fn execute(&mut self, target: &mut C::Target, com: C) -> anyhow::Result<()> {
        let discarded = self.commands.len() - self.applied;
        if discarded > 0 {
            log::trace!("discarding {} undone command(s)", discarded);
        }
        self.commands.truncate(self.applied);
        self.commands.push(com);
        self.applied = self.commands.len();
        self.enforce_limit();
        self.sync_status();
        self.commands[self.applied - 1].redo(target)
    }

    /// Reverts the latest applied command.
    ///
    /// Returns `Ok(false)` without doing anything if there is nothing to undo. The cursor only
    /// moves once the command has been reverted successfully.
    pub fn undo(&mut self, target: &mut C::Target) -> anyhow::Result<bool> {
        let index = match self.applied.checked_sub(1) {
            Some(index) => index,
            None => return Ok(false),
        };
        self.commands[index].undo(target)?;
        self.applied = index;
        self.sync_status();
        log::trace!("undone command #{}", index);
        Ok(true)
    }

    /// Reapplies the command right after the cursor.
    ///
    /// Returns `Ok(false)` without doing anything if there is nothing to redo. The cursor only
    /// moves once the command has been applied successfully.
    pub fn redo(&mut self, target: &mut C::Target) -> anyhow::Result<bool> {
        let index = self.applied;
        let com = match self.commands.get_mut(index) {
            Some(com) => com,
            None => return Ok(false),
        };
        com.redo(target)?;
        self.applied = index + 1;
        self.sync_status();
        log::trace!("redone command #{}", index);
        Ok(true)
    }
}

impl<C> History<C> {
    /// Forgets every command. Nothing is undone.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.applied = 0;
        self.sync_status();
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    /// Index of the latest applied command, or `None` if nothing is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[C] {
        &self.commands
    }

    pub fn status(&self) -> Status {
        *self.status.get()
    }

    /// Returns the status if it has changed since the last call.
    pub fn take_status_change(&mut self) -> Option<Status> {
        self.status.take_update().copied()
    }

    fn enforce_limit(&mut self) {
        let limit = match self.limit {
            Some(limit) => limit.get(),
            None => return,
        };
        if self.commands.len() > limit {
            let excess = self.commands.len() - limit;
            self.commands.drain(..excess);
            self.applied -= excess;
            log::trace!("forgot {} oldest command(s)", excess);
        }
    }

    fn sync_status(&mut self) {
        let status = Status {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.status.set(status);
    }
}
