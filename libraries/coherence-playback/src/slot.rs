//! Single-owner session slot
//!
//! The page may run its initialization more than once (content replacement
//! re-executes scripts). The slot hands out the first manager it ever built
//! and never constructs a second audio engine.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use crate::manager::SessionManager;

/// Shared handle to the one session manager
pub type SharedSession = Rc<RefCell<SessionManager>>;

/// Holds at most one session manager
#[derive(Debug, Default)]
pub struct SessionSlot {
    cell: OnceCell<SharedSession>,
}

impl SessionSlot {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Existing session, or one built by `init`
    ///
    /// `init` runs at most once over the slot's lifetime.
    pub fn get_or_init(&self, init: impl FnOnce() -> SessionManager) -> SharedSession {
        Rc::clone(self.cell.get_or_init(|| {
            tracing::info!("Creating playback session");
            Rc::new(RefCell::new(init()))
        }))
    }

    pub fn get(&self) -> Option<SharedSession> {
        self.cell.get().cloned()
    }
}
