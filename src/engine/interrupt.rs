//! Ctrl+C handling.
//!
//! `ctrlc` allows one handler per process, so the handler is installed once
//! and finalizes whichever bar currently occupies the registration slot.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::bar::Shared;
use crate::error::Result;

/// Exit status after an interrupt (128 + SIGINT).
pub const INTERRUPT_EXIT_CODE: i32 = 130;

static INSTALLED: Mutex<bool> = Mutex::new(false);
static ACTIVE: Mutex<Option<Weak<Shared>>> = Mutex::new(None);

fn on_interrupt() {
    let active = ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(shared) = active.and_then(|weak| weak.upgrade()) {
        shared.finish();
    }
    std::process::exit(INTERRUPT_EXIT_CODE);
}

/// Make `shared` the bar finalized on Ctrl+C, installing the handler on
/// first use.
pub(crate) fn register(shared: &Arc<Shared>) -> Result<()> {
    {
        let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
        if !*installed {
            ctrlc::set_handler(on_interrupt)?;
            *installed = true;
        }
    }
    *ACTIVE.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::downgrade(shared));
    Ok(())
}

/// Empty the slot if it still holds `shared`.
pub(crate) fn deregister(shared: &Shared) {
    let mut active = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner);
    if active
        .as_ref()
        .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), shared))
    {
        *active = None;
    }
}

#[cfg(test)]
pub(crate) fn is_registered(shared: &Shared) -> bool {
    ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), shared))
}
