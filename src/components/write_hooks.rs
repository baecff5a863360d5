use std::collections::HashMap;

use strum_macros::Display;

use crate::components::data_memory::DataMemory;

/// What a write hook decided about the store it intercepted.
#[derive(Display, Debug, Copy, Clone, Eq, PartialEq)]
pub enum HookResult {
    /// The hook took full responsibility for the write; the default store is
    /// skipped. A transmit register that consumes the byte goes here.
    Handled,
    /// The hook only observed the write; the default store proceeds.
    NotHandled,
}

pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Intercepts a write to one address. Receives the raw data space as an
/// explicit capability (hooks may read or write other addresses through it),
/// then `(new_value, old_value, addr)`. Because only the storage layer is
/// passed in, a hook cannot re-enter the hooked write path.
pub type WriteHook =
    Box<dyn FnMut(&mut DataMemory, u8, u8, u16) -> Result<HookResult, HookError>>;

/// Sparse address-to-hook mapping, at most one hook per address. The core
/// never installs entries itself; peripherals do, and entries survive
/// `reset`.
#[derive(Default)]
pub struct HookTable {
    hooks: HashMap<u16, WriteHook>,
}

impl HookTable {
    /// Installs the hook for `addr`, replacing any previous one.
    pub fn register(&mut self, addr: u16, hook: WriteHook) {
        self.hooks.insert(addr, hook);
    }

    /// Removes the hook for `addr`; subsequent writes there get default-store
    /// semantics again. Returns whether a hook was installed.
    pub fn unregister(&mut self, addr: u16) -> bool {
        self.hooks.remove(&addr).is_some()
    }

    pub(crate) fn lookup_mut(&mut self, addr: u16) -> Option<&mut WriteHook> {
        self.hooks.get_mut(&addr)
    }
}
