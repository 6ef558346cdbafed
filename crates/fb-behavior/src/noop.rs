//! A behavior script with no hooks.

use crate::{HookSet, Script};

/// A [`Script`] that declares no hooks.
///
/// Its behaviors go through the full lifecycle (enable, disable, destroy)
/// but never join the tick registry.  Useful as a placeholder in tests or
/// for passive objects that only carry a weight and an id.
pub struct NoopScript;

impl Script for NoopScript {
    const HOOKS: HookSet = HookSet::NONE;
}
