//! Capability hooks a [`Script`][crate::Script] may declare.

use std::fmt;
use std::ops::BitOr;

/// A set of declared lifecycle hooks.
///
/// Declared as an associated constant on each script type, so the set is
/// fixed per type and known before any instance exists:
///
/// ```rust,ignore
/// const HOOKS: HookSet = HookSet::UPDATE.union(HookSet::DESTROY);
/// ```
///
/// [`HookSet::UPDATE`] is load-bearing: it alone decides whether a behavior
/// participates in the tick registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct HookSet(u8);

impl HookSet {
    pub const NONE:    HookSet = HookSet(0);
    pub const START:   HookSet = HookSet(1 << 0);
    pub const UPDATE:  HookSet = HookSet(1 << 1);
    pub const ENABLE:  HookSet = HookSet(1 << 2);
    pub const DISABLE: HookSet = HookSet(1 << 3);
    pub const RESTORE: HookSet = HookSet(1 << 4);
    pub const DESTROY: HookSet = HookSet(1 << 5);
    pub const ALL:     HookSet = HookSet(0b11_1111);

    const NAMES: [(HookSet, &'static str); 6] = [
        (Self::START,   "start"),
        (Self::UPDATE,  "update"),
        (Self::ENABLE,  "enable"),
        (Self::DISABLE, "disable"),
        (Self::RESTORE, "restore"),
        (Self::DESTROY, "destroy"),
    ];

    /// `const` union, usable in `HOOKS` declarations.
    #[inline]
    pub const fn union(self, other: HookSet) -> HookSet {
        HookSet(self.0 | other.0)
    }

    /// `true` if every hook in `other` is also in `self`.
    #[inline]
    pub const fn contains(self, other: HookSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if the set declares an update hook, i.e. the behavior ticks.
    #[inline]
    pub const fn ticks(self) -> bool {
        self.contains(HookSet::UPDATE)
    }
}

impl BitOr for HookSet {
    type Output = HookSet;

    #[inline]
    fn bitor(self, rhs: HookSet) -> HookSet {
        self.union(rhs)
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name);
        f.debug_set().entries(names).finish()
    }
}

// ── Hook ──────────────────────────────────────────────────────────────────────

/// One pending hook invocation.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Hook {
    Start,
    /// Carries the elapsed milliseconds passed to the update step.
    Update(f64),
    Enable,
    Disable,
    Restore,
    Destroy,
}

impl Hook {
    /// The capability flag that must be declared for this hook to run.
    #[inline]
    pub fn flag(self) -> HookSet {
        match self {
            Hook::Start     => HookSet::START,
            Hook::Update(_) => HookSet::UPDATE,
            Hook::Enable    => HookSet::ENABLE,
            Hook::Disable   => HookSet::DISABLE,
            Hook::Restore   => HookSet::RESTORE,
            Hook::Destroy   => HookSet::DESTROY,
        }
    }
}
