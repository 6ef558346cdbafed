//! `fb-registry` — the ordered registry that decides tick order.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`registry`] | `Registry<T>` — id-keyed, order-preserving, `Rc` entries   |
//! | [`sort`]     | Stable descending-weight sort used by `Registry::resort`   |
//!
//! # Design notes
//!
//! The registry is generic over any `T: ?Sized + Weighted` so it has no
//! dependency on the behavior crate; `fb-behavior` instantiates it with its
//! type-erased lifecycle object.  Entries are `Rc` clones: a registered
//! behavior stays scheduled after its creator drops every handle, and
//! removing an entry never destroys anything.
//!
//! Ordering is lazy.  `insert` appends; only `resort` reorders.  Callers
//! decide when a re-sort is needed (non-zero weight on insert, weight
//! change), so insertion order survives between re-sorts.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the membership set.                |

pub mod registry;
pub mod sort;


pub use registry::{Registry, Weighted};
pub use sort::sort_by_weight_desc;
