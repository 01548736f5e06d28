//! Hash containers keyed by card handles and engine ids.
//!
//! Uses the Fx hasher unless the `std-hash` feature is enabled.

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
    pub use rustc_hash::FxHashSet as HashSet;
}

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
    pub use std::collections::HashSet;
}
