//! Hunt progress — visit records, derived stats and their persistence.
//!
//! `ProgressStore` is framework-independent: the WASM session owns one
//! instance and the route handlers call into it.

pub mod state;
pub mod storage;
pub mod store;
pub mod tier;

pub use state::{PhotoProof, ProgressState, VisitRecord};
pub use storage::{MemorySlot, SlotStorage};
pub use store::{CertificateData, ProgressStore, Stats};
pub use tier::{Achievement, Milestone, Tier, TierLadder};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserSlot;
