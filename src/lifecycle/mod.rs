//! Lifecycle orchestration: start the actor, wire its collaborators, arm the
//! reclassification timer, and shut everything down cleanly.

pub mod system;
pub mod tracing;

pub use self::system::{InventorySystem, SystemConfig};
pub use self::tracing::setup_tracing;
