//! The inventory tracker actor.
//!
//! This module is the server side of the tracker: [`InventoryActor`] owns the
//! item collection and processes [`InventoryRequest`] messages sequentially.
//! Use [`InventoryActor::new`] to obtain the actor together with its
//! [`InventoryClient`](crate::clients::InventoryClient), spawn
//! [`InventoryActor::run`] with an [`InventoryContext`], and talk to it
//! through the client. The [`lifecycle`](crate::lifecycle) module wraps this
//! wiring, including the recurring reclassification timer.

pub mod actor;
pub mod classify;
pub mod error;
pub mod message;

pub use actor::{InventoryActor, InventoryContext};
pub use error::InventoryError;
pub use message::{InventoryRequest, ReclassifyOutcome, Reply};
