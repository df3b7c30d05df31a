//! Type-safe client handles for the actor layer.

pub mod inventory_client;

pub use inventory_client::InventoryClient;
