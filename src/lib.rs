//! Imperative and functional filtering of a bakery inventory.
//!
//! [`fnutil`] holds the generic combinators; [`data`] loads the inventory
//! and expresses the domain filters with them; [`report`] writes results
//! to a line sink.

pub mod data;
pub mod fnutil;
pub mod report;

/// Location of the inventory shipped with the crate.
pub const DEFAULT_INVENTORY_PATH: &str = "data/bakery_inventory.json";
