// rosterhub/src/lib.rs
//
// Core state engine for a team sports club app: roster, schedule, payments,
// chat, and notifications, persisted as a single versioned JSON snapshot.
// The UI layer embeds this crate and calls `TeamStore` operations directly.

pub mod models;
pub mod services;
pub mod startup;
pub mod store;
pub mod utils;

pub use store::TeamStore;

#[cfg(test)]
mod tests;
