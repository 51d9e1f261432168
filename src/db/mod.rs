//! JSON file persistence.
//!
//! All state lives as JSON files in one data directory: `users.json` for
//! registered users and one `<username>_groceries.json` per user for
//! grocery lists. Both stores follow the same discipline: load the whole
//! file, mutate in memory, rewrite the whole file. No locks, no partial
//! updates, no cross-file transactions.

/// Per-user grocery lists and the sharing propagation routine.
pub mod groceries;
/// Registered users (`users.json`).
pub mod users;

pub use groceries::GroceryStore;
pub use users::UserStore;
