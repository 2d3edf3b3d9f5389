//! Admin navigation bar: menu descriptors filtered through a guard registry.
//!
//! Superusers see every item. Everyone else sees an item only when a guard
//! was registered for its key and that guard admits them; keys without a
//! guard deny.

mod menu;
mod user;

pub use menu::{MenuItem, NavBuilder, NavGuards, Navigation, default_guard};
pub use user::User;
