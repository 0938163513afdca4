// Base entities (no eager-loaded relations)
pub mod notification;

// Venue hierarchy: pub -> locations -> tables
pub mod venue;

// Entities linking users to other users and venues
pub mod friend;
pub mod reservation;
pub mod review;

// Root entity with the full include tree
pub mod user;

// Re-export all entity types
pub use friend::*;
pub use notification::*;
pub use reservation::*;
pub use review::*;
pub use user::*;
pub use venue::*;
