//! Pages
//!
//! Top-level page components, one per route table entry.

pub mod auth;
pub mod collection;
pub mod home;
pub mod not_found;
pub mod placeholder;

pub use auth::{SignIn, SignUp};
pub use collection::CollectionPage;
pub use home::Home;
pub use not_found::NotFound;
pub use placeholder::Placeholder;
