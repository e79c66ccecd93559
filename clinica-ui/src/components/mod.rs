//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod nav;
pub mod toast;

pub use loading::{Loading, TableSkeleton};
pub use nav::{Header, Sidebar};
pub use toast::Toast;
