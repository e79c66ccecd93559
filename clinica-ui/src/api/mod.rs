//! Backend access for the dashboard.

pub mod client;
pub mod storage;

pub use client::{get_api_base, provide_api_client, set_api_base, use_api, ApiCtx, Client};
pub use storage::LocalStorageTokenStore;
