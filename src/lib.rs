//! # Clinica
//!
//! Front-end core for the clinical records admin dashboard: the authenticated API
//! client every page talks to the backend through, and the route table and navigator
//! the application shell renders from.
//!
//! ## Modules
//!
//! - [`client`]: request pipeline with default framing and bearer-token attachment
//! - [`token`]: persistent storage slot for the bearer token
//! - [`auth`]: sign-in and sign-out against the backend
//! - [`routes`]: ordered route table with layout partitions and a catch-all
//! - [`navigation`]: navigator, auth guard hook, scroll reset, page lifetimes
//! - [`config`]: TOML configuration with environment overrides
//!
//! The default `native` feature adds the `reqwest` transport, a file-backed token
//! store, logging setup and the `clinica` CLI. The browser app builds this crate with
//! default features off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinica::client::{ApiClient, ReqwestTransport};
//! use clinica::routes::{app_routes, Page};
//! use clinica::token::MemoryTokenStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = Arc::new(MemoryTokenStore::with_token("abc123"));
//!     let client = ApiClient::new("http://127.0.0.1:8000", ReqwestTransport::default(), tokens);
//!
//!     // Sent with `Authorization: Bearer abc123`
//!     let pacientes = client.get("/pacientes/").await?;
//!     println!("{}", pacientes.body);
//!
//!     let matched = app_routes().resolve("/usuarios/doctores");
//!     assert_eq!(matched.page(), Page::Usuarios);
//!     assert_eq!(matched.param("rol"), Some("doctor"));
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
pub mod navigation;
pub mod routes;
pub mod token;

pub use auth::{sign_in, sign_out, AuthError, LoginRequest, TokenResponse};

pub use client::{
    ApiClient, ApiError, ApiRequest, ApiResponse, ErrorKind, Interceptor, Method, Transport,
};

#[cfg(feature = "native")]
pub use client::ReqwestTransport;

pub use config::{Config, ConfigError};

pub use navigation::{
    AllowAll, AuthGuard, GuardDecision, NavigationHook, Navigator, PageLifetime, RequireToken,
    ScrollReset, Viewport,
};

pub use routes::{
    app_routes, Layout, Page, RouteDescriptor, RouteError, RouteMatch, RouteTable,
    RouteTableBuilder,
};

#[cfg(feature = "native")]
pub use token::FileTokenStore;
pub use token::{MemoryTokenStore, TokenStore, TokenStoreError};
