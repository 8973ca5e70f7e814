//! TI services host
//!
//! Every domain crate exposes an axum router over a repository trait. This
//! crate wires the PostgreSQL repositories into those routers so that one
//! binary can run any of them:
//!
//! ```text
//! ti-services serve equipos         # /equipos, /categorias, /ubicaciones
//! ti-services serve reportes        # /dashboard, /export/pdf, ...
//! ti-services migrate               # apply pending migrations and exit
//! ```

pub mod config;
pub mod ready;
pub mod services;

pub use config::Config;
pub use services::{ServiceKind, api_router, build_app};
