//! Users Domain
//!
//! Registration and read access for users, plus the boards, roles and wallet
//! attached to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, token gate, envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, views, payloads
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let auth = JwtAuth::new(&JwtConfig::new("dev-secret"));
//!
//! let router = handlers::router(service, auth);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{
    BASIC_ROLE, Board, BoardView, CreateUser, Role, RoleView, User, UserSearch, UserView, Wallet,
    WalletView,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{UserLookup, UserService};
