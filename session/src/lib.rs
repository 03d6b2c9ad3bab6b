//! Session and route-guard core shared by the CareBridge client and server.
//!
//! This crate owns "who is logged in": the [`Identity`] model, the
//! [`SessionStore`] that persists it through an injected [`SessionStorage`],
//! and the pure [`guard`] decision the UI consults on every navigation. It has
//! no UI or runtime dependencies so both the browser build and native tests
//! can construct independent stores.

pub mod directory;
pub mod guard;
pub mod identity;
pub mod routes;
pub mod storage;
pub mod store;

pub use directory::{IdentityDirectory, StaticDirectory};
pub use guard::{GuardDecision, GuardPhase, decide};
pub use identity::{Identity, ParseRoleError, Role};
pub use routes::{Access, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH, RouteTable};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{SESSION_RECORD_KEY, SessionError, SessionState, SessionStore};
