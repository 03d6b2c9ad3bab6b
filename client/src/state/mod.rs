//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session is the only cross-page state; it lives in `auth` and is handed
//! to components through Leptos context rather than a global.

pub mod auth;
