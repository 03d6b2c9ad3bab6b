//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control is applied around pages in `app`, never
//! inside them.

pub mod dashboard;
pub mod login;
pub mod register;
pub mod section;
