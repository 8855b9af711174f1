//! Domain services used by page and fragment routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own backend access, session handling, and catalog and
//! form logic so route handlers can stay focused on HTTP translation and
//! rendering.

pub mod backend;
pub mod catalog;
pub mod forms;
pub mod guard;
pub mod session;
