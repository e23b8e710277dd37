//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and the calls into the `ladder` core so
//! route handlers can stay focused on protocol translation.

pub mod ladder;
