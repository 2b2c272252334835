//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session bookkeeping and engine calls so route
//! handlers stay focused on protocol translation.

pub mod quote;
pub mod session;
