//! A single-branch retail bank driven through a text menu.
//!
//! The interesting part is the authentication and authorization core:
//! PIN login with failed-attempt lockout ([`security`]), inactivity-based
//! auto-locking, and limit validation for every money movement
//! ([`worker`]). The [`domain`] ledger is the in-memory source of truth;
//! [`io`] flushes it to flat files after every mutation that must survive
//! a restart.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod security;
pub mod test_utils;
pub mod worker;
