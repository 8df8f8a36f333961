//! m8prep CLI library.
//!
//! This crate provides the command implementations behind the `m8prep`
//! binary: directory scanning, the in-place conversion pass, and the
//! bit-depth verification pass.

pub mod commands;
pub mod scan;
