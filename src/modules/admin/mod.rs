//! Admin Module
//!
//! Sharing controls and the permissions matrix. Everything here reads
//! server-side records; nothing is editable locally except through the
//! commands in `sharing`.

pub mod sharing;
