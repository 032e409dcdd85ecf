//! Route modules for the API server
//!
//! - dedup: duplicate preview, atomic removal, document reload

pub mod dedup;
