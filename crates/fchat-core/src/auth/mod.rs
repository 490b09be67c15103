//! Registration and login over a pluggable credential store.

pub mod service;
pub mod store;
pub mod validate;
