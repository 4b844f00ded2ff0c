//! Message append and cursor-paginated listing for Parley.

pub mod service;
