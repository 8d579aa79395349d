// src/lib.rs

pub mod core;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod persistence;
pub mod c_api;

pub use crate::config::SearchConfig;
pub use crate::core::engine::PinyinSearch;
pub use crate::core::types::{NamedEntry, Searchable, Stats};
pub use crate::error::{Result, SearchError};
