//! CLI command implementations

pub mod compile;
pub mod delete;
pub mod list;
pub mod new;
pub mod show;
pub mod validate;

mod reporting;
