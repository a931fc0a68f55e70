//! depviz - package dependency graph explorer
//!
//! This crate discovers a package's transitive dependencies from a live
//! registry or a static fixture table, orders them so dependencies come
//! before dependents, and renders the result as a Graphviz diagram, an
//! indented tree or plain text.

pub mod config;
pub mod export;
pub mod graph;
pub mod logging;
pub mod records;
pub mod render;
pub mod source;
