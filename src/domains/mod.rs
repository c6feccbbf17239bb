//! Domains module containing business logic organized by bounded contexts.
//!
//! - **devto**: the dev.to REST backend client
//! - **tools**: MCP tools exposed to clients, one per backend operation

pub mod devto;
pub mod tools;
