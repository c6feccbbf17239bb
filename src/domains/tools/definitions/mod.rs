//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod devto;

pub use devto::{
    GetArticleTool, GetArticlesTool, GetCommentsTool, GetTagsTool, GetUserTool,
    SearchArticlesTool, create_text_result,
};
