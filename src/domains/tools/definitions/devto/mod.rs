//! dev.to tools module.
//!
//! One file per tool, each a thin adapter over one `DevToClient` operation:
//! - `articles`: list articles with filters
//! - `article`: fetch one article by id or path
//! - `user`: fetch one user by id or username
//! - `tags`: list popular tags
//! - `comments`: list the comments of an article
//! - `search`: full-text article search
//!
//! Each tool has handlers for both HTTP and STDIO transports.

pub mod article;
pub mod articles;
pub mod comments;
pub mod common;
pub mod search;
pub mod tags;
pub mod user;

pub use article::GetArticleTool;
pub use articles::GetArticlesTool;
pub use comments::GetCommentsTool;
pub use common::create_text_result;
pub use search::SearchArticlesTool;
pub use tags::GetTagsTool;
pub use user::GetUserTool;
