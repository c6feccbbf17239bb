//! dev.to backend domain.
//!
//! The single point of contact with the dev.to public REST API:
//! - `client.rs` - one async method per backend operation
//! - `params.rs` - request parameter types, shared with the tool schemas
//! - `error.rs` - backend error taxonomy

mod client;
mod error;
pub mod params;

pub use client::DevToClient;
pub use error::{DevToError, DevToResult};
pub use params::{
    ArticleState, GetArticleParams, GetCommentsParams, GetUserParams, ListArticlesParams,
    ListTagsParams, SearchArticlesParams,
};
