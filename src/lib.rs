pub mod config;
pub mod logger;
pub mod error;
pub mod post;
pub mod content_store;
pub mod shared_store;
pub mod content;
pub mod post_list;
pub mod loader;
pub mod paginator;
pub mod text_utils;
pub mod util;
mod test_data;

pub use content_store::{ContentStore, PostListing, SortOrder, TagCount};
pub use error::StoreError;
pub use post::{Document, Post, PostId};
pub use shared_store::SharedStore;
