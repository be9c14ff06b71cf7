//! Content module - pages, their on-disk store and Markdown rendering

mod markdown;
mod page;
pub mod store;

pub use markdown::MarkdownRenderer;
pub use page::{Page, Title};
pub use store::PageStore;
