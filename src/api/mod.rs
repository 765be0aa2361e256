pub mod client;
pub mod types;

pub use client::{HttpPageSource, PageSource};
pub use types::{PageRequest, LOAD_MORE_PATH};
