//! Page controllers for the YouTube comment-analysis site: the index page's
//! URL form and the channel page's paginated video grid.
//!
//! Controllers never touch a document directly. They take events, update
//! their own state and return [`dom::Patch`]es for a [`dom::Host`] to apply.

pub mod api;
pub mod config;
pub mod dom;
pub mod errors;
pub mod logging;
pub mod models;
pub mod pages;
pub mod render;
pub mod token;

pub use config::PageConfig;
pub use errors::PageError;
pub use pages::{ChannelVideoPager, FormController};
