pub mod form;
pub mod pager;

pub use form::{FormController, FormState};
pub use pager::{ChannelVideoPager, LoadStep, PagerState, SubmitRegistry};
