pub mod settle;
pub mod timeout;

pub use settle::missing_anchors;
pub use timeout::{TimeoutExt, TimeoutWrapper};
