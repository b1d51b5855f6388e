pub mod content;
pub mod post_validator;
pub mod posts;
pub mod upload;
