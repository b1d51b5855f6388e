pub mod content;
pub mod posts;
pub mod response;
