pub mod category;
pub mod path;
pub mod post;
pub mod tree;
pub mod types;
pub mod validate;
