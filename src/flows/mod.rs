//! The two request/response flows: validate input, call the model, normalize
//! the output.

pub mod image;
pub mod recommendation;

pub use image::generate_image;
pub use recommendation::recommend_projects;
