pub mod post_images;
pub mod posts;
pub mod prelude;
