pub use super::post_images::Entity as PostImages;
pub use super::posts::Entity as Posts;
