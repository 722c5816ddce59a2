use serde::{Deserialize, Serialize};

/// How a generated post presents its visuals: one image, or an ordered
/// sequence of 2-10 slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    Single,
    Carousel,
}

impl PostType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Carousel => "CAROUSEL",
        }
    }

    /// Reads a stored value back. Unknown strings fall back to `Single`,
    /// mirroring the parser's default.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        if value.eq_ignore_ascii_case("CAROUSEL") {
            Self::Carousel
        } else {
            Self::Single
        }
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub headline: String,
    pub content: String,
    pub news_link: String,
    pub post_type: PostType,
    pub plan: String,
    pub caption: String,
    pub created_at: String,
    pub images: Vec<PostImage>,
}

#[derive(Debug, Clone)]
pub struct PostImage {
    pub url: String,
    pub prompt: String,
    pub sequence_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub headline: String,
    pub content: String,
    pub news_link: String,
    pub post_type: PostType,
    pub plan: String,
    pub caption: String,
}

#[derive(Debug, Clone)]
pub struct NewPostImage {
    pub url: String,
    pub prompt: String,
}
