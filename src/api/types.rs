use serde::{Deserialize, Serialize};

use crate::models::post::{Post, PostImage, PostType};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub result: String,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePostRequest {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub news_link: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePostResponse {
    pub success: bool,
    pub post_id: i64,
    pub post_type: PostType,
    pub plan: String,
    pub images: Vec<ImageDto>,
    pub caption: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ImageDto {
    pub url: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PostImageDto {
    pub url: String,
    pub prompt: String,
    pub order: i32,
}

impl From<PostImage> for PostImageDto {
    fn from(image: PostImage) -> Self {
        Self {
            url: image.url,
            prompt: image.prompt,
            order: image.sequence_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDto {
    pub id: i64,
    pub headline: String,
    pub content: String,
    pub news_link: String,
    pub post_type: PostType,
    pub plan: String,
    pub caption: String,
    pub created_at: String,
    pub images: Vec<PostImageDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            headline: post.headline,
            content: post.content,
            news_link: post.news_link,
            post_type: post.post_type,
            plan: post.plan,
            caption: post.caption,
            created_at: post.created_at,
            images: post.images.into_iter().map(PostImageDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostDto,
}

#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub success: bool,
    pub message: String,
}
