use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{
    AppState,
    error::ApiError,
    types::{
        DeletePostResponse, GeneratePostRequest, GeneratePostResponse, ImageDto, PostDetailResponse,
        PostDto, PostListResponse,
    },
};
use crate::services::GenerationInput;

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GeneratePostRequest>,
) -> Result<Json<GeneratePostResponse>, ApiError> {
    let headline = req.headline.trim();
    let content = req.content.trim();
    let news_link = req.news_link.trim();
    if headline.is_empty() || content.is_empty() || news_link.is_empty() {
        return Err(ApiError::validation("All fields are required"));
    }

    let generated = state
        .shared
        .generation
        .generate(GenerationInput {
            headline: headline.to_string(),
            content: content.to_string(),
            news_link: news_link.to_string(),
        })
        .await?;

    let message = format!(
        "{} post generated successfully",
        generated.post_type.as_str().to_lowercase()
    );

    Ok(Json(GeneratePostResponse {
        success: true,
        post_id: generated.post_id,
        post_type: generated.post_type,
        plan: generated.plan,
        images: generated
            .images
            .into_iter()
            .map(|image| ImageDto {
                url: image.url,
                prompt: image.prompt,
            })
            .collect(),
        caption: generated.caption,
        message,
    }))
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PostListResponse>, ApiError> {
    let posts = state.shared.store.list_posts().await?;
    Ok(Json(PostListResponse {
        posts: posts.into_iter().map(PostDto::from).collect(),
    }))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = state
        .shared
        .store
        .get_post(id)
        .await?
        .ok_or_else(ApiError::post_not_found)?;

    Ok(Json(PostDetailResponse {
        post: PostDto::from(post),
    }))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePostResponse>, ApiError> {
    let urls = state
        .shared
        .store
        .delete_post(id)
        .await?
        .ok_or_else(ApiError::post_not_found)?;

    // Rows are gone; now drop the files. Missing files are ignored.
    for url in &urls {
        state.shared.media.delete(url);
    }

    Ok(Json(DeletePostResponse {
        success: true,
        message: "Post deleted successfully".to_string(),
    }))
}
