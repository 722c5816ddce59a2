use crate::entities::{post_images, posts, prelude::*};
use crate::models::post::{NewPost, NewPostImage, Post, PostImage, PostType};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// Repository for generated posts and their image rows
pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_post(model: posts::Model, images: Vec<post_images::Model>) -> Post {
        Post {
            id: i64::from(model.id),
            headline: model.headline,
            content: model.content,
            news_link: model.news_link,
            post_type: PostType::from_db(&model.post_type),
            plan: model.plan.unwrap_or_default(),
            caption: model.caption.unwrap_or_default(),
            created_at: model.created_at.unwrap_or_default(),
            images: images.into_iter().map(Self::map_image).collect(),
        }
    }

    fn map_image(model: post_images::Model) -> PostImage {
        PostImage {
            url: model.image_url,
            prompt: model.image_prompt.unwrap_or_default(),
            sequence_order: model.sequence_order,
        }
    }

    /// Writes the post and its image rows atomically, so a post is never
    /// visible without its full image set.
    pub async fn insert(&self, post: NewPost, images: &[NewPostImage]) -> Result<i64> {
        let txn = self.conn.begin().await?;

        let active_model = posts::ActiveModel {
            headline: Set(post.headline),
            content: Set(post.content),
            news_link: Set(post.news_link),
            post_type: Set(post.post_type.as_str().to_string()),
            plan: Set(Some(post.plan)),
            caption: Set(Some(post.caption)),
            created_at: Set(Some(Utc::now().to_rfc3339())),
            ..Default::default()
        };

        let res = Posts::insert(active_model).exec(&txn).await?;
        let post_id = res.last_insert_id;

        if !images.is_empty() {
            let rows = images.iter().enumerate().map(|(i, image)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let sequence_order = i as i32;
                post_images::ActiveModel {
                    post_id: Set(post_id),
                    image_url: Set(image.url.clone()),
                    image_prompt: Set(Some(image.prompt.clone())),
                    sequence_order: Set(sequence_order),
                    ..Default::default()
                }
            });
            PostImages::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;

        info!("Stored post {} with {} image(s)", post_id, images.len());
        Ok(i64::from(post_id))
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        let rows = Posts::find()
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.conn)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let images = self.images_for(row.id).await?;
            out.push(Self::map_post(row, images));
        }
        Ok(out)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Post>> {
        // An id outside the stored key range cannot exist; truncating instead
        // would alias onto a real row.
        let Ok(post_id) = i32::try_from(id) else {
            return Ok(None);
        };
        let Some(row) = Posts::find_by_id(post_id).one(&self.conn).await? else {
            return Ok(None);
        };
        let images = self.images_for(row.id).await?;
        Ok(Some(Self::map_post(row, images)))
    }

    /// Deletes the post and its image rows. Returns the image URLs that were
    /// attached, or `None` if the post did not exist.
    pub async fn delete(&self, id: i64) -> Result<Option<Vec<String>>> {
        let Ok(post_id) = i32::try_from(id) else {
            return Ok(None);
        };
        if Posts::find_by_id(post_id).one(&self.conn).await?.is_none() {
            return Ok(None);
        }

        let urls: Vec<String> = self
            .images_for(post_id)
            .await?
            .into_iter()
            .map(|image| image.image_url)
            .collect();

        let txn = self.conn.begin().await?;

        // Child rows are removed explicitly so the cleanup does not depend on
        // the connection having foreign keys enabled.
        PostImages::delete_many()
            .filter(post_images::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        Posts::delete_by_id(post_id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted post {} ({} image rows)", id, urls.len());
        Ok(Some(urls))
    }

    async fn images_for(&self, post_id: i32) -> Result<Vec<post_images::Model>> {
        Ok(PostImages::find()
            .filter(post_images::Column::PostId.eq(post_id))
            .order_by_asc(post_images::Column::SequenceOrder)
            .all(&self.conn)
            .await?)
    }
}
