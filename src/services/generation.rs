//! Social post generation pipeline.
//!
//! One stored conversation drives the whole post: the planning call opens it,
//! every image-prompt call resumes from the previous response id, and the
//! caption call closes it. Images are generated strictly in sequence so each
//! prompt can build on the ones before it.

use std::sync::Arc;

use tracing::info;

use crate::clients::openai::{
    ImagesApi, ReasoningEffort, ResponseId, ResponseRequest, ResponsesApi,
};
use crate::db::Store;
use crate::models::post::{NewPost, NewPostImage, PostType};
use crate::parser::plan;
use crate::services::media::MediaStore;

#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub headline: String,
    pub content: String,
    pub news_link: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub post_id: i64,
    pub post_type: PostType,
    pub plan: String,
    pub caption: String,
    pub images: Vec<NewPostImage>,
}

pub struct GenerationService {
    responses: Arc<dyn ResponsesApi>,
    images: Arc<dyn ImagesApi>,
    store: Store,
    media: MediaStore,
}

impl GenerationService {
    pub fn new(
        responses: Arc<dyn ResponsesApi>,
        images: Arc<dyn ImagesApi>,
        store: Store,
        media: MediaStore,
    ) -> Self {
        Self {
            responses,
            images,
            store,
            media,
        }
    }

    /// Runs plan, image, and caption stages, then persists the post.
    pub async fn generate(&self, input: GenerationInput) -> anyhow::Result<GeneratedPost> {
        info!("generation: planning post for \"{}\"", input.headline);
        let planning = self
            .responses
            .create_response(ResponseRequest {
                input: planning_prompt(&input),
                previous: None,
                effort: ReasoningEffort::Medium,
                web_search: true,
            })
            .await?;

        let plan_text = planning.output_text.trim().to_string();
        let directives = plan::parse(&plan_text);
        info!(
            "generation: {} post, {} image(s)",
            directives.post_type.as_str(),
            directives.image_count
        );

        let mut handle = planning.id;
        let mut images = Vec::with_capacity(usize::from(directives.image_count));
        for slot in 1..=directives.image_count {
            let (url, prompt, next) = self
                .generate_image(&handle, directives.post_type, slot, directives.image_count)
                .await?;
            images.push(NewPostImage { url, prompt });
            handle = next;
        }

        info!("generation: writing caption");
        let caption = self
            .responses
            .create_response(ResponseRequest {
                input: caption_prompt(&input, &images),
                previous: Some(handle),
                effort: ReasoningEffort::Medium,
                web_search: false,
            })
            .await?;
        let caption_text = caption.output_text.trim().to_string();

        let post_id = self
            .store
            .insert_post(
                NewPost {
                    headline: input.headline,
                    content: input.content,
                    news_link: input.news_link,
                    post_type: directives.post_type,
                    plan: plan_text.clone(),
                    caption: caption_text.clone(),
                },
                &images,
            )
            .await?;

        Ok(GeneratedPost {
            post_id,
            post_type: directives.post_type,
            plan: plan_text,
            caption: caption_text,
            images,
        })
    }

    /// Derives one image prompt from the running conversation, renders it,
    /// and stores the file. Returns the served URL, the prompt used, and the
    /// response id for the next stage.
    async fn generate_image(
        &self,
        previous: &ResponseId,
        post_type: PostType,
        slot: u8,
        total: u8,
    ) -> anyhow::Result<(String, String, ResponseId)> {
        let input = match post_type {
            PostType::Single => single_image_prompt(),
            PostType::Carousel => carousel_image_prompt(slot, total),
        };

        let reply = self
            .responses
            .create_response(ResponseRequest {
                input,
                previous: Some(previous.clone()),
                effort: ReasoningEffort::Low,
                web_search: false,
            })
            .await?;
        let prompt = reply.output_text.trim().to_string();

        info!("generation: rendering image {slot}/{total}");
        let bytes = self.images.generate_image(&prompt).await?;
        let url = self.media.save_png(&bytes)?;

        Ok((url, prompt, reply.id))
    }
}

fn planning_prompt(input: &GenerationInput) -> String {
    format!(
        "You are a social media editor for a legal news page. Research the \
story below and plan an Instagram post about it.\n\nHeadline: {}\nSummary: \
{}\nSource: {}\n\nStart your answer with exactly two directive lines:\n\
POST_TYPE: SINGLE or POST_TYPE: CAROUSEL\nIMAGE_COUNT: <number between 2 and \
10, only for carousels>\n\nThen lay out the visual concept: for a single \
post, one striking image; for a carousel, what each slide shows and how the \
sequence tells the story.",
        input.headline, input.content, input.news_link
    )
}

fn single_image_prompt() -> String {
    "Write the image generation prompt for the single post image from your \
plan. Describe composition, subject, text overlays, and style concretely. \
Reply with the prompt only."
        .to_string()
}

fn carousel_image_prompt(slot: u8, total: u8) -> String {
    format!(
        "Write the image generation prompt for slide {slot} of {total} from \
your plan. Keep the visual style consistent with the previous slides. Reply \
with the prompt only."
    )
}

fn caption_prompt(input: &GenerationInput, images: &[NewPostImage]) -> String {
    let digest: String = images
        .iter()
        .enumerate()
        .map(|(i, image)| format!("Image {}: {}\n", i + 1, image.prompt))
        .collect();
    format!(
        "The post images have been generated:\n{digest}\nWrite the Instagram \
caption for this post about \"{}\". Open with a hook, explain the legal \
development in plain language, and end with relevant hashtags. Include the \
source link: {}",
        input.headline, input.news_link
    )
}
