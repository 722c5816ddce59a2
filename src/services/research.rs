//! Two-stage legal research pipeline.
//!
//! Stage one answers the question with web search and extended thinking
//! enabled. Stage two replays the full transcript and asks for a concise
//! rewrite, with search switched off so the model works only from what it
//! already found.

use std::sync::Arc;

use tracing::info;

use crate::clients::anthropic::{MessageParam, MessageRequest, MessagesApi};

const FOLLOWUP_SYSTEM: &str = "STYLE: CONCISE, EXPLANATORY. You are a legal \
assistant specializing in Indian case law. Restate the findings from the \
conversation so far as a direct, well-organized answer. Cite the cases and \
statutes already found; do not introduce new authorities.";

pub struct ResearchService {
    messages: Arc<dyn MessagesApi>,
    thinking_budget: u32,
}

impl ResearchService {
    pub fn new(messages: Arc<dyn MessagesApi>, thinking_budget: u32) -> Self {
        Self {
            messages,
            thinking_budget,
        }
    }

    /// Runs both stages and returns the concise follow-up answer.
    pub async fn run(&self, question: &str) -> anyhow::Result<String> {
        info!("research: running search stage");
        let first = self
            .messages
            .create_message(MessageRequest {
                system: None,
                messages: vec![MessageParam::user(&initial_prompt(question))],
                web_search: true,
                thinking_budget: Some(self.thinking_budget),
            })
            .await?;

        info!("research: running rewrite stage");
        // The replayed transcript carries thinking blocks, and the API only
        // accepts those when thinking stays enabled. The question is resent
        // verbatim as the closing turn.
        let prompt = initial_prompt(question);
        let followup = self
            .messages
            .create_message(MessageRequest {
                system: Some(FOLLOWUP_SYSTEM.to_string()),
                messages: vec![
                    MessageParam::user(&prompt),
                    first.into_assistant_param(),
                    MessageParam::user(&prompt),
                ],
                web_search: false,
                thinking_budget: Some(self.thinking_budget),
            })
            .await?;

        Ok(followup.text())
    }
}

fn initial_prompt(question: &str) -> String {
    format!(
        "You are a legal researcher specializing in Indian case law. Research \
the following question using web search. Plan your research in your thinking \
before searching: identify the relevant statutes, the leading Supreme Court \
and High Court judgments, and any recent developments. Ground every claim in \
a source you actually found.\n\n<legal_questions>\n{question}\n</legal_questions>"
    )
}
