//! Legal assistant chat: one prompt per question, no conversation memory.

use serde::Serialize;

use legalconnect_types::chat::{
    ChatMessage, FALLBACK_REPLY, FormattedLine, GREETING, SAMPLE_QUESTIONS, format_response,
};
use legalconnect_types::error::MarketplaceError;
use legalconnect_types::llm::InvokeLlm;

use crate::integration::llm::LlmProvider;

pub const SYSTEM_PROMPT: &str = "You are an expert AI legal assistant specializing in land dispute and property law in India.

Provide detailed, well-formatted guidance on:
1. Land dispute processes and procedures
2. Required documents for land-related legal matters
3. Steps to resolve property conflicts
4. Legal advice for boundary disputes, title issues, and property rights
5. Court procedures and timelines in India

FORMAT YOUR RESPONSES AS FOLLOWS:
- Use clear headings and subheadings
- Break down complex information into numbered steps or bullet points
- Include specific Indian legal references (Acts, Sections) when relevant
- Mention approximate costs in Indian Rupees (₹)
- Provide realistic timelines for Indian legal processes
- Use simple, clear language that non-lawyers can understand
- Always end with a reminder to consult qualified advocates for case-specific advice

Be conversational, empathetic, and supportive while maintaining professional accuracy.";

pub fn build_prompt(question: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nUser question: {question}\n\nProvide a detailed, well-formatted response \
         about land dispute law in India with specific references to Indian legal system:"
    )
}

/// An assistant reply with its display lines.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: ChatMessage,
    pub lines: Vec<FormattedLine>,
    /// True when the model failed and the fixed apology was returned instead.
    pub fallback: bool,
}

/// What a new chat opens with.
#[derive(Debug, Clone, Serialize)]
pub struct ChatIntro {
    pub greeting: ChatMessage,
    pub sample_questions: Vec<&'static str>,
}

pub struct ChatService<L: LlmProvider> {
    llm: L,
}

impl<L: LlmProvider> ChatService<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Name of the backing model provider.
    pub fn model_name(&self) -> &str {
        self.llm.name()
    }

    pub fn intro(&self) -> ChatIntro {
        ChatIntro {
            greeting: greeting(),
            sample_questions: sample_questions(),
        }
    }

    /// Answer one question. Model failures degrade to [`FALLBACK_REPLY`].
    pub async fn ask(&self, question: &str) -> Result<ChatReply, MarketplaceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(MarketplaceError::invalid("message", "Message cannot be empty"));
        }

        let request = InvokeLlm {
            prompt: build_prompt(question),
            add_context_from_internet: true,
        };
        let (content, fallback) = match self.llm.complete(&request).await {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::error!(provider = self.llm.name(), error = %e, "legal assistant request failed");
                (FALLBACK_REPLY.to_string(), true)
            }
        };
        Ok(ChatReply {
            lines: format_response(&content),
            message: ChatMessage::assistant(content),
            fallback,
        })
    }
}

pub fn greeting() -> ChatMessage {
    ChatMessage::assistant(GREETING)
}

pub fn sample_questions() -> Vec<&'static str> {
    SAMPLE_QUESTIONS.to_vec()
}
