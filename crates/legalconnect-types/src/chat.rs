//! Legal assistant chat messages and reply formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed opening message of every chat.
pub const GREETING: &str = "🙏 Namaste! I'm your AI legal assistant specializing in land disputes and property law in India.\n\nI can help you understand:\n• Legal procedures for land disputes\n• Required documents and paperwork\n• Court processes and timelines\n• Your rights as a property owner\n• Cost estimates for legal proceedings\n\nHow may I assist you today?";

/// Reply used when the language model cannot be reached.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble responding right now. Please try again in a moment, or feel free to connect with one of our verified advocates for immediate assistance.";

pub const SAMPLE_QUESTIONS: [&str; 8] = [
    "What documents do I need for a boundary dispute case?",
    "How long does property title verification take in India?",
    "What are the steps to resolve land encroachment?",
    "How much does it cost to file a property dispute case?",
    "What is the difference between civil and criminal land disputes?",
    "How can I check if a property has clear title?",
    "What are my rights as a property owner in India?",
    "How to handle illegal encroachment on my land?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One rendered line of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormattedLine {
    Heading1 { text: String },
    Heading2 { text: String },
    Heading3 { text: String },
    Numbered { number: String, text: String },
    Bullet { text: String },
    Bold { text: String },
    /// A line mentioning an amount in rupees.
    Currency { text: String },
    Blank,
    Paragraph { text: String },
}

/// Classify every line of `text`. First matching rule wins.
pub fn format_response(text: &str) -> Vec<FormattedLine> {
    text.split('\n').map(format_line).collect()
}

fn format_line(line: &str) -> FormattedLine {
    if let Some(rest) = line.strip_prefix("# ") {
        return FormattedLine::Heading1 { text: rest.to_string() };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return FormattedLine::Heading2 { text: rest.to_string() };
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return FormattedLine::Heading3 { text: rest.to_string() };
    }
    if let Some((number, rest)) = numbered(line) {
        return FormattedLine::Numbered {
            number: number.to_string(),
            text: rest.trim().to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("• ")) {
        return FormattedLine::Bullet { text: rest.to_string() };
    }
    if line.starts_with("**") && line.ends_with("**") {
        let text = if line.len() >= 4 { &line[2..line.len() - 2] } else { "" };
        return FormattedLine::Bold { text: text.to_string() };
    }
    if line.contains('₹') {
        return FormattedLine::Currency { text: line.to_string() };
    }
    if line.trim().is_empty() {
        return FormattedLine::Blank;
    }
    FormattedLine::Paragraph { text: line.to_string() }
}

/// `"12. text"` -> `("12", " text")`.
fn numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || line.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    Some((&line[..digits], &line[digits + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        let lines = format_response("# Title\n## Section\n### Detail");
        assert_eq!(lines[0], FormattedLine::Heading1 { text: "Title".into() });
        assert_eq!(lines[1], FormattedLine::Heading2 { text: "Section".into() });
        assert_eq!(lines[2], FormattedLine::Heading3 { text: "Detail".into() });
    }

    #[test]
    fn test_numbered_and_bullets() {
        let lines = format_response("12.  File a suit\n- Sale deed\n• Tax receipts\n3x. not numbered");
        assert_eq!(
            lines[0],
            FormattedLine::Numbered {
                number: "12".into(),
                text: "File a suit".into()
            }
        );
        assert_eq!(lines[1], FormattedLine::Bullet { text: "Sale deed".into() });
        assert_eq!(lines[2], FormattedLine::Bullet { text: "Tax receipts".into() });
        assert!(matches!(lines[3], FormattedLine::Paragraph { .. }));
    }

    #[test]
    fn test_numbered_wins_over_currency() {
        let lines = format_response("1. Court fee around ₹2,000");
        assert!(matches!(lines[0], FormattedLine::Numbered { .. }));
    }

    #[test]
    fn test_bold_currency_blank_paragraph() {
        let lines = format_response("**Important**\nCosts ₹10,000 - ₹25,000\n   \nConsult an advocate.");
        assert_eq!(lines[0], FormattedLine::Bold { text: "Important".into() });
        assert!(matches!(lines[1], FormattedLine::Currency { .. }));
        assert_eq!(lines[2], FormattedLine::Blank);
        assert_eq!(
            lines[3],
            FormattedLine::Paragraph {
                text: "Consult an advocate.".into()
            }
        );
    }

    #[test]
    fn test_bare_bold_markers() {
        assert_eq!(format_response("**"), vec![FormattedLine::Bold { text: String::new() }]);
    }

    #[test]
    fn test_greeting_mentions_assistant_scope() {
        assert!(GREETING.contains("land disputes"));
        assert_eq!(SAMPLE_QUESTIONS.len(), 8);
    }
}
