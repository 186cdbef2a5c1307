//! Anthropic Messages API wire types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AnthropicTool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

/// Server-side tool declaration. Only web search is used.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

impl AnthropicTool {
    pub fn web_search(max_uses: u32) -> Self {
        Self {
            kind: "web_search_20250305".to_string(),
            name: "web_search".to_string(),
            max_uses: Some(max_uses),
        }
    }
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<AnthropicContentBlock>,
    pub stop_reason: Option<String>,
}

impl AnthropicResponse {
    /// Concatenated text blocks; search results and tool calls are skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_omitted_when_empty() {
        let req = AnthropicRequest {
            model: "m".into(),
            max_tokens: 16,
            messages: vec![AnthropicMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            tools: Vec::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("tools").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_web_search_tool_shape() {
        let json = serde_json::to_value(AnthropicTool::web_search(3)).unwrap();
        assert_eq!(json["type"], "web_search_20250305");
        assert_eq!(json["name"], "web_search");
        assert_eq!(json["max_uses"], 3);
    }

    #[test]
    fn test_response_text_skips_search_blocks() {
        let raw = r#"{
            "id": "msg_1",
            "model": "claude",
            "stop_reason": "end_turn",
            "content": [
                {"type": "server_tool_use", "id": "t1", "name": "web_search", "input": {"query": "RERA"}},
                {"type": "web_search_tool_result", "tool_use_id": "t1", "content": []},
                {"type": "text", "text": "Under the RERA Act, "},
                {"type": "text", "text": "buyers may file a complaint."}
            ]
        }"#;
        let resp: AnthropicResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text(), "Under the RERA Act, buyers may file a complaint.");
    }
}
