use serde::Serialize;

use crate::error::{Error, Result};

const SUMMARIZE_SYSTEM_PROMPT: &str = "Summarize the main points and their comprehensive explanations \
from the YouTube video transcript, presenting them under appropriate headings. Use various emojis to \
symbolize different sections, use markdown formatting, and format the content as a cohesive paragraph \
under each heading. Ensure the summary is clear, detailed, and informative. Avoid phrases that directly \
reference 'the script provides' to maintain a direct and objective tone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in the sequence sent to the completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One prior exchange in a chat session; history is caller-owned and
/// passed in on every call.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub user: String,
    pub assistant: String,
}

/// Build the system/user message pair for one-shot summarization.
pub fn summarize_messages(title: &str, transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARIZE_SYSTEM_PROMPT),
        ChatMessage::user(format!("Video Title: {title}, Video Transcript: {transcript}")),
    ]
}

/// Build the message sequence for one chat turn: transcript-grounded
/// system instruction, prior turns in order, then the new input.
///
/// Fails with [`Error::EmptyInput`] before any network call when the new
/// input is empty or whitespace.
pub fn chat_messages(
    title: &str,
    transcript: &str,
    history: &[ConversationTurn],
    input: &str,
) -> Result<Vec<ChatMessage>> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let system = format!(
        "Your task is to answer questions about a video transcript. \
Extract information from the provided transcript only and provide relevant answers within its scope. \
Refrain from making inferences or using external knowledge. \
Here is the video title and video transcript text:\n\n\
Video Title: {title}, Video Transcript Text: {transcript}\n\n\
If asked to perform tasks unrelated to the video transcript, politely decline."
    );

    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system));
    for turn in history {
        messages.push(ChatMessage::user(turn.user.clone()));
        messages.push(ChatMessage::assistant(turn.assistant.clone()));
    }
    messages.push(ChatMessage::user(input));

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_messages_shape() {
        let messages = summarize_messages("My Title", "the transcript text");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Video Title: My Title, Video Transcript: the transcript text"
        );
    }

    #[test]
    fn test_chat_messages_empty_input() {
        assert!(matches!(
            chat_messages("t", "tx", &[], ""),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            chat_messages("t", "tx", &[], "   \n"),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_chat_messages_order() {
        let history = vec![
            ConversationTurn {
                user: "first question".to_string(),
                assistant: "first answer".to_string(),
            },
            ConversationTurn {
                user: "second question".to_string(),
                assistant: "second answer".to_string(),
            },
        ];
        let messages = chat_messages("Title", "transcript", &history, "third question").unwrap();

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Video Title: Title"));
        assert!(messages[0].content.contains("transcript"));
        assert_eq!(messages[1].content, "first question");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "first answer");
        assert_eq!(messages[3].content, "second question");
        assert_eq!(messages[4].content, "second answer");
        assert_eq!(messages[5].role, Role::User);
        assert_eq!(messages[5].content, "third question");
    }

    #[test]
    fn test_chat_messages_no_history() {
        let messages = chat_messages("Title", "transcript", &[], "hello").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_role_serialization() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }
}
