use crate::{autorag::SourceDocument, ChatMessage};

/// Number of prior turns carried into a new chat exchange.
pub const CONTEXT_WINDOW: usize = 6;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant and your task is to answer the user question using the provided files.";

/// Prefixes `query` with a transcript of the most recent conversation
/// turns, oldest first. Prompt size stays bounded no matter how long the
/// conversation grows.
#[must_use]
pub fn build_context_query(query: &str, messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return query.to_string();
    }

    let recent = &messages[messages.len().saturating_sub(CONTEXT_WINDOW)..];
    let transcript = recent
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Previous conversation:\n{transcript}\n\nCurrent question: {query}")
}

/// Concatenates retrieved documents into a single context block, tagging
/// each one with its filename.
#[must_use]
pub fn build_file_context(documents: &[SourceDocument]) -> String {
    documents
        .iter()
        .map(|document| {
            let text = document
                .content
                .iter()
                .map(|block| block.text.clone())
                .collect::<Vec<_>>()
                .join("\n\n");

            format!("<file name=\"{}\">{text}</file>", document.filename)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[must_use]
pub fn no_data_message(query: &str) -> String {
    format!("No data found for query \"{query}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autorag::ContentBlock;

    fn turns(count: usize) -> Vec<ChatMessage> {
        (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {i}"))
                } else {
                    ChatMessage::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn empty_conversation_passes_query_through() {
        assert_eq!(build_context_query("what is this?", &[]), "what is this?");
    }

    #[test]
    fn short_conversation_is_included_whole() {
        let messages = turns(2);

        assert_eq!(
            build_context_query("next?", &messages),
            "Previous conversation:\nuser: question 0\nassistant: answer 1\n\nCurrent question: next?"
        );
    }

    #[test]
    fn long_conversation_keeps_only_the_last_six_in_order() {
        let messages = turns(9);
        let context = build_context_query("next?", &messages);

        assert!(context.starts_with("Previous conversation:\nassistant: answer 3\nuser: question 4\n"));
        assert!(context.contains("assistant: answer 7\nuser: question 8"));
        assert!(!context.contains("question 2"));
        assert!(context.ends_with("\n\nCurrent question: next?"));
    }

    #[test]
    fn file_context_tags_each_document() {
        let documents = vec![
            SourceDocument {
                file_id: "file-1".to_string(),
                filename: "setup.md".to_string(),
                score: 0.9,
                attributes: serde_json::Map::new(),
                content: vec![
                    ContentBlock {
                        kind: Some("text".to_string()),
                        text: "first".to_string(),
                    },
                    ContentBlock {
                        kind: Some("text".to_string()),
                        text: "second".to_string(),
                    },
                ],
            },
            SourceDocument {
                file_id: "file-2".to_string(),
                filename: "faq.md".to_string(),
                score: 0.4,
                attributes: serde_json::Map::new(),
                content: vec![ContentBlock {
                    kind: None,
                    text: "third".to_string(),
                }],
            },
        ];

        assert_eq!(
            build_file_context(&documents),
            "<file name=\"setup.md\">first\n\nsecond</file>\n\n<file name=\"faq.md\">third</file>"
        );
    }

    #[test]
    fn no_data_message_quotes_the_query() {
        assert_eq!(
            no_data_message("lost cause"),
            "No data found for query \"lost cause\""
        );
    }
}
