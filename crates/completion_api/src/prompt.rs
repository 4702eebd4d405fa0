//! Fixed prompt templates for the two exchange modes.
//!
//! The user turn embeds the submitted text verbatim. Non-code detection is
//! delegated to the model via the system directive; nothing is validated or
//! escaped locally.

use crate::payload::ChatMessage;

/// System directive for the analysis exchange.
///
/// The model is asked for a fixed tabular breakdown and must reject non-code
/// input itself.
pub const ANALYSIS_DIRECTIVE: &str = "You document submitted code as a series of markdown \
tables. The first table lists imports: the name of each imported library, component or \
function, and where it is imported from. The second table lists variables: name, type and \
purpose. The third table lists functions: name, parameters, return value and role. The \
fourth table describes the render structure: each component, the items it contains and the \
UI each item draws. When the submission only covers some of these categories, emit only the \
matching tables and nothing else. When the input is not code, do not produce tables; ask \
for javascript code and state that the input was not code. Answer in English.";

/// System directive for the table-mode (storage conversion) exchange.
pub const CONVERSION_DIRECTIVE: &str = "You convert markdown documents into XHTML storage \
markup for a wiki. Convert markdown tables into <table>, <tr>, <th> and <td> elements and \
headings into the matching <h1>..<h6> elements. Return only the converted markup with no \
surrounding commentary and no code fences.";

const ANALYSIS_USER_PREFIX: &str =
    "Analyze the following code and explain its variables, functions and their roles in detail:";

const CONVERSION_USER_PREFIX: &str = "Convert the following markdown document:";

/// Builds the system/user pair for the analysis exchange.
pub fn analysis_messages(code: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANALYSIS_DIRECTIVE),
        ChatMessage::user(format!("{ANALYSIS_USER_PREFIX}\n\n{code}")),
    ]
}

/// Builds the system/user pair for the table-mode conversion exchange.
pub fn conversion_messages(markup: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CONVERSION_DIRECTIVE),
        ChatMessage::user(format!("{CONVERSION_USER_PREFIX}\n\n{markup}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::{analysis_messages, conversion_messages};

    #[test]
    fn analysis_messages_embed_code_verbatim() {
        let code = "function add(a,b){return a+b;}";
        let messages = analysis_messages(code);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains(code));
    }

    #[test]
    fn conversion_messages_embed_markup_verbatim() {
        let markup = "| a | b |\n| - | - |\n| 1 | 2 |";
        let messages = conversion_messages(markup);

        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains(markup));
    }
}
