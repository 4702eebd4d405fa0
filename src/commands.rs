//! Slash-command parsing for the REPL.

use crate::transcript::EntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Quit,
    Publish(EntryId),
    Unknown(String),
}

/// Parses a slash command; returns `None` for plain submissions.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or(trimmed);

    match command {
        "/help" => Some(SlashCommand::Help),
        "/quit" => Some(SlashCommand::Quit),
        "/publish" => match parts.next().and_then(|id| id.parse().ok()) {
            Some(id) => Some(SlashCommand::Publish(id)),
            None => Some(SlashCommand::Unknown(command.to_string())),
        },
        _ => Some(SlashCommand::Unknown(command.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_slash_command, SlashCommand};

    #[test]
    fn parser_recognizes_known_and_unknown_commands() {
        assert_eq!(parse_slash_command("const x = 1;"), None);
        assert_eq!(parse_slash_command("/help"), Some(SlashCommand::Help));
        assert_eq!(parse_slash_command("/quit"), Some(SlashCommand::Quit));
        assert_eq!(
            parse_slash_command("/publish 3"),
            Some(SlashCommand::Publish(3))
        );
        assert_eq!(
            parse_slash_command("/publish"),
            Some(SlashCommand::Unknown("/publish".to_string()))
        );
        // A malformed argument reports the command token, same as a bare one.
        assert_eq!(
            parse_slash_command("/publish abc"),
            Some(SlashCommand::Unknown("/publish".to_string()))
        );
        assert_eq!(
            parse_slash_command("/nope extra"),
            Some(SlashCommand::Unknown("/nope".to_string()))
        );
    }
}
