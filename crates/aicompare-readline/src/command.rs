//! Parsing of REPL input lines.

/// Slash commands offered for completion.
pub const COMMANDS: [&str; 8] = [
    "/humanize",
    "/copy",
    "/answers",
    "/login",
    "/register",
    "/logout",
    "/help",
    "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: ask every model
    Ask(String),
    Humanize(String),
    Copy(String),
    Answers,
    Login {
        email: String,
        password: Option<String>,
    },
    Register {
        email: String,
        name: String,
    },
    Logout,
    Help,
    Quit,
    Empty,
    /// Known command with missing arguments, or an unknown command
    Invalid(String),
}

pub fn parse(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Ask(trimmed.to_string());
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/humanize" if !rest.is_empty() => ReplCommand::Humanize(rest.to_string()),
        "/copy" if !rest.is_empty() => ReplCommand::Copy(rest.to_string()),
        "/humanize" | "/copy" => ReplCommand::Invalid(format!("Usage: {command} <model>")),
        "/answers" => ReplCommand::Answers,
        "/login" => {
            let mut parts = rest.split_whitespace();
            match parts.next() {
                Some(email) => ReplCommand::Login {
                    email: email.to_string(),
                    password: parts.next().map(str::to_string),
                },
                None => ReplCommand::Invalid("Usage: /login <email> [password]".to_string()),
            }
        }
        "/register" => match rest.split_once(char::is_whitespace) {
            Some((email, name)) if !name.trim().is_empty() => ReplCommand::Register {
                email: email.to_string(),
                name: name.trim().to_string(),
            },
            _ => ReplCommand::Invalid("Usage: /register <email> <name>".to_string()),
        },
        "/logout" => ReplCommand::Logout,
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("Unknown command: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse("  What is 2+2?  "),
            ReplCommand::Ask("What is 2+2?".to_string())
        );
        assert_eq!(parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_model_names_may_contain_spaces() {
        assert_eq!(
            parse("/humanize Claude 3 Opus"),
            ReplCommand::Humanize("Claude 3 Opus".to_string())
        );
        assert!(matches!(parse("/copy"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_login_password_is_optional() {
        assert_eq!(
            parse("/login ada@example.com"),
            ReplCommand::Login {
                email: "ada@example.com".to_string(),
                password: None
            }
        );
        assert_eq!(
            parse("/login ada@example.com hunter2"),
            ReplCommand::Login {
                email: "ada@example.com".to_string(),
                password: Some("hunter2".to_string())
            }
        );
    }

    #[test]
    fn test_register_needs_name() {
        assert_eq!(
            parse("/register ada@example.com Ada Lovelace"),
            ReplCommand::Register {
                email: "ada@example.com".to_string(),
                name: "Ada Lovelace".to_string()
            }
        );
        assert!(matches!(parse("/register ada@example.com"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_quit_aliases() {
        assert_eq!(parse("quit"), ReplCommand::Quit);
        assert_eq!(parse("/exit"), ReplCommand::Quit);
        assert!(matches!(parse("/nope"), ReplCommand::Invalid(_)));
    }
}
