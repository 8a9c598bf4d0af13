//! Line commands understood by the console front end.

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `:open <date>`
    OpenDay(String),
    /// `:save <date> <text>`; `\n` in the text becomes a newline
    SaveDay { date: String, text: String },
    /// `:schedule`
    ShowSchedule,
    /// `:calendar`
    ShowCalendar,
    /// `:help`
    Help,
    /// `:quit` / `:q`
    Quit,
    /// Anything else that isn't blank
    Chat(String),
    /// Blank line, or an unknown / incomplete `:` command
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  :open <YYYY-MM-DD>          show the plan for a day
  :save <YYYY-MM-DD> <text>   replace the plan for a day (\\n for new lines)
  :schedule                   show the weekly schedule
  :calendar                   show this month
  :quit                       exit
Anything else is sent to the assistant.";

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleCommand::Invalid(String::new());
        }
        let Some(rest) = line.strip_prefix(':') else {
            return ConsoleCommand::Chat(line.to_string());
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "open" if !args.is_empty() => ConsoleCommand::OpenDay(args.to_string()),
            "save" => match args.split_once(char::is_whitespace) {
                Some((date, text)) => ConsoleCommand::SaveDay {
                    date: date.to_string(),
                    text: text.trim_start().replace("\\n", "\n"),
                },
                None => ConsoleCommand::Invalid(line.to_string()),
            },
            "schedule" => ConsoleCommand::ShowSchedule,
            "calendar" => ConsoleCommand::ShowCalendar,
            "help" => ConsoleCommand::Help,
            "quit" | "q" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Invalid(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ConsoleCommand::parse(":open 2025-04-20"),
            ConsoleCommand::OpenDay("2025-04-20".into())
        );
        assert_eq!(
            ConsoleCommand::parse(":save 2025-04-20 Lecture 9am\\nGym"),
            ConsoleCommand::SaveDay {
                date: "2025-04-20".into(),
                text: "Lecture 9am\nGym".into()
            }
        );
        assert_eq!(ConsoleCommand::parse(":schedule"), ConsoleCommand::ShowSchedule);
        assert_eq!(ConsoleCommand::parse("  :q "), ConsoleCommand::Quit);
    }

    #[test]
    fn test_parse_chat_and_invalid() {
        assert_eq!(
            ConsoleCommand::parse("what's due tomorrow?"),
            ConsoleCommand::Chat("what's due tomorrow?".into())
        );
        assert!(matches!(ConsoleCommand::parse(""), ConsoleCommand::Invalid(_)));
        assert!(matches!(ConsoleCommand::parse(":open"), ConsoleCommand::Invalid(_)));
        assert!(matches!(ConsoleCommand::parse(":save 2025-04-20"), ConsoleCommand::Invalid(_)));
        assert!(matches!(ConsoleCommand::parse(":dance"), ConsoleCommand::Invalid(_)));
    }
}
