// UI layer: a line-based read-eval-print loop over the API client.
// Each line is parsed into a command, dispatched as one HTTP call, and
// the response (or a short status message) is printed.

use crate::api::ApiClient;
use anyhow::Result;
use dialoguer::Input;

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `get` — list every widget.
    List,
    /// `post <name>` — create a widget.
    Create(String),
    /// `put <old> <new>` — rename a widget.
    Rename(String, String),
    /// `delete <name>` — delete a widget (`all` clears the registry).
    Delete(String),
    /// `x` — leave the loop.
    Exit,
}

/// Parse one input line into a command. Returns a printable message
/// instead when the command is unknown or is missing arguments.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let cmd = match words.next() {
        Some(c) => c,
        None => return Err("unknown command".to_string()),
    };
    match cmd {
        "get" => Ok(Command::List),
        "post" => match words.next() {
            Some(name) => Ok(Command::Create(name.to_string())),
            None => Err("usage: post <name>".to_string()),
        },
        "put" => match (words.next(), words.next()) {
            (Some(old), Some(new)) => Ok(Command::Rename(old.to_string(), new.to_string())),
            _ => Err("usage: put <old> <new>".to_string()),
        },
        "delete" => match words.next() {
            Some(name) => Ok(Command::Delete(name.to_string())),
            None => Err("usage: delete <name>".to_string()),
        },
        "x" => Ok(Command::Exit),
        _ => Err("unknown command".to_string()),
    }
}

/// Main console loop. Reads lines at a `>>` prompt until the user types
/// `x`. Request errors are printed and the loop continues; there is no
/// retry logic.
pub fn repl(api: ApiClient) -> Result<()> {
    loop {
        let line: String = Input::new()
            .with_prompt(">>")
            .allow_empty(true)
            .interact_text()?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match command {
            Command::List => match api.list() {
                Ok(listing) => println!("{:?}", listing.widget_models),
                Err(e) => println!("{}", e),
            },
            Command::Create(name) => match api.create(&name) {
                Ok(created) => println!("created: {}", created.model),
                Err(e) => println!("{}", e),
            },
            Command::Rename(old, new) => match api.rename(&old, &new) {
                Ok(renamed) => println!("renamed {} to {}", old, renamed.model),
                Err(e) => println!("{}", e),
            },
            Command::Delete(name) => match api.delete(&name) {
                Ok(status) => println!("{}: {} deleted", status, name),
                Err(e) => println!("{}", e),
            },
            Command::Exit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(parse_command("get"), Ok(Command::List));
        assert_eq!(
            parse_command("post Foo1"),
            Ok(Command::Create("Foo1".into()))
        );
        assert_eq!(
            parse_command("put Foo1 Bar2"),
            Ok(Command::Rename("Foo1".into(), "Bar2".into()))
        );
        assert_eq!(
            parse_command("delete Foo1"),
            Ok(Command::Delete("Foo1".into()))
        );
        assert_eq!(parse_command("x"), Ok(Command::Exit));
    }

    #[test]
    fn tolerates_extra_whitespace() {
        assert_eq!(
            parse_command("  put   a   b  "),
            Ok(Command::Rename("a".into(), "b".into()))
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert!(parse_command("post").is_err());
        assert!(parse_command("put onlyone").is_err());
        assert!(parse_command("delete").is_err());
    }
}
