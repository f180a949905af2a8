/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Release,
    ListTickets,
    ListIssues,
    ListReleasedTickets,
    Help,
    Unknown(String),
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Help,
        2 => match args[1].as_str() {
            "release" => Command::Release,
            "list-tickets" => Command::ListTickets,
            "list-issues" => Command::ListIssues,
            "list-released-tickets" => Command::ListReleasedTickets,
            "help" => Command::Help,
            cmd => Command::Unknown(cmd.to_string()),
        },
        _ => Command::Unknown(args[1].clone()),
    }
}
