//! The `--agent-skill-md` flag

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Id and long name of the skill flag
pub const SKILL_FLAG: &str = "agent-skill-md";

/// Add the global `--agent-skill-md` flag to `command`
pub fn attach_skill(command: Command) -> Command {
    command.arg(
        Arg::new(SKILL_FLAG)
            .long(SKILL_FLAG)
            .help("Print agent skill definition (SKILL.md) to stdout")
            .action(ArgAction::SetTrue)
            .global(true),
    )
}

/// Whether the skill flag was given anywhere on the command line
pub fn skill_requested(matches: &ArgMatches) -> bool {
    matches!(matches.try_get_one::<bool>(SKILL_FLAG), Ok(Some(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        attach_skill(Command::new("task").subcommand(Command::new("list")))
    }

    #[test]
    fn test_flag_on_root() {
        let matches = command()
            .try_get_matches_from(["task", "--agent-skill-md"])
            .unwrap();
        assert!(skill_requested(&matches));
    }

    #[test]
    fn test_flag_is_global() {
        let matches = command()
            .try_get_matches_from(["task", "list", "--agent-skill-md"])
            .unwrap();
        assert!(skill_requested(&matches));
    }

    #[test]
    fn test_flag_absent() {
        let matches = command().try_get_matches_from(["task", "list"]).unwrap();
        assert!(!skill_requested(&matches));
        assert!(!skill_requested(
            &Command::new("bare").try_get_matches_from(["bare"]).unwrap()
        ));
    }
}
