//! Command tree generated from a tool registry
//!
//! The root command is named after the menu's prefix (else its title) and
//! every exposed option becomes one subcommand beneath it:
//!
//! ```text
//! task
//! ├── list                       # tool: task_list
//! ├── add --title <value> [flags]  # tool: task_add
//! └── complete --id <value>      # tool: task_complete
//! ```
//!
//! The protocol surfaces flatten the prefix into each tool name instead.

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use crate::schema_conversion::{field_to_arg, matches_to_arguments, usage_line};
use crate::skill::SKILL_FLAG;
use clap::{ArgMatches, Command};
use menukit::naming::to_flag_name;
use menukit::{HandlerContext, MenuTool, Surface, ToolIdentity, ToolRegistry};
use std::collections::HashSet;
use std::sync::Arc;

/// Subcommand names clap generates itself
const BUILTIN_COMMANDS: &[&str] = &["help"];

/// Flag names clap or menukit put on every tool subcommand
const BUILTIN_FLAGS: &[&str] = &["help", SKILL_FLAG];

/// Builds clap commands from a [`ToolRegistry`] and dispatches their matches
pub struct CliBuilder {
    registry: Arc<ToolRegistry>,
    reserved_commands: Vec<String>,
}

impl CliBuilder {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            reserved_commands: Vec::new(),
        }
    }

    /// Subcommand names the caller adds next to the tools
    ///
    /// A tool whose command name matches one of these fails the build.
    pub fn reserve_commands<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_commands.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Root command with one subcommand per tool
    pub fn build_command(&self) -> CliResult<Command> {
        let mut root = Command::new(self.registry.root_name());
        let about = self.registry.description();
        if !about.is_empty() {
            root = root.about(about.to_string());
        }
        Ok(root.subcommands(self.subcommands()?))
    }

    /// The tool subcommands alone, for attaching to an existing root
    ///
    /// Fails when a command or flag name would collide inside the clap tree.
    pub fn subcommands(&self) -> CliResult<Vec<Command>> {
        self.check_names()?;
        Ok(self
            .registry
            .list()
            .map(|tool| self.build_tool_command(tool.as_ref()))
            .collect())
    }

    fn check_names(&self) -> CliResult<()> {
        let mut commands: HashSet<&str> = BUILTIN_COMMANDS.iter().copied().collect();
        commands.extend(self.reserved_commands.iter().map(String::as_str));

        for identity in self.registry.identities() {
            if !commands.insert(identity.command_name.as_str()) {
                return Err(name_conflict(format!(
                    "command '{}' of tool '{}' is already in use",
                    identity.command_name, identity.name
                )));
            }
            check_flags(identity)?;
        }
        Ok(())
    }

    fn build_tool_command(&self, tool: &dyn MenuTool) -> Command {
        let identity = tool.identity();
        Command::new(identity.command_name.clone())
            .about(identity.description.clone())
            .override_usage(usage_line(identity))
            .args(identity.fields.values().map(field_to_arg))
    }

    /// Find the tool behind a subcommand name
    pub fn tool_for_command(&self, command_name: &str) -> Option<&Arc<dyn MenuTool>> {
        self.registry
            .list()
            .find(|tool| tool.identity().command_name == command_name)
    }

    /// Run the tool subcommand in `matches`
    ///
    /// Returns `Ok(None)` when no subcommand was given or the subcommand is
    /// not a tool, leaving it to the caller. Output is rendered for a terminal.
    pub async fn execute(&self, matches: &ArgMatches) -> CliResult<Option<String>> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Ok(None);
        };
        let Some(tool) = self.tool_for_command(name) else {
            return Ok(None);
        };

        let arguments = matches_to_arguments(tool.identity(), sub_matches);
        tracing::debug!("Running {} with {} flags", tool.name(), arguments.len());

        let output = tool
            .invoke(HandlerContext::new(Surface::Cli), &arguments)
            .await
            .map_err(CliError::from)?;
        Ok(Some(output.render_lines()))
    }

    /// Run a subcommand that must be a tool
    pub async fn execute_tool(&self, matches: &ArgMatches) -> CliResult<String> {
        self.execute(matches).await?.ok_or_else(|| {
            CliError::new("No command specified. Use --help for usage information.", EXIT_ERROR)
        })
    }
}

fn check_flags(identity: &ToolIdentity) -> CliResult<()> {
    let mut flags: HashSet<String> = BUILTIN_FLAGS.iter().map(|f| f.to_string()).collect();
    for key in identity.fields.keys() {
        let flag = to_flag_name(key);
        if flag.is_empty() {
            return Err(name_conflict(format!(
                "field '{}' of command '{}' has no usable flag name",
                key, identity.command_name
            )));
        }
        if !flags.insert(flag.clone()) {
            return Err(name_conflict(format!(
                "flag '--{}' of command '{}' is already in use",
                flag, identity.command_name
            )));
        }
    }
    Ok(())
}

fn name_conflict(detail: String) -> CliError {
    CliError::new(
        format!("Menu cannot be exposed on the command line: {detail}"),
        EXIT_ERROR,
    )
}
