use std::path::PathBuf;
use std::process;
use std::sync::Arc;

mod tasks;

use clap::{value_parser, Arg, ArgMatches, Command};
use menukit::{Menu, Skill, ToolRegistry};
use menukit_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use menukit_cli::{
    attach_skill, handle_cli_result, skill_requested, CliBuilder, CliError, CliResult,
    InteractiveRunner,
};
use menukit_common::{init_tracing, LogTarget};
use menukit_config::MenukitConfig;
use menukit_tools::{start_mcp_server, McpServerMode};
use tasks::{task_menu, Action, TaskStore, SURFACE_COMMANDS};

/// Load configuration for CLI usage with graceful error handling
///
/// A broken config file never stops the CLI; defaults are used instead.
fn load_cli_configuration() -> MenukitConfig {
    match menukit_config::load_configuration() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}", e);
            eprintln!("Warning: Configuration loading failed: {}", e);
            eprintln!("Continuing with default configuration...");
            MenukitConfig::default()
        }
    }
}

fn build_cli(builder: &CliBuilder) -> CliResult<Command> {
    let command = builder
        .build_command()?
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("tui").about("Choose an action from the interactive menu"))
        .subcommand(Command::new("serve").about("Serve the task tools over MCP on stdio"))
        .subcommand(
            Command::new("http")
                .about("Serve the task tools over HTTP and streamable MCP")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_name("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Port to bind; defaults to the configured port"),
                ),
        );
    Ok(attach_skill(command))
}

fn skill(registry: &ToolRegistry) -> Skill {
    Skill::from_registry(registry)
        .workflow([
            "List tasks to see what is open",
            "Add a task with a short title and, if it matters, a priority",
            "Complete tasks by id once they are done",
        ])
        .guideline(["Ask before completing a task the user did not mention"])
        .section(
            "Priorities",
            "Use `high` for anything blocking, `low` for nice-to-have work and leave the \
             priority out otherwise.",
        )
}

#[tokio::main]
async fn main() {
    let config = load_cli_configuration();

    let menu = task_menu(TaskStore::seeded());
    let registry = match menu.to_registry() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            eprintln!("Failed to build task menu: {}", e);
            process::exit(EXIT_ERROR);
        }
    };
    let builder = CliBuilder::new(registry.clone()).reserve_commands(SURFACE_COMMANDS);
    let mut cli = match build_cli(&builder) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            process::exit(e.exit_code);
        }
    };

    let matches = match cli.clone().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{}", e);
                    process::exit(EXIT_SUCCESS);
                }
                _ => {
                    eprintln!("{}", e);
                    process::exit(EXIT_ERROR);
                }
            }
        }
    };

    let is_serve_command = matches
        .subcommand()
        .is_some_and(|(name, _)| name == "serve");
    configure_logging(&config, is_serve_command);

    if skill_requested(&matches) {
        println!("{}", skill(&registry));
        process::exit(EXIT_SUCCESS);
    }

    let exit_code = match matches.subcommand() {
        Some(("tui", _)) => handle_cli_result(run_tui(&menu).await),
        Some(("serve", _)) => handle_cli_result(run_stdio(registry).await),
        Some(("http", sub_matches)) => {
            handle_cli_result(run_http(registry, &config, sub_matches).await)
        }
        Some(_) => run_tool(&builder, &matches).await,
        None => match cli.print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                EXIT_ERROR
            }
        },
    };
    process::exit(exit_code);
}

fn configure_logging(config: &MenukitConfig, is_serve_command: bool) {
    let level = if config.logging.is_valid_level() {
        config.logging.level.as_str()
    } else {
        eprintln!(
            "Warning: Unknown log level '{}', using info",
            config.logging.level
        );
        "info"
    };

    // stdout carries the protocol in stdio mode
    let target = if is_serve_command {
        LogTarget::File(PathBuf::from(&config.logging.file))
    } else {
        LogTarget::Stderr
    };

    if let Err(e) = init_tracing(level, target) {
        eprintln!("Warning: {}", e);
    }
}

async fn run_tool(builder: &CliBuilder, matches: &ArgMatches) -> i32 {
    match builder.execute_tool(matches).await {
        Ok(output) => {
            println!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

async fn run_tui(menu: &Menu<Action>) -> CliResult<()> {
    let outcome = InteractiveRunner::new(menu).run().await?;
    tracing::debug!("Interactive selection: {:?}", outcome.selected);
    if let Some(output) = outcome.output {
        println!("{}", output.render_lines());
    }
    Ok(())
}

async fn run_stdio(registry: Arc<ToolRegistry>) -> CliResult<()> {
    let mut handle = start_mcp_server(McpServerMode::Stdio, registry, "").await?;
    handle.wait().await;
    Ok(())
}

async fn run_http(
    registry: Arc<ToolRegistry>,
    config: &MenukitConfig,
    matches: &ArgMatches,
) -> CliResult<()> {
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .or(config.server.port());
    let mut handle =
        start_mcp_server(McpServerMode::Http { port }, registry, &config.server.host).await?;

    println!("MCP endpoint: {}", handle.url());
    if let Some(base) = handle.base_url() {
        println!("Tool endpoints: {}/tools", base);
    }

    tokio::signal::ctrl_c().await.map_err(|e| {
        CliError::new("Failed to listen for shutdown signal", EXIT_ERROR).with_source(e)
    })?;
    tracing::info!("Shutting down");
    handle.shutdown().await?;
    Ok(())
}
