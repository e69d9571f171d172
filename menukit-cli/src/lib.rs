//! Command-line and interactive surfaces for menukit menus
//!
//! ```no_run
//! use menukit::{Field, Menu, MenuOption, Output};
//! use menukit_cli::{attach_skill, CliBuilder};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let menu = Menu::new()
//!     .prefix("note")
//!     .option(
//!         MenuOption::new("Add note", "add")
//!             .tool_name("add")
//!             .with_field(Field::new().key("text")),
//!     )
//!     .handler(|_ctx, _action, fields| async move { Ok(Output::from(fields["text"].clone())) });
//!
//! let builder = CliBuilder::new(Arc::new(menu.to_registry()?));
//! let matches = attach_skill(builder.build_command()?).get_matches();
//! if let Some(output) = builder.execute(&matches).await? {
//!     println!("{output}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod dynamic_cli;
pub mod error;
pub mod exit_codes;
pub mod interactive;
pub mod schema_conversion;
pub mod skill;

pub use dynamic_cli::CliBuilder;
pub use error::{handle_cli_result, CliError, CliResult};
pub use interactive::{InteractiveOutcome, InteractiveRunner};
pub use schema_conversion::{matches_to_arguments, usage_line};
pub use skill::{attach_skill, skill_requested};
