//! # menukit
//!
//! Declare a menu of actions once and serve it everywhere.
//!
//! A [`Menu`] is a titled list of [`MenuOption`]s, each carrying an opaque
//! value and zero or more [`Field`]s, plus one handler that executes whichever
//! option was chosen. From that single declaration this crate derives:
//!
//! - flat tool names and JSON schemas for protocol and HTTP callers ([`schema`])
//! - one validation routine every surface calls identically ([`resolve_fields`])
//! - a type-erased [`ToolRegistry`] the surface adapters serve from
//! - an agent skill document ([`Skill`])
//!
//! The surface adapters themselves live in `menukit-tools` (MCP and HTTP) and
//! `menukit-cli` (command line and interactive prompt).
//!
//! ## Usage
//!
//! ```rust
//! use menukit::{Field, HandlerContext, Menu, MenuOption, Output, Surface};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let menu = Menu::new()
//!     .title("Site Manager")
//!     .prefix("site")
//!     .option(
//!         MenuOption::new("Add", "add")
//!             .with_field(Field::new().key("domain").format("domain")),
//!     )
//!     .handler(|_ctx, action, fields| async move {
//!         Ok(Output::from(format!("{action} {}", fields["domain"])))
//!     });
//!
//! let registry = menu.to_registry()?;
//! let args = json!({"domain": "example.com"});
//! let output = registry
//!     .invoke("site_add", HandlerContext::new(Surface::Http), args.as_object().unwrap())
//!     .await
//!     .expect("tool is registered")?;
//! assert_eq!(output.render_lines(), "add example.com");
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod error;
pub mod field;
pub mod formats;
pub mod menu;
pub mod naming;
pub mod option;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod skill;

pub use dispatch::{Handler, HandlerContext, HandlerFuture, MenuTool, OptionTool, Surface};
pub use error::{ConfigurationError, DispatchError, MalformedInput, ValidationError};
pub use field::Field;
pub use formats::FormatError;
pub use menu::Menu;
pub use option::MenuOption;
pub use output::Output;
pub use registry::ToolRegistry;
pub use resolve::{
    parse_arguments, resolve_fields, validate_value, FieldMap, JsonObject, DEFAULT_CHAR_LIMIT,
};
pub use schema::{FieldSchema, ToolIdentity};
pub use skill::Skill;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
