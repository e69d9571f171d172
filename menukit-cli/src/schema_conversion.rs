//! Conversion between tool identities and clap arguments
//!
//! - [`FieldSchema`] → [`Arg`] (one `--flag <value>` per field)
//! - [`ArgMatches`] → [`JsonObject`] (the raw input the resolver validates)
//!
//! Flags are never marked required in clap. Required-ness is enforced by the
//! field resolver so the command line reports the same message as every other
//! surface.

use clap::{Arg, ArgAction, ArgMatches};
use menukit::naming::to_flag_name;
use menukit::{FieldSchema, JsonObject, ToolIdentity};
use serde_json::Value;

/// Required flags spelled out in a usage line before the rest are counted
pub const MAX_SHOWN_FLAGS: usize = 2;

/// Value placeholder shown in help and usage
const VALUE_NAME: &str = "value";

/// Build the clap argument for one field
pub fn field_to_arg(field: &FieldSchema) -> Arg {
    let mut help = field.help_text().to_string();
    if field.required {
        help.push_str(" (required)");
    }

    Arg::new(field.key.clone())
        .long(to_flag_name(&field.key))
        .value_name(VALUE_NAME)
        .action(ArgAction::Set)
        .help(help)
}

/// Usage line for a tool subcommand
///
/// ```
/// use menukit::{Field, Menu, MenuOption, Output};
/// use menukit_cli::schema_conversion::usage_line;
///
/// let menu = Menu::new()
///     .prefix("task")
///     .option(
///         MenuOption::new("Add task", "add")
///             .tool_name("add")
///             .with_field(Field::new().key("title"))
///             .with_field(Field::new().key("due_date"))
///             .with_field(Field::new().key("owner"))
///             .with_field(Field::new().key("note").required(false)),
///     )
///     .handler(|_ctx, _action, _fields| async { Ok(Output::from("")) });
/// let tools = menu.to_tools().unwrap();
///
/// assert_eq!(
///     usage_line(&tools[0]),
///     "add --title <value> --due-date <value> (+1 more) [flags]"
/// );
/// ```
pub fn usage_line(identity: &ToolIdentity) -> String {
    let required: Vec<String> = identity
        .required
        .iter()
        .map(|key| format!("--{} <{}>", to_flag_name(key), VALUE_NAME))
        .collect();

    let mut parts = vec![identity.command_name.clone()];
    parts.extend(required.iter().take(MAX_SHOWN_FLAGS).cloned());
    if required.len() > MAX_SHOWN_FLAGS {
        parts.push(format!("(+{} more)", required.len() - MAX_SHOWN_FLAGS));
    }
    if identity.fields.values().any(|field| !field.required) {
        parts.push("[flags]".to_string());
    }
    parts.join(" ")
}

/// Collect the flags given on the command line into resolver input
///
/// Flags that were not given, or given an empty value, are absent from the map.
pub fn matches_to_arguments(identity: &ToolIdentity, matches: &ArgMatches) -> JsonObject {
    let mut arguments = JsonObject::new();
    for key in identity.fields.keys() {
        match matches.try_get_one::<String>(key) {
            Ok(Some(value)) if !value.is_empty() => {
                arguments.insert(key.clone(), Value::String(value.clone()));
            }
            _ => {}
        }
    }
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;
    use menukit::{Field, Menu, MenuOption, Output};
    use serde_json::json;

    fn identity() -> ToolIdentity {
        let menu = Menu::new()
            .prefix("company")
            .option(
                MenuOption::new("Add & Monitor", "add")
                    .with_field(Field::new().key("domain").title("Domain"))
                    .with_field(
                        Field::new()
                            .key("ticker_symbol")
                            .title("Ticker")
                            .description("Stock ticker symbol")
                            .required(false),
                    ),
            )
            .handler(|_ctx, _action, _fields| async { Ok(Output::from("")) });
        menu.to_tools().unwrap().remove(0)
    }

    fn command() -> Command {
        let identity = identity();
        Command::new("test").args(identity.fields.values().map(field_to_arg))
    }

    #[test]
    fn test_field_to_arg() {
        let identity = identity();
        let domain = field_to_arg(&identity.fields["domain"]);
        assert_eq!(domain.get_long(), Some("domain"));
        assert_eq!(domain.get_help().unwrap().to_string(), "Domain (required)");
        assert!(!domain.is_required_set());

        let ticker = field_to_arg(&identity.fields["ticker_symbol"]);
        assert_eq!(ticker.get_long(), Some("ticker-symbol"));
        assert_eq!(ticker.get_help().unwrap().to_string(), "Stock ticker symbol");
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(usage_line(&identity()), "add-monitor --domain <value> [flags]");
    }

    #[test]
    fn test_usage_line_without_fields() {
        let menu = Menu::new()
            .option(MenuOption::new("List", "list"))
            .handler(|_ctx, _action, _fields| async { Ok(Output::from("")) });
        assert_eq!(usage_line(&menu.to_tools().unwrap()[0]), "list");
    }

    #[test]
    fn test_matches_to_arguments() {
        let matches = command()
            .try_get_matches_from(["test", "--domain", "example.com", "--ticker-symbol", "EXM"])
            .unwrap();
        let arguments = matches_to_arguments(&identity(), &matches);
        assert_eq!(
            Value::Object(arguments),
            json!({"domain": "example.com", "ticker_symbol": "EXM"})
        );
    }

    #[test]
    fn test_absent_flags_are_absent() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert!(matches_to_arguments(&identity(), &matches).is_empty());
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let matches = command()
            .try_get_matches_from(["test", "--domain", ""])
            .unwrap();
        assert!(matches_to_arguments(&identity(), &matches).is_empty());
    }
}
