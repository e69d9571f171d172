//! Tool identities derived from a menu
//!
//! A [`ToolIdentity`] is everything a surface needs to advertise one option:
//! its flat tool name, its command-line name, a description and an ordered
//! field schema.

use crate::error::ConfigurationError;
use crate::field::Field;
use crate::formats;
use crate::menu::Menu;
use crate::naming::{to_flag_name, tool_name};
use crate::option::MenuOption;
use crate::resolve::JsonObject;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Structural facts about one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub key: String,
    /// Declared title, possibly empty
    pub title: String,
    pub description: String,
    pub required: bool,
    /// Format tag as declared, registered or not
    pub format_tag: Option<String>,
    /// Schema label of a registered format
    pub format_label: Option<String>,
    /// Explicit length limit
    pub max_length: Option<usize>,
}

impl FieldSchema {
    fn from_field(field: &Field) -> Self {
        let format_tag = field.format.clone();
        let format_label = format_tag
            .as_deref()
            .and_then(formats::lookup)
            .map(|spec| spec.schema_format.to_string());

        Self {
            key: field.resolved_key(),
            title: field.title.clone(),
            description: field.description.clone(),
            required: field.required,
            format_tag,
            format_label,
            max_length: field.char_limit,
        }
    }

    /// Title, else key
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.key
        } else {
            &self.title
        }
    }

    /// Help text for a command-line flag: description, else title
    pub fn help_text(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }

    /// JSON Schema property for this field
    pub fn property(&self) -> JsonObject {
        let mut property = JsonObject::new();
        property.insert("type".into(), Value::from("string"));
        if !self.title.is_empty() {
            property.insert("description".into(), Value::from(self.title.clone()));
        }
        if let Some(max_length) = self.max_length {
            property.insert("maxLength".into(), Value::from(max_length));
        }
        if let Some(label) = &self.format_label {
            property.insert("format".into(), Value::from(label.clone()));
        }
        property
    }
}

/// Derived identity of one exposed option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolIdentity {
    /// Flat name, `prefix_` + machine name
    pub name: String,
    /// Subcommand name, flag form of the override or key
    pub command_name: String,
    /// The option's key as shown in menus
    pub display_name: String,
    pub description: String,
    pub fields: IndexMap<String, FieldSchema>,
    /// Keys of required fields in declaration order
    pub required: Vec<String>,
}

impl ToolIdentity {
    /// Derive the identity of a single option
    pub fn from_option<T>(
        prefix: Option<&str>,
        option: &MenuOption<T>,
    ) -> Result<Self, ConfigurationError> {
        let command_name = to_flag_name(option.base_name());
        if command_name.is_empty() {
            return Err(ConfigurationError::EmptyToolName {
                option: option.key.clone(),
            });
        }

        let mut fields = IndexMap::with_capacity(option.fields.len());
        let mut required = Vec::new();

        for field in &option.fields {
            let schema = FieldSchema::from_field(field);
            if schema.key.is_empty() {
                return Err(ConfigurationError::EmptyFieldKey {
                    option: option.key.clone(),
                });
            }
            if fields.contains_key(&schema.key) {
                return Err(ConfigurationError::DuplicateFieldKey {
                    option: option.key.clone(),
                    key: schema.key,
                });
            }
            if schema.required {
                required.push(schema.key.clone());
            }
            fields.insert(schema.key.clone(), schema);
        }

        Ok(Self {
            name: tool_name(prefix, option.base_name()),
            command_name,
            display_name: option.key.clone(),
            description: option.tool_description().to_string(),
            fields,
            required,
        })
    }

    /// JSON Schema object: `type`, `properties` and, if any, `required`
    ///
    /// Properties keep field declaration order.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .fields
            .iter()
            .map(|(key, field)| (key.clone(), Value::Object(field.property())))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), Value::from("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !self.required.is_empty() {
            schema.insert("required".into(), Value::from(self.required.clone()));
        }
        schema
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }
}

/// Project every exposed option of `menu` into a tool identity
///
/// Fails when the menu has no handler, an option has no usable name, a field
/// key is empty or duplicated, or two options resolve to the same tool name.
pub fn project<T>(menu: &Menu<T>) -> Result<Vec<ToolIdentity>, ConfigurationError>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    if !menu.has_handler() {
        return Err(ConfigurationError::MissingHandler);
    }

    let prefix = menu.prefix.as_deref();
    let mut seen = HashSet::new();
    let mut identities = Vec::new();

    for option in menu.exposed_options() {
        let identity = ToolIdentity::from_option(prefix, option)?;
        if !seen.insert(identity.name.clone()) {
            return Err(ConfigurationError::DuplicateToolName {
                name: identity.name,
            });
        }
        identities.push(identity);
    }

    tracing::debug!("Projected {} tools from menu '{}'", identities.len(), menu.title);
    Ok(identities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use serde_json::json;

    fn company_menu() -> Menu<&'static str> {
        Menu::new()
            .title("Add Company")
            .description("Add a new company to crawl and index")
            .prefix("company")
            .options([
                MenuOption::new("Add & Monitor", "add_monitor")
                    .description("Add company and monitor for future document changes")
                    .with_field(
                        Field::new()
                            .key("domain")
                            .title("Domain (e.g., example.com)")
                            .format("domain"),
                    )
                    .with_field(Field::new().key("company_name").title("Company Name"))
                    .with_field(
                        Field::new()
                            .key("ticker")
                            .title("Ticker Symbol (optional)")
                            .required(false),
                    )
                    .expose(true),
                MenuOption::new("Cancel", "cancel"),
            ])
            .handler(|_ctx, _value, _fields| async { Ok(Output::from("ok")) })
    }

    #[test]
    fn test_requires_handler() {
        let menu: Menu<&str> = Menu::new().option(MenuOption::new("A", "a"));
        assert_eq!(project(&menu), Err(ConfigurationError::MissingHandler));
    }

    #[test]
    fn test_only_exposed_options() {
        let tools = project(&company_menu()).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "company_add_monitor");
        assert_eq!(tools[0].command_name, "add-monitor");
        assert_eq!(tools[0].display_name, "Add & Monitor");
    }

    #[test]
    fn test_exposure_fallback_matches_all_exposed() {
        let build = |exposed: bool| {
            Menu::new()
                .prefix("t")
                .options([
                    MenuOption::new("List", 1).expose(exposed),
                    MenuOption::new("Add", 2)
                        .with_field(Field::new().key("title"))
                        .expose(exposed),
                ])
                .handler(|_ctx, _value, _fields| async { Ok(Output::from("")) })
        };
        let none = project(&build(false)).unwrap();
        let all = project(&build(true)).unwrap();
        assert_eq!(none, all);
        assert_eq!(none.len(), 2);
    }

    #[test]
    fn test_schema_shape() {
        let tools = project(&company_menu()).unwrap();
        let schema = Value::Object(tools[0].input_schema());
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "domain": {
                        "type": "string",
                        "description": "Domain (e.g., example.com)",
                        "format": "hostname"
                    },
                    "company_name": {"type": "string", "description": "Company Name"},
                    "ticker": {"type": "string", "description": "Ticker Symbol (optional)"}
                },
                "required": ["domain", "company_name"]
            })
        );
    }

    #[test]
    fn test_property_order_follows_declaration() {
        let tools = project(&company_menu()).unwrap();
        let schema = tools[0].input_schema();
        let order: Vec<_> = schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(order, ["domain", "company_name", "ticker"]);
    }

    #[test]
    fn test_required_omitted_when_empty() {
        let menu = Menu::new()
            .option(MenuOption::new("List", "list"))
            .handler(|_ctx, _value, _fields| async { Ok(Output::from("")) });
        let tools = project(&menu).unwrap();
        assert!(!tools[0].input_schema().contains_key("required"));
    }

    #[test]
    fn test_char_limit_and_unknown_format() {
        let option = MenuOption::new("Note", "note").with_field(
            Field::new()
                .key("body")
                .title("Body")
                .char_limit(280)
                .format("markdown"),
        );
        let identity = ToolIdentity::from_option(None, &option).unwrap();
        let property = identity.fields["body"].property();
        assert_eq!(property["maxLength"], json!(280));
        assert!(!property.contains_key("format"));
        assert_eq!(identity.fields["body"].format_tag.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_domain_round_trip() {
        let option = MenuOption::new("Check", "check")
            .with_field(Field::new().key("domain").required(true).format("domain"));
        let identity = ToolIdentity::from_option(None, &option).unwrap();
        assert!(identity.is_required("domain"));
        assert_eq!(identity.fields["domain"].format_label.as_deref(), Some("hostname"));
    }

    #[test]
    fn test_name_prefixing() {
        let option = MenuOption::new("Add", "add");
        let identity = ToolIdentity::from_option(Some("site"), &option).unwrap();
        assert_eq!(identity.name, "site_add");
        assert_eq!(identity.command_name, "add");
    }

    #[test]
    fn test_duplicate_field_key_rejected() {
        let option = MenuOption::new("Add", "add")
            .with_field(Field::new().title("Title"))
            .with_field(Field::new().key("title"));
        assert_eq!(
            ToolIdentity::from_option(None, &option),
            Err(ConfigurationError::DuplicateFieldKey {
                option: "Add".into(),
                key: "title".into()
            })
        );
    }

    #[test]
    fn test_empty_field_key_rejected() {
        let option = MenuOption::new("Add", "add").with_field(Field::new().title("!!!"));
        assert!(matches!(
            ToolIdentity::from_option(None, &option),
            Err(ConfigurationError::EmptyFieldKey { .. })
        ));
    }

    #[test]
    fn test_empty_tool_name_rejected() {
        let menu = Menu::new()
            .option(MenuOption::new("???", "x"))
            .handler(|_ctx, _value, _fields| async { Ok(Output::from("")) });
        assert_eq!(
            project(&menu),
            Err(ConfigurationError::EmptyToolName {
                option: "???".into()
            })
        );

        let prefixed = Menu::new()
            .prefix("x")
            .option(MenuOption::new("Fine", "x").tool_name("--"))
            .handler(|_ctx, _value, _fields| async { Ok(Output::from("")) });
        assert_eq!(
            project(&prefixed),
            Err(ConfigurationError::EmptyToolName {
                option: "Fine".into()
            })
        );
    }

    #[test]
    fn test_duplicate_tool_name_rejected() {
        let menu = Menu::new()
            .options([
                MenuOption::new("Add task", 1),
                MenuOption::new("add-task", 2),
            ])
            .handler(|_ctx, _value, _fields| async { Ok(Output::from("")) });
        assert_eq!(
            project(&menu),
            Err(ConfigurationError::DuplicateToolName {
                name: "add_task".into()
            })
        );

        let mut renamed = menu.clone();
        renamed.options[1] = renamed.options[1].clone().tool_name("add_task_again");
        assert_eq!(project(&renamed).unwrap().len(), 2);
    }
}
