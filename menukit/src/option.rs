//! One selectable entry of a menu

use crate::field::Field;
use std::fmt::Display;

/// A menu entry carrying an opaque value and its input fields
///
/// The value is what the handler receives; it is compared by equality, never
/// by identity, so plain strings and small enums work as dispatch keys.
///
/// ```
/// use menukit::{Field, MenuOption};
///
/// let add = MenuOption::new("Add task", "add")
///     .description("Create a new task")
///     .tool_name("add")
///     .with_field(Field::new().key("title").title("Title"))
///     .expose(true);
/// assert_eq!(add.base_name(), "add");
/// ```
#[derive(Debug, Clone)]
pub struct MenuOption<T> {
    /// Label shown in interactive menus; default source of the tool name
    pub key: String,
    pub value: T,
    pub description: String,
    /// Replaces `key` as the source of tool and subcommand names
    pub tool_name: Option<String>,
    /// Opts in to the non-interactive surfaces
    pub exposed: bool,
    pub fields: Vec<Field>,
    /// Pre-selected in the interactive menu
    pub selected: bool,
}

impl<T> MenuOption<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
            description: String::new(),
            tool_name: None,
            exposed: false,
            fields: Vec::new(),
            selected: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tool_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.tool_name = (!name.is_empty()).then_some(name);
        self
    }

    pub fn expose(mut self, exposed: bool) -> Self {
        self.exposed = exposed;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Override name, else key
    pub fn base_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or(&self.key)
    }

    /// Description, else key
    pub fn tool_description(&self) -> &str {
        if self.description.is_empty() {
            &self.key
        } else {
            &self.description
        }
    }
}

impl<T: Display> MenuOption<T> {
    /// One option per value, keyed by the value's display form
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Vec<Self> {
        values
            .into_iter()
            .map(|value| MenuOption::new(value.to_string(), value))
            .collect()
    }
}
