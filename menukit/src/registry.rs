//! Registry of invokable tools shared by the network and command-line surfaces

use crate::dispatch::{HandlerContext, MenuTool};
use crate::error::{ConfigurationError, DispatchError};
use crate::naming::to_machine_name;
use crate::output::Output;
use crate::resolve::JsonObject;
use crate::schema::ToolIdentity;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Tools projected from one menu, keyed by flat tool name
///
/// Registration order is the menu's option order, so every surface lists
/// tools the same way.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    title: String,
    description: String,
    prefix: Option<String>,
    tools: IndexMap<String, Arc<dyn MenuTool>>,
}

impl ToolRegistry {
    pub fn new(title: &str, description: &str, prefix: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            tools: IndexMap::new(),
        }
    }

    /// Add a tool, rejecting a name that is already taken
    pub fn register(&mut self, tool: Arc<dyn MenuTool>) -> Result<(), ConfigurationError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ConfigurationError::DuplicateToolName { name });
        }
        tracing::debug!("Registered tool {}", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn MenuTool>> {
        self.tools.get(name)
    }

    /// Every tool in registration order
    pub fn list(&self) -> impl Iterator<Item = &Arc<dyn MenuTool>> {
        self.tools.values()
    }

    pub fn identities(&self) -> impl Iterator<Item = &ToolIdentity> {
        self.tools.values().map(|tool| tool.identity())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Prefix, else the machine name of the title
    pub fn root_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => to_machine_name(&self.title),
        }
    }

    /// `title - description`, else whichever of the two is set
    pub fn server_description(&self) -> String {
        match (self.title.is_empty(), self.description.is_empty()) {
            (false, false) => format!("{} - {}", self.title, self.description),
            (false, true) => self.title.clone(),
            _ => self.description.clone(),
        }
    }

    /// Look up `name` and invoke it
    ///
    /// Returns `None` when no tool has that name.
    pub async fn invoke(
        &self,
        name: &str,
        ctx: HandlerContext,
        arguments: &JsonObject,
    ) -> Option<Result<Output, DispatchError>> {
        let tool = self.get(name)?;
        Some(tool.invoke(ctx, arguments).await)
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("title", &self.title)
            .field("prefix", &self.prefix)
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Surface;
    use crate::field::Field;
    use crate::menu::Menu;
    use crate::option::MenuOption;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        Menu::new()
            .title("Site Manager")
            .description("Manage monitored websites")
            .prefix("site")
            .options([
                MenuOption::new("Add", "add").with_field(Field::new().key("domain").format("domain")),
                MenuOption::new("List", "list"),
            ])
            .handler(|_ctx, action, _fields| async move { Ok(Output::from(action)) })
            .to_registry()
            .unwrap()
    }

    #[test]
    fn test_lookup_and_order() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("site_add").is_some());
        assert!(registry.get("add").is_none());
        let names: Vec<_> = registry.list().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["site_add", "site_list"]);
    }

    #[test]
    fn test_server_description() {
        let registry = registry();
        assert_eq!(registry.server_description(), "Site Manager - Manage monitored websites");
        assert_eq!(ToolRegistry::new("Only", "", None).server_description(), "Only");
        assert_eq!(ToolRegistry::new("", "Desc", None).server_description(), "Desc");
    }

    #[test]
    fn test_root_name() {
        assert_eq!(registry().root_name(), "site");
        assert_eq!(ToolRegistry::new("Site Manager", "", None).root_name(), "site_manager");
        assert_eq!(ToolRegistry::new("Site Manager", "", Some("")).prefix(), None);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry();
        let again = registry.get("site_list").cloned().unwrap();
        assert_eq!(
            registry.register(again),
            Err(ConfigurationError::DuplicateToolName {
                name: "site_list".into()
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_invoke_by_name() {
        let registry = registry();
        let args = json!({"domain": "example.com"});
        let output = registry
            .invoke("site_add", HandlerContext::new(Surface::Http), args.as_object().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(output, Output::from("add"));

        assert!(registry
            .invoke("site_remove", HandlerContext::new(Surface::Http), &JsonObject::new())
            .await
            .is_none());
    }
}
