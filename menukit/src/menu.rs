//! The root declaration: a titled list of options and one handler

use crate::dispatch::{run_handler, Handler, HandlerContext, HandlerFuture, OptionTool};
use crate::error::{ConfigurationError, DispatchError};
use crate::naming::to_machine_name;
use crate::option::MenuOption;
use crate::output::Output;
use crate::registry::ToolRegistry;
use crate::resolve::{resolve_fields, FieldMap, JsonObject};
use crate::schema::{self, ToolIdentity};
use crate::skill::Skill;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Validator for the interactive selection
pub type SelectionValidator<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// A menu of options projected onto every surface
///
/// ```
/// use menukit::{Field, Menu, MenuOption, Output};
///
/// let menu = Menu::new()
///     .title("Notes")
///     .prefix("note")
///     .option(
///         MenuOption::new("Add note", "add")
///             .tool_name("add")
///             .with_field(Field::new().key("title").title("Title")),
///     )
///     .handler(|_ctx, action, fields| async move {
///         Ok(Output::from(format!("{action}: {}", fields["title"])))
///     });
///
/// let tools = menu.to_tools().unwrap();
/// assert_eq!(tools[0].name, "note_add");
/// ```
#[derive(Clone)]
pub struct Menu<T> {
    pub title: String,
    pub description: String,
    /// Root command name and tool name prefix
    pub prefix: Option<String>,
    pub options: Vec<MenuOption<T>>,
    /// Visible rows in the interactive menu
    pub height: Option<usize>,
    handler: Option<Handler<T>>,
    validate: Option<SelectionValidator<T>>,
}

impl<T> Menu<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            prefix: None,
            options: Vec::new(),
            height: None,
            handler: None,
            validate: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn option(mut self, option: MenuOption<T>) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = MenuOption<T>>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = (height > 0).then_some(height);
        self
    }

    /// Set the handler that executes every option
    ///
    /// The closure receives the selected option's value and the resolved
    /// fields. Its error, if any, is never shown to callers.
    pub fn handler<F, Fut, O>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerContext, T, FieldMap) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        O: Into<Output> + 'static,
    {
        self.handler = Some(Arc::new(
            move |ctx: HandlerContext, value: T, fields: FieldMap| -> HandlerFuture {
                let fut = handler(ctx, value, fields);
                Box::pin(async move { fut.await.map(Into::into) })
            },
        ));
        self
    }

    /// Validate the interactive selection before fields are prompted
    pub fn validate<F, E>(mut self, validate: F) -> Self
    where
        F: Fn(&T) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.validate = Some(Arc::new(move |value: &T| {
            validate(value).map_err(|e| e.to_string())
        }));
        self
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the selection validator, if any
    pub fn check_selection(&self, value: &T) -> Result<(), String> {
        match &self.validate {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }

    /// First option whose value equals `value`
    pub fn find_option(&self, value: &T) -> Option<&MenuOption<T>> {
        self.options.iter().find(|option| &option.value == value)
    }

    /// Index of the first pre-selected option, else 0
    pub fn default_index(&self) -> usize {
        self.options
            .iter()
            .position(|option| option.selected)
            .unwrap_or(0)
    }

    /// Options eligible for the non-interactive surfaces
    ///
    /// Options marked exposed; when none are marked, all of them.
    pub fn exposed_options(&self) -> Vec<&MenuOption<T>> {
        let exposed: Vec<_> = self.options.iter().filter(|o| o.exposed).collect();
        if exposed.is_empty() {
            self.options.iter().collect()
        } else {
            exposed
        }
    }

    /// Prefix, else the machine name of the title
    pub fn root_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => to_machine_name(&self.title),
        }
    }

    /// Resolve `input` for `option` and run the handler
    ///
    /// Returns `Ok(None)` when the menu has no handler; validation still runs.
    pub async fn invoke(
        &self,
        ctx: HandlerContext,
        option: &MenuOption<T>,
        input: &JsonObject,
    ) -> Result<Option<Output>, DispatchError> {
        let fields = resolve_fields(&option.fields, input)?;
        match &self.handler {
            Some(handler) => run_handler(handler, ctx, option.value.clone(), fields)
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Project the exposed options into tool identities
    pub fn to_tools(&self) -> Result<Vec<ToolIdentity>, ConfigurationError> {
        schema::project(self)
    }

    /// Build the registry every network and command-line surface serves from
    pub fn to_registry(&self) -> Result<ToolRegistry, ConfigurationError> {
        let identities = schema::project(self)?;
        let handler = self
            .handler
            .clone()
            .ok_or(ConfigurationError::MissingHandler)?;

        let mut registry =
            ToolRegistry::new(&self.title, &self.description, self.prefix.as_deref());
        for (identity, option) in identities.into_iter().zip(self.exposed_options()) {
            registry.register(Arc::new(OptionTool::new(
                identity,
                option.value.clone(),
                option.fields.clone(),
                handler.clone(),
            )))?;
        }
        Ok(registry)
    }

    /// Build the agent skill document
    pub fn to_skill(&self) -> Result<Skill, ConfigurationError> {
        Ok(Skill::from_registry(&self.to_registry()?))
    }
}

impl<T> Default for Menu<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Menu<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("prefix", &self.prefix)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}
