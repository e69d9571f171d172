//! A single string input slot attached to an option

use crate::naming::to_machine_name;
use crate::resolve::DEFAULT_CHAR_LIMIT;
use std::fmt;
use std::sync::Arc;

/// Custom validation function stored on a field
pub type CustomValidator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// One named input of an option
///
/// Fields are built by value; every setter consumes and returns the field so a
/// template can be cloned into several options without sharing state.
///
/// ```
/// use menukit::Field;
///
/// let field = Field::new().title("Task title").char_limit(80);
/// assert_eq!(field.resolved_key(), "task_title");
/// assert!(field.required);
/// ```
#[derive(Clone)]
pub struct Field {
    /// Explicit key; derived from the title when unset
    pub key: Option<String>,
    pub title: String,
    pub description: String,
    /// Hint shown by the interactive prompt
    pub placeholder: String,
    pub required: bool,
    /// Format tag, see [`crate::formats`]
    pub format: Option<String>,
    /// Maximum length in characters
    pub char_limit: Option<usize>,
    validate: Option<CustomValidator>,
}

impl Field {
    /// A required field with no key, title or constraints
    pub fn new() -> Self {
        Self {
            key: None,
            title: String::new(),
            description: String::new(),
            placeholder: String::new(),
            required: true,
            format: None,
            char_limit: None,
            validate: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Hint shown by the interactive prompt
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach a format tag, see [`crate::formats`]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        self.format = (!format.is_empty()).then_some(format);
        self
    }

    /// Maximum length in characters; zero restores the default limit
    pub fn char_limit(mut self, limit: usize) -> Self {
        self.char_limit = (limit > 0).then_some(limit);
        self
    }

    /// Custom validation, run after any format validation
    pub fn validate<F, E>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.validate = Some(Arc::new(move |value: &str| {
            validate(value).map_err(|e| e.to_string())
        }));
        self
    }

    /// Explicit key, else the machine name of the title
    pub fn resolved_key(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => to_machine_name(&self.title),
        }
    }

    /// Title, else the resolved key
    pub fn resolved_title(&self) -> String {
        if self.title.is_empty() {
            self.resolved_key()
        } else {
            self.title.clone()
        }
    }

    /// Explicit limit, else [`DEFAULT_CHAR_LIMIT`]
    pub fn effective_limit(&self) -> usize {
        self.char_limit.unwrap_or(DEFAULT_CHAR_LIMIT)
    }

    pub(crate) fn custom_validator(&self) -> Option<&CustomValidator> {
        self.validate.as_ref()
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("required", &self.required)
            .field("format", &self.format)
            .field("char_limit", &self.char_limit)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}
