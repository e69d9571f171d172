//! Interactive terminal prompt for a menu
//!
//! The runner shows every option of the menu, not only the exposed ones, then
//! asks for each field of the chosen option. Answers are validated as they are
//! typed with the same checks the resolver applies, and the collected answers
//! dispatch through [`Menu::invoke`] like any other surface.

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input, Select};
use menukit::{validate_value, Field, HandlerContext, JsonObject, Menu, MenuOption, Output, Surface};
use serde_json::Value;
use std::io::{self, IsTerminal};

/// Menus with more options than this get a fuzzy filter
const FUZZY_THRESHOLD: usize = 10;

/// What the user picked and what the handler produced
#[derive(Debug, Clone)]
pub struct InteractiveOutcome<T> {
    pub selected: T,
    /// `None` when the menu has no handler
    pub output: Option<Output>,
}

/// Runs a [`Menu`] as a terminal prompt
pub struct InteractiveRunner<'a, T> {
    menu: &'a Menu<T>,
    theme: ColorfulTheme,
    /// Whether to refuse prompting (for testing or non-TTY environments)
    non_interactive: bool,
}

impl<'a, T> InteractiveRunner<'a, T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(menu: &'a Menu<T>) -> Self {
        Self::with_non_interactive(menu, false)
    }

    /// Prompting is refused when `non_interactive` is set or stdin is not a terminal
    pub fn with_non_interactive(menu: &'a Menu<T>, non_interactive: bool) -> Self {
        Self {
            menu,
            theme: ColorfulTheme::default(),
            non_interactive: non_interactive || !io::stdin().is_terminal(),
        }
    }

    /// Prompt for an option and its fields, then run the handler
    pub async fn run(&self) -> CliResult<InteractiveOutcome<T>> {
        if self.non_interactive {
            return Err(CliError::new(
                "Interactive mode requires a terminal on stdin",
                EXIT_ERROR,
            ));
        }
        if self.menu.options.is_empty() {
            return Err(CliError::new("Menu has no options", EXIT_ERROR));
        }

        let option = self.select_option()?;
        let answers = self.collect_answers(option)?;

        tracing::debug!("Selected '{}' with {} answers", option.key, answers.len());
        let output = self
            .menu
            .invoke(HandlerContext::new(Surface::Interactive), option, &answers)
            .await?;

        Ok(InteractiveOutcome {
            selected: option.value.clone(),
            output,
        })
    }

    /// Show the option list until the selection validator accepts
    fn select_option(&self) -> CliResult<&'a MenuOption<T>> {
        let menu = self.menu;
        let labels: Vec<&str> = menu.options.iter().map(|o| o.key.as_str()).collect();
        let prompt = if menu.description.is_empty() {
            menu.title.clone()
        } else {
            format!("{} - {}", menu.title, menu.description)
        };

        loop {
            let index = if labels.len() > FUZZY_THRESHOLD {
                let mut select = FuzzySelect::with_theme(&self.theme)
                    .with_prompt(prompt.as_str())
                    .items(&labels)
                    .default(menu.default_index());
                if let Some(height) = menu.height {
                    select = select.max_length(height);
                }
                select.interact()?
            } else {
                let mut select = Select::with_theme(&self.theme)
                    .with_prompt(prompt.as_str())
                    .items(&labels)
                    .default(menu.default_index());
                if let Some(height) = menu.height {
                    select = select.max_length(height);
                }
                select.interact()?
            };

            let option = &menu.options[index];
            match menu.check_selection(&option.value) {
                Ok(()) => return Ok(option),
                Err(message) => eprintln!("{message}"),
            }
        }
    }

    /// Ask for every field of `option`, skipping empty optional answers
    fn collect_answers(&self, option: &MenuOption<T>) -> CliResult<JsonObject> {
        let mut answers = JsonObject::new();
        for field in &option.fields {
            let answer = Input::<String>::with_theme(&self.theme)
                .with_prompt(field_prompt(field))
                .allow_empty(true)
                .validate_with(|input: &String| check_answer(field, input))
                .interact_text()?;
            if !answer.is_empty() {
                answers.insert(field.resolved_key(), Value::String(answer));
            }
        }
        Ok(answers)
    }
}

/// Prompt text for a field: title, description and placeholder hint
pub fn field_prompt(field: &Field) -> String {
    let mut prompt = field.resolved_title();
    if !field.description.is_empty() {
        prompt.push_str(&format!(" ({})", field.description));
    }
    if !field.placeholder.is_empty() {
        prompt.push_str(&format!(" [{}]", field.placeholder));
    }
    prompt
}

/// Check one typed answer
///
/// An empty answer is accepted only for optional fields.
pub fn check_answer(field: &Field, input: &str) -> Result<(), String> {
    if input.is_empty() {
        return if field.required {
            Err(format!("{} is required", field.resolved_title()))
        } else {
            Ok(())
        };
    }
    validate_value(field, input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_answer() {
        let domain = Field::new().key("domain").title("Domain").format("domain");
        assert_eq!(check_answer(&domain, ""), Err("Domain is required".to_string()));
        assert_eq!(
            check_answer(&domain, "localhost"),
            Err("invalid domain: invalid domain format".to_string())
        );
        assert_eq!(check_answer(&domain, "example.com"), Ok(()));

        let note = Field::new().key("note").required(false).char_limit(3);
        assert_eq!(check_answer(&note, ""), Ok(()));
        assert_eq!(
            check_answer(&note, "four"),
            Err("note exceeds maximum length of 3".to_string())
        );
    }

    #[test]
    fn test_custom_validator_runs() {
        let id = Field::new().key("id").validate(|v: &str| {
            v.parse::<u32>().map(|_| ()).map_err(|_| "must be a number")
        });
        assert_eq!(
            check_answer(&id, "seven"),
            Err("invalid id: must be a number".to_string())
        );
        assert_eq!(check_answer(&id, "7"), Ok(()));
    }

    #[test]
    fn test_field_prompt() {
        let field = Field::new()
            .title("Repository")
            .description("GitHub repository")
            .placeholder("owner/repo");
        assert_eq!(field_prompt(&field), "Repository (GitHub repository) [owner/repo]");
        assert_eq!(field_prompt(&Field::new().key("id")), "id");
    }

    #[test_log::test(tokio::test)]
    async fn test_non_interactive_refuses_to_prompt() {
        let menu: Menu<&str> = Menu::new().title("Pick").option(MenuOption::new("One", "one"));
        let err = InteractiveRunner::with_non_interactive(&menu, true)
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert!(err.message.contains("terminal"));
    }
}
