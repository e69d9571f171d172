//! Agent skill documents (`SKILL.md`) rendered from a tool registry

use crate::naming::to_flag_name;
use crate::registry::ToolRegistry;
use crate::schema::ToolIdentity;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SkillField {
    key: String,
    required: bool,
    format: Option<String>,
    title: String,
}

impl SkillField {
    fn format_label(&self) -> &str {
        self.format.as_deref().unwrap_or("string")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SkillTool {
    name: String,
    description: String,
    fields: Vec<SkillField>,
}

impl SkillTool {
    fn from_identity(identity: &ToolIdentity) -> Self {
        let fields = identity
            .fields
            .values()
            .map(|field| SkillField {
                key: field.key.clone(),
                required: field.required,
                format: field.format_tag.clone(),
                title: field.display_title().to_string(),
            })
            .collect();

        Self {
            name: identity.name.clone(),
            description: identity.description.clone(),
            fields,
        }
    }
}

/// Markdown document describing a menu's tools to an agent
///
/// The generated description, workflow and guidelines can be overridden or
/// extended with the builder methods before rendering with `to_string()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    name: String,
    title: String,
    description: String,
    tools: Vec<SkillTool>,
    workflow: Vec<String>,
    guidelines: Vec<String>,
    sections: Vec<(String, String)>,
}

impl Skill {
    pub fn from_registry(registry: &ToolRegistry) -> Self {
        let name = to_flag_name(registry.prefix().unwrap_or(registry.title()));
        let tools: Vec<SkillTool> = registry.identities().map(SkillTool::from_identity).collect();

        let summary = if registry.description().is_empty() {
            registry.title()
        } else {
            registry.description()
        };

        Self {
            name,
            title: registry.title().to_string(),
            description: describe(summary, &tools),
            guidelines: default_guidelines(&tools),
            tools,
            workflow: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Replace the generated frontmatter description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append workflow steps; any custom step replaces the generated workflow
    pub fn workflow<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workflow.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Append guidelines after the generated ones
    pub fn guideline<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guidelines.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push((heading.into(), body.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn describe(summary: &str, tools: &[SkillTool]) -> String {
    let actions: Vec<String> = tools.iter().map(|t| t.description.to_lowercase()).collect();
    let mut text = summary.to_string();
    if actions.is_empty() {
        return text;
    }

    text.push_str(" Use when the user needs to: ");
    for (i, action) in actions.iter().enumerate() {
        if i > 0 && i == actions.len() - 1 {
            text.push_str(", or ");
        } else if i > 0 {
            text.push_str(", ");
        }
        text.push_str(action);
    }
    text.push('.');
    text
}

fn default_guidelines(tools: &[SkillTool]) -> Vec<String> {
    let fields = tools.iter().flat_map(|tool| tool.fields.iter());

    let formatted: Vec<String> = fields
        .clone()
        .filter_map(|f| {
            f.format
                .as_ref()
                .map(|format| format!("`{}` ({} format)", f.key, format))
        })
        .collect();
    let required: Vec<String> = fields
        .filter(|f| f.required)
        .map(|f| format!("`{}`", f.key))
        .collect();

    let mut guidelines = Vec::new();
    if !formatted.is_empty() {
        guidelines.push(format!(
            "Validate format before submission: {}",
            formatted.join(", ")
        ));
    }
    if !required.is_empty() {
        guidelines.push(format!(
            "Always provide required fields: {}",
            required.join(", ")
        ));
    }
    guidelines.push("Handle errors gracefully and inform the user".to_string());
    guidelines
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "description: {}", self.description)?;
        writeln!(f, "---\n")?;

        writeln!(f, "# {}\n", self.title)?;

        writeln!(f, "## Available Tools\n")?;
        for tool in &self.tools {
            writeln!(f, "### `{}`\n", tool.name)?;
            writeln!(f, "{}\n", tool.description)?;

            if !tool.fields.is_empty() {
                writeln!(f, "| Field | Required | Format | Description |")?;
                writeln!(f, "|-------|----------|--------|-------------|")?;
                for field in &tool.fields {
                    let required = if field.required { "yes" } else { "no" };
                    writeln!(
                        f,
                        "| `{}` | {} | {} | {} |",
                        field.key,
                        required,
                        field.format_label(),
                        field.title
                    )?;
                }
                writeln!(f)?;
            }
        }

        writeln!(f, "## Workflow\n")?;
        if self.workflow.is_empty() {
            for (i, tool) in self.tools.iter().enumerate() {
                writeln!(f, "{}. **{}** \u{2014} `{}`", i + 1, tool.description, tool.name)?;
            }
        } else {
            for (i, step) in self.workflow.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, step)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Guidelines\n")?;
        for guideline in &self.guidelines {
            writeln!(f, "- {guideline}")?;
        }
        if !self.guidelines.is_empty() {
            writeln!(f)?;
        }

        for (heading, body) in &self.sections {
            writeln!(f, "## {heading}\n\n{body}\n")?;
        }
        Ok(())
    }
}
