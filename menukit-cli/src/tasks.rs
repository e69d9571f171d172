//! In-memory task store and the menu that drives it

use comfy_table::{presets::UTF8_FULL, Table};
use menukit::{Field, FieldMap, HandlerContext, Menu, MenuOption, Output, Surface};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Complete,
    Settings,
    Exit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{other}', expected low, normal or high")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub priority: Priority,
    pub done: bool,
}

/// Shared task list; clones see the same tasks
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl TaskStore {
    /// A store holding a couple of starter tasks
    pub fn seeded() -> Self {
        let tasks = vec![
            Task {
                id: 1,
                title: "Write the README".to_string(),
                priority: Priority::Normal,
                done: false,
            },
            Task {
                id: 2,
                title: "Triage open issues".to_string(),
                priority: Priority::High,
                done: false,
            },
        ];
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    pub async fn list(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    pub async fn add(&self, title: &str, priority: Priority) -> Task {
        let mut tasks = self.tasks.lock().await;
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title: title.to_string(),
            priority,
            done: false,
        };
        tasks.push(task.clone());
        task
    }

    pub async fn complete(&self, id: u32) -> anyhow::Result<Task> {
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow::anyhow!("no task with id {id}"))?;
        task.done = true;
        Ok(task.clone())
    }
}

fn render_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Priority", "Done"]);
    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            task.title.clone(),
            task.priority.to_string(),
            if task.done { "yes" } else { "no" }.to_string(),
        ]);
    }
    table.to_string()
}

/// Subcommands `taskmenu` adds next to the task tools
pub const SURFACE_COMMANDS: [&str; 3] = ["tui", "serve", "http"];

/// The task manager menu
///
/// `Settings` and `Exit` only appear in the interactive prompt.
pub fn task_menu(store: TaskStore) -> Menu<Action> {
    Menu::new()
        .title("Task Manager")
        .description("Track and complete tasks")
        .prefix("task")
        .height(8)
        .options([
            MenuOption::new("List tasks", Action::List)
                .tool_name("list")
                .description("List all tasks")
                .expose(true),
            MenuOption::new("Add task", Action::Add)
                .tool_name("add")
                .description("Create a new task")
                .with_field(
                    Field::new()
                        .key("title")
                        .title("Title")
                        .description("What needs doing")
                        .placeholder("Water the plants")
                        .char_limit(200),
                )
                .with_field(
                    Field::new()
                        .key("priority")
                        .title("Priority")
                        .description("low, normal or high")
                        .required(false)
                        .validate(|value: &str| value.parse::<Priority>().map(|_| ())),
                )
                .expose(true),
            MenuOption::new("Complete task", Action::Complete)
                .tool_name("complete")
                .description("Mark a task as done")
                .with_field(
                    Field::new()
                        .key("id")
                        .title("Task ID")
                        .validate(|value: &str| {
                            value
                                .parse::<u32>()
                                .map(|_| ())
                                .map_err(|_| "must be a positive number")
                        }),
                )
                .expose(true),
            MenuOption::new("Settings", Action::Settings),
            MenuOption::new("Exit", Action::Exit).selected(true),
        ])
        .validate(|action: &Action| match action {
            Action::Settings => Err("Settings are read from .menukit/config.toml"),
            _ => Ok(()),
        })
        .handler(move |ctx, action, fields| handle(store.clone(), ctx, action, fields))
}

async fn handle(
    store: TaskStore,
    ctx: HandlerContext,
    action: Action,
    fields: FieldMap,
) -> anyhow::Result<Output> {
    match action {
        Action::List => {
            let tasks = store.list().await;
            match ctx.surface() {
                Surface::Cli | Surface::Interactive => Ok(Output::from(render_table(&tasks))),
                Surface::Http | Surface::Mcp => Ok(Output::json(&tasks)?),
            }
        }
        Action::Add => {
            let priority = match fields.get("priority") {
                Some(p) => p.parse().map_err(anyhow::Error::msg)?,
                None => Priority::default(),
            };
            let task = store.add(&fields["title"], priority).await;
            tracing::info!("Created task {}", task.id);
            Ok(Output::json(&task)?)
        }
        Action::Complete => {
            let id: u32 = fields["id"].parse()?;
            let task = store.complete(id).await?;
            Ok(Output::from(format!("Completed task {}: {}", task.id, task.title)))
        }
        Action::Settings | Action::Exit => Ok(Output::from("Goodbye")),
    }
}
