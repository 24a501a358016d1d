//! `task-order` CLI entry-point.
//!
//! Available sub-commands:
//! - `order`: order a JSON task list read from a file or stdin.
//! - `demo`: order the built-in build pipeline.
//!
//! The order goes to stdout; logs go to stderr (filter with `RUST_LOG`).

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use task_order::{models::build_pipeline, TaskDescriptor, TaskOrdering};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "task-order",
    about = "Compute a dependency-respecting order for named tasks",
    version
)]
struct Cli {
    /// How to print the resulting order.
    #[arg(long, global = true, value_enum, env = "TASK_ORDER_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Order a JSON array of `{ "name", "depends_on" }` objects.
    Order {
        /// Path to the task list, or `-` for stdin.
        path: PathBuf,
    },
    /// Order the built-in compile/lint/package/test pipeline.
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One task name per line.
    Text,
    /// A JSON array of task names.
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let tasks = match cli.command {
        Command::Order { path } => load_tasks(&path)?,
        Command::Demo => {
            info!("Ordering the built-in build pipeline");
            build_pipeline()
        }
    };

    let order = TaskOrdering::new(tasks)
        .and_then(TaskOrdering::compute_ordering)
        .context("cannot order tasks")?;

    println!("{}", render(&order, cli.format)?);
    Ok(())
}

/// Read a task list from `path`, treating `-` as stdin.
fn load_tasks(path: &Path) -> Result<Vec<TaskDescriptor>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("cannot read task list from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("cannot read file {}", path.display()))?
    };

    let tasks: Vec<TaskDescriptor> = serde_json::from_str(&content)
        .with_context(|| format!("invalid task list in {}", path.display()))?;
    debug!(tasks = tasks.len(), "task list loaded");
    Ok(tasks)
}

fn render(order: &[String], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => order.join("\n"),
        OutputFormat::Json => serde_json::to_string(order)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tasks(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_task_list_from_file() {
        let file = write_tasks(
            r#"[
                { "name": "compile", "depends_on": ["lint"] },
                { "name": "lint" }
            ]"#,
        );
        let tasks = load_tasks(file.path()).unwrap();
        assert_eq!(
            tasks,
            vec![
                TaskDescriptor::with_deps("compile", ["lint"]),
                TaskDescriptor::new("lint"),
            ]
        );
    }

    #[test]
    fn malformed_task_list_is_an_error() {
        let file = write_tasks(r#"[{ "name": "compile", "depends_on": [42] }]"#);
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid task list in"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_tasks(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read file"));
    }

    #[test]
    fn renders_text_and_json() {
        let order = vec!["lint".to_string(), "compile".to_string()];
        assert_eq!(render(&order, OutputFormat::Text).unwrap(), "lint\ncompile");
        assert_eq!(
            render(&order, OutputFormat::Json).unwrap(),
            r#"["lint","compile"]"#
        );
    }

    #[test]
    fn cli_parses_order_with_json_format() {
        let cli = Cli::try_parse_from(["task-order", "order", "tasks.json", "--format", "json"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Order { ref path } if path == Path::new("tasks.json")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
