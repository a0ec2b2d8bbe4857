//! One-shot subcommand handlers.

use crate::app::{report_error, write_items, write_tree, App};
use crate::args::Command;
use crate::menu;
use imaginarium_core::ItemDraft;
use std::io::{self, Write};
use std::process::ExitCode;

/// Result of one command as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
}

impl From<CommandStatus> for ExitCode {
    fn from(value: CommandStatus) -> Self {
        match value {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failed => ExitCode::FAILURE,
        }
    }
}

/// Runs one command.
///
/// Application failures are printed to `err_out` and yield
/// `CommandStatus::Failed`; only terminal I/O failures are returned as
/// errors.
pub fn execute(
    app: &App,
    command: Command,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> io::Result<CommandStatus> {
    let outcome = match command {
        Command::Add {
            id,
            name,
            category,
            description,
        } => app
            .save(&ItemDraft::new(id, name, category, description))
            .map(|item| writeln!(out, "Saved {}.", item.id())),
        Command::Delete { id } => app.delete(&id).map(|()| writeln!(out, "Deleted.")),
        Command::List => app.list().map(|items| write_items(out, &items)),
        Command::Search { token } => app.search(&token).map(|items| write_items(out, &items)),
        Command::Tree => app.tree().map(|groups| write_tree(out, &groups)),
        Command::Export { output } => app
            .export(output.as_deref())
            .map(|path| writeln!(out, "Exported to {}", path.display())),
        Command::Menu => {
            menu::run(app, &mut io::stdin().lock(), out, err_out)?;
            return Ok(CommandStatus::Success);
        }
    };

    match outcome {
        Ok(written) => {
            written?;
            Ok(CommandStatus::Success)
        }
        Err(err) => {
            report_error(err_out, &err)?;
            Ok(CommandStatus::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, CommandStatus};
    use crate::app::App;
    use crate::args::Command;
    use imaginarium_core::{AppConfig, ConfigOverrides};
    use std::path::Path;

    fn app_in(dir: &Path) -> App {
        let overrides = ConfigOverrides {
            data_dir: Some(dir.to_path_buf()),
            log_level: None,
        };
        App::new(&AppConfig::resolve_with(&overrides, |_| None, dir).unwrap())
    }

    fn run(app: &App, command: Command) -> (CommandStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(app, command, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn add_list_and_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (code, out, _) = run(
            &app,
            Command::Add {
                id: "id-1".into(),
                name: "Sky Spoon".into(),
                category: "Tools".into(),
                description: "Scoops clouds".into(),
            },
        );
        assert_eq!(code, CommandStatus::Success);
        assert_eq!(out, "Saved id-1.\n");

        let (_, out, _) = run(&app, Command::List);
        assert_eq!(out, "- [id-1] Sky Spoon | Tools | Scoops clouds\n");

        let (code, _, _) = run(&app, Command::Delete { id: "id-1".into() });
        assert_eq!(code, CommandStatus::Success);

        let (code, _, err) = run(&app, Command::Delete { id: "id-1".into() });
        assert_eq!(code, CommandStatus::Failed);
        assert_eq!(err, "item with id `id-1` not found\n");
    }

    #[test]
    fn validation_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (code, _, err) = run(&app, Command::Search { token: "<>".into() });
        assert_eq!(code, CommandStatus::Failed);
        assert_eq!(err, "Validation error: input cannot be empty\n");
    }

    #[test]
    fn export_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());
        run(
            &app,
            Command::Add {
                id: "id-1".into(),
                name: "Sky Spoon".into(),
                category: "Tools".into(),
                description: "Scoops clouds".into(),
            },
        );

        let (code, _, _) = run(&app, Command::Export { output: None });
        assert_eq!(code, CommandStatus::Success);
        let json = std::fs::read_to_string(dir.path().join("items.json")).unwrap();
        assert!(json.starts_with(r#"{"data":[{"id":"id-1""#));
    }

    #[test]
    fn export_failure_shows_only_safe_message() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (code, _, err) = run(
            &app,
            Command::Export {
                output: Some(dir.path().to_path_buf()),
            },
        );
        assert_eq!(code, CommandStatus::Failed);
        assert_eq!(err, "Could not export JSON.\n");
    }
}
