//! Interactive console menu.
//!
//! Application failures are printed and the loop continues. Terminal I/O
//! failures end the loop and are returned to `main`, where they are fatal.

use crate::app::{report_error, write_items, write_tree, App};
use imaginarium_core::sanitize::{
    sanitize_line, CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, ID_MAX_LEN, NAME_MAX_LEN,
    SEARCH_TOKEN_MAX_LEN,
};
use imaginarium_core::{AppResult, ItemDraft};
use log::{info, warn};
use std::io::{self, BufRead, Write};

const MENU: &str = "
=== Imaginarium Catalog ===
1) Add/Update item
2) Delete item
3) List items
4) Search items
5) Show categories tree
6) Iterate items
7) Export catalog to JSON
0) Exit";

struct Console<'a, R, W, E> {
    input: &'a mut R,
    out: &'a mut W,
    err_out: &'a mut E,
}

impl<R: BufRead, W: Write, E: Write> Console<'_, R, W, E> {
    /// Prints `label` and reads one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prints the outcome of a guarded action, returning its value on success.
    fn settle<T>(&mut self, result: AppResult<T>, context: &str) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    "event=menu_action module=cli status=error action={} kind={}",
                    context,
                    err.kind()
                );
                report_error(self.err_out, &err)?;
                Ok(None)
            }
        }
    }
}

/// Runs the menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write, E: Write>(
    app: &App,
    input: &mut R,
    out: &mut W,
    err_out: &mut E,
) -> io::Result<()> {
    let mut console = Console {
        input,
        out,
        err_out,
    };
    info!("event=menu_start module=cli status=ok");

    loop {
        writeln!(console.out, "{MENU}")?;
        let Some(choice) = console.prompt("> ")? else {
            break;
        };

        match choice.trim() {
            "1" => add_item(app, &mut console)?,
            "2" => delete_item(app, &mut console)?,
            "3" => {
                if let Some(items) = console.settle(app.list(), "list")? {
                    write_items(console.out, &items)?;
                }
            }
            "4" => search(app, &mut console)?,
            "5" => {
                if let Some(groups) = console.settle(app.tree(), "tree")? {
                    write_tree(console.out, &groups)?;
                }
            }
            "6" => iterate(app, &mut console)?,
            "7" => {
                if let Some(path) = console.settle(app.export(None), "export")? {
                    writeln!(console.out, "Exported to {}", path.display())?;
                }
            }
            "0" => {
                writeln!(console.out, "Bye!")?;
                break;
            }
            _ => writeln!(console.out, "Unknown option. Please try again.")?,
        }
    }

    info!("event=menu_stop module=cli status=ok");
    Ok(())
}

fn add_item<R: BufRead, W: Write, E: Write>(
    app: &App,
    console: &mut Console<'_, R, W, E>,
) -> io::Result<()> {
    let fields = [
        ("Id (max 40): ", ID_MAX_LEN),
        ("Name (max 80): ", NAME_MAX_LEN),
        ("Category (max 80): ", CATEGORY_MAX_LEN),
        ("Description (max 200): ", DESCRIPTION_MAX_LEN),
    ];

    let mut values = Vec::with_capacity(fields.len());
    for (label, max_len) in fields {
        let raw = console.prompt(label)?;
        let checked = sanitize_line(raw.as_deref(), max_len).map_err(Into::into);
        match console.settle(checked, "add")? {
            Some(value) => values.push(value),
            None => return Ok(()),
        }
    }

    let mut values = values.into_iter();
    let draft = ItemDraft {
        id: values.next(),
        name: values.next(),
        category: values.next(),
        description: values.next(),
    };
    if console.settle(app.save(&draft), "add")?.is_some() {
        writeln!(console.out, "Saved.")?;
    }
    Ok(())
}

fn delete_item<R: BufRead, W: Write, E: Write>(
    app: &App,
    console: &mut Console<'_, R, W, E>,
) -> io::Result<()> {
    let raw = console.prompt("Enter ID to delete (max 40): ")?;
    let checked = sanitize_line(raw.as_deref(), ID_MAX_LEN).map_err(Into::into);
    let Some(id) = console.settle(checked, "delete")? else {
        return Ok(());
    };
    if console.settle(app.delete(&id), "delete")?.is_some() {
        writeln!(console.out, "Deleted.")?;
    }
    Ok(())
}

fn search<R: BufRead, W: Write, E: Write>(
    app: &App,
    console: &mut Console<'_, R, W, E>,
) -> io::Result<()> {
    let raw = console.prompt("Search token (max 80): ")?;
    let checked = sanitize_line(raw.as_deref(), SEARCH_TOKEN_MAX_LEN).map_err(Into::into);
    let Some(token) = console.settle(checked, "search")? else {
        return Ok(());
    };
    if let Some(items) = console.settle(app.search(&token), "search")? {
        write_items(console.out, &items)?;
    }
    Ok(())
}

fn iterate<R: BufRead, W: Write, E: Write>(
    app: &App,
    console: &mut Console<'_, R, W, E>,
) -> io::Result<()> {
    let Some(items) = console.settle(app.list(), "iterate")? else {
        return Ok(());
    };
    if items.is_empty() {
        return writeln!(console.out, "(no items)");
    }
    writeln!(console.out, "Iterating items:")?;
    for item in &items {
        writeln!(console.out, "- {}", item.name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::app::App;
    use imaginarium_core::{AppConfig, ConfigOverrides};
    use std::io::Cursor;
    use std::path::Path;

    fn app_in(dir: &Path) -> App {
        let overrides = ConfigOverrides {
            data_dir: Some(dir.to_path_buf()),
            log_level: None,
        };
        App::new(&AppConfig::resolve_with(&overrides, |_| None, dir).unwrap())
    }

    fn drive(app: &App, script: &str) -> (String, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(app, &mut input, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn add_then_iterate_then_exit() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (out, err) = drive(
            &app,
            "1\nid-1\nSky   Spoon\nTools\nScoops clouds\n6\n0\n",
        );

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("Saved."));
        assert!(out.contains("Iterating items:\n- Sky Spoon\n"));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn validation_errors_keep_the_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (out, err) = drive(&app, "1\n<<>>\n2\nghost\n9\n0\n");

        assert_eq!(
            err,
            "Validation error: input cannot be empty\nitem with id `ghost` not found\n"
        );
        assert!(out.contains("Unknown option. Please try again."));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn end_of_input_mid_prompt_is_null_input_and_then_exits() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());

        let (out, err) = drive(&app, "1\nid-1");

        assert_eq!(err, "Validation error: input is required\n");
        assert!(!out.contains("Bye!"));
    }
}
