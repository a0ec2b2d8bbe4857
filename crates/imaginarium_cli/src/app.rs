//! Guarded catalog actions shared by one-shot commands and the menu.
//!
//! Every action that touches the store runs through `ExceptionShield::guard`
//! with a fixed user-facing message.

use imaginarium_core::{
    export_json, AppConfig, AppError, AppResult, BoxError, CatalogService, CategoryGroup,
    CsvItemRepository, ExceptionShield, FileResource, Item, ItemDraft, TextResource,
};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const SAVE_FAILED: &str = "Could not save item. Please try again.";
pub const DELETE_FAILED: &str = "Could not delete item. Please try again.";
pub const LOAD_FAILED: &str = "Could not load items.";
pub const SEARCH_FAILED: &str = "Search failed.";
pub const EXPORT_FAILED: &str = "Could not export JSON.";

const TREE_ROOT_LABEL: &str = "Catalog";

pub struct App {
    service: CatalogService<CsvItemRepository>,
    shield: ExceptionShield,
    export_file: PathBuf,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            service: CatalogService::new(CsvItemRepository::open(&config.data_file)),
            shield: ExceptionShield::new("imaginarium::cli"),
            export_file: config.export_file.clone(),
        }
    }

    pub fn save(&self, draft: &ItemDraft) -> AppResult<Item> {
        let item = self
            .shield
            .guard(|| self.service.upsert_item(draft), SAVE_FAILED)?;
        info!("event=item_upsert module=cli status=ok");
        Ok(item)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.shield
            .guard(|| self.service.delete_item(id), DELETE_FAILED)?;
        info!("event=item_delete module=cli status=ok");
        Ok(())
    }

    pub fn list(&self) -> AppResult<Vec<Item>> {
        self.shield
            .guard(|| Ok::<_, AppError>(self.service.find_all()), LOAD_FAILED)
    }

    pub fn search(&self, token: &str) -> AppResult<Vec<Item>> {
        self.shield
            .guard(|| self.service.search_by_token(token), SEARCH_FAILED)
    }

    pub fn tree(&self) -> AppResult<Vec<CategoryGroup>> {
        self.shield
            .guard(|| Ok::<_, AppError>(self.service.category_tree()), LOAD_FAILED)
    }

    /// Writes the JSON export and returns the destination path.
    pub fn export(&self, output: Option<&Path>) -> AppResult<PathBuf> {
        let destination = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.export_file.clone());
        self.shield.guard(
            || -> Result<(), BoxError> {
                let json = export_json(self.service.repository())?;
                FileResource::new(&destination).write_utf8(&json)?;
                Ok(())
            },
            EXPORT_FAILED,
        )?;
        info!("event=catalog_export module=cli status=ok");
        Ok(destination)
    }
}

pub fn write_items(out: &mut impl Write, items: &[Item]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "(no items)");
    }
    for item in items {
        writeln!(
            out,
            "- [{}] {} | {} | {}",
            item.id(),
            item.name(),
            item.category(),
            item.description()
        )?;
    }
    Ok(())
}

pub fn write_tree(out: &mut impl Write, groups: &[CategoryGroup]) -> io::Result<()> {
    if groups.is_empty() {
        return writeln!(out, "(no items)");
    }
    writeln!(out, "Category: {TREE_ROOT_LABEL}")?;
    for group in groups {
        writeln!(out, "  Category: {}", group.name)?;
        for item in &group.items {
            writeln!(out, "    Item: {} ({})", item.name(), item.id())?;
        }
    }
    Ok(())
}

/// Prints an application error the way end users should see it.
pub fn report_error(err_out: &mut impl Write, err: &AppError) -> io::Result<()> {
    match err {
        AppError::Validation(_) => writeln!(err_out, "Validation error: {err}"),
        _ => writeln!(err_out, "{err}"),
    }
}
