//! The `gradeforge categories` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradeforge_core::parser::load_catalog_overlay;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog_overlay(catalog_path.as_deref())?;

    if catalog.description().is_empty() {
        println!("Catalog: {}", catalog.name());
    } else {
        println!("Catalog: {} ({})", catalog.name(), catalog.description());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Description", "Tests", "Total weight"]);

    for category in catalog.categories() {
        let total_weight: f64 = category.battery.iter().map(|c| c.weight).sum();
        table.add_row(vec![
            Cell::new(&category.id),
            Cell::new(&category.description),
            Cell::new(category.battery.len()),
            Cell::new(format!("{total_weight:.1}")),
        ]);
    }

    println!("{table}");
    Ok(())
}
