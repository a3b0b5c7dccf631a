//! TOML catalog parser.
//!
//! Loads assignment catalogs from TOML files and directories, validates
//! them, and overlays them onto the built-in catalog.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{Catalog, Category, FALLBACK_CATEGORY};
use crate::model::{ClassifyRule, TestCase};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    categories: Vec<TomlCategory>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCategory {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    keywords: Option<TomlKeywords>,
    #[serde(default)]
    cases: Vec<TomlCase>,
}

#[derive(Debug, Deserialize)]
struct TomlKeywords {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    source: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlCase {
    #[serde(default)]
    input: String,
    expected: String,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    description: String,
}

fn default_weight() -> f64 {
    1.0
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut categories = Vec::new();
    let mut rules = Vec::new();

    for category in parsed.categories {
        if let Some(keywords) = category.keywords {
            // Keywords are matched lowercase; fold them once at load time.
            rules.push(ClassifyRule {
                category: category.id.clone(),
                title_keywords: keywords.title.iter().map(|k| k.to_lowercase()).collect(),
                source_keywords: keywords.source.iter().map(|k| k.to_lowercase()).collect(),
            });
        }

        let battery = category
            .cases
            .into_iter()
            .map(|c| TestCase::new(c.input, c.expected, c.weight, c.description))
            .collect();

        categories.push(Category {
            id: category.id,
            description: category.description,
            battery,
        });
    }

    Ok(Catalog::new(
        parsed.catalog.name,
        parsed.catalog.description,
        categories,
        rules,
    ))
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// Build the built-in catalog, overlaid with a custom catalog file or
/// directory when given.
pub fn load_catalog_overlay(custom: Option<&Path>) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();

    if let Some(path) = custom {
        let parsed = if path.is_dir() {
            load_catalog_directory(path)?
        } else {
            vec![parse_catalog(path)?]
        };
        for custom_catalog in parsed {
            catalog.merge(custom_catalog);
        }
    }

    Ok(catalog)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The category id (if applicable).
    pub category_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate category ids
    let mut seen_ids = std::collections::HashSet::new();
    for category in catalog.categories() {
        if !seen_ids.insert(&category.id) {
            warnings.push(ValidationWarning {
                category_id: Some(category.id.clone()),
                message: format!("duplicate category id: {}", category.id),
            });
        }
    }

    // Check for empty batteries
    for category in catalog.categories() {
        if category.battery.is_empty() {
            warnings.push(ValidationWarning {
                category_id: Some(category.id.clone()),
                message: "category has no test cases".into(),
            });
        }
    }

    // Check test case weights and expectations
    for category in catalog.categories() {
        for (index, case) in category.battery.iter().enumerate() {
            if case.weight <= 0.0 {
                warnings.push(ValidationWarning {
                    category_id: Some(category.id.clone()),
                    message: format!("case {index} has non-positive weight {}", case.weight),
                });
            }
            if case.expected_output.is_empty() {
                warnings.push(ValidationWarning {
                    category_id: Some(category.id.clone()),
                    message: format!("case {index} has an empty expected output"),
                });
            }
        }
    }

    // Check for categories no classification rule can reach. Built-in ids
    // stay reachable through the built-in rules even when a custom overlay
    // redefines them without keywords.
    let builtin = Catalog::builtin();
    for category in catalog.categories() {
        let routed = catalog.rules().iter().any(|r| r.category == category.id)
            || builtin.rules().iter().any(|r| r.category == category.id);
        if !routed && category.id != FALLBACK_CATEGORY {
            warnings.push(ValidationWarning {
                category_id: Some(category.id.clone()),
                message: "no classification keywords; category is unreachable".into(),
            });
        }
    }

    warnings
}
