//! Starter templates, LLM prompts and `init` project scaffolding.

use anyhow::{anyhow, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub const TEMPLATE_NAMES: [&str; 3] = ["basic", "minimal", "dark"];

const BASIC: &str = include_str!("../templates/basic.html");
const MINIMAL: &str = include_str!("../templates/minimal.html");
const DARK: &str = include_str!("../templates/dark.html");
const SAMPLE: &str = include_str!("../templates/sample.html");

const PROMPTS_EN: &str = include_str!("../prompts/PROMPTS.md");
const PROMPTS_JA: &str = include_str!("../prompts/PROMPTS.ja.md");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLanguage {
    #[default]
    English,
    Japanese,
}

impl PromptLanguage {
    fn file_name(self) -> &'static str {
        match self {
            PromptLanguage::English => "PROMPTS.md",
            PromptLanguage::Japanese => "PROMPTS.ja.md",
        }
    }
}

pub fn template(name: &str) -> Option<&'static str> {
    match name {
        "basic" => Some(BASIC),
        "minimal" => Some(MINIMAL),
        "dark" => Some(DARK),
        _ => None,
    }
}

pub fn prompts(language: PromptLanguage) -> &'static str {
    match language {
        PromptLanguage::English => PROMPTS_EN,
        PromptLanguage::Japanese => PROMPTS_JA,
    }
}

/// Creates a new slides project at `dir`:
///
/// ```text
/// dir/
///   sample.html
///   .gitignore
///   templates/{basic,minimal,dark}.html
///   prompts/PROMPTS.md, PROMPTS.ja.md
/// ```
///
/// Refuses to touch an existing directory.
pub async fn init_project(dir: &Path) -> Result<()> {
    if fs::try_exists(dir).await.unwrap_or(false) {
        return Err(anyhow!("Directory \"{}\" already exists", dir.display()));
    }

    let templates_dir = dir.join("templates");
    let prompts_dir = dir.join("prompts");
    fs::create_dir_all(&templates_dir)
        .await
        .map_err(|e| anyhow!("Failed to create {}: {}", templates_dir.display(), e))?;
    fs::create_dir_all(&prompts_dir)
        .await
        .map_err(|e| anyhow!("Failed to create {}: {}", prompts_dir.display(), e))?;

    for name in TEMPLATE_NAMES {
        let path = templates_dir.join(format!("{}.html", name));
        let content = template(name).ok_or_else(|| anyhow!("Unknown template: {}", name))?;
        write(&path, content).await?;
    }
    for language in [PromptLanguage::English, PromptLanguage::Japanese] {
        write(&prompts_dir.join(language.file_name()), prompts(language)).await?;
    }

    write(&dir.join("sample.html"), SAMPLE).await?;
    write(&dir.join(".gitignore"), "*.pdf\n").await?;

    Ok(())
}

async fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}
