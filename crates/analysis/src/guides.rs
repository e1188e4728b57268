//! Study guide lookup: one PDF per skill category in a guides directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classifier::SkillCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuideError {
    #[error("no category given; expected one of Beginner, Intermediate, Professional, Expert")]
    MissingCategory,
    #[error("unknown category '{0}'; expected one of Beginner, Intermediate, Professional, Expert")]
    UnknownCategory(String),
    #[error("guide for {category} not found at {}", .path.display())]
    NotFound {
        category: SkillCategory,
        path: PathBuf,
    },
}

pub fn guide_file_name(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Beginner => "Beginners Guide.pdf",
        SkillCategory::Intermediate => "INTERMEDIATE Guide.pdf",
        SkillCategory::Professional => "Professional Guide.pdf",
        SkillCategory::Expert => "EXPERT Guide.pdf",
    }
}

/// Resolves the guide for a category name given by a client.
///
/// The name must match a category exactly. The file must exist as a regular
/// file under `dir`.
pub fn resolve_guide(dir: &Path, category: Option<&str>) -> Result<(SkillCategory, PathBuf), GuideError> {
    let name = category
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(GuideError::MissingCategory)?;
    let category: SkillCategory = name
        .parse()
        .map_err(|_| GuideError::UnknownCategory(name.to_string()))?;

    let path = dir.join(guide_file_name(category));
    if !path.is_file() {
        return Err(GuideError::NotFound { category, path });
    }
    Ok((category, path))
}

#[cfg(test)]
#[path = "guides_tests.rs"]
mod guides_tests;
