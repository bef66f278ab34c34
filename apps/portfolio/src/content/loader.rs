use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::cv::{CategoryTag, CvData};

/// Dataset compiled into the binary.
pub const BUNDLED_CV: &str = include_str!("../../data/cv.json");

#[derive(Debug, Error)]
pub enum CvDataError {
    #[error("CV data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read CV data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Experience '{role}' at '{company}' ends before it starts")]
    InvalidDateRange { company: String, role: String },

    #[error("Project #{index} has an empty title")]
    EmptyProjectTitle { index: usize },
}

/// A data-authoring problem that does not stop the page from rendering.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataWarning {
    pub skill: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct LoadedCv {
    pub data: CvData,
    pub warnings: Vec<DataWarning>,
}

/// Parses and validates a CV document.
///
/// Date ranges and project titles are hard invariants. Skills with a category
/// outside the closed set are kept but reported, and never grouped.
pub fn load_cv_data(json: &str) -> Result<LoadedCv, CvDataError> {
    let data: CvData = serde_json::from_str(json)?;

    for exp in &data.experiences {
        if let Some(end) = exp.date_end {
            if end < exp.date_start {
                return Err(CvDataError::InvalidDateRange {
                    company: exp.company.clone(),
                    role: exp.role.clone(),
                });
            }
        }
    }

    if let Some(index) = data.projects.iter().position(|p| p.title.trim().is_empty()) {
        return Err(CvDataError::EmptyProjectTitle { index });
    }

    let warnings: Vec<DataWarning> = data
        .skills
        .iter()
        .filter_map(|skill| match &skill.category {
            CategoryTag::Known(_) => None,
            CategoryTag::Unrecognized(label) => Some(DataWarning {
                skill: skill.name.clone(),
                category: label.clone(),
            }),
        })
        .collect();

    for w in &warnings {
        warn!(
            "Skill '{}' has unknown category '{}'; it will not be shown in any group",
            w.skill, w.category
        );
    }

    Ok(LoadedCv { data, warnings })
}

/// Loads the dataset from `path` when given, otherwise from the bundled copy.
pub fn load_from_source(path: Option<&Path>) -> Result<LoadedCv, CvDataError> {
    match path {
        Some(path) => {
            info!("Loading CV data from {}", path.display());
            let raw = std::fs::read_to_string(path).map_err(|source| CvDataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            load_cv_data(&raw)
        }
        None => load_cv_data(BUNDLED_CV),
    }
}
