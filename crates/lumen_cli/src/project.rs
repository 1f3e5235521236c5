//! JSON project files: camera, render settings and scene in one document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_core::SceneDescription;
use lumen_renderer::{CameraSettings, RenderSettings};
use serde::{Deserialize, Serialize};

/// Everything needed to render an image. Missing sections use defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub camera: CameraSettings,
    pub render: RenderSettings,
    pub scene: SceneDescription,
}

impl Project {
    /// Read and parse a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read project file {}", path.display()))?;
        let project = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse project file {}", path.display()))?;
        Ok(project)
    }
}
