//! Project file manifest

use std::path::{Component, Path};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::DeployError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;

/// How `ProjectFile::content` is encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "base64")]
    Base64,
}

/// A single file to ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Path relative to the project root, `/` separated
    pub path: String,

    pub content: String,

    #[serde(default)]
    pub encoding: FileEncoding,
}

impl ProjectFile {
    /// Text file
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            encoding: FileEncoding::Utf8,
        }
    }

    /// Binary file, stored base64-encoded
    pub fn binary(path: impl Into<String>, data: &[u8]) -> Self {
        Self {
            path: path.into(),
            content: STANDARD.encode(data),
            encoding: FileEncoding::Base64,
        }
    }

    /// Decoded bytes
    pub fn bytes(&self) -> Result<Vec<u8>, DeployError> {
        match self.encoding {
            FileEncoding::Utf8 => Ok(self.content.as_bytes().to_vec()),
            FileEncoding::Base64 => STANDARD.decode(&self.content).map_err(|e| {
                DeployError::ValidationError(format!("Invalid base64 in '{}': {}", self.path, e))
            }),
        }
    }

    /// Content as base64, re-encoding only when stored as text
    pub fn to_base64(&self) -> String {
        match self.encoding {
            FileEncoding::Utf8 => STANDARD.encode(self.content.as_bytes()),
            FileEncoding::Base64 => self.content.clone(),
        }
    }
}

/// Ordered file set making up one deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFiles {
    pub files: Vec<ProjectFile>,
}

impl ProjectFiles {
    pub fn new(files: Vec<ProjectFile>) -> Self {
        Self { files }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reject unsafe paths and undecodable base64 content
    pub fn validate(&self) -> Result<(), DeployError> {
        for file in &self.files {
            validate_manifest_path(&file.path)?;
            file.bytes()?;
        }
        Ok(())
    }

    /// Load every file under `dir`, sorted by path
    pub async fn load(dir: &Dir) -> Result<Self, DeployError> {
        if !dir.exists().await {
            return Err(DeployError::ValidationError(format!(
                "Project directory not found: {}",
                dir.path().display()
            )));
        }

        let mut files = Vec::new();
        for path in dir.walk_files().await? {
            let relative = path.strip_prefix(dir.path()).map_err(|_| {
                DeployError::Internal(format!("{} is outside the project", path.display()))
            })?;
            let relative = manifest_path(relative)?;

            let bytes = File::new(&path).read_bytes().await?;
            let file = match String::from_utf8(bytes) {
                Ok(text) => ProjectFile::text(relative, text),
                Err(e) => ProjectFile::binary(relative, e.as_bytes()),
            };
            files.push(file);
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { files })
    }
}

/// Convert a relative filesystem path into a manifest path
fn manifest_path(path: &Path) -> Result<String, DeployError> {
    let parts: Vec<String> = path
        .components()
        .map(|c| match c {
            Component::Normal(part) => Ok(part.to_string_lossy().into_owned()),
            _ => Err(DeployError::ValidationError(format!(
                "Unsupported path in project: {}",
                path.display()
            ))),
        })
        .collect::<Result<_, _>>()?;
    Ok(parts.join("/"))
}

/// Reject manifest paths that would escape the archive root
pub fn validate_manifest_path(path: &str) -> Result<(), DeployError> {
    if path.trim().is_empty() {
        return Err(DeployError::ValidationError("Empty file path".to_string()));
    }

    if path.starts_with('/') || path.starts_with('\\') || Path::new(path).is_absolute() {
        return Err(DeployError::ValidationError(format!(
            "Absolute paths not allowed: '{}'",
            path
        )));
    }

    if path.split(&['/', '\\'][..]).any(|part| part == "..") {
        return Err(DeployError::ValidationError(format!(
            "Parent directory references (..) not allowed: '{}'",
            path
        )));
    }

    Ok(())
}
