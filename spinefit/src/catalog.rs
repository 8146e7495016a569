//! Fixed model catalog loaded from the demo's JSON manifest.

use std::collections::HashSet;

use serde::Deserialize;

use crate::Error;

pub const CATALOG_VERSION: u32 = 1;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub name: String,
    pub skeleton: String,
    pub atlas: String,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub default_animation: Option<String>,
    /// Uniform scale applied by the runtime when loading the skeleton.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl ModelEntry {
    /// Explicit default animation, else the first listed one.
    pub fn default_animation(&self) -> Option<&str> {
        self.default_animation
            .as_deref()
            .or_else(|| self.animations.first().map(String::as_str))
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.iter().any(|a| a == name)
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RawCatalog {
    version: u32,
    #[serde(default)]
    base: Option<String>,
    models: Vec<ModelEntry>,
}

#[derive(Clone, Debug)]
pub struct ModelCatalog {
    base: Option<String>,
    models: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let raw: RawCatalog = serde_json::from_str(s).map_err(|e| Error::CatalogParse {
            message: e.to_string(),
        })?;
        if raw.version != CATALOG_VERSION {
            return Err(Error::UnsupportedCatalogVersion {
                version: raw.version,
            });
        }

        let mut seen = HashSet::new();
        for model in &raw.models {
            if !seen.insert(model.name.as_str()) {
                return Err(Error::DuplicateModel {
                    name: model.name.clone(),
                });
            }
        }

        Ok(Self {
            base: raw.base.filter(|b| !b.is_empty()),
            models: raw.models,
        })
    }

    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn get(&self, name: &str) -> Result<&ModelEntry, Error> {
        self.find(name).ok_or_else(|| Error::UnknownModel {
            name: name.to_string(),
        })
    }

    /// `requested` when present in the catalog, otherwise the first model.
    pub fn choose<'a>(&'a self, requested: Option<&str>) -> Option<&'a ModelEntry> {
        requested
            .and_then(|name| self.find(name))
            .or_else(|| self.models.first())
    }

    /// Joins `path` onto the manifest base. Absolute URLs and rooted paths pass through.
    pub fn resolve(&self, path: &str) -> String {
        let Some(base) = self.base.as_deref() else {
            return path.to_string();
        };
        if path.starts_with('/') || path.contains("://") {
            return path.to_string();
        }
        if base.ends_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
