use chrono::{DateTime, Utc};
use menurec_core::{Catalog, Error, RecommenderConfig, Result};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use crate::artifacts::{describe_file, ArtifactDescription, ArtifactStore};
use crate::bundle::{load_bundle_from_path, BundleManager};

/// Where the catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A models directory holding the individual artifacts
    Directory(PathBuf),
    /// A single bundle file
    Bundle(PathBuf),
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Directory(p) => write!(f, "directory:{}", p.display()),
            ModelSource::Bundle(p) => write!(f, "bundle:{}", p.display()),
        }
    }
}

/// Summary of the currently loaded catalog
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub source: String,
    pub item_count: usize,
    pub menu_rows: usize,
    pub popular_items: usize,
    pub loaded_at: String,
    pub artifacts: Vec<ArtifactDescription>,
}

/// Holds the loaded catalog for the lifetime of the process.
///
/// Readers get an `Arc<Catalog>` and keep it for as long as they need it; a
/// reload swaps in a new catalog without disturbing them.
pub struct ModelManager {
    source: ModelSource,
    config: RecommenderConfig,
    /// The catalog and the time it was loaded, swapped together
    loaded: RwLock<(Arc<Catalog>, DateTime<Utc>)>,
}

impl ModelManager {
    /// Load the catalog from `source`
    pub fn new(source: ModelSource, config: RecommenderConfig) -> Result<Self> {
        let catalog = Self::load(&source, &config)?;
        Ok(Self {
            source,
            config,
            loaded: RwLock::new((Arc::new(catalog), Utc::now())),
        })
    }

    /// Shorthand for loading from a models directory
    pub fn from_dir<P: AsRef<Path>>(models_dir: P, config: RecommenderConfig) -> Result<Self> {
        Self::new(ModelSource::Directory(models_dir.as_ref().to_path_buf()), config)
    }

    /// Wrap an already built catalog; [`ModelManager::reload`] still reads
    /// from `source`.
    pub fn with_catalog(source: ModelSource, catalog: Catalog) -> Self {
        let config = catalog.config().clone();
        Self {
            source,
            config,
            loaded: RwLock::new((Arc::new(catalog), Utc::now())),
        }
    }

    fn load(source: &ModelSource, config: &RecommenderConfig) -> Result<Catalog> {
        info!("Loading models from {}", source);
        let catalog = match source {
            ModelSource::Directory(dir) => ArtifactStore::new(dir).load_catalog(),
            ModelSource::Bundle(path) => load_bundle_from_path(path),
        }
        .map_err(|e| Error::Storage(format!("{:#}", e)))?;

        info!("Catalog ready: {} items", catalog.item_count());
        Ok(catalog.with_config(config.clone()))
    }

    #[inline]
    pub fn catalog(&self) -> Arc<Catalog> {
        self.loaded.read().0.clone()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded.read().1
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Re-read the artifacts. On failure the current catalog stays in place.
    pub fn reload(&self) -> Result<Arc<Catalog>> {
        match Self::load(&self.source, &self.config) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                *self.loaded.write() = (catalog.clone(), Utc::now());
                Ok(catalog)
            }
            Err(e) => {
                warn!("Reload from {} failed, keeping current catalog: {}", self.source, e);
                Err(e)
            }
        }
    }

    pub fn info(&self) -> Result<ModelInfo> {
        let (catalog, loaded_at) = {
            let loaded = self.loaded.read();
            (loaded.0.clone(), loaded.1)
        };
        let artifacts = match &self.source {
            ModelSource::Directory(dir) => ArtifactStore::new(dir).describe(),
            ModelSource::Bundle(path) => describe_file(path).map(|d| vec![d]),
        }
        .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(ModelInfo {
            source: self.source.to_string(),
            item_count: catalog.item_count(),
            menu_rows: catalog.menu().len(),
            popular_items: catalog.popular().len(),
            loaded_at: loaded_at.to_rfc3339(),
            artifacts,
        })
    }

    /// Write the current catalog to a bundle in `bundle_dir`
    pub fn create_bundle<P: AsRef<Path>>(&self, bundle_dir: P, name: &str) -> Result<ArtifactDescription> {
        let bundles = BundleManager::new(bundle_dir)
            .map_err(|e| Error::Storage(e.to_string()))?;
        bundles
            .create_bundle(name, &self.catalog())
            .map_err(|e| Error::Storage(e.to_string()))
    }
}
