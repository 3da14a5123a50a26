// Single-file bundles of a whole catalog (gzip-compressed JSON)
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use menurec_core::{Catalog, ItemIndex, MenuRecord, MenuTable, PopularItem, PopularityRanking, SimilarityMatrix};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::artifacts::{describe_file, read_json_from, write_json, ArtifactDescription};

const BUNDLE_EXT: &str = "bundle";

/// Everything needed to rebuild a [`Catalog`]
#[derive(Debug, Serialize, Deserialize)]
pub struct BundleData {
    pub name: String,
    pub item_index: ItemIndex,
    pub similarity_scores: SimilarityMatrix,
    pub menu: Vec<MenuRecord>,
    #[serde(default)]
    pub popular: Vec<PopularItem>,
    pub created_at: u64,
}

impl BundleData {
    pub fn from_catalog(name: &str, catalog: &Catalog) -> Self {
        Self {
            name: name.to_string(),
            item_index: catalog.index().clone(),
            similarity_scores: catalog.matrix().clone(),
            menu: catalog.menu().records().to_vec(),
            popular: catalog.popular().items().to_vec(),
            created_at: Utc::now().timestamp().max(0) as u64,
        }
    }

    pub fn into_catalog(self) -> Result<Catalog> {
        Catalog::new(
            self.item_index,
            self.similarity_scores,
            MenuTable::new(self.menu),
            PopularityRanking::new(self.popular),
        )
        .map_err(|e| anyhow!("Invalid bundle '{}': {}", self.name, e))
    }
}

pub struct BundleManager {
    bundle_dir: PathBuf,
}

impl BundleManager {
    pub fn new<P: AsRef<Path>>(bundle_dir: P) -> Result<Self> {
        let bundle_dir = bundle_dir.as_ref().to_path_buf();
        fs::create_dir_all(&bundle_dir)?;
        Ok(Self { bundle_dir })
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    fn generate_bundle_name(name: &str) -> String {
        let now: DateTime<Utc> = Utc::now();
        format!("{}-{}.{}", name, now.format("%Y-%m-%d-%H-%M-%S"), BUNDLE_EXT)
    }

    /// Write `catalog` to a new bundle file
    pub fn create_bundle(&self, name: &str, catalog: &Catalog) -> Result<ArtifactDescription> {
        let file_name = Self::generate_bundle_name(name);
        let path = self.bundle_dir.join(&file_name);

        let data = BundleData::from_catalog(name, catalog);
        write_json(&path, &data, true)?;
        info!("Created bundle {:?} ({} items)", path, data.item_index.len());

        describe_file(&path)
    }

    /// All bundles in the directory, newest first
    pub fn list_bundles(&self) -> Result<Vec<ArtifactDescription>> {
        let mut bundles = Vec::new();
        for entry in fs::read_dir(&self.bundle_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some(BUNDLE_EXT) {
                bundles.push(describe_file(&path)?);
            }
        }
        // names embed the creation timestamp
        bundles.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(bundles)
    }

    pub fn load_bundle(&self, file_name: &str) -> Result<Catalog> {
        let path = self.bundle_dir.join(file_name);
        if !path.exists() {
            return Err(anyhow!("Bundle '{}' not found in {:?}", file_name, self.bundle_dir));
        }
        load_bundle_from_path(&path)
    }

    pub fn delete_bundle(&self, file_name: &str) -> Result<bool> {
        let path = self.bundle_dir.join(file_name);
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Load a bundle file from anywhere on disk
pub fn load_bundle_from_path(path: &Path) -> Result<Catalog> {
    // bundles are always gzip-compressed, whatever the extension
    let data: BundleData = read_json_from(path, true)?;

    info!("Loaded bundle '{}' from {:?}", data.name, path);
    data.into_catalog()
}
