// Loader for the precomputed model artifacts in a models directory
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use menurec_core::{Catalog, ItemIndex, MenuRecord, MenuTable, PopularItem, PopularityRanking, SimilarityMatrix};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ITEM_INDEX: &str = "item_index";
pub const SIMILARITY_SCORES: &str = "similarity_scores";
pub const MENU: &str = "menu";
pub const POPULAR: &str = "popular";

const JSON_EXT: &str = "json";
const GZIP_EXT: &str = "json.gz";

/// Description of one artifact file on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactDescription {
    pub name: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Reads (and writes) the four artifacts that make up a catalog:
///
/// - `item_index.json` - array of item keys, in matrix order
/// - `similarity_scores.json` - array of matrix rows
/// - `menu.json` - array of menu records
/// - `popular.json` - array of popular items (optional)
///
/// Any of them may be stored gzip-compressed as `<name>.json.gz`.
pub struct ArtifactStore {
    models_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Path of an artifact, preferring the plain JSON file over the gzip one
    pub fn artifact_path(&self, name: &str) -> Option<PathBuf> {
        [JSON_EXT, GZIP_EXT]
            .iter()
            .map(|ext| self.models_dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.exists())
    }

    /// Load all artifacts and assemble a catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        let index: ItemIndex = self.read_required(ITEM_INDEX)?;
        let matrix: SimilarityMatrix = self.read_required(SIMILARITY_SCORES)?;
        let menu: Vec<MenuRecord> = self.read_required(MENU)?;
        let popular: Vec<PopularItem> = self.read_optional(POPULAR)?.unwrap_or_default();

        info!(
            "Loaded artifacts from {:?}: {} items, {} menu rows, {} popular items",
            self.models_dir,
            index.len(),
            menu.len(),
            popular.len()
        );

        Catalog::new(index, matrix, MenuTable::new(menu), PopularityRanking::new(popular))
            .map_err(|e| anyhow!("Invalid artifacts in {:?}: {}", self.models_dir, e))
    }

    /// Write a catalog's data as plain or gzip-compressed JSON artifacts
    pub fn save_catalog(&self, catalog: &Catalog, compress: bool) -> Result<Vec<ArtifactDescription>> {
        fs::create_dir_all(&self.models_dir)?;
        let descriptions = vec![
            self.write_artifact(ITEM_INDEX, catalog.index(), compress)?,
            self.write_artifact(SIMILARITY_SCORES, catalog.matrix(), compress)?,
            self.write_artifact(MENU, catalog.menu().records(), compress)?,
            self.write_artifact(POPULAR, catalog.popular().items(), compress)?,
        ];
        Ok(descriptions)
    }

    /// Describe every artifact present in the models directory
    pub fn describe(&self) -> Result<Vec<ArtifactDescription>> {
        let mut descriptions = Vec::new();
        for name in [ITEM_INDEX, SIMILARITY_SCORES, MENU, POPULAR] {
            if let Some(path) = self.artifact_path(name) {
                descriptions.push(describe_file(&path)?);
            }
        }
        Ok(descriptions)
    }

    fn read_required<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.read_optional(name)?
            .ok_or_else(|| anyhow!("Artifact '{}' not found in {:?}", name, self.models_dir))
    }

    fn read_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let Some(path) = self.artifact_path(name) else {
            debug!("Artifact '{}' not present in {:?}", name, self.models_dir);
            return Ok(None);
        };

        let value = read_json(&path)
            .with_context(|| format!("Failed to read artifact {:?}", path))?;
        Ok(Some(value))
    }

    fn write_artifact<T: Serialize + ?Sized>(&self, name: &str, value: &T, compress: bool) -> Result<ArtifactDescription> {
        let ext = if compress { GZIP_EXT } else { JSON_EXT };
        let path = self.models_dir.join(format!("{}.{}", name, ext));
        write_json(&path, value, compress)?;

        // drop a stale copy in the other format so reads pick up this one
        let other_ext = if compress { JSON_EXT } else { GZIP_EXT };
        let other = self.models_dir.join(format!("{}.{}", name, other_ext));
        if other.exists() {
            fs::remove_file(&other)?;
        }

        describe_file(&path)
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Read a JSON document, transparently decompressing `.gz` files
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    read_json_from(path, is_gzip(path))
}

pub(crate) fn read_json_from<T: DeserializeOwned>(path: &Path, compressed: bool) -> Result<T> {
    let file = File::open(path)?;
    let mut json_data = Vec::new();
    if compressed {
        GzDecoder::new(BufReader::new(file)).read_to_end(&mut json_data)?;
    } else {
        BufReader::new(file).read_to_end(&mut json_data)?;
    }
    Ok(serde_json::from_slice(&json_data)?)
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, compress: bool) -> Result<()> {
    let json_data = serde_json::to_vec(value)?;
    let file = File::create(path)?;
    if compress {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(&json_data)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        writer.write_all(&json_data)?;
        writer.flush()?;
    }
    Ok(())
}

/// Size, modification time and sha256 of a file
pub(crate) fn describe_file(path: &Path) -> Result<ArtifactDescription> {
    let metadata = fs::metadata(path)?;
    let file_data = fs::read(path)?;
    let checksum = format!("{:x}", Sha256::digest(&file_data));

    let modified_time = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .and_then(|d| DateTime::<Utc>::from_timestamp(d.as_secs() as i64, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(ArtifactDescription {
        name,
        size: metadata.len(),
        modified_time,
        checksum: Some(checksum),
    })
}
