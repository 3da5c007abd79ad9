//! Resource bundle: the model directory loaded once at startup.
//!
//! A bundle directory holds:
//!
//! - `classifier.json`: exported random forest (required)
//! - `rules.json`: expert rule base (required)
//! - `symptoms.csv`: training data; only its header is read (optional)
//! - `reference.json`: care guidance table (optional)
//! - `manifest.json`: SHA-256 digests of the files above (optional unless
//!   required by configuration)
//!
//! # Integrity
//!
//! When a manifest is present every resource is read exactly once and its
//! digest is compared before parsing. Resources that exist on disk but are
//! not bound by the manifest are refused rather than silently trusted.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::adapters::forest::RandomForestModel;
use crate::adapters::reference::StaticReferenceTable;
use crate::domain::RuleBase;
use crate::{PhytotrustError, Result};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const RULES_FILE: &str = "rules.json";
pub const TRAINING_DATA_FILE: &str = "symptoms.csv";
pub const REFERENCE_FILE: &str = "reference.json";

/// Target column that closes the training-data header.
pub const TARGET_COLUMN: &str = "disease";

/// Manifest format version understood by this crate.
pub const MANIFEST_VERSION: u32 = 1;

/// Every file a manifest may bind, in load order.
pub const BUNDLE_FILES: [&str; 4] = [
    CLASSIFIER_FILE,
    RULES_FILE,
    TRAINING_DATA_FILE,
    REFERENCE_FILE,
];

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Digest list binding the files of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    /// File name → lowercase hex SHA-256.
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    /// Hash every bundle file present in `dir`.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable` if a present file cannot be read or if
    /// the required classifier and rule base are missing.
    pub fn generate(dir: &Path) -> Result<Self> {
        let mut files = BTreeMap::new();
        for name in BUNDLE_FILES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            let bytes = fs::read(&path)
                .map_err(|e| PhytotrustError::unavailable(name, format!("{path:?}: {e}")))?;
            files.insert(name.to_string(), sha256_hex(&bytes));
        }

        for required in [CLASSIFIER_FILE, RULES_FILE] {
            if !files.contains_key(required) {
                return Err(PhytotrustError::unavailable(
                    required,
                    format!("not found in {dir:?}"),
                ));
            }
        }

        Ok(Self {
            version: MANIFEST_VERSION,
            created_at: Utc::now(),
            files,
        })
    }

    /// Write the manifest as pretty JSON into `dir`.
    ///
    /// # Errors
    /// Returns an IO or serialization error.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        fs::write(&path, serde_json::to_vec_pretty(self)?)?;
        Ok(path)
    }
}

/// An opened model directory.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    dir: PathBuf,
    manifest: Option<Manifest>,
}

impl ResourceBundle {
    /// Open a bundle directory and read its manifest, if any.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable` if the directory does not exist, the
    /// manifest is malformed, or `require_manifest` is set and there is none.
    pub fn open(dir: impl Into<PathBuf>, require_manifest: bool) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(PhytotrustError::unavailable(
                "model directory",
                format!("{dir:?} is not a directory"),
            ));
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            let bytes = fs::read(&manifest_path)
                .map_err(|e| PhytotrustError::unavailable(MANIFEST_FILE, e))?;
            let manifest: Manifest = serde_json::from_slice(&bytes).map_err(|e| {
                PhytotrustError::unavailable(MANIFEST_FILE, format!("invalid format: {e}"))
            })?;
            if manifest.version != MANIFEST_VERSION {
                return Err(PhytotrustError::unavailable(
                    MANIFEST_FILE,
                    format!("unsupported version {}", manifest.version),
                ));
            }
            tracing::info!(
                "Verifying model bundle against manifest ({} files, created {})",
                manifest.files.len(),
                manifest.created_at
            );
            Some(manifest)
        } else if require_manifest {
            tracing::error!("Model manifest not found at {:?}", manifest_path);
            return Err(PhytotrustError::unavailable(
                MANIFEST_FILE,
                "manifest required but not found",
            ));
        } else {
            tracing::warn!("No model manifest in {:?}; resources are not verified", dir);
            None
        };

        Ok(Self { dir, manifest })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    /// Read a resource, verifying it against the manifest when one exists.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable` if the file cannot be read, is not
    /// bound by the manifest, or its digest does not match.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        let bytes =
            fs::read(&path).map_err(|e| PhytotrustError::unavailable(name, format!("{path:?}: {e}")))?;

        if let Some(manifest) = &self.manifest {
            let expected = manifest.files.get(name).ok_or_else(|| {
                PhytotrustError::unavailable(name, "file is not listed in the manifest")
            })?;
            if !sha256_hex(&bytes).eq_ignore_ascii_case(expected) {
                tracing::error!("Digest mismatch for {}", name);
                return Err(PhytotrustError::unavailable(name, "digest mismatch"));
            }
        }

        tracing::debug!("Read {} ({} bytes)", name, bytes.len());
        Ok(bytes)
    }

    fn read_text(&self, name: &str) -> Result<String> {
        String::from_utf8(self.read(name)?)
            .map_err(|e| PhytotrustError::unavailable(name, format!("not UTF-8: {e}")))
    }

    /// Load and validate the exported random forest.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable("classifier.json", ..)` on any failure.
    pub fn load_classifier(&self) -> Result<RandomForestModel> {
        let text = self.read_text(CLASSIFIER_FILE)?;
        RandomForestModel::from_json(&text).map_err(|e| PhytotrustError::unavailable(CLASSIFIER_FILE, e))
    }

    /// Load and validate the rule base.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable("rules.json", ..)` on any failure.
    pub fn load_rules(&self) -> Result<RuleBase> {
        let text = self.read_text(RULES_FILE)?;
        let rules = RuleBase::from_json(&text).map_err(|e| PhytotrustError::unavailable(RULES_FILE, e))?;
        tracing::info!("Loaded rule base ({} rules)", rules.len());
        Ok(rules)
    }

    /// Feature columns named by the training-data header, if the file exists.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable("symptoms.csv", ..)` if the header cannot
    /// be read or does not end with the target column.
    pub fn load_training_columns(&self) -> Result<Option<Vec<String>>> {
        if !self.contains(TRAINING_DATA_FILE) {
            return Ok(None);
        }

        let bytes = self.read(TRAINING_DATA_FILE)?;
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut columns = reader
            .headers()
            .map_err(|e| PhytotrustError::unavailable(TRAINING_DATA_FILE, e))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect::<Vec<_>>();

        match columns.pop() {
            Some(last) if last == TARGET_COLUMN => Ok(Some(columns)),
            Some(last) => Err(PhytotrustError::unavailable(
                TRAINING_DATA_FILE,
                format!("last column is {last:?}, expected {TARGET_COLUMN:?}"),
            )),
            None => Err(PhytotrustError::unavailable(TRAINING_DATA_FILE, "empty header")),
        }
    }

    /// Care guidance from `reference.json`, or the built-in table.
    ///
    /// # Errors
    /// Returns `ResourceUnavailable("reference.json", ..)` if the file exists
    /// but cannot be verified or parsed.
    pub fn load_reference(&self) -> Result<StaticReferenceTable> {
        if !self.contains(REFERENCE_FILE) {
            return Ok(StaticReferenceTable::builtin());
        }
        let text = self.read_text(REFERENCE_FILE)?;
        let table = StaticReferenceTable::from_json(&text)
            .map_err(|e| PhytotrustError::unavailable(REFERENCE_FILE, e))?;
        tracing::info!("Loaded reference table ({} entries)", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Classifier, ReferenceData};
    use tempfile::tempdir;

    fn copy_shipped(dir: &Path) {
        for name in [CLASSIFIER_FILE, RULES_FILE, TRAINING_DATA_FILE] {
            fs::copy(Path::new("models").join(name), dir.join(name)).expect("copy resource");
        }
    }

    #[test]
    fn test_open_without_manifest() {
        let dir = tempdir().expect("tempdir");
        copy_shipped(dir.path());

        let bundle = ResourceBundle::open(dir.path(), false).expect("open");
        assert!(bundle.manifest().is_none());
        let model = bundle.load_classifier().expect("classifier");
        assert_eq!(model.feature_names().len(), 24);
        assert!(bundle.load_rules().expect("rules").len() > 0);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().expect("tempdir");
        let err = ResourceBundle::open(dir.path().join("absent"), false).expect_err("must fail");
        assert!(matches!(err, PhytotrustError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_required_manifest_missing() {
        let dir = tempdir().expect("tempdir");
        copy_shipped(dir.path());
        assert!(ResourceBundle::open(dir.path(), true).is_err());
    }

    #[test]
    fn test_manifest_verifies_resources() {
        let dir = tempdir().expect("tempdir");
        copy_shipped(dir.path());
        let manifest = Manifest::generate(dir.path()).expect("generate");
        assert_eq!(manifest.files.len(), 3);
        manifest.write(dir.path()).expect("write");

        let bundle = ResourceBundle::open(dir.path(), true).expect("open");
        assert!(bundle.load_classifier().is_ok());
        assert!(bundle.load_rules().is_ok());
        assert_eq!(
            bundle.load_training_columns().expect("columns").map(|c| c.len()),
            Some(24)
        );
    }

    #[test]
    fn test_tampered_resource_rejected() {
        let dir = tempdir().expect("tempdir");
        copy_shipped(dir.path());
        Manifest::generate(dir.path())
            .expect("generate")
            .write(dir.path())
            .expect("write");

        let mut rules = fs::read_to_string(dir.path().join(RULES_FILE)).expect("read");
        rules = rules.replace("0.9", "0.1");
        fs::write(dir.path().join(RULES_FILE), rules).expect("tamper");

        let bundle = ResourceBundle::open(dir.path(), false).expect("open");
        let err = bundle.load_rules().expect_err("tampered rules must fail");
        assert!(err.to_string().contains("digest mismatch"));
    }

    #[test]
    fn test_unlisted_resource_rejected() {
        let dir = tempdir().expect("tempdir");
        copy_shipped(dir.path());
        Manifest::generate(dir.path())
            .expect("generate")
            .write(dir.path())
            .expect("write");
        fs::write(dir.path().join(REFERENCE_FILE), "{}").expect("write reference");

        let bundle = ResourceBundle::open(dir.path(), false).expect("open");
        assert!(bundle.load_reference().is_err());
    }

    #[test]
    fn test_training_header_needs_target_column() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(TRAINING_DATA_FILE), "a,b,label\n1,0,x\n").expect("write");
        let bundle = ResourceBundle::open(dir.path(), false).expect("open");
        assert!(bundle.load_training_columns().is_err());

        fs::write(dir.path().join(TRAINING_DATA_FILE), "a,b,disease\n1,0,x\n").expect("write");
        assert_eq!(
            bundle.load_training_columns().expect("columns"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_reference_defaults_to_builtin() {
        let dir = tempdir().expect("tempdir");
        let bundle = ResourceBundle::open(dir.path(), false).expect("open");
        assert!(bundle.load_training_columns().expect("optional").is_none());
        let table = bundle.load_reference().expect("builtin");
        assert!(!table.lookup("late-blight").is_placeholder());
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
