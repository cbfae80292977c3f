//! ``src/model/dataset.rs``
//! ============================================================================
//! # Dataset: the static, read-only record set
//!
//! Loaded exactly once at startup from a JSON array (or the bundled sample)
//! and shared behind an `Arc<[Record]>`. Nothing downstream can mutate it.

use std::{collections::HashSet, path::Path, sync::Arc};

use tokio::fs as TokioFs;
use tracing::{debug, info, instrument};

use crate::{error::AppError, model::record::Record};

const SAMPLE_JSON: &str = include_str!("../../data/mock_data.json");

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Wrap already-parsed records, rejecting duplicate ids.
    pub fn new(records: Vec<Record>) -> Result<Self, AppError> {
        let mut seen = HashSet::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if !seen.insert(&record.id) {
                return Err(AppError::DuplicateId {
                    id: record.id.to_string(),
                    position,
                });
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a JSON array of records. `origin` only feeds error messages.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, AppError> {
        let records: Vec<Record> =
            serde_json::from_str(json).map_err(|e| AppError::dataset_parse(origin, e))?;
        debug!(origin, count = records.len(), "Parsed dataset");
        Self::new(records)
    }

    /// Read and parse a dataset file.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|e| AppError::dataset_io(path, e))?;

        let dataset = Self::from_json_str(&text, &path.display().to_string())?;
        info!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// The bundled mock user list.
    pub fn sample() -> Result<Self, AppError> {
        Self::from_json_str(SAMPLE_JSON, "bundled sample")
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
