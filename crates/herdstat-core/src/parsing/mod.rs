pub mod dates;
pub mod normalize;
pub mod values;

use crate::error::HerdError;
use crate::model::FarmDataset;
use std::path::Path;

/// Load a farm dataset (`{ farm, animals, aiRecords, milkRecords }`) from a JSON file.
pub fn load_dataset(path: &Path) -> Result<FarmDataset, HerdError> {
    let content = std::fs::read_to_string(path).map_err(|e| HerdError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let dataset: FarmDataset =
        serde_json::from_str(&content).map_err(|e| HerdError::DatasetLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    log_loaded(&dataset);
    Ok(dataset)
}

/// Parse a farm dataset from a JSON string (no file path context).
pub fn parse_dataset_str(json: &str) -> Result<FarmDataset, HerdError> {
    let dataset: FarmDataset =
        serde_json::from_str(json).map_err(|e| HerdError::DatasetParse(e.to_string()))?;
    log_loaded(&dataset);
    Ok(dataset)
}

fn log_loaded(dataset: &FarmDataset) {
    tracing::debug!(
        farm = dataset.farm.display_name(),
        animals = dataset.animals.len(),
        ai_records = dataset.ai_records.len(),
        milk_records = dataset.milk_records.len(),
        "dataset loaded"
    );
}
