use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::core::processing::geometry::BBox;
use crate::error::Result;
use crate::types::Regime;

/// Provenance record for one crop, written as a JSON sidecar next to the
/// JPEG output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropMetadata {
    pub source: String,
    pub regime: Regime,
    /// Detection box rescaled to full resolution
    pub detected_box: BBox,
    /// Final crop rectangle applied to the source
    pub crop_box: BBox,
    pub radius: u32,
    pub padding: f64,
    pub output_width: usize,
    pub output_height: usize,
    pub processed_at: DateTime<Utc>,
}

/// Write the sidecar as `<output stem>.json` and return its path.
pub fn create_jpeg_metadata_sidecar(output: &Path, metadata: &CropMetadata) -> Result<PathBuf> {
    let sidecar_path = output.with_extension("json");
    let file = File::create(&sidecar_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), metadata)?;
    Ok(sidecar_path)
}
