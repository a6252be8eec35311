//! High-level, ergonomic library API: crop a specimen photo to a file or an
//! in-memory buffer, plus batch helpers for directories. Prefer these
//! entrypoints over the low-level processing modules when embedding.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::params::CropParams;
use crate::core::processing::geometry::BBox;
use crate::core::processing::pipeline::crop;
use crate::core::processing::resize::OUTPUT_SIZE;
use crate::core::processing::save::save_cropped_image;
use crate::error::Result;
use crate::io::reader::read_bgr_image;
use crate::io::writers::metadata::CropMetadata;
use crate::types::Regime;

/// File extensions accepted as specimen photographs.
const SUPPORTED_EXTENSIONS: &[&str] = &["bmp", "gif", "jpg", "jpeg", "png"];
/// Stem suffix marking files this tool produced; skipped on traversal.
const CROPPED_SUFFIX: &str = "-cropped";

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub width: usize,
    pub height: usize,
    /// Interleaved BGR samples of the final square crop
    pub bgr: Vec<u8>,
    pub regime: Regime,
    /// Detection box at full source resolution
    pub detected: BBox,
    /// Crop rectangle applied to the source
    pub crop_box: BBox,
}

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Crop a specimen photograph to an in-memory buffer (no disk output).
pub fn crop_image_to_buffer(input: &Path, params: &CropParams) -> Result<CroppedImage> {
    let image = read_bgr_image(input)?;
    let outcome = crop(&image, params)?;
    Ok(CroppedImage {
        width: outcome.image.width,
        height: outcome.image.height,
        bgr: outcome.image.data,
        regime: outcome.regime,
        detected: outcome.detected,
        crop_box: outcome.crop_box,
    })
}

/// Crop a specimen photograph and write the result as JPEG, with a JSON
/// sidecar when `params.sidecar` is set.
pub fn crop_image_to_path(input: &Path, output: &Path, params: &CropParams) -> Result<()> {
    let image = read_bgr_image(input)?;
    let outcome = crop(&image, params)?;

    let metadata = params.sidecar.then(|| CropMetadata {
        source: input.display().to_string(),
        regime: outcome.regime,
        detected_box: outcome.detected,
        crop_box: outcome.crop_box,
        radius: params.radius,
        padding: params.padding,
        output_width: OUTPUT_SIZE,
        output_height: OUTPUT_SIZE,
        processed_at: Utc::now(),
    });

    save_cropped_image(&outcome.image, output, metadata.as_ref())
}

/// Default output path: `<stem>-cropped.jpg` next to the input.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{CROPPED_SUFFIX}.jpg"))
}

fn is_specimen_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
        return false;
    };
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return false;
    }
    // Never re-crop our own outputs.
    !path
        .file_stem()
        .map(|s| s.to_string_lossy().ends_with(CROPPED_SUFFIX))
        .unwrap_or(false)
}

/// List the specimen photographs in a directory, sorted for deterministic
/// batch order. Files this tool produced are excluded.
pub fn iterate_specimen_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_specimen_image(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Crop every specimen photograph in `input_dir`. Outputs land in
/// `output_dir` when given, otherwise next to each input. The optional
/// `cancel` flag is checked between images only; a crop already in
/// progress always completes.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: Option<&Path>,
    params: &CropParams,
    continue_on_error: bool,
    cancel: Option<&AtomicBool>,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for path in entries {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                info!("Batch processing cancelled");
                break;
            }
        }

        if !is_specimen_image(&path) {
            debug!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
            continue;
        }

        let output_path = match output_dir {
            Some(dir) => dir.join(
                derive_output_path(&path)
                    .file_name()
                    .expect("derived output path has a file name")
                    .to_os_string(),
            ),
            None => derive_output_path(&path),
        };

        info!("Processing: {:?} -> {:?}", path, output_path);
        match crop_image_to_path(&path, &output_path, params) {
            Ok(()) => {
                info!("Successfully processed: {:?}", path);
                report.processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                // Detection failures are deterministic per-image outcomes;
                // only environment errors (I/O, decode) can abort the batch.
                if !continue_on_error && !e.is_detection_failure() {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn output_path_gains_cropped_suffix() {
        assert_eq!(
            derive_output_path(Path::new("/specimens/moth-001.png")),
            PathBuf::from("/specimens/moth-001-cropped.jpg")
        );
        assert_eq!(
            derive_output_path(Path::new("plate.JPG")),
            PathBuf::from("plate-cropped.jpg")
        );
    }

    #[test]
    fn iteration_filters_extensions_and_own_outputs() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "a.jpg",
            "b.PNG",
            "c.gif",
            "d.txt",
            "e-cropped.jpg",
            "f.jpeg",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let files = iterate_specimen_images(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.jpg", "b.PNG", "c.gif", "f.jpeg"]);
    }

    #[test]
    fn cancelled_batch_processes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"not a real jpeg").unwrap();

        let cancel = AtomicBool::new(true);
        let report = process_directory_to_path(
            dir.path(),
            None,
            &CropParams::default(),
            true,
            Some(&cancel),
        )
        .unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(report.errors, 0);
    }

    #[test]
    fn detection_failures_never_abort_a_batch() {
        // A blank white image decodes fine but yields NoObjectFound; even
        // with continue_on_error off the batch moves past it.
        let dir = tempfile::tempdir().unwrap();
        let blank = image::RgbImage::from_pixel(100, 100, image::Rgb([255, 255, 255]));
        blank.save(dir.path().join("blank.png")).unwrap();

        let report =
            process_directory_to_path(dir.path(), None, &CropParams::default(), false, None)
                .unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn batch_counts_undecodable_files_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.jpg"), b"not a real jpeg").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let report =
            process_directory_to_path(dir.path(), None, &CropParams::default(), true, None)
                .unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors, 1);

        // Without continue_on_error the first failure propagates.
        let result =
            process_directory_to_path(dir.path(), None, &CropParams::default(), false, None);
        assert!(result.is_err());
    }
}
