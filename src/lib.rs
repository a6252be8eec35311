#![doc = r#"
SPECROP — a specimen locator and square-crop processor.

This crate finds a photographed specimen inside an image and produces a
tight, padded, square crop suitable for downstream cataloguing. Two
photographic regimes are handled: a specimen pinned against a uniformly
dark background (edge-contrast detection) and a specimen resting on a light
mounting sheet (smoothing plus a dilated flood fill that tolerates sheet
texture and shadows). It powers the SPECROP CLI and can be embedded in your
own Rust applications.

Quick start: crop a file to a path
----------------------------------
```rust,no_run
use std::path::Path;
use specrop::{CropParams, api::crop_image_to_path};

fn main() -> specrop::Result<()> {
    let params = CropParams {
        radius: 3,
        padding: 0.05,
        sidecar: false,
    };

    crop_image_to_path(
        Path::new("/data/moth-001.jpg"),
        Path::new("/out/moth-001-cropped.jpg"),
        &params,
    )
}
```

Process in-memory to `CroppedImage`
-----------------------------------
```rust,no_run
use std::path::Path;
use specrop::{CropParams, api::crop_image_to_buffer};

fn main() -> specrop::Result<()> {
    let cropped = crop_image_to_buffer(Path::new("/data/moth-001.jpg"), &CropParams::default())?;

    // `cropped.bgr` holds the 600x600 interleaved BGR buffer; `cropped.regime`,
    // `cropped.detected`, and `cropped.crop_box` describe the detection.
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use specrop::{CropParams, api::process_directory_to_path};

fn main() -> specrop::Result<()> {
    let report = process_directory_to_path(
        Path::new("/data/specimens"),
        Some(Path::new("/out")),
        &CropParams::default(),
        true, // continue_on_error
        None, // optional cancellation flag
    )?;

    println!(
        "processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(())
}
```

Error handling
--------------
All public functions return `specrop::Result<T>`; match on `specrop::Error`
to handle specific cases. Detection failures are typed per image:
`EmptyDetection` (no contrast on a pinned shot), `NoObjectFound` (nothing
non-white near the center of a sheet shot), and `DegenerateRegion` (the
flood fill never grew). They are deterministic for a given input and
parameters — retrying without changing `radius`/`padding` is pointless.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — detection, geometry, and pipeline primitives.
- [`io`] — raster decode and JPEG/sidecar writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::CropParams;
pub use core::processing::geometry::BBox;
pub use error::{Error, Result};
pub use types::{BgrImage, Regime};

// Core pipeline
pub use core::processing::pipeline::{CropOutcome, crop};

// Readers and writers
pub use io::reader::read_bgr_image;
pub use io::writers::metadata::{CropMetadata, create_jpeg_metadata_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, CroppedImage, crop_image_to_buffer, crop_image_to_path, derive_output_path,
    iterate_specimen_images, process_directory_to_path,
};
