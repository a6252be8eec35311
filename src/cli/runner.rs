use std::fs;

use tracing::info;

use specrop::CropParams;
use specrop::api::{crop_image_to_path, derive_output_path, process_directory_to_path};

use super::args::CliArgs;
use super::errors::AppError;

/// Radius bounds exposed on the command line.
const MIN_RADIUS: u32 = 1;
const MAX_RADIUS: u32 = 10;
const MAX_PADDING_PERCENT: u32 = 100;

fn build_params(args: &CliArgs) -> Result<CropParams, AppError> {
    if !(MIN_RADIUS..=MAX_RADIUS).contains(&args.radius) {
        return Err(AppError::InvalidRadius {
            radius: args.radius,
        });
    }
    if args.padding > MAX_PADDING_PERCENT {
        return Err(AppError::InvalidPadding {
            padding: args.padding,
        });
    }

    Ok(CropParams {
        radius: args.radius,
        padding: args.padding as f64 / 100.0,
        sidecar: args.sidecar,
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let params = build_params(&args)?;

    if let Some(input_dir) = &args.input_dir {
        if let Some(output_dir) = &args.output_dir {
            fs::create_dir_all(output_dir)?;
        }

        info!("Starting batch processing from directory: {:?}", input_dir);

        let report = process_directory_to_path(
            input_dir,
            args.output_dir.as_deref(),
            &params,
            true,
            None,
        )?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.unwrap_or_else(|| derive_output_path(&input));

        crop_image_to_path(&input, &output, &params)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}
