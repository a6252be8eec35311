use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specrop", version, about = "SPECROP CLI")]
pub struct CliArgs {
    /// Input image file (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing specimen images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode; defaults to <input>-cropped.jpg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (defaults to writing next to
    /// each input)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Flood-fill dilation radius in working-image pixels (1-10)
    #[arg(long, default_value_t = 3)]
    pub radius: u32,

    /// Padding around the detected box, as a percentage of its size (0-100)
    #[arg(long, default_value_t = 5)]
    pub padding: u32,

    /// Write a JSON sidecar with detection details next to each crop
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
