use clap::Parser;
use std::path::PathBuf;

use truecolor::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "truecolor", version, about = "truecolor CLI: three-band RGBA compositing")]
pub struct CliArgs {
    /// Input JSON dataset (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Single-band TIFF used as the red variable (instead of --input)
    #[arg(long, requires_all = ["green", "blue"], conflicts_with = "input")]
    pub red: Option<PathBuf>,

    /// Single-band TIFF used as the green variable
    #[arg(long, requires_all = ["red", "blue"])]
    pub green: Option<PathBuf>,

    /// Single-band TIFF used as the blue variable
    #[arg(long, requires_all = ["red", "green"])]
    pub blue: Option<PathBuf>,

    /// Input directory containing JSON datasets (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format (tiff or jpeg). Overrides the config file
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Dataset variables mapped to R,G,B (comma separated, exactly three)
    #[arg(long, value_delimiter = ',')]
    pub variables: Option<Vec<String>>,

    /// Fraction of each band maximum used as the normalization cap (default 0.8)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// JSON file with rendering parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a world file next to each output image
    #[arg(long, default_value_t = false)]
    pub world_file: bool,

    /// Reject bands whose coordinate ticks differ from the red band
    #[arg(long, default_value_t = false)]
    pub strict_alignment: bool,

    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue processing other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
