use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use truecolor::{
    RenderParams, load_dataset, load_tiff_bands, process_directory_to_path,
    render_dataset_to_path,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Config file (if any) first, then explicit flags on top
fn resolve_params(args: &CliArgs) -> Result<RenderParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading render parameters from {:?}", path);
            RenderParams::from_json_file(path)?
        }
        None => RenderParams::default(),
    };

    if let Some(format) = args.format {
        params.format = format;
    }
    if let Some(variables) = &args.variables {
        params.variables = variables.clone();
    }
    if let Some(gamma) = args.gamma {
        if !gamma.is_finite() {
            return Err(AppError::InvalidGamma { value: gamma });
        }
        params.composite.gamma = gamma;
    }
    if args.world_file {
        params.world_file = true;
    }
    if args.strict_alignment {
        params.composite.strict_alignment = true;
    }
    Ok(params)
}

fn process_single(args: &CliArgs, output: &Path, params: &RenderParams) -> Result<(), AppError> {
    let dataset = match (&args.input, &args.red, &args.green, &args.blue) {
        (_, Some(red), Some(green), Some(blue)) => load_tiff_bands(red, green, blue)?,
        (Some(input), _, _, _) => load_dataset(input)?,
        _ => {
            return Err(AppError::MissingArgument {
                arg: "--input (or --red/--green/--blue)".to_string(),
            });
        }
    };
    render_dataset_to_path(&dataset, output, params)?;
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let params = resolve_params(&args)?;
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(input_dir, output_dir, &params, args.batch)?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
        if report.errors > 0 {
            warn!("{} dataset(s) failed; see log above", report.errors);
        }
    } else {
        let output = args.output.as_deref().ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        process_single(&args, output, &params)?;
        info!("Successfully processed -> {:?}\n", output);
    }

    Ok(())
}
