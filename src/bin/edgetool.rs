use clap::{Parser, Subcommand};
use edge_vector::pipeline::{ExportStatus, PipelineConfig, filter_raster, run_pipeline};
use edge_vector::render::write_png;
use edge_vector::tools::{ensure_svg_extension, grayscale_stats, load_raster, save_gray};
use edge_vector::{Operator, Raster, Threshold};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "edgetool", version, about = "Edge detection and SVG line tracing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Source image
    #[arg(long)]
    input: PathBuf,
    /// sobel, prewitt or roberts (default: EDGE_OPERATOR or sobel)
    #[arg(long, value_parser = parse_operator)]
    operator: Option<Operator>,
    /// Black and white cutoff; values outside 0..=255 disable thresholding
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,
    /// Process rows in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Filter, threshold, trace and export segments as SVG
    Trace {
        #[command(flatten)]
        filter: FilterArgs,
        /// SVG destination (".svg" is appended when missing)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the segment preview as PNG
        #[arg(long)]
        preview: Option<PathBuf>,
        /// Write the thresholded mask as PNG
        #[arg(long)]
        mask: Option<PathBuf>,
    },
    /// Apply the gradient filter (and threshold, if given) and save the result
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
        /// Image destination
        #[arg(long)]
        output: PathBuf,
    },
    /// Print buffer statistics and segment count
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn parse_operator(s: &str) -> Result<Operator, String> {
    s.parse::<Operator>().map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Trace {
            filter,
            output,
            preview,
            mask,
        } => trace_cmd(&filter, output, preview.as_deref(), mask.as_deref()),
        Command::Filter { filter, output } => filter_cmd(&filter, &output),
        Command::Stats { filter } => stats_cmd(&filter),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn config_from(args: &FilterArgs) -> PipelineConfig {
    let mut config = PipelineConfig::from_env();
    if let Some(op) = args.operator {
        config.operator = op;
    }
    if let Some(t) = args.threshold {
        config.threshold = Threshold::from_raw(t);
    }
    config.parallel |= args.parallel;
    config
}

fn load(path: &Path) -> Option<Raster> {
    match load_raster(path) {
        Ok(raster) => Some(raster),
        Err(err) => {
            eprintln!("Failed to load image {}: {}", path.display(), err);
            None
        }
    }
}

fn trace_cmd(args: &FilterArgs, output: Option<PathBuf>, preview: Option<&Path>, mask: Option<&Path>) -> bool {
    let Some(raster) = load(&args.input) else {
        return false;
    };
    let mut config = config_from(args);
    config.output = output.as_deref().map(ensure_svg_extension);

    let result = run_pipeline(&raster, &config);
    println!(
        "Image: {} ({}x{})",
        args.input.display(),
        raster.width(),
        raster.height()
    );
    println!(
        "Operator: {}, threshold: {}",
        config.operator,
        config
            .threshold
            .value()
            .map_or_else(|| "unset".to_string(), |t| t.to_string())
    );
    println!(
        "Traced {} segments in {:.2} ms",
        result.segments.len(),
        result.timings.total().as_secs_f64() * 1000.0
    );

    let mut ok = true;
    match &result.export {
        ExportStatus::Skipped => {}
        ExportStatus::Written(path) => println!("Wrote {}", path.display()),
        ExportStatus::Failed(err) => {
            eprintln!("I/O error while saving output document: {err}");
            ok = false;
        }
    }

    if let Some(path) = preview {
        match write_png(&result.preview, path) {
            Ok(()) => println!("Wrote {}", path.display()),
            Err(err) => {
                eprintln!("Failed to write preview: {err}");
                ok = false;
            }
        }
    }

    if let Some(path) = mask {
        match save_gray(&result.mask, path) {
            Ok(()) => println!("Wrote {}", path.display()),
            Err(err) => {
                eprintln!("Failed to write mask: {err}");
                ok = false;
            }
        }
    }

    ok
}

fn filter_cmd(args: &FilterArgs, output: &Path) -> bool {
    let Some(raster) = load(&args.input) else {
        return false;
    };
    let config = config_from(args);
    let filtered = filter_raster(&raster, config.operator, config.parallel);
    let out = if config.parallel {
        config.threshold.apply_parallel(filtered)
    } else {
        config.threshold.apply(filtered)
    };

    match save_gray(&out, output) {
        Ok(()) => {
            println!("Wrote {}", output.display());
            true
        }
        Err(err) => {
            eprintln!("Failed to write {}: {}", output.display(), err);
            false
        }
    }
}

fn stats_cmd(args: &FilterArgs) -> bool {
    let Some(raster) = load(&args.input) else {
        return false;
    };
    let config = config_from(args);
    let result = run_pipeline(&raster, &config);

    println!(
        "Image: {} ({}x{})",
        args.input.display(),
        raster.width(),
        raster.height()
    );
    let filtered = grayscale_stats(&result.filtered);
    println!(
        "Filtered ({}): range {}-{}, average {}",
        config.operator, filtered.min, filtered.max, filtered.avg
    );
    let mask = grayscale_stats(&result.mask);
    println!(
        "Mask: white_ratio={:.2}% binary={}",
        mask.white_ratio * 100.0,
        result.mask.is_binary()
    );
    println!("Segments: {}", result.segments.len());
    let t = result.timings;
    println!(
        "Timings (ms): grayscale={:.2} convolution={:.2} threshold={:.2} vectorize={:.2} render={:.2}",
        t.grayscale.as_secs_f64() * 1000.0,
        t.convolution.as_secs_f64() * 1000.0,
        t.threshold.as_secs_f64() * 1000.0,
        t.vectorize.as_secs_f64() * 1000.0,
        t.render.as_secs_f64() * 1000.0
    );
    true
}
