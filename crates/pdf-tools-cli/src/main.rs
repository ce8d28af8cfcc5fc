use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Log every page as it is composed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a folder of card images on printable pages
    Sheet {
        /// Folder containing the card images and nothing else
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (PDF, or the name pattern for PNG pages)
        #[arg(short, long)]
        output: PathBuf,

        /// Load options from a JSON file; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Resolution in dots per inch [default: 300]
        #[arg(long)]
        dpi: Option<u32>,

        /// Card width in inches [default: 2.5]
        #[arg(long)]
        card_width_in: Option<f64>,

        /// Card height in inches [default: 3.5]
        #[arg(long)]
        card_height_in: Option<f64>,

        /// Space around each card in inches [default: 10px at 300 dpi]
        #[arg(long)]
        margin_in: Option<f64>,

        /// Output paper size [default: a4]
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation [default: portrait]
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Output format [default: pdf]
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Resize filter [default: catmull-rom]
        #[arg(long, value_enum)]
        resample: Option<ResampleArg>,

        /// Pages composed at once [default: number of CPUs]
        #[arg(long)]
        jobs: Option<usize>,

        /// Leave out files that are not images instead of failing
        #[arg(long)]
        skip_undecodable: bool,

        /// Show statistics only, don't generate output
        #[arg(long)]
        stats_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResampleArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<PaperArg> for pdf_cardsheet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<OrientationArg> for pdf_cardsheet::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<FormatArg> for pdf_cardsheet::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Png => Self::PngSequence,
        }
    }
}

impl From<ResampleArg> for pdf_cardsheet::ResampleFilter {
    fn from(arg: ResampleArg) -> Self {
        match arg {
            ResampleArg::Nearest => Self::Nearest,
            ResampleArg::Triangle => Self::Triangle,
            ResampleArg::CatmullRom => Self::CatmullRom,
            ResampleArg::Gaussian => Self::Gaussian,
            ResampleArg::Lanczos3 => Self::Lanczos3,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Sheet {
            input,
            output,
            config,
            save_config,
            dpi,
            card_width_in,
            card_height_in,
            margin_in,
            paper,
            orientation,
            format,
            resample,
            jobs,
            skip_undecodable,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => pdf_cardsheet::SheetOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => pdf_cardsheet::SheetOptions::default(),
            };

            if let Some(dpi) = dpi {
                options.dpi = dpi;
            }
            if let Some(width) = card_width_in {
                options.card_width_in = width;
            }
            if let Some(height) = card_height_in {
                options.card_height_in = height;
            }
            if let Some(margin) = margin_in {
                options.margin_in = margin;
            }
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(format) = format {
                options.output_format = format.into();
            }
            if let Some(resample) = resample {
                options.resample = resample.into();
            }
            if let Some(jobs) = jobs {
                options.parallel_pages = jobs;
            }
            if skip_undecodable {
                options.decode_policy = pdf_cardsheet::DecodePolicy::Skip;
            }

            if let Some(path) = &save_config {
                options.save(path).await?;
                println!("Saved options → {}", path.display());
            }

            if stats_only {
                let geometry = pdf_cardsheet::Geometry::from_options(&options)?;
                let images = pdf_cardsheet::load_images(&input, options.decode_policy).await?;
                let stats = pdf_cardsheet::statistics_for(images.len(), &geometry);
                print_statistics(&stats);
                return Ok(());
            }

            let stats = pdf_cardsheet::generate_sheets(&input, &output, &options).await?;
            print_statistics(&stats);
            if stats.output_pages == 0 {
                println!("No images found in {}", input.display());
            } else {
                println!(
                    "Laid out {} images on {} pages → {}",
                    stats.source_images,
                    stats.output_pages,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn print_statistics(stats: &pdf_cardsheet::SheetStatistics) {
    println!("Sheet Statistics:");
    println!("  Source images: {}", stats.source_images);
    println!(
        "  Grid: {} x {} ({} per page)",
        stats.images_per_row, stats.rows_per_page, stats.images_per_page
    );
    println!("  Output pages: {}", stats.output_pages);
    println!("  Empty cells: {}", stats.empty_cells);
}
