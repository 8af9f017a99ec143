//! # qlabel CLI
//!
//! Command-line interface for the label print service.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP service
//! PRINTER=tcp://192.0.2.10 API_KEY=secret qlabel serve
//!
//! # Print a label directly
//! qlabel print --printer tcp://192.0.2.10 "Shelf 4"
//!
//! # Render to a PNG instead of printing
//! qlabel print --png label.png "Shelf 4"
//!
//! # List supported label stocks and printer models
//! qlabel labels
//! qlabel models
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, builder::BoolishValueParser};
use std::path::PathBuf;
use tracing::info;

use qlabel::{
    QlError,
    printer::{LABELS, MODELS},
    raster::{BrotherQlConverter, ConvertOptions, Converter},
    render::{self, DEFAULT_FONT_SIZE},
    server::{
        self, ServerConfig,
        state::{DEBUG_COPY_PATH, DEFAULT_LABEL, DEFAULT_LISTEN_ADDR, DEFAULT_MODEL, DEFAULT_SIZE},
    },
    transport::{Backend, PrinterTransport, Transport},
};

/// qlabel - Brother QL label printing service
#[derive(Parser, Debug)]
#[command(name = "qlabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print service
    Serve {
        /// Address to listen on
        #[arg(long, env = "LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,

        /// Require this value in the x-api-key header
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Keep a copy of the last rendered label
        #[arg(
            long,
            env = "SAVE_LOCAL_COPY",
            default_value = "true",
            value_parser = BoolishValueParser::new(),
            action = ArgAction::Set
        )]
        save_local_copy: bool,

        /// Where the debug copy is written
        #[arg(long, env = "DEBUG_COPY_PATH", default_value = DEBUG_COPY_PATH)]
        debug_copy_path: PathBuf,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// Render a single label and print it (or save it as PNG)
    Print {
        /// Label text
        text: String,

        /// Font size in pixels
        #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
        font_size: u32,

        /// Output to PNG file instead of printing
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// List supported label stocks
    Labels,

    /// List supported printer models
    Models,
}

/// Printer and label settings shared by `serve` and `print`.
#[derive(Args, Debug)]
struct PrinterArgs {
    /// Printer destination (tcp://host[:port], or a device path)
    #[arg(long, env = "PRINTER")]
    printer: Option<String>,

    /// Printer model
    #[arg(long, env = "MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Label stock identifier
    #[arg(long, env = "LABEL", default_value = DEFAULT_LABEL)]
    label: String,

    /// Label image width in pixels
    #[arg(long, env = "LABEL_WIDTH", default_value_t = DEFAULT_SIZE.0)]
    width: u32,

    /// Label image height in pixels
    #[arg(long, env = "LABEL_HEIGHT", default_value_t = DEFAULT_SIZE.1)]
    height: u32,

    /// Font file tried before the system fonts
    #[arg(long, env = "FONT")]
    font: Option<PathBuf>,

    /// Transport backend (network or linux_kernel); guessed from the printer when omitted
    #[arg(long, env = "BACKEND")]
    backend: Option<Backend>,
}

impl PrinterArgs {
    /// Explicit backend, else guessed from the printer identifier, else network.
    fn backend(&self) -> Backend {
        self.backend
            .or_else(|| self.printer.as_deref().and_then(Backend::guess))
            .unwrap_or_default()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qlabel=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QlError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            api_key,
            save_local_copy,
            debug_copy_path,
            printer,
        } => {
            let backend = printer.backend();
            let config = ServerConfig {
                listen_addr: listen,
                printer: printer.printer,
                api_key,
                model: printer.model,
                default_label: printer.label,
                default_width: printer.width,
                default_height: printer.height,
                debug_copy_path: None,
                font_path: printer.font,
                backend,
            }
            .with_debug_copy(save_local_copy, debug_copy_path);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }

        Commands::Print {
            text,
            font_size,
            png,
            printer,
        } => {
            let canvas = render::render_label(
                &text,
                font_size,
                printer.width,
                printer.height,
                printer.font.as_deref(),
            )?;
            let png_bytes = canvas.to_png()?;

            if let Some(png_path) = png {
                std::fs::write(&png_path, &png_bytes)?;
                println!("Saved to {}", png_path.display());
                return Ok(());
            }

            let backend = printer.backend();
            let destination = printer.printer.filter(|p| !p.is_empty()).ok_or_else(|| {
                QlError::Config("No printer given (use --printer or set PRINTER)".to_string())
            })?;

            let instructions = BrotherQlConverter.convert(
                &printer.model,
                &[png_bytes.as_slice()],
                &printer.label,
                &ConvertOptions::default(),
            )?;
            PrinterTransport.send(&instructions, &destination, backend)?;
            info!(printer = %destination, label = %printer.label, "Label printed");
            println!("Printed successfully!");
        }

        Commands::Labels => {
            println!("{:<10} {:<22} {:<10} {}", "Label", "Description", "Kind", "Printable dots");
            for label in LABELS {
                println!(
                    "{:<10} {:<22} {:<10} {}x{}",
                    label.identifier,
                    label.describe(),
                    label.form_factor.as_str(),
                    label.dots_printable.0,
                    label.dots_printable.1
                );
            }
        }

        Commands::Models => {
            println!("{:<12} {:<8} {:<6} {}", "Model", "Dots", "Cut", "Compression");
            for model in MODELS {
                println!(
                    "{:<12} {:<8} {:<6} {}",
                    model.name,
                    model.pixel_width(),
                    yes_no(model.cutting),
                    yes_no(model.compression)
                );
            }
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
