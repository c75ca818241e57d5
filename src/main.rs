use bytefmt::config::Config;
use bytefmt::normalize::SizeProcessor;
use bytefmt::size::{resolve_suffix, Base, Size};
use clap::{Parser, Subcommand};
use log::debug;
use serde_json::json;

#[derive(Parser)]
#[command(name = "bytefmt")]
#[command(about = "Parse and format human-readable byte quantities", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert byte quantities to exact byte counts
    Parse {
        /// Quantities to parse (e.g., "1.25 GiB", "1024k")
        #[arg(required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,

        /// Print one JSON object per input
        #[arg(long)]
        json: bool,
    },

    /// Render a byte count as a human-readable quantity
    Format {
        /// Byte count
        #[arg(allow_hyphen_values = true)]
        bytes: i64,

        /// Scale by powers of 1024 instead of 1000
        #[arg(short, long)]
        binary: bool,

        /// Fractional digits (default: shortest exact form)
        #[arg(short, long)]
        precision: Option<usize>,

        /// Round to this many significant figures instead
        #[arg(short, long, conflicts_with = "precision")]
        significant: Option<usize>,

        /// Use the largest unit that divides the count exactly
        #[arg(short, long)]
        exact: bool,

        /// Render in this unit (e.g., "MiB")
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Replace byte quantities in a TOML file with byte counts, printed as JSON
    Normalize {
        /// TOML file path
        path: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Parse { inputs, json } => parse_inputs(&config, &inputs, json),
        Commands::Format {
            bytes,
            binary,
            precision,
            significant,
            exact,
            unit,
        } => format_bytes(
            &config,
            bytes,
            binary,
            precision,
            significant,
            exact,
            unit.as_deref(),
        ),
        Commands::Normalize { path, output } => normalize_file(&config, &path, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            debug!("loading config from {}", path);
            Config::load_from_file(path)
        }
        None => Ok(Config::empty()),
    }
}

fn parse_inputs(
    config: &Config,
    inputs: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for input in inputs {
        let size = Size::parse_with(input, &config.parse)?;

        if json {
            let object = json!({
                "input": input,
                "bytes": size.bytes(),
                "base": size.base(),
                "formatted": size,
            });
            println!("{}", serde_json::to_string(&object)?);
        } else {
            println!("{} {}", size.bytes(), size.base());
        }
    }

    Ok(())
}

fn format_bytes(
    config: &Config,
    bytes: i64,
    binary: bool,
    precision: Option<usize>,
    significant: Option<usize>,
    exact: bool,
    unit: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Flags override the config file
    let base = if binary { Base::Binary } else { config.format.base() };
    let precision = precision.or(config.format.precision);
    let size = Size::new(bytes, base);

    let formatted = if let Some(suffix) = unit {
        let unit = resolve_suffix(suffix)?;
        size.format_as(unit, precision)
    } else if exact || config.format.exact {
        size.format_exact()
    } else if let Some(figures) = significant {
        size.format_significant(figures)
    } else {
        size.format(precision)
    };

    println!("{}", formatted);
    Ok(())
}

fn normalize_file(
    config: &Config,
    path: &str,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let processor = SizeProcessor::with_options(config.parse);
    let normalized = processor.process_document(&content)?;

    let json = serde_json::to_string_pretty(&normalized)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, json)?;
        println!("Normalized {} to {}", path, output_path);
    } else {
        println!("{}", json);
    }

    Ok(())
}
