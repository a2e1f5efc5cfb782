use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Builder;
use log::info;
use lwdraw_core::surface::RecordingSurface;
use lwdraw_core::symbol::{draw_symbol, SymbolOptions};
use lwdraw_core::{Color, Point};

/// Leontis-Westhof base-pair annotation tool
#[derive(Parser)]
#[command(name = "lwdraw", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Parse extended dot-bracket notation into pairs (closing order)
    Pairs {
        /// Structure, e.g. "..((..[[..))..]].."
        structure: String,
    },
    /// Parse an annotation document (`seq ...` and `cWH ...` lines)
    Document {
        /// Document file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Draw the symbol of a single base pair
    Symbol {
        /// Leontis-Westhof code, e.g. cWH or tSW
        code: String,

        /// First nucleotide center as x,y
        #[arg(long, allow_hyphen_values = true)]
        orig: Point,

        /// Second nucleotide center as x,y
        #[arg(long, allow_hyphen_values = true)]
        dest: Point,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Draw symbols for every non-canonical pair of a document
    Annotate {
        /// Document file, or "-" for stdin
        input: String,

        /// JSON array of nucleotide centers: [{"x":0,"y":0}, ...]
        #[arg(short, long)]
        positions: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(clap::Args)]
struct StyleArgs {
    /// Outline thickness
    #[arg(short, long, default_value_t = 1.0)]
    thickness: f64,

    /// Reference circle diameter
    #[arg(short, long, default_value_t = 10.0)]
    diameter: f64,

    /// Inner symbol color (#RRGGBB, #RGB, R,G,B or a name)
    #[arg(short, long, default_value = "black")]
    color: Color,

    /// Draw Sugar/WC and Sugar/Hoogsteen with a small reversed triangle
    #[arg(long)]
    inscribed_sugar: bool,
}

impl StyleArgs {
    fn options(&self) -> SymbolOptions {
        SymbolOptions {
            thickness: self.thickness,
            circle_diameter: self.diameter,
            sugar_triangle_outer: !self.inscribed_sugar,
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn run(command: Command) -> Result<String> {
    let output = match command {
        Command::Pairs { structure } => {
            let pairs = lwdraw_core::parse(&structure)?;
            info!("{} pairs", pairs.len());
            serde_json::to_string(&pairs)?
        }
        Command::Document { input } => {
            let structure = lwdraw_core::parse_document(&read_input(&input)?)?;
            info!("{} annotated pairs", structure.pairs.len());
            serde_json::to_string(&structure)?
        }
        Command::Symbol {
            code,
            orig,
            dest,
            style,
        } => {
            let classification = lwdraw_core::parse_classification(&code)?;
            if classification.is_same_edge() {
                bail!("{classification} pairs use the same edge and have no symbol");
            }
            if orig == dest {
                bail!("--orig and --dest must differ");
            }
            let mut surface = RecordingSurface::with_color(style.color);
            draw_symbol(&mut surface, orig, dest, &classification, &style.options());
            serde_json::to_string(&surface.commands)?
        }
        Command::Annotate {
            input,
            positions,
            style,
        } => {
            let structure = lwdraw_core::parse_document(&read_input(&input)?)?;
            let text = std::fs::read_to_string(&positions)
                .with_context(|| format!("failed to read {}", positions.display()))?;
            let points: Vec<Point> = serde_json::from_str(&text)
                .with_context(|| format!("bad positions in {}", positions.display()))?;
            let mut surface = RecordingSurface::with_color(style.color);
            let drawn =
                lwdraw_core::annotate(&structure, &points, &mut surface, &style.options())?;
            info!("{drawn} symbols drawn");
            serde_json::to_string(&surface.commands)?
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(cli.command)?;

    if let Some(path) = cli.output {
        std::fs::write(&path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output.as_bytes()).context("write failed")?;
        handle.write_all(b"\n").context("write failed")?;
    }
    Ok(())
}
