use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use pathscad::{expand_output_path, init_logging, ConvertParams, Converter, Document};

/// Export SVG paths to an OpenSCAD script of extruded polygons.
#[derive(Parser, Debug)]
#[command(name = "pathscad", version, about)]
struct Cli {
    /// SVG file to convert
    input: PathBuf,

    /// Curve flattening tolerance in SVG user units; smaller values
    /// produce smoother polygons
    #[arg(long, default_value_t = 0.2)]
    smoothness: f64,

    /// Extrusion height, passed verbatim into the generated module
    /// calls (may be an OpenSCAD expression)
    #[arg(long, default_value = "5")]
    height: String,

    /// Output file; `~` expands to the home directory
    #[arg(short, long, default_value = "~/pathscad.scad")]
    output: String,

    /// Restrict conversion to the elements with these ids (repeatable);
    /// selecting a group converts everything inside it
    #[arg(long = "id")]
    ids: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("unable to read {}", cli.input.display()))?;
    let doc = Document::parse(&text)
        .with_context(|| format!("unable to parse {} as SVG", cli.input.display()))?;

    let output = expand_output_path(&cli.output);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create directory {}", parent.display()))?;
    }
    let file = fs::File::create(&output)
        .with_context(|| format!("unable to open or write to the file {}", output.display()))?;

    let params = ConvertParams {
        smoothness: cli.smoothness,
        height: cli.height,
        ids: cli.ids,
    };
    let mut converter = Converter::new(params);
    converter
        .convert(&doc, BufWriter::new(file))
        .with_context(|| format!("unable to open or write to the file {}", output.display()))?;

    info!(output = %output.display(), "conversion complete");
    Ok(())
}
