use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use flowdiag::raster::{OutputFormat, encode};
use flowdiag::{Error, Scene, render_document};

/// Energy-flow diagram renderer (SVG/PNG/PDF)
#[derive(Parser, Debug)]
#[command(name = "flowdiag")]
#[command(version)]
#[command(about = "Render energy-flow scenes to SVG, PNG or PDF", long_about = None)]
struct Args {
    /// Scene file: .toml, .yaml, .yml or .json (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Padding around the diagram in pixels
    #[arg(long, default_value_t = 20.0)]
    padding: f32,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    // fail on a bad output path before doing any work
    let format = OutputFormat::from_path(&args.output)?;

    let scene = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| Error::Io {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        Scene::from_unknown(&buffer, "<stdin>")?
    } else {
        Scene::load(&args.input)?
    };

    let svg = render_document(&scene, args.padding.max(0.0));
    let data = encode(&svg, format, args.png_scale)?;

    std::fs::write(&args.output, data).map_err(|e| Error::Io {
        path: args.output.clone(),
        source: e,
    })?;
    eprintln!("{} saved to: {}", format.name(), args.output.display());

    Ok(())
}
