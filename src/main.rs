use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use tx_fingerprint::core::font::load_label_font;
use tx_fingerprint::core::genesis::GENESIS_TX_HEX;
use tx_fingerprint::core::hash::{Txid, compute_txid};
use tx_fingerprint::core::layout::RenderConfig;
use tx_fingerprint::core::render::render_to_file;

#[derive(Parser, Debug)]
#[command(name = "tx-fingerprint", version)]
#[command(about = "Render a raw transaction as a color-grid fingerprint image.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct TxInput {
    /// Raw transaction hex (defaults to the embedded genesis transaction)
    #[arg(long, conflicts_with = "hex_file")]
    hex: Option<String>,

    /// File containing the raw transaction hex
    #[arg(long)]
    hex_file: Option<PathBuf>,
}

impl TxInput {
    fn read(&self) -> anyhow::Result<String> {
        match (&self.hex, &self.hex_file) {
            (Some(hex), _) => Ok(hex.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            (None, None) => Ok(GENESIS_TX_HEX.to_string()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the transaction identifier
    Txid {
        #[command(flatten)]
        input: TxInput,
    },

    /// Render the fingerprint image
    Render {
        #[command(flatten)]
        input: TxInput,

        /// Precomputed 64-hex-char identifier for the label, computed when
        /// omitted. Shown in lowercase whatever case is passed.
        #[arg(long)]
        txid: Option<Txid>,

        /// Output image path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum image width in pixels
        #[arg(long, default_value_t = RenderConfig::default().width)]
        width: u32,

        /// Maximum image height in pixels
        #[arg(long, default_value_t = RenderConfig::default().height)]
        height: u32,

        /// Margin around the grid in pixels
        #[arg(long, default_value_t = RenderConfig::default().margin)]
        margin: u32,

        /// Label font size to start shrinking from
        #[arg(long, default_value_t = RenderConfig::default().font_size)]
        font_size: u32,

        /// TrueType font for the label
        #[arg(long)]
        font: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Txid { input } => {
            let txid = compute_txid(&input.read()?)?;
            println!("{txid}");
        }
        Commands::Render {
            input,
            txid,
            output,
            width,
            height,
            margin,
            font_size,
            font,
            json,
        } => {
            let tx_hex = input.read()?;
            let output = output.unwrap_or_else(RenderConfig::default_output_path);
            let config = RenderConfig {
                width,
                height,
                margin,
                font_size,
            };
            let renderer = load_label_font(font.as_deref());

            let summary = render_to_file(&tx_hex, txid, &output, &config, renderer.as_ref())
                .with_context(|| format!("rendering {}", output.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Image saved: {}", summary.output.display());
                println!("TXID: {}", summary.txid);
                println!(
                    "Grid: {d} x {d}, Squares: {}, Square Size: {}px",
                    summary.squares,
                    summary.square_size,
                    d = summary.grid_dim
                );
            }
        }
    }

    Ok(())
}
