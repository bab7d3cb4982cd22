use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use asm8::{AsmConfig, Assembler};
use asm8_cli::{format_bytes, load_raw_bin, load_source, parse_u8, write_image, write_symbols, Radix};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass assembler for the asm8 instruction set", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file into a raw binary image
    Build {
        /// Input assembly file (one instruction, directive or label per line)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Output binary file
        #[arg(short, long)]
        output: PathBuf,
        /// Also write `<OUTPUT>.hex` with the image as hex text
        #[arg(long)]
        hex: bool,
        /// Write the label table as JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,
        /// Padding byte emitted by ORG (hex or dec)
        #[arg(long, default_value = "0")]
        fill: String,
    },
    /// Render an existing binary as space-separated byte values
    Dump {
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = RadixArg::Hex)]
        radix: RadixArg,
        /// Skip N bytes at start of file
        #[arg(long, default_value_t = 0usize)]
        skip: usize,
        /// Limit bytes rendered (default: to EOF after --skip)
        #[arg(long)]
        len: Option<usize>,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RadixArg {
    Hex,
    Dec,
}

impl From<RadixArg> for Radix {
    fn from(r: RadixArg) -> Self {
        match r {
            RadixArg::Hex => Radix::Hex,
            RadixArg::Dec => Radix::Dec,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().cmd {
        Command::Build {
            input,
            output,
            hex,
            symbols,
            fill,
        } => {
            let cfg = AsmConfig {
                fill: parse_u8(&fill)?,
            };
            let lines = load_source(&input)?;
            let program = Assembler::new(cfg).assemble(&lines)?;
            write_image(&output, &program.image)?;
            info!(
                output = %output.display(),
                bytes = program.image.len(),
                labels = program.symbols.len(),
                "assembled"
            );
            if hex {
                let mut path = output.into_os_string();
                path.push(".hex");
                let path = PathBuf::from(path);
                std::fs::write(&path, format_bytes(&program.image, Radix::Hex))?;
                info!(output = %path.display(), "hex listing written");
            }
            if let Some(path) = symbols {
                write_symbols(&path, &program.symbols)?;
            }
        }
        Command::Dump {
            input,
            radix,
            skip,
            len,
            out,
        } => {
            let bytes = load_raw_bin(&input, skip, len)?;
            let text = format_bytes(&bytes, radix.into());
            match out {
                Some(path) => std::fs::write(path, text)?,
                None => println!("{text}"),
            }
        }
    }

    Ok(())
}
