use anyhow::{Context, Result};
use clap::Parser;
use collector::{open_device, Block, DecodeOptions, VolumeScanner};
use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(windows)]
const DEFAULT_DEVICE: &str = r"\\.\PhysicalDrive0";
#[cfg(not(windows))]
const DEFAULT_DEVICE: &str = "/dev/sda";

#[derive(Parser)]
#[command(
    name = "ntscope",
    about = "Dump the MBR, NTFS boot sector and the first 16 MFT records of a disk",
    long_about = None,
    version,
)]
struct Cli {
    /// Raw disk device or disk image to inspect
    #[arg(value_name = "DEVICE", default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Reject boot sectors without the "NTFS    " OEM ID and records without the "FILE" signature
    #[arg(long)]
    strict: bool,

    /// Bytes per hex dump line
    #[arg(short, long, value_name = "N", default_value_t = 16)]
    width: usize,

    /// Print the decoded fields after each listing
    #[arg(short, long)]
    fields: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn emit<T: Display>(out: &mut impl Write, title: &str, block: &Block<T>, cli: &Cli) -> Result<()> {
    writeln!(out, "{} @ {:#x}", title, block.offset)?;
    writeln!(out, "{}", block.hexdump(cli.width))?;
    if cli.fields {
        writeln!(out, "{}", block.value)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();
    tracing::info!("Opening {}", cli.device.display());

    let device = open_device(&cli.device)
        .with_context(|| format!("Failed to open {}", cli.device.display()))?;
    let mut scanner = VolumeScanner::new(device, DecodeOptions { strict: cli.strict });

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let partition = scanner.read_partition_table()?;
    emit(&mut out, "MBR", &partition, &cli)?;

    let vbr = scanner.read_boot_sector(&partition)?;
    emit(&mut out, "NTFS Boot Sector", &vbr, &cli)?;

    for record in scanner.system_records(&vbr)? {
        let (file, block) = record?;
        emit(&mut out, &format!("MFT Record {}", file), &block, &cli)?;
    }

    tracing::info!("Done.");
    Ok(())
}
