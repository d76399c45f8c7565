use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{CodecLimits, WireLimits};
use glob::Pattern;
use npcsync_tools::{
    decode_bytes, encode_event_json, format_decode_pretty, format_inspect_report, inspect_bytes,
    Framing,
};

#[derive(Parser)]
#[command(
    name = "npcsync-tools",
    version,
    about = "npcsync encoding, decoding and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON event description.
    Encode {
        /// Path to the event JSON.
        event_file: PathBuf,
        /// Write raw bytes here instead of printing hex.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Wrap the payload in its packet frame.
        #[arg(long)]
        frame: bool,
    },
    /// Decode payload bytes into structured JSON.
    Decode {
        /// Path to the payload or frame bytes.
        packet_file: PathBuf,
        /// Input carries the packet frame.
        #[arg(long)]
        frame: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Inspect payload structure and sizes.
    Inspect {
        /// Path to the bytes, or a directory of captures.
        packet_path: PathBuf,
        /// Inputs carry the packet frame.
        #[arg(long)]
        frame: bool,
        /// Print reports as JSON.
        #[arg(long)]
        json: bool,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected captures.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected captures (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

const fn framing(frame: bool) -> Framing {
    if frame {
        Framing::Frame
    } else {
        Framing::Payload
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            event_file,
            out,
            frame,
        } => {
            let json = fs::read_to_string(&event_file)
                .with_context(|| format!("read event {}", event_file.display()))?;
            let bytes = encode_event_json(&json, framing(frame))?;
            tracing::info!(bytes = bytes.len(), framed = frame, "encoded event");
            match out {
                Some(path) => fs::write(&path, &bytes)
                    .with_context(|| format!("write {}", path.display()))?,
                None => println!("{}", hex::encode(&bytes)),
            }
        }
        Command::Decode {
            packet_file,
            frame,
            format,
        } => {
            let bytes = fs::read(&packet_file)
                .with_context(|| format!("read packet {}", packet_file.display()))?;
            let decoded = decode_bytes(
                &bytes,
                framing(frame),
                &WireLimits::default(),
                &CodecLimits::default(),
            )?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&decoded).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&decoded));
                }
            }
        }
        Command::Inspect {
            packet_path,
            frame,
            json,
            glob,
            sort,
            limit,
        } => {
            if packet_path.is_dir() {
                let entries = collect_packet_entries(&packet_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    inspect_file(&entry.path, framing(frame), json)?;
                }
            } else {
                inspect_file(&packet_path, framing(frame), json)?;
            }
        }
    }
    Ok(())
}

fn inspect_file(path: &Path, framing: Framing, json: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read packet {}", path.display()))?;
    let report = inspect_bytes(
        &bytes,
        framing,
        &WireLimits::default(),
        &CodecLimits::default(),
    )
    .with_context(|| format!("inspect {}", path.display()))?;
    if json {
        let json = serde_json::to_string_pretty(&report).context("serialize json")?;
        println!("{json}");
    } else {
        print!("{}", format_inspect_report(&report));
    }
    Ok(())
}

struct PacketEntry {
    path: PathBuf,
    size: u64,
}

fn collect_packet_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PacketEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(PacketEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<PacketEntry>,
    sort: Option<InspectSort>,
) -> Vec<PacketEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => entries.sort_by(|a, b| a.path.cmp(&b.path)),
    }
    entries
}
