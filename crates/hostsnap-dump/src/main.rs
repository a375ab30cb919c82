//! hostsnap-dump - run one host metrics collection pass and print it.
//!
//! Reads `/proc` (or a replayed copy of it) plus the filesystems of the
//! given tablespaces, then prints the snapshot as text or JSON.

use std::path::PathBuf;
use std::process;

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

use hostsnap_core::collector::{Collector, CollectorTiming, FileSystem, MockFs, RealFs};
use hostsnap_core::fmt::{FmtStyle, format_bytes, format_bytes_i64, format_percent};
use hostsnap_core::model::{SystemSnapshot, Tablespace};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "hostsnap-dump",
    about = "Collect a one-shot host metrics snapshot",
    version
)]
struct Cli {
    /// Path to the proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Replay a captured copy of /proc from this directory instead of
    /// reading the live host. Tablespace capacity is not available then.
    #[arg(long, conflicts_with = "proc_path")]
    replay: Option<PathBuf>,

    /// Tablespace to measure, as NAME=PATH. Can be repeated.
    #[arg(short, long = "tablespace", value_name = "NAME=PATH", value_parser = parse_tablespace)]
    tablespaces: Vec<Tablespace>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Parses a `NAME=PATH` tablespace argument. PATH may be empty.
fn parse_tablespace(s: &str) -> Result<Tablespace, String> {
    let (name, location) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got {s:?}"))?;
    if name.is_empty() {
        return Err(format!("tablespace name is empty in {s:?}"));
    }
    Ok(Tablespace::new(name, location))
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    debug!("hostsnap-dump {} starting", env!("CARGO_PKG_VERSION"));

    match cli.replay.clone() {
        Some(dir) => match MockFs::from_snapshot(&dir) {
            Ok(fs) => {
                info!("Replaying /proc snapshot from {}", dir.display());
                run(fs, "/proc", &cli);
            }
            Err(e) => {
                error!("Cannot load snapshot from {}: {}", dir.display(), e);
                process::exit(1);
            }
        },
        None => run(RealFs::new(), &cli.proc_path, &cli),
    }
}

fn run<F: FileSystem>(fs: F, proc_path: &str, cli: &Cli) {
    let mut tablespaces = cli.tablespaces.clone();
    let mut collector = Collector::new(fs, proc_path);

    let collected_at = Utc::now();
    let snapshot = collector.collect_snapshot(&mut tablespaces);
    let timing = collector.last_timing().cloned().unwrap_or_default();

    debug!(
        "Collected {} disks, {} tablespaces in {:?}",
        snapshot.disk_stats.len(),
        tablespaces.len(),
        timing.total
    );

    if cli.json {
        let json = SnapshotJson {
            collected_at: collected_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            system: &snapshot,
            tablespaces: &tablespaces,
        };
        match serde_json::to_string_pretty(&json) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                process::exit(1);
            }
        }
    } else {
        print_snapshot(
            &snapshot,
            &tablespaces,
            &collected_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            &timing,
        );
    }
}

// ── JSON output ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SnapshotJson<'a> {
    collected_at: String,
    system: &'a SystemSnapshot,
    tablespaces: &'a [Tablespace],
}

// ── Text output ──────────────────────────────────────────────────────────────

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn print_snapshot(
    snapshot: &SystemSnapshot,
    tablespaces: &[Tablespace],
    collected_at: &str,
    timing: &CollectorTiming,
) {
    let d = FmtStyle::Detail;

    println!("Host: {} (collected {})", or_dash(&snapshot.hostname), collected_at);
    println!(
        "CPU:  {} x {}",
        snapshot.num_cores,
        or_dash(&snapshot.cpu_model)
    );
    println!("Load: {:.2}", snapshot.load_avg);

    println!("\nMemory:");
    println!("  Used      {}", format_bytes_i64(snapshot.mem_used, d));
    println!("  Free      {}", format_bytes_i64(snapshot.mem_free, d));
    println!("  Buffers   {}", format_bytes_i64(snapshot.mem_buffers, d));
    println!("  Cached    {}", format_bytes_i64(snapshot.mem_cached, d));
    println!("  Slab      {}", format_bytes_i64(snapshot.mem_slab, d));
    println!("  Swap used {}", format_bytes_i64(snapshot.swap_used, d));
    println!("  Swap free {}", format_bytes_i64(snapshot.swap_free, d));

    if !tablespaces.is_empty() {
        println!("\nTablespaces:");
        println!(
            "  {:<16} {:>10} {:>10} {:>7} {:>12} {:>12}",
            "NAME", "USED", "TOTAL", "USE%", "INODES", "INODES USED"
        );
        for ts in tablespaces {
            let u = &ts.usage;
            println!(
                "  {:<16} {:>10} {:>10} {:>7} {:>12} {:>12}",
                ts.name,
                format_bytes(u.disk_used, FmtStyle::Compact),
                format_bytes(u.disk_total, FmtStyle::Compact),
                format_percent(u.disk_used, u.disk_total),
                u.inodes_total,
                u.inodes_used
            );
        }
    }

    println!("\nDisks:");
    if snapshot.disk_stats.is_empty() {
        println!("  (none)");
    } else {
        println!(
            "  {:<12} {:>9} {:>12} {:>12} {:>12} {:>12} {:>10} {:>10}",
            "DEVICE", "MAJ:MIN", "READS", "WRITES", "SECT READ", "SECT WRIT", "DISCARDS", "FLUSHES"
        );
        for disk in &snapshot.disk_stats {
            println!(
                "  {:<12} {:>9} {:>12} {:>12} {:>12} {:>12} {:>10} {:>10}",
                disk.device_name,
                format!("{}:{}", disk.major, disk.minor),
                disk.reads_completed,
                disk.writes_completed,
                disk.sectors_read,
                disk.sectors_written,
                disk.discards_completed,
                disk.flush_completed
            );
        }
    }

    println!("\nTiming:");
    println!(
        "  tablespaces={:?} cpuinfo={:?} loadavg={:?} meminfo={:?} hostname={:?} diskstats={:?} total={:?}",
        timing.tablespaces,
        timing.cpuinfo,
        timing.loadavg,
        timing.meminfo,
        timing.hostname,
        timing.diskstats,
        timing.total
    );
}
