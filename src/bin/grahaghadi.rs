//! Grahaghadi command line tool
//!
//! Prints sidereal planetary positions and the panchang for a moment, or
//! describes the segments of a JPL SPK kernel.
//!
//! Usage:
//!   grahaghadi positions --date 2024-03-15 --time 06:45
//!   grahaghadi positions --now --kernel de440s.bsp --json
//!   grahaghadi kernel de440s.bsp

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::debug;

use grahaghadi::coordinates::Dms;
use grahaghadi::jplephem::{calendar, names, SPK};
use grahaghadi::{CivilTime, Config, Snapshot, SiderealCalculator};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sidereal planetary positions, nakshatras and panchang",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute positions for a date and time
    Positions(PositionsArgs),
    /// Describe the segments of an SPK kernel
    Kernel(KernelArgs),
}

#[derive(Args, Debug)]
struct PositionsArgs {
    /// Civil date, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Civil time, HH:MM or HH:MM:SS (defaults to midnight with --date, else now)
    #[arg(short, long)]
    time: Option<String>,

    /// Use the current system time
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["date", "time"])]
    now: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JPL SPK kernel (.bsp); the analytic ephemeris is used without one
    #[arg(short, long)]
    kernel: Option<PathBuf>,

    /// Ayanamsha system (lahiri, true_lahiri, kp, raman, fagan_bradley, yukteshwar, jn_bhasin)
    #[arg(short, long)]
    ayanamsha: Option<String>,

    /// Lunar node convention (mean or true)
    #[arg(short, long)]
    node: Option<String>,

    /// Civil zone offset from UTC in minutes (330 for IST)
    #[arg(long, allow_hyphen_values = true)]
    offset_minutes: Option<i32>,

    /// Print the snapshot as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct KernelArgs {
    /// Kernel file to describe
    filename: PathBuf,

    /// Also print the kernel's comment area
    #[arg(short, long, action = ArgAction::SetTrue)]
    comments: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Config file (if any) with command line overrides applied
fn resolve_config(args: &PositionsArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(kernel) = &args.kernel {
        config.kernel = Some(kernel.clone());
    }
    if let Some(name) = &args.ayanamsha {
        config.ayanamsha = name.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(name) = &args.node {
        config.node = name.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(minutes) = args.offset_minutes {
        config.utc_offset_minutes = minutes;
    }
    debug!("effective config: {config:?}");
    Ok(config)
}

fn resolve_time(args: &PositionsArgs, offset_minutes: i32) -> Result<CivilTime> {
    let now = CivilTime::now(offset_minutes)?;
    if args.now {
        return Ok(now);
    }
    let time = match (&args.date, &args.time) {
        (None, None) => now,
        (Some(date), time) => CivilTime::parse(date, time.as_deref(), offset_minutes)?,
        (None, Some(time)) => {
            let today = now.local().format("%Y-%m-%d").to_string();
            CivilTime::parse(&today, Some(time), offset_minutes)?
        }
    };
    Ok(time)
}

fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{}: {}", name, value);
}

fn print_snapshot(snapshot: &Snapshot) {
    print_section_header(&format!("Grahaghadi for {}", snapshot.time));
    print_named_value("Julian date (UT)", format!("{:.6}", snapshot.instant.jd_ut));
    print_named_value("Delta T", format!("{:.1} s", snapshot.instant.delta_t));
    print_named_value("Ephemeris", &snapshot.provider);
    print_named_value(
        "Ayanamsha",
        format!("{} {}", snapshot.ayanamsha_system, Dms::from_degrees(snapshot.ayanamsha)),
    );
    print_named_value("Lunar node", snapshot.node_mode);

    print_section_header("Positions");
    println!(
        "{:<3} {:<8} {:<10} {:>10} {:<22} {:>14} {:<18} {:>4} {:<8} {:>9}",
        "", "Graha", "Sanskrit", "Longitude", "Rashi", "In rashi", "Nakshatra", "Pada", "Lord", "Speed"
    );
    println!("-------------------------------------------------------");
    for p in &snapshot.positions {
        println!(
            "{:<3} {:<8} {:<10} {:>10.4} {:<22} {:>14} {:<18} {:>4} {:<8} {:>8.4}{}",
            p.graha.glyph(),
            p.graha.name(),
            p.graha.sanskrit_name(),
            p.longitude,
            p.rashi.to_string(),
            p.dms_in_rashi().to_string(),
            p.nakshatra.name(),
            p.pada,
            p.nakshatra_lord.name(),
            p.speed,
            if p.retrograde { " R" } else { "" }
        );
    }

    let panchang = &snapshot.panchang;
    print_section_header("Panchang");
    print_named_value(
        "Tithi",
        format!("{} {} ({:.1}° elongation)", panchang.tithi.number, panchang.tithi, panchang.tithi.elongation),
    );
    print_named_value("Vaar", panchang.vaar);
    print_named_value("Disha shool", panchang.disha_shool);
    print_named_value(
        "Choghadiya",
        format!(
            "{} ({})",
            panchang.choghadiya,
            if panchang.choghadiya.is_auspicious() { "auspicious" } else { "inauspicious" }
        ),
    );
}

fn run_positions(args: &PositionsArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let time = resolve_time(args, config.utc_offset_minutes)?;
    let provider = config.provider().context("opening ephemeris")?;
    let calculator = SiderealCalculator::new(provider, config.into_settings());

    let snapshot = calculator
        .snapshot(&time)
        .with_context(|| format!("computing positions for {time}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

fn display_segments(spk: &SPK) {
    if spk.segments.is_empty() {
        println!("\nNo segments found in the file.");
        return;
    }

    print_section_header(&format!("Segments ({} total)", spk.segments.len()));
    println!(
        "{:<24} {:<24} {:<5} {:<12} {:<12} {:>10}",
        "Target", "Center", "Type", "Start Date", "End Date", "Years"
    );
    println!("-------------------------------------------------------");

    let mut segments: Vec<_> = spk.segments.iter().collect();
    segments.sort_by(|a, b| a.center.cmp(&b.center).then_with(|| a.target.cmp(&b.target)));

    for segment in segments {
        println!(
            "{:<24} {:<24} {:<5} {:<12} {:<12} {:>10.1}",
            format!("{} ({})", names::target_name(segment.target).unwrap_or("Unknown"), segment.target),
            format!("{} ({})", names::target_name(segment.center).unwrap_or("Unknown"), segment.center),
            segment.data_type,
            calendar::format_date(segment.start_jd),
            calendar::format_date(segment.end_jd),
            (segment.end_jd - segment.start_jd) / 365.25
        );
    }
}

fn run_kernel(args: &KernelArgs) -> Result<()> {
    let path: &Path = &args.filename;
    let spk = SPK::open(path).with_context(|| format!("opening {}", path.display()))?;

    print_section_header("File Format");
    print_named_value("Path", path.display());
    print_named_value("ID Word", &spk.daf.locidw);
    print_named_value("Endian", format!("{:?}", spk.daf.endian));
    print_named_value("Internal name", &spk.daf.ifname);

    display_segments(&spk);

    let mut targets: Vec<i32> = spk.targets().into_iter().collect();
    targets.sort_unstable();
    print_section_header("Coverage by target");
    for target in targets {
        if let Some((start, end)) = spk.coverage(target) {
            println!(
                "  - {:<24} {} .. {}",
                names::target_name(target).unwrap_or("Unknown"),
                calendar::format_date(start),
                calendar::format_date(end)
            );
        }
    }

    if args.comments {
        let comments = spk.comments()?;
        if comments.is_empty() {
            println!("\nNo comments found in file.");
        } else {
            print_section_header("File Comments");
            println!("{}", comments);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Positions(args) => run_positions(args),
        Command::Kernel(args) => run_kernel(args),
    }
}
