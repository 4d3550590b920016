//! CPU floating-point fingerprinting CLI.
//!
//! This binary provides a single entry point for all fingerprinting modes. It performs:
//! 1. **Run:** Execute the full battery (or a category subset) on one optionally pinned core.
//! 2. **Compare:** Diff two saved run records vector-by-vector with an aggregate verdict.
//! 3. **Sweep:** Run the battery on several cores concurrently and cross-compare the digests.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use fpsig_core::battery::{Category, catalog};
use fpsig_core::config::{RoundingMode, RunConfig};
use fpsig_core::report::compare;
use fpsig_core::session::{self, RunReport};

mod journal;

use journal::RunRecord;

#[derive(Parser, Debug)]
#[command(
    name = "fpsig",
    version,
    about = "Fingerprint a CPU's floating-point behaviour",
    long_about = "Runs a fixed battery of numerically sensitive operations and hashes their \
bit-exact results.\n\nTwo machines of the same microarchitecture and microcode produce the same \
fingerprint; different families diverge.\n\nExamples:\n  fpsig run --core 0 --record zen5.json\n  \
fpsig compare zen5.json xeon.json\n  fpsig sweep --cores 0,1"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// CLI-facing rounding mode names.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    /// Round to nearest, ties to even (IEEE default).
    Nearest,
    /// Round towards zero.
    Zero,
    /// Round towards negative infinity.
    Down,
    /// Round towards positive infinity.
    Up,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Nearest => Self::NearestEven,
            RoundingArg::Zero => Self::TowardZero,
            RoundingArg::Down => Self::Downward,
            RoundingArg::Up => Self::Upward,
        }
    }
}

/// CLI-facing operation category names.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    /// Elementary arithmetic at boundary operands.
    Arithmetic,
    /// Fused multiply-add chains.
    Fma,
    /// Transcendental functions.
    Transcendental,
    /// SIMD horizontal reductions.
    Reduction,
    /// Denormal and NaN-payload propagation.
    Denormal,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Arithmetic => Self::Arithmetic,
            CategoryArg::Fma => Self::FusedMultiplyAdd,
            CategoryArg::Transcendental => Self::Transcendental,
            CategoryArg::Reduction => Self::Reduction,
            CategoryArg::Denormal => Self::DenormalNan,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the battery and print the fingerprint.
    Run {
        /// Logical core to pin to. Unpinned runs are fine for a quick look
        /// but not for cross-machine comparison.
        #[arg(short, long)]
        core: Option<usize>,

        /// Consistency passes; differing results across passes flag the
        /// fingerprint unreliable.
        #[arg(long, default_value_t = 3)]
        passes: usize,

        /// Rounding mode to install for the run.
        #[arg(long, value_enum, default_value = "nearest")]
        rounding: RoundingArg,

        /// Enable flush-to-zero (denormal results become signed zero).
        #[arg(long)]
        ftz: bool,

        /// Enable denormals-are-zero (denormal operands read as zero).
        #[arg(long)]
        daz: bool,

        /// Run only these categories: prints a dump, produces no
        /// fingerprint (a fingerprint always covers the full battery).
        #[arg(long, value_enum)]
        category: Vec<CategoryArg>,

        /// Print the full per-vector dump table.
        #[arg(long)]
        dump: bool,

        /// Write the full run record to this JSON file.
        #[arg(long)]
        record: Option<PathBuf>,

        /// Append the run record to this JSONL journal.
        #[arg(long)]
        journal: Option<PathBuf>,
    },

    /// Compare two saved run records.
    Compare {
        /// Left record (from `run --record`).
        left: PathBuf,
        /// Right record.
        right: PathBuf,
    },

    /// Run the battery on several cores and cross-compare.
    Sweep {
        /// Cores to pin to, e.g. `0,1` for the two sockets of a dual-socket
        /// system.
        #[arg(long, value_delimiter = ',', required = true)]
        cores: Vec<usize>,

        /// Consistency passes per core.
        #[arg(long, default_value_t = 3)]
        passes: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            core,
            passes,
            rounding,
            ftz,
            daz,
            category,
            dump,
            record,
            journal,
        } => cmd_run(
            &RunConfig {
                rounding: rounding.into(),
                flush_to_zero: ftz,
                denormals_are_zero: daz,
                pin_core: core,
                passes,
            },
            &category,
            dump,
            record,
            journal,
        ),
        Commands::Compare { left, right } => cmd_compare(&left, &right),
        Commands::Sweep { cores, passes } => cmd_sweep(&cores, passes),
    }
}

/// Runs the battery (or a category subset) and prints the outcome.
///
/// Exit status: 0 when the battery completed with every vector `ok` or
/// `unsupported`; 1 on a trapped vector, failed pin, or incomplete run.
fn cmd_run(
    config: &RunConfig,
    categories: &[CategoryArg],
    dump: bool,
    record: Option<PathBuf>,
    journal: Option<PathBuf>,
) {
    if !categories.is_empty() {
        let selected: Vec<Category> = categories.iter().map(|&c| c.into()).collect();
        let results = session::execute_dump(config, &selected).unwrap_or_else(|e| {
            eprintln!("[!] {e}");
            process::exit(1);
        });
        let trapped = print_dump(&results);
        process::exit(i32::from(trapped));
    }

    let report = session::execute_run(config).unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        process::exit(1);
    });

    println!("fingerprint: {}", report.fingerprint);
    print_summary(&report);
    if dump {
        println!();
        let _ = print_dump(&report.run.results);
    }

    if let Some(path) = record {
        let rec = RunRecord::from_report(&report);
        if let Err(e) = journal::write_record(&path, &rec) {
            eprintln!("[!] cannot write record {}: {e}", path.display());
            process::exit(1);
        }
        println!("record written to {}", path.display());
    }
    if let Some(path) = journal {
        let rec = RunRecord::from_report(&report);
        if let Err(e) = journal::append_journal(&path, &rec) {
            eprintln!("[!] cannot append journal {}: {e}", path.display());
            process::exit(1);
        }
        println!("journal entry appended to {}", path.display());
    }

    if report.run.any_trapped() {
        process::exit(1);
    }
}

/// Prints machine context and reliability warnings for a completed run.
fn print_summary(report: &RunReport) {
    let m = &report.machine;
    println!(
        "machine: {} / {} / {} cores{}{}",
        m.arch,
        m.os,
        m.logical_cores,
        m.pinned_core
            .map_or_else(String::new, |c| format!(" / pinned core {c}")),
        m.microcode
            .as_deref()
            .map_or_else(String::new, |mc| format!(" / microcode {mc}")),
    );
    if report.run.any_unsupported() {
        println!("note: digest computed over a reduced feature set (unsupported vectors)");
    }
    if !report.run.is_deterministic() {
        println!(
            "warning: non-deterministic results on vectors {:?}; fingerprint unreliable",
            report.run.nondeterministic
        );
    }
}

/// Prints the per-vector dump table; returns true when any vector trapped.
fn print_dump(results: &[fpsig_core::battery::RawResult]) -> bool {
    println!(
        "{:>4}  {:<24} {:<12} {:<18} {}",
        "id", "name", "status", "bits", "flags"
    );
    let mut trapped = false;
    for result in results {
        let name = catalog()
            .iter()
            .find(|v| v.id == result.vector_id)
            .map_or("?", |v| v.name);
        let status = match result.status {
            fpsig_core::battery::VectorStatus::Ok => "ok",
            fpsig_core::battery::VectorStatus::Unsupported => "unsupported",
            fpsig_core::battery::VectorStatus::Trapped => {
                trapped = true;
                "trapped"
            }
        };
        println!(
            "{:>4}  {:<24} {:<12} {:#018x} {}",
            result.vector_id, name, status, result.bits, result.flags
        );
    }
    trapped
}

/// Diffs two saved records vector-by-vector.
///
/// Exit status follows diff conventions: 0 when the digests match, 1 when
/// they differ, 2 when the records cannot be compared.
fn cmd_compare(left: &PathBuf, right: &PathBuf) {
    let (l, r) = (read(left), read(right));
    let report = compare::compare(&l.to_run(), &r.to_run()).unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        process::exit(2);
    });

    println!("{} ({} on {})", l.fingerprint, l.machine.arch, l.machine.os);
    println!("{} ({} on {})", r.fingerprint, r.machine.arch, r.machine.os);
    println!();
    for vector in &report.vectors {
        if let Some((lhs, rhs)) = vector.divergence {
            let name = catalog()
                .iter()
                .find(|v| v.id == vector.vector_id)
                .map_or("?", |v| v.name);
            println!(
                "{:>4}  {:<24} {:#018x} [{}]  !=  {:#018x} [{}]",
                vector.vector_id, name, lhs.bits, lhs.flags, rhs.bits, rhs.flags
            );
        }
    }
    println!(
        "{}/{} vectors matched, digests {}",
        report.matched(),
        report.vectors.len(),
        if report.digests_equal {
            "EQUAL"
        } else {
            "DIFFER"
        }
    );
    process::exit(i32::from(!report.digests_equal));
}

/// Runs one pinned battery per core on independent threads and compares
/// every core's digest against the first.
///
/// Exit status: 0 when every run completed cleanly, 1 otherwise. Matching
/// digests across cores is a *finding*, not a failure; both sockets of a
/// dual-socket system agreeing is the expected outcome.
fn cmd_sweep(cores: &[usize], passes: usize) {
    let handles: Vec<_> = cores
        .iter()
        .map(|&core| {
            let config = RunConfig {
                pin_core: Some(core),
                passes,
                ..RunConfig::default()
            };
            std::thread::spawn(move || (core, session::execute_run(&config)))
        })
        .collect();

    let mut reports = Vec::new();
    let mut failed = false;
    for handle in handles {
        match handle.join() {
            Ok((core, Ok(report))) => {
                println!("core {core}: {}", report.fingerprint);
                if report.run.any_trapped() {
                    failed = true;
                }
                reports.push((core, report));
            }
            Ok((core, Err(e))) => {
                eprintln!("[!] core {core}: {e}");
                failed = true;
            }
            Err(_) => {
                eprintln!("[!] worker thread panicked");
                failed = true;
            }
        }
    }

    if let Some((first_core, first)) = reports.first() {
        for (core, report) in &reports[1..] {
            let verdict = if report.fingerprint == first.fingerprint {
                "identical"
            } else {
                "DIVERGES"
            };
            println!("core {core} vs core {first_core}: {verdict}");
        }
    }
    process::exit(i32::from(failed));
}

/// Reads a record or exits with status 2.
fn read(path: &PathBuf) -> RunRecord {
    journal::read_record(path).unwrap_or_else(|e| {
        eprintln!("[!] cannot read {}: {e}", path.display());
        process::exit(2);
    })
}
