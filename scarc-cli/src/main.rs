//! scarc CLI - packed decimal digit archiver
//!
//! Compresses ASCII digit streams (such as long expansions of pi) into SC
//! archives and extracts them again.

mod commands;
mod utils;

use clap::{ArgAction, Parser};
use log::{Level, LevelFilter};
use scarc_digits::DigitConfig;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Short flags `Cli` defines; `o` takes a value.
const SHORT_FLAGS: &str = "xticopwPvhV";

/// Long options that consume the following argument.
const LONG_WITH_VALUE: [&str; 2] = ["--output", "--completions"];

#[derive(Parser)]
#[command(name = "scarc")]
#[command(
    author,
    version,
    about = "Prefix-coded archiver for decimal digit streams"
)]
#[command(long_about = "
scarc packs ASCII decimal digits into 3 or 4 bits each and stores them in an
SC archive together with the digit count and a CRC-64 checksum.

Examples:
  scarc digits.txt digits.sc
  scarc -p pi.txt -o pi.sc
  scarc -x pi.sc pi.txt
  scarc -x pi.sc > pi.txt
  scarc -t pi.sc
  scarc -i pi.sc
  scarc --completions bash > scarc.bash
")]
struct Cli {
    /// Input file (stdin when omitted and not a terminal)
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    output: Option<PathBuf>,

    /// Extract an archive
    #[arg(short = 'x', long, group = "mode")]
    extract: bool,

    /// Test archive integrity without writing output
    #[arg(short = 't', long, group = "mode")]
    test: bool,

    /// Show archive header information
    #[arg(short = 'i', long, group = "mode")]
    info: bool,

    /// Extract to stdout
    #[arg(short = 'c', long = "stdout", conflicts_with_all = ["output", "output_file"])]
    to_stdout: bool,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE", conflicts_with = "output")]
    output_file: Option<PathBuf>,

    /// Strip a leading "3." before compressing and restore it on extract
    #[arg(short = 'p', long)]
    pi: bool,

    /// Drop whitespace in the input instead of rejecting it
    #[arg(short = 'w', long)]
    skip_whitespace: bool,

    /// Show progress bar
    #[arg(short = 'P', long)]
    progress: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    completions: Option<clap_complete::Shell>,
}

impl Cli {
    fn output_path(&self) -> Option<&Path> {
        if self.to_stdout {
            return None;
        }
        self.output_file.as_deref().or(self.output.as_deref())
    }

    fn config(&self) -> DigitConfig {
        DigitConfig::DEFAULT
            .with_pi_mode(self.pi)
            .with_skip_whitespace(self.skip_whitespace)
    }
}

/// Remove unrecognized characters from short-flag clusters.
///
/// Returns the remaining arguments and the characters dropped, so they can be
/// reported as warnings instead of failing the parse.
fn strip_unknown_short_flags(args: Vec<OsString>) -> (Vec<OsString>, Vec<char>) {
    let mut kept = Vec::with_capacity(args.len());
    let mut unknown = Vec::new();
    let mut value_next = false;
    let mut positional_only = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || value_next || positional_only {
            value_next = false;
            kept.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            kept.push(arg);
            continue;
        };
        if text == "--" {
            positional_only = true;
            kept.push(arg);
            continue;
        }
        if text.starts_with("--") || text == "-" || !text.starts_with('-') {
            value_next = LONG_WITH_VALUE.contains(&text);
            kept.push(arg);
            continue;
        }

        let mut cluster = String::from("-");
        let mut chars = text[1..].chars();
        while let Some(c) = chars.next() {
            if !SHORT_FLAGS.contains(c) {
                unknown.push(c);
                continue;
            }
            cluster.push(c);
            if c == 'o' {
                // The rest of the cluster, or the next argument, is the value
                let value: String = chars.by_ref().collect();
                value_next = value.is_empty();
                cluster.push_str(&value);
            }
        }
        if cluster.len() > 1 {
            kept.push(cluster.into());
        }
    }

    (kept, unknown)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();

    builder.format(|buf, record| {
        let label = match record.level() {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::Trace => "Trace",
        };
        writeln!(buf, "[{}] {}", label, record.args())
    });

    let _ = builder.try_init();
}

fn main() {
    let (args, unknown) = strip_unknown_short_flags(std::env::args_os().collect());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);
    for flag in unknown {
        log::warn!("Unknown option '-{}' ignored", flag);
    }

    if let Some(shell) = cli.completions {
        commands::cmd_completions(shell);
        return;
    }

    let input = cli.input.as_deref();
    let output = cli.output_path();
    let config = cli.config();

    let result = if cli.extract {
        commands::cmd_extract(input, output, &config, cli.progress)
    } else if cli.test {
        commands::cmd_test(input, cli.progress)
    } else if cli.info {
        commands::cmd_info(input)
    } else {
        commands::cmd_compress(input, output, &config, cli.progress)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_compress() {
        let cli = Cli::try_parse_from(["scarc", "in.txt", "out.sc"]).unwrap();
        assert!(!cli.extract && !cli.test && !cli.info);
        assert_eq!(cli.output_path(), Some(Path::new("out.sc")));
        assert_eq!(cli.config(), DigitConfig::DEFAULT);
    }

    #[test]
    fn test_output_flag() {
        let cli = Cli::try_parse_from(["scarc", "-p", "pi.txt", "-o", "pi.sc"]).unwrap();
        assert_eq!(cli.output_path(), Some(Path::new("pi.sc")));
        assert!(cli.config().pi_mode);
    }

    #[test]
    fn test_stdout_flag() {
        let cli = Cli::try_parse_from(["scarc", "-xc", "pi.sc"]).unwrap();
        assert!(cli.extract);
        assert_eq!(cli.output_path(), None);
    }

    #[test]
    fn test_modes_conflict() {
        assert!(Cli::try_parse_from(["scarc", "-x", "-t", "a.sc"]).is_err());
        assert!(Cli::try_parse_from(["scarc", "-c", "a.sc", "b.txt"]).is_err());
        assert!(Cli::try_parse_from(["scarc", "-o", "b.txt", "a.sc", "c.txt"]).is_err());
    }

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_unknown_short_flags_dropped() {
        let (kept, unknown) = strip_unknown_short_flags(args(&["scarc", "-z", "-xqc", "a.sc"]));
        assert_eq!(kept, args(&["scarc", "-xc", "a.sc"]));
        assert_eq!(unknown, ['z', 'q']);

        let cli = Cli::try_parse_from(kept).unwrap();
        assert!(cli.extract);
        assert_eq!(cli.output_path(), None);
    }

    #[test]
    fn test_strip_keeps_option_values() {
        let (kept, unknown) =
            strip_unknown_short_flags(args(&["scarc", "-po", "-odd.sc", "in.txt", "-ofile.sc"]));
        assert_eq!(kept, args(&["scarc", "-po", "-odd.sc", "in.txt", "-ofile.sc"]));
        assert!(unknown.is_empty());

        let (kept, unknown) =
            strip_unknown_short_flags(args(&["scarc", "--output", "-z", "--", "-q"]));
        assert_eq!(kept, args(&["scarc", "--output", "-z", "--", "-q"]));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_unknown_long_flag_rejected() {
        let (kept, unknown) = strip_unknown_short_flags(args(&["scarc", "--bogus", "a.txt"]));
        assert!(unknown.is_empty());
        assert!(Cli::try_parse_from(kept).is_err());
    }

    #[test]
    fn test_completions_exclusive() {
        let cli = Cli::try_parse_from(["scarc", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
        assert!(Cli::try_parse_from(["scarc", "--completions", "bash", "-x"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["scarc", "-vv", "a.txt"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
