//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

/// Error type shared by the command implementations.
pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// An opened input stream and its length, when known.
pub struct Input {
    /// The byte source.
    pub reader: Box<dyn Read>,
    /// Length in bytes for regular files.
    pub len: Option<u64>,
}

const BAR_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}";

/// Create a byte-count progress bar with standard styling.
pub fn create_progress_bar(len: Option<u64>, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .expect("progress bar template is valid")
                    .progress_chars("█▓▒░ "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("[{elapsed_precise}] {spinner} {bytes} {msg}")
                    .expect("progress bar template is valid"),
            );
            pb
        }
    }
}

/// Open the input file, or stdin when no path is given.
///
/// Reading digits from an interactive terminal is refused.
pub fn open_input(path: Option<&Path>) -> CliResult<Input> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let len = file.metadata()?.len();
            Ok(Input {
                reader: Box::new(BufReader::new(file)),
                len: Some(len),
            })
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err("No input specified".into());
            }
            Ok(Input {
                reader: Box::new(stdin.lock()),
                len: None,
            })
        }
    }
}

/// Create the output file, copying the input file's permissions (plus owner
/// write) on Unix.
pub fn create_output(path: &Path, input: Option<&Path>) -> CliResult<BufWriter<File>> {
    let file = File::create(path)?;
    if let Some(input) = input {
        copy_permissions(input, path)?;
    }
    Ok(BufWriter::new(file))
}

/// Buffered, locked stdout.
pub fn stdout_writer() -> Box<dyn Write> {
    Box::new(BufWriter::new(io::stdout().lock()))
}

#[cfg(unix)]
fn copy_permissions(from: &Path, to: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(from)?.permissions().mode() | 0o200;
    fs::set_permissions(to, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn copy_permissions(_from: &Path, _to: &Path) -> io::Result<()> {
    Ok(())
}

/// Format a CRC-64 value the way it is shown to users.
pub fn format_crc(crc: u64) -> String {
    format!("{:016X}", crc)
}

/// Average packed bits per digit.
pub fn bits_per_digit(packed_bytes: u64, digits: u64) -> f64 {
    if digits == 0 {
        0.0
    } else {
        packed_bytes as f64 * 8.0 / digits as f64
    }
}
