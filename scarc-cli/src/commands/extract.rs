//! Extract command implementation.

use crate::utils::{CliResult, create_output, create_progress_bar, open_input, stdout_writer};
use scarc_digits::{DigitConfig, archive};
use std::io::Write;
use std::path::Path;

/// Unpack an SC archive to a file, or to stdout when `output` is `None`.
///
/// A checksum mismatch or truncated archive is reported as a warning by
/// the library; the digits that were decoded are still written.
pub fn cmd_extract(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &DigitConfig,
    progress: bool,
) -> CliResult {
    let source = open_input(input)?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(create_output(path, input)?),
        None => stdout_writer(),
    };

    // Progress output would interleave with digits on stdout
    let pb = create_progress_bar(source.len, progress && output.is_some());
    pb.set_message("Extracting");
    let mut reader = pb.wrap_read(source.reader);

    let report = archive::extract(&mut reader, &mut writer, config)?;
    pb.finish_with_message("Done");

    log::info!(
        "{} digits extracted{}",
        report.digits_written,
        if report.pi_mode { " (pi mode)" } else { "" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_compress;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scarc_extract_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_header_flag_restores_prefix() {
        let input = temp_path("pi.txt");
        let archive = temp_path("pi.sc");
        let restored = temp_path("pi.out");
        fs::write(&input, b"3.14159265358979").expect("Failed to write input");

        cmd_compress(Some(&input), Some(&archive), &DigitConfig::PI, false).unwrap();
        // No -p on extract: the flag stored in the header decides
        cmd_extract(Some(&archive), Some(&restored), &DigitConfig::DEFAULT, false).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), b"3.14159265358979");

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&archive);
        let _ = fs::remove_file(&restored);
    }

    #[test]
    fn test_extract_rejects_bad_magic() {
        let input = temp_path("bad.sc");
        let restored = temp_path("bad.out");
        fs::write(&input, [b'X'; 20]).expect("Failed to write input");

        assert!(cmd_extract(Some(&input), Some(&restored), &DigitConfig::DEFAULT, false).is_err());

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&restored);
    }
}
