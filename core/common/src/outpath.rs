//! Output file naming rules.
//!
//! The destination name is computed from the source name and the selected
//! mode alone, with no filesystem access. Names are handled as owned
//! `OsString`s, so there is no limit on input-name length.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix appended to encrypted output files.
pub const ENCRYPTED_SUFFIX: &str = "enc";

/// Suffix appended to decrypted output files.
pub const DECRYPTED_SUFFIX: &str = "dec";

/// Direction of the transform selected on the command line.
///
/// The CTR transform itself is identical in both directions; the mode only
/// chooses the output name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

/// Compute the destination path for `input` under the given mode.
///
/// - Encrypt: `report.txt` becomes `report.txt.enc`.
/// - Decrypt: `report.txt.enc` becomes `report.txt.dec`; a name without the
///   encryption suffix keeps its full name and gains `.dec`, so `data.bin`
///   becomes `data.bin.dec`.
pub fn resolve_output_path(input: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Encrypt => append_suffix(input, ENCRYPTED_SUFFIX),
        Mode::Decrypt => {
            if input.extension() == Some(OsStr::new(ENCRYPTED_SUFFIX)) {
                input.with_extension(DECRYPTED_SUFFIX)
            } else {
                append_suffix(input, DECRYPTED_SUFFIX)
            }
        }
    }
}

fn append_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_appends_suffix() {
        let out = resolve_output_path(Path::new("report.txt"), Mode::Encrypt);
        assert_eq!(out, PathBuf::from("report.txt.enc"));
    }

    #[test]
    fn test_decrypt_replaces_encryption_suffix() {
        let out = resolve_output_path(Path::new("report.txt.enc"), Mode::Decrypt);
        assert_eq!(out, PathBuf::from("report.txt.dec"));
    }

    #[test]
    fn test_decrypt_unmarked_name_appends_suffix() {
        let out = resolve_output_path(Path::new("data.bin"), Mode::Decrypt);
        assert_eq!(out, PathBuf::from("data.bin.dec"));
    }

    #[test]
    fn test_encrypt_name_without_extension() {
        let out = resolve_output_path(Path::new("archive"), Mode::Encrypt);
        assert_eq!(out, PathBuf::from("archive.enc"));
    }

    #[test]
    fn test_directories_are_preserved() {
        let out = resolve_output_path(Path::new("backups/2024/report.txt.enc"), Mode::Decrypt);
        assert_eq!(out, PathBuf::from("backups/2024/report.txt.dec"));
    }

    #[test]
    fn test_bare_suffix_name_is_not_stripped() {
        // ".enc" alone is a hidden file name, not an encryption marker.
        let out = resolve_output_path(Path::new(".enc"), Mode::Decrypt);
        assert_eq!(out, PathBuf::from(".enc.dec"));
    }
}
