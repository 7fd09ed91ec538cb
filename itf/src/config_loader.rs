//! Loading card settings from `.ita` companion files
//!
//! The recording software writes the card settings next to the recording
//! as `<recording>.ita`. Files copied between systems sometimes end up with
//! an upper-case suffix, so both spellings are tried.

use crate::error::{Error, Result};
use itf_core::{CardSettings, ConfigWarning};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffixes tried, in order, for the companion file
pub const COMPANION_SUFFIXES: [&str; 2] = [".ita", ".ITA"];

/// Card settings read from a file, with the lines that were skipped
#[derive(Debug, Clone)]
pub struct ConfigReport {
    pub path: PathBuf,
    pub settings: CardSettings,
    pub warnings: Vec<ConfigWarning>,
}

/// Candidate companion paths for a recording
pub fn companion_paths(itf_path: &Path) -> [PathBuf; 2] {
    COMPANION_SUFFIXES.map(|suffix| {
        let mut name = OsString::from(itf_path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    })
}

/// First companion path that exists
pub fn find_companion(itf_path: &Path) -> Result<PathBuf> {
    companion_paths(itf_path)
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::ConfigMissing(itf_path.to_path_buf()))
}

/// Parse a card settings file
///
/// Malformed lines are logged and skipped. Bytes that are not UTF-8 are
/// replaced, so they only cost the line they sit on.
pub fn load_card_config<P: AsRef<Path>>(path: P) -> Result<ConfigReport> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let (settings, warnings) = CardSettings::parse(&text);

    let lines: Vec<&str> = text.lines().collect();
    for warning in &warnings {
        let line = lines.get(warning.line - 1).copied().unwrap_or_default();
        warn!(
            "{}:{}: {} '{}', ignored",
            path.display(),
            warning.line,
            warning.kind,
            line.trim()
        );
    }
    if !settings.any_configured() {
        warn!("'{}' sets no card gains", path.display());
    }
    debug!("Read card settings from '{}'", path.display());

    Ok(ConfigReport {
        path: path.to_path_buf(),
        settings,
        warnings,
    })
}

/// Load the companion settings of a recording, if there are any
///
/// A companion file that is missing or cannot be read is not an error: it
/// only means the data cannot be calibrated.
pub fn load_companion(itf_path: &Path) -> Result<Option<ConfigReport>> {
    let path = match find_companion(itf_path) {
        Ok(path) => path,
        Err(Error::ConfigMissing(_)) => {
            warn!("Can't find .ita file for '{}'", itf_path.display());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    match load_card_config(&path) {
        Ok(report) => Ok(Some(report)),
        Err(Error::Io { source, .. }) => {
            warn!("Could not read '{}': {source}", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_paths_append_suffix() {
        let [lower, upper] = companion_paths(Path::new("/data/run1.itf"));
        assert_eq!(lower, PathBuf::from("/data/run1.itf.ita"));
        assert_eq!(upper, PathBuf::from("/data/run1.itf.ITA"));
    }

    #[test]
    fn test_missing_companion_is_not_fatal() {
        let path = std::env::temp_dir().join("itf-config-loader-no-such-recording.itf");
        assert!(matches!(find_companion(&path), Err(Error::ConfigMissing(_))));
        assert!(load_companion(&path).unwrap().is_none());
    }

    #[test]
    fn test_non_utf8_line_is_skipped() {
        let path = std::env::temp_dir().join(format!(
            "itf-config-loader-latin1-{}.ita",
            std::process::id()
        ));
        fs::write(&path, b"Card.2.gain=2\nComment=\xB5V\nCard.2.on=true\n").unwrap();

        let report = load_card_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        let card = report.settings.card(2).unwrap();
        assert!(card.on);
        assert_eq!(card.gain(), 2000.0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 2);
    }
}
