// src/file.rs

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// Read the tracked URLs: one per line, trimmed, blanks dropped.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::InputList { path: path.to_path_buf(), source })?;
    Ok(parse_url_list(&text))
}

pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Sibling temp path: `history.json` → `.history.json.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("snapshot"));
    path.with_file_name(join!(".", &name, ".tmp"))
}

/// Replace `path` with `contents` all-or-nothing.
///
/// Writes a temp file in the same directory, syncs it, then renames it over
/// the target. An interrupted write leaves the previous file untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    let result = (|| {
        let mut f = File::create(&tmp)?;
        f.write_all(contents)?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_list_skips_blank_lines() {
        let urls = parse_url_list("  https://a/1 \n\n\t\nhttps://a/2\r\n");
        assert_eq!(urls, vec![s!("https://a/1"), s!("https://a/2")]);
    }

    #[test]
    fn temp_file_sits_next_to_target() {
        let tmp = temp_path_for(Path::new("data/history.json"));
        assert_eq!(tmp, Path::new("data").join(".history.json.tmp"));
    }
}
