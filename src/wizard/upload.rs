//! Logo file checks applied when a file is selected

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Largest accepted logo file
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

pub const LOGO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg", "webp"];

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("unsupported file type '{0}' (use PNG, JPG, SVG or WEBP)")]
    UnsupportedType(String),

    #[error("logo is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check a selected logo path and return it normalized (trimmed).
///
/// An empty selection is allowed and returns an empty path; the logo step
/// is optional.
pub fn check_logo_file(raw: &str) -> Result<PathBuf, LogoError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(PathBuf::new());
    }

    let path = Path::new(trimmed);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !LOGO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(LogoError::UnsupportedType(extension));
    }

    if !path.exists() {
        return Err(LogoError::NotFound(path.to_path_buf()));
    }

    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(LogoError::NotAFile(path.to_path_buf()));
    }
    if metadata.len() > MAX_LOGO_BYTES {
        return Err(LogoError::TooLarge {
            size: metadata.len(),
            limit: MAX_LOGO_BYTES,
        });
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_selection_is_allowed() {
        assert_eq!(check_logo_file("  ").unwrap(), PathBuf::new());
    }

    #[test]
    fn test_accepts_small_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.PNG");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let checked = check_logo_file(path.to_str().unwrap()).unwrap();
        assert_eq!(checked, path);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let err = check_logo_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LogoError::UnsupportedType(ref ext) if ext == "gif"));
    }

    #[test]
    fn test_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.svg");
        let err = check_logo_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LogoError::NotFound(_)));
    }

    #[test]
    fn test_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folder.png");
        std::fs::create_dir(&path).unwrap();
        let err = check_logo_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LogoError::NotAFile(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.jpg");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_LOGO_BYTES + 1).unwrap();

        let err = check_logo_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LogoError::TooLarge { .. }));
    }
}
