//! File writes with explicit permissions.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Owner read/write, everyone else read.
pub const FILE_MODE: u32 = 0o644;

/// Owner read/write/execute, everyone else read/execute.
pub const SCRIPT_MODE: u32 = 0o755;

/// Create or truncate `path` and write `contents`.
///
/// `mode` applies to newly created files on unix and is ignored elsewhere.
pub(crate) fn write_file(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}

/// Force `mode` on an existing file (unix only).
pub(crate) fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg");
        write_file(&path, b"a much longer first version", FILE_MODE).unwrap();
        write_file(&path, b"short", FILE_MODE).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[cfg(unix)]
    #[test]
    fn test_set_mode_makes_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script");
        write_file(&path, b"#!/bin/sh\n", FILE_MODE).unwrap();
        set_mode(&path, SCRIPT_MODE).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, SCRIPT_MODE);
    }
}
