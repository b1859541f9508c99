use std::path::Path;

use crate::error::{GlsmError, Result};

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => GlsmError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => GlsmError::from(e),
        })?;
    }
    Ok(())
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => GlsmError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => GlsmError::from(e),
        })?;
    }
    Ok(())
}

pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(windows)]
    {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("exe"))
            .unwrap_or(false)
    }
}

pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        std::fs::set_permissions(path, perms)?;
    }

    // On Windows, executable permission is determined by file extension
    #[cfg(windows)]
    {
        let _ = path;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b/c");

        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_remove_dir_recursive_on_missing_path() {
        let root = tempfile::tempdir().unwrap();
        remove_dir_recursive(&root.path().join("missing")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("bin");
        std::fs::write(&file, b"payload").unwrap();

        assert!(!is_executable(&file));
        make_executable(&file).unwrap();
        assert!(is_executable(&file));
    }
}
