//! Output file helpers shared by both exporters

use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write (overwriting) a file readable by everyone
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let to_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, contents).map_err(to_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(to_err)?;
    }

    Ok(())
}
