//! Best-effort copy of the last rendered label for inspection.

use std::fs;
use std::io;
use std::path::Path;

/// Write `png` to `path`, creating the parent directory if needed.
///
/// Callers discard the result; a failed copy never affects a print job.
pub fn save_debug_copy(path: &Path, png: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, png)
}
