use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use harvester_core::{Domain, ResultSet};

use crate::{output_filename, AtomicFileWriter, PersistError};

/// One URL per line in ascending order, every line newline-terminated.
pub fn render_url_list(urls: &ResultSet) -> String {
    let mut out = String::new();
    for url in urls.iter_sorted() {
        out.push_str(url);
        out.push('\n');
    }
    out
}

/// Replace `{dir}/{domain}_urls.txt` with the sorted URL list.
pub fn write_url_list(dir: &Path, domain: &Domain, urls: &ResultSet) -> Result<PathBuf, PersistError> {
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&output_filename(domain), &render_url_list(urls))?;
    engine_info!("Wrote {} URLs to {:?}", urls.len(), path);
    Ok(path)
}
