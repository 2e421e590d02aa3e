use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;

pub fn extract_base_name(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|name| name.to_str())
        .unwrap_or("run")
}

/// `out/<project>/<params base name>[/<date time>]`, created on demand.
pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> io::Result<PathBuf> {
    let mut dirs = vec!["out", project, extract_base_name(params_path)];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

/// Local time as `YYYYmmdd_HHMMSS`, used to keep repeated runs apart.
pub fn date_time_string() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    enable.then(date_time_string)
}

/**
 * Store a path and prefix together, so that the data table, the resolved
 * parameters, and the timing diagnostics of one run share a file name and
 * differ only by suffix.
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_file_with_suffix(&self, suffix: &str) -> io::Result<BufWriter<std::fs::File>> {
        let path = self.with_suffix(suffix);
        let file = std::fs::File::create(&path).map_err(|err| {
            io::Error::new(err.kind(), format!("failed to create file {:?}: {}", path, err))
        })?;
        Ok(BufWriter::new(file))
    }
}

pub fn serialize_to_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(io::Error::from)
}
