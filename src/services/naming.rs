use std::path::{Path, PathBuf};

use crate::rendering::RasterFormat;

/// Output path for frame `index` of `input`.
///
/// The input's directory and last extension are dropped, so
/// `traces/run.xts` frame 2 becomes `run-2.png`. A leading dot is part of
/// the stem, so `.trace` becomes `.trace-0.png`. The file lands in
/// `output_dir` if given, otherwise in the current directory.
pub fn output_path(
    input: &Path,
    index: usize,
    format: RasterFormat,
    output_dir: Option<&Path>,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "frame".into());
    let name = format!("{stem}-{index}.{}", format.extension());
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
