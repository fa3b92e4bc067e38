use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use crate::models::Reports;

pub const COMPLETION_COUNTS_FILE: &str = "output_task_1.json";
pub const FISCAL_YEAR_FILE: &str = "output_task_2.json";
pub const EXPIRATIONS_FILE: &str = "output_task_3.json";

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).context("serialized report is not valid UTF-8")
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Serializes every report before touching the filesystem, stages each file
/// under a `.tmp` name, and only renames them into place once all three are
/// on disk. A failed write removes whatever was staged.
pub fn write_reports(out_dir: &Path, reports: &Reports) -> anyhow::Result<Vec<PathBuf>> {
    let rendered = [
        (
            COMPLETION_COUNTS_FILE,
            to_pretty_json(&reports.completion_counts)?,
        ),
        (
            FISCAL_YEAR_FILE,
            to_pretty_json(&reports.fiscal_year_completions)?,
        ),
        (EXPIRATIONS_FILE, to_pretty_json(&reports.expirations)?),
    ];

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(rendered.len());
    for (file_name, body) in rendered {
        let path = out_dir.join(file_name);
        let tmp = staging_path(&path);
        if let Err(err) = std::fs::write(&tmp, body) {
            discard_staged(&staged);
            return Err(err).with_context(|| format!("failed to write {}", tmp.display()));
        }
        staged.push((tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move {} into place", path.display()))?;
        info!(path = %path.display(), "report written");
        written.push(path);
    }

    Ok(written)
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(err) = std::fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %err, "failed to remove staged report");
        }
    }
}
