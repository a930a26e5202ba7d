//! Analysis Graphs
//!
//! The backend renders three quick-analysis graphs as PNG images. Chat replies
//! may also inline a graph as base64; both end up as files on disk here.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Quick-analysis graph served under `/api/graphs/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Costs,
    Workloads,
    Efficiency,
}

impl GraphKind {
    pub const ALL: [GraphKind; 3] = [GraphKind::Costs, GraphKind::Workloads, GraphKind::Efficiency];

    /// Path segment used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Costs => "costs",
            GraphKind::Workloads => "workloads",
            GraphKind::Efficiency => "efficiency",
        }
    }

    /// Button label on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            GraphKind::Costs => "View Cost Trends",
            GraphKind::Workloads => "Workload Analysis",
            GraphKind::Efficiency => "Efficiency Metrics",
        }
    }

    /// Absolute URL of the graph for a backend base URL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/api/graphs/{}", base_url.trim_end_matches('/'), self.as_str())
    }

    /// Default file name when saving the graph
    pub fn file_name(&self) -> String {
        format!("qpu-{}.png", self.as_str())
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "costs" | "cost" => Ok(GraphKind::Costs),
            "workloads" | "workload" => Ok(GraphKind::Workloads),
            "efficiency" => Ok(GraphKind::Efficiency),
            other => Err(GraphError::UnknownKind(other.to_string())),
        }
    }
}

/// Errors raised while handling graph images
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Unknown graph type: {0} (expected costs, workloads or efficiency)")]
    UnknownKind(String),

    #[error("Invalid inline graph: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write graph {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// Decode an inline chat graph
pub fn decode_inline(graph: &str) -> Result<Vec<u8>, GraphError> {
    // Tolerate a data URL prefix and wrapped lines
    let payload = graph
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .unwrap_or(graph);
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    Ok(STANDARD.decode(cleaned)?)
}

/// Write image bytes to `path`, creating parent directories
pub fn save_image(path: &Path, bytes: &[u8]) -> Result<(), GraphError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GraphError::Io {
            path: parent.to_path_buf(),
            error: e.to_string(),
        })?;
    }

    std::fs::write(path, bytes).map_err(|e| GraphError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    tracing::debug!(path = ?path, bytes = bytes.len(), "Saved graph image");
    Ok(())
}

/// Open a URL or file in the system viewer (best-effort, returns once started)
pub fn open_in_browser(target: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    command.arg(target);
    spawn_reaped(command).map(|_| ())
}

/// Start `command` and wait for it on a background thread so it is reaped
fn spawn_reaped(
    mut command: std::process::Command,
) -> std::io::Result<std::thread::JoinHandle<std::io::Result<std::process::ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(std::thread::spawn(move || {
        let status = child.wait();
        if let Err(e) = &status {
            tracing::debug!(error = %e, "Viewer process wait failed");
        }
        status
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn test_viewer_process_is_reaped() {
        let reaper = spawn_reaped(std::process::Command::new("true")).unwrap();
        let status = reaper.join().unwrap().unwrap();
        assert!(status.success());

        assert!(spawn_reaped(std::process::Command::new("qpu-console-no-such-viewer")).is_err());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("costs".parse::<GraphKind>().unwrap(), GraphKind::Costs);
        assert_eq!(" Workloads ".parse::<GraphKind>().unwrap(), GraphKind::Workloads);
        assert!(matches!(
            "pie".parse::<GraphKind>(),
            Err(GraphError::UnknownKind(k)) if k == "pie"
        ));
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        assert_eq!(
            GraphKind::Efficiency.url("http://localhost:8000/"),
            "http://localhost:8000/api/graphs/efficiency"
        );
    }

    #[test]
    fn test_decode_inline_with_data_url() {
        // "PNG" in base64
        assert_eq!(decode_inline("UE5H").unwrap(), b"PNG");
        assert_eq!(decode_inline("data:image/png;base64,UE5H").unwrap(), b"PNG");
        assert_eq!(decode_inline("UE\n5H").unwrap(), b"PNG");
    }

    #[test]
    fn test_decode_inline_rejects_garbage() {
        assert!(matches!(decode_inline("not base64!"), Err(GraphError::Decode(_))));
    }

    #[test]
    fn test_save_image_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("graph.png");

        save_image(&path, b"\x89PNG").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
    }
}
