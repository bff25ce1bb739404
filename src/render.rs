// Graph artifacts on disk: DOT source plus an optional Graphviz layout

use crate::dot::Digraph;
use anyhow::Context;
use graphviz_rust::cmd::{CommandArg, Format, Layout};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output format laid out next to each `.gv` source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Only the DOT source is written.
    None,
    #[default]
    Pdf,
    Png,
    Svg,
}

impl RenderFormat {
    fn extension(self) -> Option<&'static str> {
        match self {
            RenderFormat::None => None,
            RenderFormat::Pdf => Some("pdf"),
            RenderFormat::Png => Some("png"),
            RenderFormat::Svg => Some("svg"),
        }
    }

    fn graphviz(self) -> Option<Format> {
        match self {
            RenderFormat::None => None,
            RenderFormat::Pdf => Some(Format::Pdf),
            RenderFormat::Png => Some(Format::Png),
            RenderFormat::Svg => Some(Format::Svg),
        }
    }
}

/// Writes a graph into `dir` under `name` and returns the paths it created.
pub trait GraphRenderer {
    fn render(&self, graph: &Digraph, dir: &Path, name: &str) -> anyhow::Result<Vec<PathBuf>>;
}

/// Writes the DOT source, then runs Graphviz `dot` for the configured format.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizRenderer {
    format: RenderFormat,
}

impl GraphvizRenderer {
    pub fn new(format: RenderFormat) -> Self {
        Self { format }
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, graph: &Digraph, dir: &Path, name: &str) -> anyhow::Result<Vec<PathBuf>> {
        let source_path = write_source(graph, dir, name)?;
        let mut written = vec![source_path];

        if let (Some(format), Some(ext)) = (self.format.graphviz(), self.format.extension()) {
            let out_path = dir.join(format!("{name}.{ext}"));
            debug!(path = %out_path.display(), "running graphviz");
            graphviz_rust::exec_dot(
                graph.source(),
                vec![
                    CommandArg::Layout(Layout::Dot),
                    CommandArg::Format(format),
                    CommandArg::Output(out_path.to_string_lossy().into_owned()),
                ],
            )
            .with_context(|| format!("graphviz failed to render {}", out_path.display()))?;
            info!(path = %out_path.display(), "rendered graph");
            written.push(out_path);
        }

        Ok(written)
    }
}

/// Write `<dir>/<name>` with the graph's DOT source.
pub fn write_source(graph: &Digraph, dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, graph.source())
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), "wrote graph source");
    Ok(path)
}
