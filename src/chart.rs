// Component and managed-by graphs over a listing of cluster objects

use crate::alias::{AliasMap, resolve};
use crate::dot::{Digraph, Subgraph};
use crate::models::{COMPONENT_LABEL, ClusterObject, ComponentClusters, MANAGED_BY_LABEL};
use crate::render::GraphRenderer;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const COMPONENT_GRAPH_FILE: &str = "component.gv";
pub const MANAGED_BY_GRAPH_FILE: &str = "managed-by.gv";

/// Alias tables the graphs are drawn with.
#[derive(Debug, Clone, Copy)]
pub struct ChartAliases<'a> {
    pub node: &'a AliasMap,
    pub component: &'a AliasMap,
}

/// Aliased `kind/name` of an object.
pub fn node_name(object: &ClusterObject, aliases: &AliasMap) -> String {
    let name = object.qualified_name();
    resolve(&name, aliases).to_string()
}

/// Group node names by aliased component label, in listing order.
pub fn component_clusters(objects: &[ClusterObject], aliases: ChartAliases<'_>) -> ComponentClusters {
    let mut clusters = ComponentClusters::new();
    for object in objects {
        if let Some(component) = object.label(COMPONENT_LABEL) {
            let node = node_name(object, aliases.node);
            clusters.push(resolve(component, aliases.component), &node);
        }
    }
    clusters
}

/// Every object as a node; each cluster boxed and chained by invisible edges so it stacks vertically.
pub fn component_graph(objects: &[ClusterObject], aliases: ChartAliases<'_>) -> Digraph {
    let mut dot = Digraph::new("Component")
        .graph_attrs(&[("rankdir", "TB")])
        .edge_attrs(&[("style", "invis"), ("fontsize", "12")]);

    for object in objects {
        let node = node_name(object, aliases.node);
        dot.node(&node, &node);
    }

    let clusters = component_clusters(objects, aliases);
    for cluster in clusters.iter() {
        let mut sub = Subgraph::new(&format!("cluster_{}", cluster.component))
            .graph_attrs(&[("nodesep", "3")]);
        sub.label(&cluster.component);
        for (i, node) in cluster.nodes.iter().enumerate() {
            sub.node(node, node);
            if i > 0 {
                sub.edge(&cluster.nodes[i - 1], node);
            }
        }
        debug!(component = %cluster.component, nodes = cluster.nodes.len(), "cluster");
        dot.subgraph(sub);
    }
    dot
}

/// Every object as a node, with an edge from its aliased manager when labelled with one.
pub fn managed_by_graph(objects: &[ClusterObject], aliases: &AliasMap) -> Digraph {
    let mut dot = Digraph::new("Managed By").graph_attrs(&[("nodesep", ".5"), ("ranksep", "5")]);

    for object in objects {
        let node = node_name(object, aliases);
        dot.node(&node, &node);

        if let Some(manager) = object.label(MANAGED_BY_LABEL) {
            let manager = resolve(manager, aliases);
            dot.node(manager, manager);
            dot.edge(manager, &node);
        }
    }
    dot
}

/// Draws both graphs for one listing into an output directory.
pub struct GraphGenerator<'a, R> {
    aliases: ChartAliases<'a>,
    renderer: R,
    outdir: PathBuf,
}

impl<'a, R: GraphRenderer> GraphGenerator<'a, R> {
    pub fn new(aliases: ChartAliases<'a>, renderer: R, outdir: &Path) -> Self {
        Self {
            aliases,
            renderer,
            outdir: outdir.to_path_buf(),
        }
    }

    /// Render `component.gv` then `managed-by.gv`; returns every file written.
    #[instrument(skip_all, fields(objects = objects.len(), outdir = %self.outdir.display()))]
    pub fn generate(&self, objects: &[ClusterObject]) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = self.generate_component_graph(objects)?;
        written.extend(self.generate_managed_by_graph(objects)?);
        info!(files = written.len(), "graphs generated");
        Ok(written)
    }

    pub fn generate_component_graph(&self, objects: &[ClusterObject]) -> anyhow::Result<Vec<PathBuf>> {
        let dot = component_graph(objects, self.aliases);
        self.renderer.render(&dot, &self.outdir, COMPONENT_GRAPH_FILE)
    }

    pub fn generate_managed_by_graph(&self, objects: &[ClusterObject]) -> anyhow::Result<Vec<PathBuf>> {
        let dot = managed_by_graph(objects, self.aliases.node);
        self.renderer.render(&dot, &self.outdir, MANAGED_BY_GRAPH_FILE)
    }
}
