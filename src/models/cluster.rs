// Component clusters: component name → node names, both in first-seen order

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentCluster {
    pub component: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentClusters {
    clusters: Vec<ComponentCluster>,
}

impl ComponentClusters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` to the cluster for `component`, creating the cluster on first sight.
    pub fn push(&mut self, component: &str, node: &str) {
        match self.clusters.iter_mut().find(|c| c.component == component) {
            Some(cluster) => cluster.nodes.push(node.to_string()),
            None => self.clusters.push(ComponentCluster {
                component: component.to_string(),
                nodes: vec![node.to_string()],
            }),
        }
    }

    pub fn get(&self, component: &str) -> Option<&[String]> {
        self.clusters
            .iter()
            .find(|c| c.component == component)
            .map(|c| c.nodes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentCluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
