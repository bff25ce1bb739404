// Domain models: listed cluster objects, component clusters, metric results

mod cluster;
mod metrics;
mod object;

pub use cluster::{ComponentCluster, ComponentClusters};
pub use metrics::{ComponentMetrics, QueryData, QueryResponse, Sample};
pub use object::{COMPONENT_LABEL, ClusterObject, MANAGED_BY_LABEL, ObjectMeta, parse_objects};
