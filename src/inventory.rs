/// Resource requests of a single container, as raw Kubernetes quantity
/// strings (e.g. "500m", "64Mi"). `None` when the request is unset.
#[derive(Debug, Clone, Default)]
pub struct ContainerResources {
    pub cpu_request: Option<String>,
    pub memory_request: Option<String>,
}

/// Raw pod entry collected from the cluster, before tree construction.
#[derive(Debug, Clone)]
pub struct PodEntry {
    /// Namespace the pod lives in
    pub namespace: String,
    /// Owning workload (Deployment/StatefulSet/...), if any.
    /// Pods without a recognized owner attach directly to their namespace.
    pub workload: Option<String>,
    /// Pod name
    pub name: String,
    /// Per-container resource requests
    pub containers: Vec<ContainerResources>,
}
