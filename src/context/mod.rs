//! The resource index.
//!
//! Holds every decoded resource of a run, partitioned by canonical kind. The
//! index is built once from the complete decoded set and is read-only
//! afterwards, so relationship checks always see the same snapshot.

pub mod decode;
pub mod object;

pub use object::{
    DisruptionBudget, MetadataOnly, NetworkPolicy, Pod, PodSpecer, PodTemplate, PolicyType,
    Resource, Service, Workload, WorkloadSource,
};

/// Frozen, partitioned view of a run's resources.
#[derive(Debug, Default)]
pub struct ResourceIndex {
    resources: Vec<Resource>,
    pods: Vec<usize>,
    workloads: Vec<usize>,
    services: Vec<usize>,
    network_policies: Vec<usize>,
    disruption_budgets: Vec<usize>,
}

impl ResourceIndex {
    /// Partition resources by kind, preserving decode order within each kind.
    pub fn build(resources: Vec<Resource>) -> Self {
        let mut index = Self::default();
        for (position, resource) in resources.iter().enumerate() {
            let bucket = match resource {
                Resource::Pod(_) => &mut index.pods,
                Resource::Workload(_) => &mut index.workloads,
                Resource::Service(_) => &mut index.services,
                Resource::NetworkPolicy(_) => &mut index.network_policies,
                Resource::DisruptionBudget(_) => &mut index.disruption_budgets,
                Resource::MetadataOnly(_) => continue,
            };
            bucket.push(position);
        }
        index.resources = resources;
        index
    }

    /// All resources in decode order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn pods(&self) -> impl Iterator<Item = &Pod> {
        self.bucket(&self.pods).filter_map(|r| match r {
            Resource::Pod(p) => Some(p),
            _ => None,
        })
    }

    pub fn workloads(&self) -> impl Iterator<Item = &Workload> {
        self.bucket(&self.workloads).filter_map(|r| match r {
            Resource::Workload(w) => Some(w),
            _ => None,
        })
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.bucket(&self.services).filter_map(|r| match r {
            Resource::Service(s) => Some(s),
            _ => None,
        })
    }

    pub fn network_policies(&self) -> impl Iterator<Item = &NetworkPolicy> {
        self.bucket(&self.network_policies).filter_map(|r| match r {
            Resource::NetworkPolicy(n) => Some(n),
            _ => None,
        })
    }

    pub fn disruption_budgets(&self) -> impl Iterator<Item = &DisruptionBudget> {
        self.bucket(&self.disruption_budgets).filter_map(|r| match r {
            Resource::DisruptionBudget(d) => Some(d),
            _ => None,
        })
    }

    /// Pod templates of bare pods, then of workloads, in one namespace.
    pub fn pod_templates_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a PodTemplate> {
        self.pods()
            .map(|p| &p.template)
            .chain(self.workloads().map(|w| &w.template))
            .filter(move |t| t.namespace == namespace)
    }

    pub fn services_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a Service> {
        self.services().filter(move |s| s.meta.namespace == namespace)
    }

    pub fn network_policies_in<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a NetworkPolicy> {
        self.network_policies()
            .filter(move |n| n.meta.namespace == namespace)
    }

    pub fn disruption_budgets_in<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a DisruptionBudget> {
        self.disruption_budgets()
            .filter(move |d| d.meta.namespace == namespace)
    }

    fn bucket<'a>(&'a self, positions: &'a [usize]) -> impl Iterator<Item = &'a Resource> {
        positions.iter().map(|&i| &self.resources[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{core_v1, meta_v1};
    use std::collections::BTreeMap;

    fn pod(name: &str, namespace: &str) -> Resource {
        Resource::Pod(Pod::from_v1(&core_v1::Pod {
            metadata: meta_v1::ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels: Some(BTreeMap::from([("app".to_string(), name.to_string())])),
                annotations: None,
            },
            spec: core_v1::PodSpec::default(),
        }))
    }

    fn service(name: &str, namespace: &str) -> Resource {
        Resource::Service(Service::from_v1(&core_v1::Service {
            metadata: meta_v1::ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec: core_v1::ServiceSpec::default(),
        }))
    }

    #[test]
    fn test_partition_preserves_order() {
        let index = ResourceIndex::build(vec![
            pod("a", "default"),
            service("s", "default"),
            pod("b", "prod"),
            pod("c", "default"),
        ]);

        assert_eq!(index.len(), 4);
        let names: Vec<&str> = index.pods().map(|p| p.meta.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(index.services().count(), 1);
        assert_eq!(index.workloads().count(), 0);
        assert_eq!(index.resources()[1].object_meta().name, "s");
    }

    #[test]
    fn test_metadata_only_resources_are_kept_unbucketed() {
        let index = ResourceIndex::build(vec![
            Resource::MetadataOnly(MetadataOnly {
                type_meta: crate::types::TypeMeta::new("v1", "ConfigMap"),
                meta: crate::types::ObjectMeta::new("settings"),
            }),
            pod("a", "default"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.resources()[0].object_meta().name, "settings");
        assert_eq!(index.pods().count(), 1);
        assert_eq!(index.pod_templates_in("default").count(), 1);
    }

    #[test]
    fn test_namespace_scoping() {
        let index = ResourceIndex::build(vec![
            pod("a", "default"),
            pod("b", "prod"),
            service("s", "prod"),
        ]);
        let in_prod: Vec<&str> = index
            .pod_templates_in("prod")
            .map(|t| t.labels["app"].as_str())
            .collect();
        assert_eq!(in_prod, vec!["b"]);
        assert_eq!(index.services_in("default").count(), 0);
        assert_eq!(index.services_in("prod").count(), 1);
    }
}
