//! Container extraction utilities.

use crate::schema::core_v1::{Container, PodSpec};

/// All containers of a pod spec: regular containers first, then init containers.
pub fn all_containers(pod_spec: &PodSpec) -> impl Iterator<Item = &Container> {
    pod_spec
        .containers
        .iter()
        .chain(pod_spec.init_containers.iter())
}

/// Split an image reference into its tag, ignoring any registry port.
///
/// Returns `None` for untagged and digest-pinned references.
pub fn image_tag(image: &str) -> Option<&str> {
    if image.contains('@') {
        return None;
    }
    let last_segment = image.rsplit('/').next().unwrap_or(image);
    last_segment.split_once(':').map(|(_, tag)| tag)
}

/// True when the image reference is pinned to a digest.
pub fn has_digest(image: &str) -> bool {
    image.contains('@')
}
