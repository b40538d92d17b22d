//! The resource normalizer.
//!
//! Looks a document's header up in [`crate::objectkinds`] and decodes its
//! body through the matching schema mirror. Unrecognized kinds decode to
//! `None`; a recognized kind whose body does not fit fails with a
//! [`DecodeError`].

use crate::context::object::{
    DisruptionBudget, MetadataOnly, NetworkPolicy, Pod, Resource, Service, Workload,
    WorkloadSource,
};
use crate::error::DecodeError;
use crate::objectkinds::{self, KnownKind};
use crate::parser::RawDocument;
use crate::schema::meta_v1::PartialObject;
use crate::schema::{
    apps_v1, apps_v1beta1, apps_v1beta2, batch_v1, batch_v1beta1, core_v1, extensions_v1beta1,
    networking_v1, policy_v1, policy_v1beta1,
};
use crate::types::TypeMeta;
use serde::de::DeserializeOwned;

/// Decode one document into a canonical resource.
pub fn decode(doc: &RawDocument) -> Result<Option<Resource>, DecodeError> {
    let Some(known) = objectkinds::lookup(&doc.api_version, &doc.kind) else {
        return Ok(None);
    };

    let resource = match known {
        KnownKind::Pod => Resource::Pod(Pod::from_v1(&body::<core_v1::Pod>(doc)?)),
        KnownKind::Service => Resource::Service(Service::from_v1(&body::<core_v1::Service>(doc)?)),
        KnownKind::NetworkingV1NetworkPolicy => Resource::NetworkPolicy(NetworkPolicy::adapt(
            &doc.api_version,
            &body::<networking_v1::NetworkPolicy>(doc)?,
        )),
        KnownKind::ExtensionsV1beta1NetworkPolicy => Resource::NetworkPolicy(NetworkPolicy::adapt(
            &doc.api_version,
            &body::<extensions_v1beta1::NetworkPolicy>(doc)?,
        )),
        KnownKind::PolicyV1PodDisruptionBudget => Resource::DisruptionBudget(DisruptionBudget::adapt(
            &doc.api_version,
            &body::<policy_v1::PodDisruptionBudget>(doc)?,
        )),
        KnownKind::PolicyV1beta1PodDisruptionBudget => {
            Resource::DisruptionBudget(DisruptionBudget::adapt(
                &doc.api_version,
                &body::<policy_v1beta1::PodDisruptionBudget>(doc)?,
            ))
        }
        KnownKind::MetadataOnly => {
            let partial = body::<PartialObject>(doc)?;
            Resource::MetadataOnly(MetadataOnly {
                type_meta: TypeMeta::new(&doc.api_version, &doc.kind),
                meta: crate::context::object::canonical_meta(&partial.metadata),
            })
        }
        workload => Resource::Workload(Workload::adapt(&workload_source(workload, doc)?)),
    };

    Ok(Some(resource))
}

fn workload_source(known: KnownKind, doc: &RawDocument) -> Result<WorkloadSource, DecodeError> {
    Ok(match known {
        KnownKind::AppsV1Deployment => WorkloadSource::AppsV1Deployment(body::<apps_v1::Deployment>(doc)?),
        KnownKind::AppsV1beta1Deployment => {
            WorkloadSource::AppsV1beta1Deployment(body::<apps_v1beta1::Deployment>(doc)?)
        }
        KnownKind::AppsV1beta2Deployment => {
            WorkloadSource::AppsV1beta2Deployment(body::<apps_v1beta2::Deployment>(doc)?)
        }
        KnownKind::ExtensionsV1beta1Deployment => {
            WorkloadSource::ExtensionsV1beta1Deployment(body::<extensions_v1beta1::Deployment>(doc)?)
        }
        KnownKind::AppsV1StatefulSet => {
            WorkloadSource::AppsV1StatefulSet(body::<apps_v1::StatefulSet>(doc)?)
        }
        KnownKind::AppsV1beta1StatefulSet => {
            WorkloadSource::AppsV1beta1StatefulSet(body::<apps_v1beta1::StatefulSet>(doc)?)
        }
        KnownKind::AppsV1beta2StatefulSet => {
            WorkloadSource::AppsV1beta2StatefulSet(body::<apps_v1beta2::StatefulSet>(doc)?)
        }
        KnownKind::AppsV1DaemonSet => WorkloadSource::AppsV1DaemonSet(body::<apps_v1::DaemonSet>(doc)?),
        KnownKind::AppsV1beta2DaemonSet => {
            WorkloadSource::AppsV1beta2DaemonSet(body::<apps_v1beta2::DaemonSet>(doc)?)
        }
        KnownKind::ExtensionsV1beta1DaemonSet => {
            WorkloadSource::ExtensionsV1beta1DaemonSet(body::<extensions_v1beta1::DaemonSet>(doc)?)
        }
        KnownKind::BatchV1Job => WorkloadSource::BatchV1Job(body::<batch_v1::Job>(doc)?),
        KnownKind::BatchV1beta1CronJob => {
            WorkloadSource::BatchV1beta1CronJob(body::<batch_v1beta1::CronJob>(doc)?)
        }
        KnownKind::BatchV1CronJob => WorkloadSource::BatchV1CronJob(body::<batch_v1::CronJob>(doc)?),
        other => {
            return Err(decode_error(
                doc,
                format!("{:?} does not own a pod template", other),
            ));
        }
    })
}

fn body<T: DeserializeOwned>(doc: &RawDocument) -> Result<T, DecodeError> {
    serde_yaml::from_value(doc.body.clone()).map_err(|e| decode_error(doc, e.to_string()))
}

fn decode_error(doc: &RawDocument, message: String) -> DecodeError {
    DecodeError {
        kind: doc.kind.clone(),
        api_version: doc.api_version.clone(),
        source_name: doc.source_name.clone(),
        message,
    }
}
