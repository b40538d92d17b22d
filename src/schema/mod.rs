//! Serde mirrors of the manifest schemas the normalizer understands.
//!
//! Only the fields the checks read are modelled; everything else in a
//! document is ignored. One module per API group version, so a new schema
//! revision is a new module plus one adapter in `context::object`.

pub mod apps_v1;
pub mod apps_v1beta1;
pub mod apps_v1beta2;
pub mod batch_v1;
pub mod batch_v1beta1;
pub mod core_v1;
pub mod extensions_v1beta1;
pub mod meta_v1;
pub mod networking_v1;
pub mod policy_v1;
pub mod policy_v1beta1;
