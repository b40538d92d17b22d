//! `batch/v1beta1`: CronJob before graduation. Same shape as `batch/v1`.

pub use crate::schema::batch_v1::CronJob;
