//! Analytics server API - reqwest client implementations

mod client;
pub(crate) mod types;

pub use client::{create_api, parameter_payload, AnalyticsApi, ApiError, HttpApi};
pub use types::{
    access_level, DashboardDoc, DatasetDoc, ParameterValuesDoc, PermissionsMatrix, PermissionsRow,
    PublicLinkDoc, User,
};
