pub mod cloudformation;
pub mod config;
pub mod expiry;
pub mod grouping;
pub mod lister;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod timestamp;
pub mod types;

pub use cloudformation::CloudFormationProvider;
pub use config::{CloudFormationConfig, FinderSettings, DEFAULT_EXPIRY_DAYS, DEFAULT_REGION};
pub use expiry::{age_in_days, find_expired, find_expired_at, is_expired};
pub use grouping::{group_by_environment, Delimiter, Position};
pub use lister::StackLister;
pub use pipeline::StackFinder;
pub use provider::{ProviderError, ProviderResult, StackProvider};
pub use report::{write_pretty_json, Report};
pub use types::{DriftInformation, StackPage, StackStatus, StackSummary};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::expiry::*;
    pub use crate::grouping::*;
    pub use crate::lister::*;
    pub use crate::pipeline::*;
    pub use crate::provider::*;
    pub use crate::report::*;
    pub use crate::types::*;

    pub use crate::cloudformation::CloudFormationProvider;
}
