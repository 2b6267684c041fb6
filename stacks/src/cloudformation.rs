use crate::config::CloudFormationConfig;
use crate::provider::{ProviderError, ProviderResult, StackProvider};
use crate::types::{DriftInformation, StackPage, StackStatus, StackSummary};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudformation::config::Region;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudformation::types as cfn;
use aws_sdk_cloudformation::Client;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

const LIST_STACKS: &str = "ListStacks";

const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

const AUTHENTICATION_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

/// Lists stacks through the AWS CloudFormation API.
///
/// Credentials come from the SDK's default chain, optionally narrowed to a
/// named profile.
pub struct CloudFormationProvider {
    client: Client,
    config: CloudFormationConfig,
}

impl CloudFormationProvider {
    pub async fn new(config: CloudFormationConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|message| ProviderError::InvalidConfig { message })?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        debug!(
            region = %config.region,
            profile = config.profile.as_deref().unwrap_or("default"),
            "Created CloudFormation client"
        );

        Ok(Self::from_client(Client::new(&sdk_config), config))
    }

    pub fn from_client(client: Client, config: CloudFormationConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl StackProvider for CloudFormationProvider {
    async fn list_stacks_page(
        &self,
        status_filter: &[StackStatus],
        next_token: Option<String>,
    ) -> ProviderResult<StackPage> {
        let filter = status_filter
            .iter()
            .map(|status| cfn::StackStatus::from(status.as_str()))
            .collect::<Vec<_>>();

        let output = self
            .client
            .list_stacks()
            .set_stack_status_filter(Some(filter))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| {
                let err = classify_sdk_error(err);
                warn!(region = %self.config.region, "ListStacks failed: {}", err);
                err
            })?;

        let summaries = output
            .stack_summaries()
            .iter()
            .map(convert_summary)
            .collect::<ProviderResult<Vec<_>>>()?;

        Ok(StackPage {
            summaries,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn provider_name(&self) -> &'static str {
        "cloudformation"
    }
}

fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = DisplayErrorContext(&err).to_string();
    classify_error_code(code.as_deref(), message)
}

fn classify_error_code(code: Option<&str>, message: String) -> ProviderError {
    match code {
        Some(code) if THROTTLING_CODES.contains(&code) => ProviderError::Throttled { message },
        Some(code) if AUTHENTICATION_CODES.contains(&code) => {
            ProviderError::Authentication { message }
        }
        _ => ProviderError::Api {
            operation: LIST_STACKS,
            message,
        },
    }
}

fn convert_summary(summary: &cfn::StackSummary) -> ProviderResult<StackSummary> {
    let stack_name = summary
        .stack_name()
        .ok_or_else(|| malformed("stack summary without a StackName"))?;

    let stack_status = summary
        .stack_status()
        .ok_or_else(|| malformed(format!("stack {} without a StackStatus", stack_name)))?
        .as_str()
        .parse::<StackStatus>()
        .map_err(malformed)?;

    Ok(StackSummary {
        stack_id: summary.stack_id().map(str::to_string),
        stack_name: stack_name.to_string(),
        template_description: summary.template_description().map(str::to_string),
        creation_time: summary.creation_time().map(to_utc).transpose()?,
        last_updated_time: summary.last_updated_time().map(to_utc).transpose()?,
        deletion_time: summary.deletion_time().map(to_utc).transpose()?,
        stack_status,
        stack_status_reason: summary.stack_status_reason().map(str::to_string),
        parent_id: summary.parent_id().map(str::to_string),
        root_id: summary.root_id().map(str::to_string),
        drift_information: summary
            .drift_information()
            .map(convert_drift)
            .transpose()?,
    })
}

fn convert_drift(drift: &cfn::StackDriftInformationSummary) -> ProviderResult<DriftInformation> {
    Ok(DriftInformation {
        stack_drift_status: drift
            .stack_drift_status()
            .map(|status| status.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        last_check_timestamp: drift.last_check_timestamp().map(to_utc).transpose()?,
    })
}

fn to_utc(timestamp: &SdkDateTime) -> ProviderResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
        .ok_or_else(|| malformed(format!("timestamp out of range: {:?}", timestamp)))
}

fn malformed(message: impl Into<String>) -> ProviderError {
    ProviderError::MalformedResponse {
        message: message.into(),
    }
}
