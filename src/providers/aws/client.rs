use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codepipeline::error::DisplayErrorContext;
use aws_sdk_codepipeline::primitives::DateTime as AwsDateTime;
use aws_sdk_codepipeline::types::{ApprovalResult, ApprovalStatus};
use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{PipehandError, Result};
use crate::model::{self, ApprovalDecision, ExecutionSummary, StageInfo, Status};
use crate::providers::PipelineService;

/// AWS CodePipeline client for listing, running and approving pipelines.
///
/// Thin mapping layer: every method is one API round-trip whose output is
/// converted into the tool's own [`model`] types at the boundary.
pub struct AwsCodePipeline {
    codepipeline: aws_sdk_codepipeline::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsCodePipeline {
    /// Create clients from a resolved session configuration.
    ///
    /// # Errors
    ///
    /// Fails with a session error when no region could be resolved, since
    /// every subsequent API call would be unroutable.
    pub fn new(config: &SdkConfig) -> Result<Self> {
        if config.region().is_none() {
            return Err(PipehandError::Session(
                "no AWS region configured; set it in the profile, AWS_REGION or pipehand.toml"
                    .to_owned(),
            ));
        }

        Ok(Self {
            codepipeline: aws_sdk_codepipeline::Client::new(config),
            sts: aws_sdk_sts::Client::new(config),
        })
    }
}

#[async_trait]
impl PipelineService for AwsCodePipeline {
    async fn list_pipeline_names(&self, filter: &str) -> Result<Vec<String>> {
        let mut pages = self.codepipeline.list_pipelines().into_paginator().send();

        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| api_error("Failed to list pipelines", e))?;
            for pipeline in page.pipelines() {
                let Some(name) = pipeline.name() else { continue };
                if filter.is_empty() || name.contains(filter) {
                    names.push(name.to_owned());
                }
            }
        }

        debug!("{} pipeline(s) matched filter '{filter}'", names.len());
        Ok(names)
    }

    async fn latest_execution(&self, name: &str) -> Result<Option<ExecutionSummary>> {
        let output = self
            .codepipeline
            .list_pipeline_executions()
            .pipeline_name(name)
            .max_results(1)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to list executions of '{name}'"), e))?;

        let Some(summary) = output.pipeline_execution_summaries().first() else {
            return Ok(None);
        };

        Ok(Some(ExecutionSummary {
            status: summary
                .status()
                .map_or(Status::Other("Unknown".to_owned()), |s| {
                    Status::parse(s.as_str())
                }),
            last_update: summary.last_update_time().and_then(to_utc),
            revision_summary: summary
                .source_revisions()
                .first()
                .and_then(|r| r.revision_summary())
                .map(str::to_owned),
        }))
    }

    async fn current_stage(&self, name: &str) -> Result<Option<StageInfo>> {
        let output = self
            .codepipeline
            .get_pipeline_state()
            .name(name)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to get state of '{name}'"), e))?;

        let states: Vec<model::StageState> =
            output.stage_states().iter().filter_map(map_stage).collect();

        Ok(model::current_stage(&states))
    }

    async fn start_execution(&self, name: &str) -> Result<String> {
        let output = self
            .codepipeline
            .start_pipeline_execution()
            .name(name)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to start execution of '{name}'"), e))?;

        output
            .pipeline_execution_id()
            .map(str::to_owned)
            .ok_or_else(|| PipehandError::Api(format!("No execution id returned for '{name}'")))
    }

    async fn submit_approval(
        &self,
        name: &str,
        stage: &StageInfo,
        decision: ApprovalDecision,
        summary: &str,
    ) -> Result<()> {
        let token = stage.approval_token.as_deref().ok_or_else(|| {
            PipehandError::Api(format!(
                "Stage '{}' of '{name}' has no pending approval token",
                stage.stage_name
            ))
        })?;

        let result = ApprovalResult::builder()
            .status(match decision {
                ApprovalDecision::Approved => ApprovalStatus::Approved,
                ApprovalDecision::Rejected => ApprovalStatus::Rejected,
            })
            .summary(summary)
            .build()
            .map_err(|e| PipehandError::Api(format!("Invalid approval result: {e}")))?;

        self.codepipeline
            .put_approval_result()
            .pipeline_name(name)
            .stage_name(stage.stage_name.as_str())
            .action_name(stage.action_name.as_str())
            .token(token)
            .result(result)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to submit approval for '{name}'"), e))?;

        Ok(())
    }

    async fn caller_identity(&self) -> Result<String> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| api_error("Failed to resolve caller identity", e))?;

        Ok(output.arn().unwrap_or("unknown").to_owned())
    }
}

fn api_error(context: &str, err: impl std::error::Error) -> PipehandError {
    PipehandError::Api(format!("{context}: {}", DisplayErrorContext(err)))
}

/// Maps one stage of a GetPipelineState response into the scan input.
///
/// Only the stage's first action is considered; stages whose first action has
/// never executed are dropped.
fn map_stage(state: &aws_sdk_codepipeline::types::StageState) -> Option<model::StageState> {
    let action = state.action_states().first()?;
    let execution = action.latest_execution()?;
    let status = execution.status()?;

    Some(model::StageState {
        info: StageInfo {
            stage_name: state.stage_name()?.to_owned(),
            action_name: action.action_name()?.to_owned(),
            status: Status::parse(status.as_str()),
            approval_token: execution.token().map(str::to_owned),
        },
        last_status_change: execution.last_status_change().and_then(to_utc),
    })
}

fn to_utc(value: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_codepipeline::types::{ActionExecution, ActionExecutionStatus, ActionState, StageState};

    fn approval_stage() -> StageState {
        StageState::builder()
            .stage_name("Gate")
            .action_states(
                ActionState::builder()
                    .action_name("ManualApproval")
                    .latest_execution(
                        ActionExecution::builder()
                            .status(ActionExecutionStatus::InProgress)
                            .token("token-123")
                            .last_status_change(AwsDateTime::from_secs(1_700_000_000))
                            .build(),
                    )
                    .build(),
            )
            .build()
    }

    #[test]
    fn map_stage_extracts_first_action() {
        let mapped = map_stage(&approval_stage()).unwrap();
        assert_eq!(mapped.info.stage_name, "Gate");
        assert_eq!(mapped.info.action_name, "ManualApproval");
        assert_eq!(mapped.info.status, Status::InProgress);
        assert_eq!(mapped.info.approval_token.as_deref(), Some("token-123"));
        assert_eq!(
            mapped.last_status_change.unwrap().timestamp(),
            1_700_000_000
        );
    }

    #[test]
    fn map_stage_drops_stage_without_execution() {
        let state = StageState::builder()
            .stage_name("Source")
            .action_states(ActionState::builder().action_name("Checkout").build())
            .build();
        assert!(map_stage(&state).is_none());
    }

    #[test]
    fn to_utc_converts_epoch_seconds() {
        let converted = to_utc(&AwsDateTime::from_secs(0)).unwrap();
        assert_eq!(converted.timestamp(), 0);
    }
}
