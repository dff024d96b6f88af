mod aws;

pub use aws::{load_sdk_config, AwsCodePipeline};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{ApprovalDecision, ExecutionSummary, StageInfo};

/// Remote pipeline directory operations, one method per API round-trip.
///
/// Command flows only see this trait; the AWS implementation lives in
/// [`aws`], and tests drive the flows with an in-memory stub.
#[async_trait]
pub trait PipelineService {
    /// Names of every pipeline in the account whose name contains `filter`.
    /// An empty filter matches everything.
    async fn list_pipeline_names(&self, filter: &str) -> Result<Vec<String>>;

    /// Summary of the most recent execution, or `None` if the pipeline has
    /// never run.
    async fn latest_execution(&self, name: &str) -> Result<Option<ExecutionSummary>>;

    /// The stage the pipeline currently sits at: the first stage whose latest
    /// action is InProgress or Failed, otherwise the most recently changed
    /// one. `None` if no stage has executed yet.
    async fn current_stage(&self, name: &str) -> Result<Option<StageInfo>>;

    /// Starts an execution and returns its id.
    async fn start_execution(&self, name: &str) -> Result<String>;

    /// Submits an approval decision for the stage's pending manual action.
    async fn submit_approval(
        &self,
        name: &str,
        stage: &StageInfo,
        decision: ApprovalDecision,
        summary: &str,
    ) -> Result<()>;

    /// ARN of the caller, for approval summaries.
    async fn caller_identity(&self) -> Result<String>;
}
