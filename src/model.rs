use std::fmt;

use chrono::{DateTime, Utc};

/// Status of a pipeline execution or of a stage's latest action.
///
/// `Other` carries any wire value outside the closed set (for example the
/// action-level "Abandoned") so parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Failed,
    Succeeded,
    Stopped,
    Stopping,
    Superseded,
    Cancelled,
    Other(String),
}

impl Status {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "InProgress" => Status::InProgress,
            "Failed" => Status::Failed,
            "Succeeded" => Status::Succeeded,
            "Stopped" => Status::Stopped,
            "Stopping" => Status::Stopping,
            "Superseded" => Status::Superseded,
            "Cancelled" => Status::Cancelled,
            other => Status::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::InProgress => "InProgress",
            Status::Failed => "Failed",
            Status::Succeeded => "Succeeded",
            Status::Stopped => "Stopped",
            Status::Stopping => "Stopping",
            Status::Superseded => "Superseded",
            Status::Cancelled => "Cancelled",
            Status::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stage a pipeline is currently at, as reported by its state lookup.
///
/// `approval_token` is only present while the stage's action is a pending
/// manual approval; it is required to submit a decision for that action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInfo {
    pub stage_name: String,
    pub action_name: String,
    pub status: Status,
    pub approval_token: Option<String>,
}

/// One stage's state as fed into the current-stage scan.
#[derive(Debug, Clone)]
pub struct StageState {
    pub info: StageInfo,
    pub last_status_change: Option<DateTime<Utc>>,
}

/// Summary of a pipeline's most recent execution.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    pub status: Status,
    pub last_update: Option<DateTime<Utc>>,
    pub revision_summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApprovalDecision::Approved => "Approved",
            ApprovalDecision::Rejected => "Rejected",
        })
    }
}

/// Picks the stage a pipeline is currently at from its stage states, given in
/// pipeline declaration order.
///
/// An InProgress or Failed latest action means the pipeline sits at that stage
/// right now, so the first such stage wins. Otherwise the stage with the most
/// recent `last_status_change` is returned; on equal timestamps the later
/// stage in declaration order wins. Stages that have never executed carry no
/// timestamp and are skipped, so a pipeline with no history yields `None`.
pub fn current_stage(states: &[StageState]) -> Option<StageInfo> {
    let mut latest: Option<(DateTime<Utc>, &StageInfo)> = None;

    for state in states {
        match state.info.status {
            Status::InProgress | Status::Failed => return Some(state.info.clone()),
            _ => {}
        }

        let Some(changed) = state.last_status_change else {
            continue;
        };
        match latest {
            Some((best, _)) if changed < best => {}
            _ => latest = Some((changed, &state.info)),
        }
    }

    latest.map(|(_, info)| info.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stage(name: &str, status: Status, changed_at: Option<i64>) -> StageState {
        StageState {
            info: StageInfo {
                stage_name: name.to_owned(),
                action_name: format!("{name}Action"),
                status,
                approval_token: None,
            },
            last_status_change: changed_at.map(|secs| Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }

    #[test]
    fn status_parse_round_trips_known_values() {
        for raw in [
            "InProgress",
            "Failed",
            "Succeeded",
            "Stopped",
            "Stopping",
            "Superseded",
            "Cancelled",
        ] {
            assert_eq!(Status::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn status_parse_keeps_unknown_values() {
        assert_eq!(
            Status::parse("Abandoned"),
            Status::Other("Abandoned".to_owned())
        );
        assert_eq!(Status::parse("Abandoned").to_string(), "Abandoned");
    }

    #[test]
    fn first_in_progress_stage_wins() {
        let states = vec![
            stage("Source", Status::Succeeded, Some(100)),
            stage("Gate", Status::InProgress, Some(50)),
            stage("Deploy", Status::InProgress, Some(200)),
        ];
        assert_eq!(current_stage(&states).unwrap().stage_name, "Gate");
    }

    #[test]
    fn failed_stage_wins_over_more_recent_succeeded() {
        let states = vec![
            stage("Source", Status::Failed, Some(10)),
            stage("Deploy", Status::Succeeded, Some(500)),
        ];
        assert_eq!(current_stage(&states).unwrap().stage_name, "Source");
    }

    #[test]
    fn most_recently_changed_stage_wins_when_none_active() {
        let states = vec![
            stage("Source", Status::Succeeded, Some(300)),
            stage("Build", Status::Succeeded, Some(900)),
            stage("Deploy", Status::Succeeded, Some(600)),
        ];
        assert_eq!(current_stage(&states).unwrap().stage_name, "Build");
    }

    #[test]
    fn timestamp_ties_go_to_later_declaration_order() {
        let states = vec![
            stage("Source", Status::Succeeded, Some(700)),
            stage("Deploy", Status::Succeeded, Some(700)),
        ];
        assert_eq!(current_stage(&states).unwrap().stage_name, "Deploy");
    }

    #[test]
    fn stages_without_history_are_skipped() {
        let states = vec![
            stage("Source", Status::Succeeded, Some(100)),
            stage("Deploy", Status::Succeeded, None),
        ];
        assert_eq!(current_stage(&states).unwrap().stage_name, "Source");
    }

    #[test]
    fn no_executed_stage_yields_none() {
        let states = vec![
            stage("Source", Status::Succeeded, None),
            stage("Deploy", Status::Succeeded, None),
        ];
        assert!(current_stage(&states).is_none());
        assert!(current_stage(&[]).is_none());
    }
}
