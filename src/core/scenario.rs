use crate::core::{Result, Town};
use crate::domain::model::{ScenarioReport, Step, StepOutcome, StepReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Continue,
}

impl ErrorPolicy {
    pub const VALUES: [&'static str; 2] = ["abort", "continue"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "abort" => Some(ErrorPolicy::Abort),
            "continue" => Some(ErrorPolicy::Continue),
            _ => None,
        }
    }
}

pub struct ScenarioRunner {
    name: String,
    policy: ErrorPolicy,
}

impl ScenarioRunner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 依序執行每個步驟，並在每步之後記錄整個城鎮的狀態
    pub fn run(&self, town: &Town, steps: &[Step]) -> Result<ScenarioReport> {
        tracing::info!("Running scenario '{}' ({} steps)", self.name, steps.len());

        let mut reports = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let outcome = match town.apply(step) {
                Ok(outcome) => outcome,
                Err(e) if self.policy == ErrorPolicy::Continue => {
                    tracing::warn!("Step {} ({:?}) failed, continuing: {}", index, step, e);
                    StepOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!("Step {} ({:?}) failed: {}", index, step, e);
                    return Err(e);
                }
            };

            tracing::debug!("Step {}: {}", index, outcome);
            reports.push(StepReport {
                index,
                step: step.clone(),
                outcome,
                snapshot: town.snapshot(),
            });
        }

        let final_state = town.snapshot();
        tracing::info!("Scenario '{}' finished: {:?}", self.name, final_state);

        Ok(ScenarioReport {
            name: self.name.clone(),
            steps: reports,
            final_state,
        })
    }
}
