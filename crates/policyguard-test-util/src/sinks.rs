use async_trait::async_trait;
use policyguard_engine::PolicyValidationSink;
use policyguard_types::PolicyValidationSummary;
use std::sync::{Mutex, PoisonError};

/// Records every write as `(summary, include_compliances)`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<(PolicyValidationSummary, bool)>>,
}

impl RecordingSink {
    pub fn writes(&self) -> Vec<(PolicyValidationSummary, bool)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PolicyValidationSink for RecordingSink {
    async fn write(
        &self,
        summary: &PolicyValidationSummary,
        include_compliances: bool,
    ) -> anyhow::Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((summary.clone(), include_compliances));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FailingSink;

#[async_trait]
impl PolicyValidationSink for FailingSink {
    async fn write(
        &self,
        _summary: &PolicyValidationSummary,
        _include_compliances: bool,
    ) -> anyhow::Result<()> {
        anyhow::bail!("sink unavailable")
    }
}
