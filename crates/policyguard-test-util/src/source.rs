use async_trait::async_trait;
use policyguard_engine::PoliciesSource;
use policyguard_types::{Entity, Policy, PolicyConfig};

/// In-memory source returning the same policies and config for every entity.
#[derive(Clone, Debug, Default)]
pub struct StaticPoliciesSource {
    pub policies: Vec<Policy>,
    pub config: PolicyConfig,
}

impl StaticPoliciesSource {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies,
            config: PolicyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PolicyConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl PoliciesSource for StaticPoliciesSource {
    async fn get_all(&self) -> anyhow::Result<Vec<Policy>> {
        Ok(self.policies.clone())
    }

    async fn get_policy_config(&self, _entity: &Entity) -> anyhow::Result<PolicyConfig> {
        Ok(self.config.clone())
    }
}

/// Source that fails one of its two calls.
#[derive(Clone, Copy, Debug)]
pub enum FailingSource {
    Policies,
    PolicyConfig,
}

#[async_trait]
impl PoliciesSource for FailingSource {
    async fn get_all(&self) -> anyhow::Result<Vec<Policy>> {
        match self {
            FailingSource::Policies => anyhow::bail!("policy store unavailable"),
            FailingSource::PolicyConfig => Ok(Vec::new()),
        }
    }

    async fn get_policy_config(&self, _entity: &Entity) -> anyhow::Result<PolicyConfig> {
        match self {
            FailingSource::Policies => Ok(PolicyConfig::default()),
            FailingSource::PolicyConfig => anyhow::bail!("config store unavailable"),
        }
    }
}
