//! Configuration for the daily challenge engine.

use serde::{Deserialize, Serialize};

/// Streak lengths that earn a one-time reward.
pub const DEFAULT_MILESTONES: [u32; 5] = [7, 14, 30, 50, 100];

/// When the one-day grace period is spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GracePolicy {
    /// Spend the grace only when a challenge is actually completed across a
    /// two-day gap. Merely opening the app on the gap day costs nothing.
    #[default]
    OnCompletion,
    /// Spend the grace as soon as the daily check sees a two-day gap.
    OnDetection,
}

impl GracePolicy {
    /// Parse a policy name such as `"on-completion"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "on-completion" | "completion" => Some(Self::OnCompletion),
            "on-detection" | "detection" => Some(Self::OnDetection),
            _ => None,
        }
    }
}

/// Configuration for a daily challenge engine.
#[derive(Debug, Clone)]
pub struct DailyConfig {
    /// Grace period policy.
    pub grace_policy: GracePolicy,
    /// Streak lengths that earn a reward.
    pub milestones: Vec<u32>,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            grace_policy: GracePolicy::default(),
            milestones: DEFAULT_MILESTONES.to_vec(),
        }
    }
}

impl DailyConfig {
    /// Set the grace policy.
    pub fn with_grace_policy(mut self, policy: GracePolicy) -> Self {
        self.grace_policy = policy;
        self
    }

    /// Replace the milestone list. Zero-length streaks are ignored.
    pub fn with_milestones(mut self, milestones: impl IntoIterator<Item = u32>) -> Self {
        self.milestones = milestones.into_iter().filter(|m| *m > 0).collect();
        self.milestones.sort_unstable();
        self.milestones.dedup();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = DailyConfig::default();
        assert_eq!(cfg.grace_policy, GracePolicy::OnCompletion);
        assert_eq!(cfg.milestones, vec![7, 14, 30, 50, 100]);
    }

    #[test]
    fn builder_methods() {
        let cfg = DailyConfig::default()
            .with_grace_policy(GracePolicy::OnDetection)
            .with_milestones([30, 0, 3, 30]);
        assert_eq!(cfg.grace_policy, GracePolicy::OnDetection);
        assert_eq!(cfg.milestones, vec![3, 30]);
    }

    #[test]
    fn parse_policy() {
        assert_eq!(GracePolicy::parse("on_detection"), Some(GracePolicy::OnDetection));
        assert_eq!(GracePolicy::parse("Completion"), Some(GracePolicy::OnCompletion));
        assert_eq!(GracePolicy::parse("never"), None);
    }
}
