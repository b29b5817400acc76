//! Run configuration.
//!
//! A [`RunConfig`] fixes everything about a run except the graph and the
//! source: the weight budget, the propagation strategy, an optional step
//! budget for caller-imposed cancellation, and how often the cooperative
//! runner yields.
//!
//! Configurations are plain serde data so they can be read from JSON:
//!
//! ```text
//! { "weight_budget": 6, "strategy": "correcting", "max_steps": 10000 }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Resource;
use crate::{Error, Result};

/// Default number of steps between two yields of the cooperative runner.
pub const DEFAULT_YIELD_EVERY: u64 = 256;

// ============================================================================
// Strategy
// ============================================================================

/// Propagation strategy, resolved once at run entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Label-correcting: FIFO worklist of dirty nodes, revisits allowed.
    Correcting,
    /// Label-setting: global (weight, cost) priority order, each label
    /// extended at most once.
    #[default]
    Setting,
    /// Enumerate every simple path. Exponential; an oracle for small graphs.
    Exhaustive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Correcting, Strategy::Setting, Strategy::Exhaustive];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Correcting => "correcting",
            Strategy::Setting => "setting",
            Strategy::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correcting" => Ok(Strategy::Correcting),
            "setting" => Ok(Strategy::Setting),
            "exhaustive" => Ok(Strategy::Exhaustive),
            other => Err(Error::InvalidConfig(format!("unknown strategy '{other}'"))),
        }
    }
}

// ============================================================================
// RunConfig
// ============================================================================

fn default_yield_every() -> u64 {
    DEFAULT_YIELD_EVERY
}

/// Parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Upper bound on accumulated weight; must be non-negative.
    pub weight_budget: Resource,
    #[serde(default)]
    pub strategy: Strategy,
    /// Fail with `StepLimitExceeded` once a run needs more steps than this.
    #[serde(default)]
    pub max_steps: Option<u64>,
    /// Steps between yields of the cooperative runner.
    #[serde(default = "default_yield_every")]
    pub yield_every: u64,
}

impl RunConfig {
    pub fn new(weight_budget: Resource, strategy: Strategy) -> Self {
        Self {
            weight_budget,
            strategy,
            max_steps: None,
            yield_every: DEFAULT_YIELD_EVERY,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_yield_every(mut self, yield_every: u64) -> Self {
        self.yield_every = yield_every;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration before any propagation happens.
    pub fn validate(&self) -> Result<()> {
        if self.weight_budget < 0 {
            return Err(Error::InvalidBudget(self.weight_budget));
        }
        if self.yield_every == 0 {
            return Err(Error::InvalidConfig("yield_every must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse_and_display() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(" Correcting ".parse::<Strategy>().unwrap(), Strategy::Correcting);
        assert!(matches!("dijkstra".parse::<Strategy>(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = RunConfig::from_json(r#"{"weight_budget": 6}"#).unwrap();
        assert_eq!(config, RunConfig::new(6, Strategy::Setting));
    }

    #[test]
    fn test_from_json_full() {
        let config = RunConfig::from_json(
            r#"{"weight_budget": 3, "strategy": "exhaustive", "max_steps": 50, "yield_every": 8}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            RunConfig::new(3, Strategy::Exhaustive).with_max_steps(50).with_yield_every(8)
        );
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            RunConfig::from_json(r#"{"weight_budget": -1}"#),
            Err(Error::InvalidBudget(-1))
        ));
        assert!(matches!(
            RunConfig::new(1, Strategy::Setting).with_yield_every(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_json(r#"{"weight_budget": 1, "strategy": "greedy"}"#),
            Err(Error::Json(_))
        ));
    }
}
