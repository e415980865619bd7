//! Placement run configuration.

/// Probability that a placement is rejected right after it is made.
pub const DEFAULT_REJECTION_PROBABILITY: f64 = 0.30;

/// Consecutive rounds without a placement before the phase escalates.
pub const DEFAULT_STALL_LIMIT: usize = 5;

/// Configuration shared by both placement strategies.
///
/// # Examples
///
/// ```
/// use u_placement::round::PlacementConfig;
///
/// let config = PlacementConfig::default()
///     .with_rejection_probability(0.1)
///     .with_stall_limit(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementConfig {
    /// Chance, in `[0, 1)`, that each placement of phases 1–2 is undone
    /// at the end of its round. At 1.0 no placement could ever stick.
    pub rejection_probability: f64,

    /// Consecutive non-progress rounds that trigger a phase escalation.
    pub stall_limit: usize,

    /// Hard budget on rounds. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            rejection_probability: DEFAULT_REJECTION_PROBABILITY,
            stall_limit: DEFAULT_STALL_LIMIT,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl PlacementConfig {
    pub fn with_rejection_probability(mut self, p: f64) -> Self {
        self.rejection_probability = p;
        self
    }

    pub fn with_stall_limit(mut self, n: usize) -> Self {
        self.stall_limit = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.rejection_probability) {
            return Err(format!(
                "rejection_probability must be in [0, 1), got {}",
                self.rejection_probability
            ));
        }
        if self.stall_limit == 0 {
            return Err("stall_limit must be positive".into());
        }
        Ok(())
    }
}
