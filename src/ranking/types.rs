//! Core trait for ranking rules.

/// A scoring rule that assigns a desirability value to an item.
///
/// Rules return `f64` scores where **higher is more desirable**. Both
/// placement strategies rank by descending score: candidates by priority,
/// candidate–slot pairs by match quality.
///
/// # Type Parameters
///
/// * `T` - The item type being scored
/// * `C` - The context type providing state information
///
/// # Examples
///
/// ```
/// use u_placement::ranking::RankRule;
///
/// struct Headroom;
///
/// impl RankRule<(usize, usize), ()> for Headroom {
///     fn name(&self) -> &str { "Headroom" }
///     fn score(&self, &(remaining, capacity): &(usize, usize), _ctx: &()) -> f64 {
///         remaining as f64 / capacity as f64
///     }
/// }
/// ```
pub trait RankRule<T, C>: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the score of `item`. Higher scores rank first.
    fn score(&self, item: &T, context: &C) -> f64;
}
