// Metrics hooks for the `matcher` crate.
//
// Callers attach a `MatchMetrics` implementation to a `PresenceMatcher` via
// `with_metrics`; the matcher then reports latency and the finished result for
// every call to `analyze`. The observer is owned by the matcher instance, so
// two matchers never share instrumentation state.
use std::time::Duration;

use crate::types::AnalysisResult;

/// Metrics observer for analysis calls.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one analysis.
    ///
    /// `latency` is the wall-clock duration of the call and `result` the value
    /// about to be returned to the caller.
    fn record_analysis(&self, business_name: &str, latency: Duration, result: &AnalysisResult);
}
