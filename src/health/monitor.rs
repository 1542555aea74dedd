//! Availability monitoring with a bounded wait.
//!
//! # Responsibilities
//! - Probe a target once and return immediately if it is up
//! - Otherwise re-probe after each backoff segment until the budget runs out
//!
//! # Design Decisions
//! - Runs on the calling task; no background scheduler
//! - No errors escape: the answer is always a boolean
//! - Stops probing on the first success

use crate::config::Topology;
use crate::health::probe::Probe;
use crate::health::target::Target;
use crate::observability::metrics;
use crate::resilience::backoff::{BackoffBudget, BudgetError, Sleeper, TokioSleeper};

/// Polls targets for liveness.
#[derive(Debug, Clone)]
pub struct AvailabilityMonitor<P, S = TokioSleeper> {
    probe: P,
    sleeper: S,
}

impl<P: Probe> AvailabilityMonitor<P> {
    pub fn new(probe: P) -> Self {
        Self::with_sleeper(probe, TokioSleeper)
    }
}

impl<P: Probe, S: Sleeper> AvailabilityMonitor<P, S> {
    pub fn with_sleeper(probe: P, sleeper: S) -> Self {
        Self { probe, sleeper }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Return whether `target` is up, waiting at most the budget's ceiling for it to recover.
    pub async fn active(&self, budget: BackoffBudget, target: &Target) -> bool {
        let up = self.poll(budget, target).await;
        metrics::record_availability(target.label(), up);
        up
    }

    /// [`active`](Self::active) with the topology's budget for the target kind.
    pub async fn active_with_defaults(
        &self,
        topology: &Topology,
        target: &Target,
    ) -> Result<bool, BudgetError> {
        let budget = default_budget(topology, target)?;
        Ok(self.active(budget, target).await)
    }

    async fn poll(&self, budget: BackoffBudget, target: &Target) -> bool {
        if self.probe.probe(target).await {
            return true;
        }

        tracing::warn!(
            target_id = %target,
            wait_secs = budget.wait().as_secs_f64(),
            "Target is down, waiting for it to restart"
        );

        let mut segments = budget.segments();
        while let Some(step) = segments.next() {
            self.sleeper.sleep(step).await;

            if self.probe.probe(target).await {
                tracing::info!(
                    target_id = %target,
                    elapsed_secs = segments.elapsed().as_secs_f64(),
                    "Target is up again, continuing"
                );
                return true;
            }
        }

        tracing::warn!(
            target_id = %target,
            wait_secs = budget.wait().as_secs_f64(),
            "Target remains unreachable"
        );
        false
    }
}

/// The wait budget the harness uses for a target kind.
pub fn default_budget(topology: &Topology, target: &Target) -> Result<BackoffBudget, BudgetError> {
    let intervals = &topology.intervals;
    let wait = match target {
        Target::ProxyManager => intervals.proxy_mgr_wait(),
        Target::Tool(_) => intervals.proxy_wait(),
    };
    BackoffBudget::new(wait, intervals.poll_interval())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers from a script; `false` once the script runs out.
    struct ScriptedProbe {
        answers: Mutex<VecDeque<bool>>,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn down() -> Self {
            Self::new(&[])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Probe for ScriptedProbe {
        fn probe(&self, _target: &Target) -> impl Future<Output = bool> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let answer = self.answers.lock().unwrap().pop_front().unwrap_or(false);
            std::future::ready(answer)
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    impl Sleeper for &RecordingSleeper {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
            self.sleeps.lock().unwrap().push(duration);
            std::future::ready(())
        }
    }

    fn secs(wait: u64, interval: u64) -> BackoffBudget {
        BackoffBudget::from_secs(wait, interval).unwrap()
    }

    #[tokio::test]
    async fn test_up_immediately_never_sleeps() {
        let sleeper = RecordingSleeper::default();
        let monitor = AvailabilityMonitor::with_sleeper(ScriptedProbe::new(&[true]), &sleeper);

        assert!(monitor.active(secs(30, 3), &Target::tool("search")).await);
        assert_eq!(monitor.probe().calls(), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_zero_budget_is_single_probe() {
        for answer in [true, false] {
            let sleeper = RecordingSleeper::default();
            let monitor = AvailabilityMonitor::with_sleeper(ScriptedProbe::new(&[answer, true]), &sleeper);

            assert_eq!(monitor.active(secs(0, 3), &Target::ProxyManager).await, answer);
            assert_eq!(monitor.probe().calls(), 1);
            assert!(sleeper.sleeps().is_empty());
        }
    }

    #[tokio::test]
    async fn test_never_up_sleeps_exactly_the_budget() {
        for (wait, interval) in [(10, 3), (30, 3), (2, 5), (7, 1)] {
            let sleeper = RecordingSleeper::default();
            let monitor = AvailabilityMonitor::with_sleeper(ScriptedProbe::down(), &sleeper);

            assert!(!monitor.active(secs(wait, interval), &Target::tool("weather")).await);

            let sleeps = sleeper.sleeps();
            let total: Duration = sleeps.iter().sum();
            assert_eq!(total, Duration::from_secs(wait));
            assert!(sleeps.iter().all(|s| *s <= Duration::from_secs(interval)));
            assert_eq!(monitor.probe().calls(), sleeps.len() + 1);
        }
    }

    #[tokio::test]
    async fn test_recovers_on_kth_poll_and_stops() {
        let k = 3;
        let mut script = vec![false; k];
        script.push(true);
        script.push(false);

        let sleeper = RecordingSleeper::default();
        let monitor = AvailabilityMonitor::with_sleeper(ScriptedProbe::new(&script), &sleeper);

        assert!(monitor.active(secs(30, 3), &Target::tool("movie")).await);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(3); k]);
        assert_eq!(monitor.probe().calls(), k + 1);
    }

    #[tokio::test]
    async fn test_recovers_on_truncated_last_segment() {
        let sleeper = RecordingSleeper::default();
        let monitor = AvailabilityMonitor::with_sleeper(
            ScriptedProbe::new(&[false, false, false, false, true]),
            &sleeper,
        );

        assert!(monitor.active(secs(10, 3), &Target::ProxyManager).await);
        assert_eq!(
            sleeper.sleeps(),
            vec![
                Duration::from_secs(3),
                Duration::from_secs(3),
                Duration::from_secs(3),
                Duration::from_secs(1),
            ]
        );
    }

    #[test]
    fn test_default_budgets_per_target_kind() {
        let topology = Topology::default();

        let tool = default_budget(&topology, &Target::tool("search")).unwrap();
        assert_eq!(tool.wait(), Duration::from_secs(30));
        assert_eq!(tool.interval(), Duration::from_secs(3));

        let manager = default_budget(&topology, &Target::ProxyManager).unwrap();
        assert_eq!(manager.wait(), Duration::from_secs(40));
    }

    #[tokio::test]
    async fn test_zero_poll_interval_in_topology_is_rejected() {
        let mut topology = Topology::default();
        topology.intervals.proxy_check_interval_secs = 0;
        let sleeper = RecordingSleeper::default();
        let monitor = AvailabilityMonitor::with_sleeper(ScriptedProbe::down(), &sleeper);

        let result = monitor.active_with_defaults(&topology, &Target::ProxyManager).await;
        assert_eq!(result, Err(BudgetError::ZeroInterval));
        assert_eq!(monitor.probe().calls(), 0);
    }
}
