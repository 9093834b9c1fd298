use crate::config::SearchParams;

/// Adaptive randomization budget.
///
/// Tracks the best score seen by one engine. Each generation that fails to beat it grows
/// the number of population slots refilled at random; an improvement resets the budget.
/// Once the budget would pass the limit, the stagnation clock restarts from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiversifyController {
    stagnation_best: u64,
    count: usize,
    initial: usize,
    step: usize,
    limit: usize,
}

impl DiversifyController {
    pub fn new(initial: usize, step: usize, limit: usize) -> Self {
        Self {
            stagnation_best: 0,
            count: initial,
            initial,
            step,
            limit,
        }
    }

    pub fn from_params(params: &SearchParams) -> Self {
        Self::new(
            params.diversify_initial,
            params.diversify_step,
            params.diversify_limit,
        )
    }

    /// Feeds this generation's top score; returns the randomize count for the next round.
    pub fn observe(&mut self, top_score: u64) -> usize {
        if top_score > self.stagnation_best {
            self.stagnation_best = top_score;
            self.count = self.initial;
        } else {
            self.count += self.step;
            if self.count > self.limit {
                self.stagnation_best = 0;
                self.count = self.initial;
            }
        }
        self.count
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn stagnation_best(&self) -> u64 {
        self.stagnation_best
    }
}

impl Default for DiversifyController {
    fn default() -> Self {
        Self::from_params(&SearchParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_starts_at_initial() {
        let ctl = DiversifyController::default();
        assert_eq!(ctl.count(), 100);
        assert_eq!(ctl.stagnation_best(), 0);
    }

    #[rstest]
    #[case::improving(&[10, 20, 30], &[100, 100, 100])]
    #[case::stalled(&[10, 10, 10, 5], &[100, 110, 120, 130])]
    #[case::recovers(&[10, 10, 10, 11], &[100, 110, 120, 100])]
    fn test_count_sequence(#[case] scores: &[u64], #[case] expected: &[usize]) {
        let mut ctl = DiversifyController::default();
        let counts: Vec<usize> = scores.iter().map(|&s| ctl.observe(s)).collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_restart_after_limit() {
        let mut ctl = DiversifyController::default();
        ctl.observe(500);
        // 89 stalls take the count from 100 to 990, still within the limit.
        for _ in 0..89 {
            ctl.observe(500);
        }
        assert_eq!(ctl.count(), 990);
        assert_eq!(ctl.stagnation_best(), 500);

        // The next stall would reach 1000: everything restarts.
        assert_eq!(ctl.observe(500), 100);
        assert_eq!(ctl.stagnation_best(), 0);

        // With the best cleared, the same score counts as an improvement again.
        assert_eq!(ctl.observe(500), 100);
        assert_eq!(ctl.stagnation_best(), 500);
    }
}
