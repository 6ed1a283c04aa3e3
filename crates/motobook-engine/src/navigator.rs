//! Finite-state sequencer over the funnel's ordered steps.
//!
//! History is a breadcrumb trail of visited main-flow steps. Jumps to the
//! result states never touch history, so `prev()` and `reset()` stay
//! meaningful after a payment failure.

use motobook_types::Step;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNavigator {
    current: Step,
    history: Vec<Step>,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl StepNavigator {
    pub fn new() -> Self {
        StepNavigator { current: Step::Configuration, history: vec![Step::Configuration] }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn history(&self) -> &[Step] {
        &self.history
    }

    /// Advance to the following main step, if one exists. Appends to the
    /// history unless it is already the most recent entry.
    pub fn next(&mut self) -> Option<Step> {
        let following = self.current.following()?;
        self.current = following;
        if self.history.last() != Some(&following) {
            self.history.push(following);
        }
        Some(following)
    }

    /// Step back to the entry visited immediately before the current step's
    /// last occurrence in history, truncating the trail to that point.
    ///
    /// At the initial step this is a no-op. From a result state (which is
    /// never recorded) it returns to the most recent history entry.
    pub fn prev(&mut self) -> Option<Step> {
        if self.current.is_result() {
            let last = *self.history.last()?;
            self.current = last;
            return Some(last);
        }

        let position = self.history.iter().rposition(|s| *s == self.current)?;
        if position == 0 {
            return None;
        }
        self.history.truncate(position);
        let previous = *self.history.last()?;
        self.current = previous;
        Some(previous)
    }

    /// Unconditional jump. Main-flow targets rewrite history like a
    /// breadcrumb: truncate to the target's last occurrence, or append.
    /// Result-state targets leave history untouched.
    pub fn go_to(&mut self, step: Step) {
        self.current = step;
        if step.is_result() {
            return;
        }
        match self.history.iter().rposition(|s| *s == step) {
            Some(position) => self.history.truncate(position + 1),
            None => self.history.push(step),
        }
    }

    /// Back to the initial step with a fresh trail.
    pub fn reset(&mut self) {
        self.current = Step::Configuration;
        self.history = vec![Step::Configuration];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_returns_to_previously_visited_step() {
        let mut nav = StepNavigator::new();
        nav.next();
        nav.next();
        assert_eq!(nav.current(), Step::Financing);
        assert_eq!(nav.prev(), Some(Step::Insurance));
        assert_eq!(nav.prev(), Some(Step::Configuration));
        assert_eq!(nav.prev(), None);
        assert_eq!(nav.current(), Step::Configuration);
    }

    #[test]
    fn test_next_walks_the_main_flow() {
        let mut nav = StepNavigator::new();
        while nav.next().is_some() {}
        assert_eq!(nav.current(), Step::Otp);
        assert_eq!(nav.history(), Step::MAIN_FLOW);
    }

    #[test]
    fn test_next_is_noop_on_last_main_step() {
        let mut nav = StepNavigator::new();
        while nav.next().is_some() {}
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), Step::Otp);
    }

    #[test]
    fn test_go_to_rewrites_breadcrumb() {
        let mut nav = StepNavigator::new();
        nav.next();
        nav.next();
        nav.next();
        nav.go_to(Step::Insurance);
        assert_eq!(nav.current(), Step::Insurance);
        assert_eq!(nav.history(), &[Step::Configuration, Step::Insurance]);
    }

    #[test]
    fn test_result_jump_leaves_history_intact() {
        let mut nav = StepNavigator::new();
        nav.next();
        nav.next();
        nav.next();
        nav.next();
        let trail = nav.history().to_vec();
        nav.go_to(Step::Failure);
        assert_eq!(nav.current(), Step::Failure);
        assert_eq!(nav.history(), trail);
    }

    #[test]
    fn test_prev_from_result_state_returns_to_last_entry() {
        let mut nav = StepNavigator::new();
        nav.next();
        nav.next();
        nav.go_to(Step::Failure);
        assert_eq!(nav.prev(), Some(Step::Financing));
        assert_eq!(nav.history(), &[Step::Configuration, Step::Insurance, Step::Financing]);
    }

    #[test]
    fn test_prev_after_jump_past_current() {
        // Jump forward to a never-visited step, then back down the trail.
        let mut nav = StepNavigator::new();
        nav.go_to(Step::PersonalInfo);
        assert_eq!(nav.history(), &[Step::Configuration, Step::PersonalInfo]);
        assert_eq!(nav.prev(), Some(Step::Configuration));
    }

    #[test]
    fn test_reset_restores_initial_trail() {
        let mut nav = StepNavigator::new();
        nav.next();
        nav.next();
        nav.go_to(Step::Success);
        nav.reset();
        assert_eq!(nav.current(), Step::Configuration);
        assert_eq!(nav.history(), &[Step::Configuration]);
    }
}
