//! Skip-aware step navigation and progress

use super::catalog::{INVITE_TEAM_MEMBERS, TEAM_INVITATIONS};
use super::form::FormState;
use super::types::Step;

/// A step that is bypassed while `predicate` holds for the current form
#[derive(Clone)]
pub struct SkipRule {
    pub step_id: &'static str,
    predicate: fn(&FormState) -> bool,
}

impl SkipRule {
    pub fn new(step_id: &'static str, predicate: fn(&FormState) -> bool) -> Self {
        Self { step_id, predicate }
    }

    pub fn applies(&self, step_id: &str, form: &FormState) -> bool {
        self.step_id == step_id && (self.predicate)(form)
    }
}

impl std::fmt::Debug for SkipRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipRule")
            .field("step_id", &self.step_id)
            .finish_non_exhaustive()
    }
}

/// The team invitations page is skipped when the user declined invites
pub fn team_invitation_skip_rule() -> SkipRule {
    SkipRule::new(TEAM_INVITATIONS, |form| {
        form.text(INVITE_TEAM_MEMBERS) == "no"
    })
}

/// Ordered, immutable step list plus the skip rules evaluated against it
#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: Vec<Step>,
    skip_rules: Vec<SkipRule>,
}

impl StepSequencer {
    pub fn new(steps: Vec<Step>, skip_rules: Vec<SkipRule>) -> Self {
        Self { steps, skip_rules }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.steps.len()
    }

    /// Whether the step at `index` is bypassed for this form
    pub fn is_skipped(&self, index: usize, form: &FormState) -> bool {
        self.steps
            .get(index)
            .is_some_and(|step| self.skip_rules.iter().any(|r| r.applies(step.id, form)))
    }

    /// Index after `current`, passing over skipped steps.
    ///
    /// May return `len()` when `current` is the last visitable step; the
    /// caller treats that as "submit" rather than navigation.
    pub fn next_index(&self, current: usize, form: &FormState) -> usize {
        let mut next = current + 1;
        while next < self.steps.len() && self.is_skipped(next, form) {
            next += 1;
        }
        next
    }

    /// Index before `current`, passing over skipped steps.
    ///
    /// Returns `None` when there is no earlier visitable step.
    pub fn prev_index(&self, current: usize, form: &FormState) -> Option<usize> {
        let mut prev = current.checked_sub(1)?;
        while self.is_skipped(prev, form) {
            prev = prev.checked_sub(1)?;
        }
        Some(prev)
    }

    /// Indices a user would visit from the first step, in order
    pub fn visitable(&self, form: &FormState) -> Vec<usize> {
        (0..self.steps.len())
            .filter(|&i| !self.is_skipped(i, form))
            .collect()
    }
}

/// `(current + 1) / total * 100`; reaches 100 only at the last index
pub fn progress_percent(current: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (current + 1) as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::catalog::brand_onboarding_steps;
    use crate::wizard::types::{Step, StepKind};

    fn sequencer() -> StepSequencer {
        StepSequencer::new(brand_onboarding_steps(), vec![team_invitation_skip_rule()])
    }

    fn form_with_invite(choice: &str) -> FormState {
        let mut form = FormState::new();
        form.set(INVITE_TEAM_MEMBERS, choice);
        form
    }

    #[test]
    fn test_next_index_is_plus_one_without_skip() {
        let seq = sequencer();
        let form = FormState::new();
        for i in 0..seq.len() {
            assert_eq!(seq.next_index(i, &form), i + 1);
        }
    }

    #[test]
    fn test_skip_symmetry_when_invites_declined() {
        let seq = sequencer();
        let k = seq.position(TEAM_INVITATIONS).unwrap();
        let form = form_with_invite("no");

        assert_eq!(seq.next_index(k - 1, &form), k + 1);
        assert_eq!(seq.prev_index(k + 1, &form), Some(k - 1));
    }

    #[test]
    fn test_team_step_visited_when_invites_accepted() {
        let seq = sequencer();
        let k = seq.position(TEAM_INVITATIONS).unwrap();
        let form = form_with_invite("yes");

        assert_eq!(seq.next_index(k - 1, &form), k);
        assert_eq!(seq.prev_index(k + 1, &form), Some(k));
    }

    #[test]
    fn test_team_step_visited_when_choice_empty() {
        let seq = sequencer();
        let k = seq.position(TEAM_INVITATIONS).unwrap();
        assert!(!seq.is_skipped(k, &FormState::new()));
    }

    #[test]
    fn test_prev_index_at_start() {
        let seq = sequencer();
        assert_eq!(seq.prev_index(0, &FormState::new()), None);
        assert_eq!(seq.prev_index(1, &FormState::new()), Some(0));
    }

    #[test]
    fn test_next_index_past_end_signals_submit() {
        let seq = sequencer();
        let last = seq.len() - 1;
        assert!(seq.is_last(last));
        assert_eq!(seq.next_index(last, &FormState::new()), seq.len());
    }

    #[test]
    fn test_consecutive_skipped_steps() {
        let steps = vec![
            Step::new("a", "A", StepKind::Text),
            Step::new("b", "B", StepKind::Text),
            Step::new("c", "C", StepKind::Text),
            Step::new("d", "D", StepKind::Review),
        ];
        let rules = vec![
            SkipRule::new("b", |f| f.text("mode") == "short"),
            SkipRule::new("c", |f| f.text("mode") == "short"),
        ];
        let seq = StepSequencer::new(steps, rules);
        let mut form = FormState::new();
        form.set("mode", "short");

        assert_eq!(seq.next_index(0, &form), 3);
        assert_eq!(seq.prev_index(3, &form), Some(0));
        assert_eq!(seq.visitable(&form), vec![0, 3]);
    }

    #[test]
    fn test_prev_index_none_when_only_skipped_steps_before() {
        let steps = vec![
            Step::new("a", "A", StepKind::Text),
            Step::new("b", "B", StepKind::Text),
        ];
        let seq = StepSequencer::new(steps, vec![SkipRule::new("a", |_| true)]);
        assert_eq!(seq.prev_index(1, &FormState::new()), None);
    }

    #[test]
    fn test_visitable_excludes_skipped_team_step() {
        let seq = sequencer();
        let k = seq.position(TEAM_INVITATIONS).unwrap();
        let visitable = seq.visitable(&form_with_invite("no"));
        assert!(!visitable.contains(&k));
        assert_eq!(visitable.len(), seq.len() - 1);
    }

    #[test]
    fn test_progress_monotonic_and_ends_at_100() {
        for total in 1..20 {
            for i in 0..total - 1 {
                assert!(progress_percent(i, total) < progress_percent(i + 1, total));
            }
            assert!((progress_percent(total - 1, total) - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_progress_first_step() {
        assert!((progress_percent(0, 4) - 25.0).abs() < f64::EPSILON);
        assert!((progress_percent(0, 0)).abs() < f64::EPSILON);
    }
}
