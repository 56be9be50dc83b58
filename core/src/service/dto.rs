use serde::{Deserialize, Serialize};

use crate::model::savings::SavingsState;

pub const TITLE: &str = "Money Goal Tracker";

/// Everything a renderer needs for one frame, already formatted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavingsView {
    pub goal_text: String,
    pub pending_amount_text: String,
    pub current_savings: f64,
    pub progress: f64,
    pub remaining: f64,
    pub filled_segments: usize,
    /// One entry per bar cell, `true` when filled.
    pub segments: Vec<bool>,
}

impl SavingsView {
    pub fn from_state(state: &SavingsState, segment_count: usize) -> Self {
        let filled_segments = state.filled_segments(segment_count);
        let segments = (0..segment_count).map(|i| i < filled_segments).collect();

        Self {
            goal_text: state.goal_text.clone(),
            pending_amount_text: state.pending_amount_text().to_string(),
            current_savings: state.current_savings(),
            progress: state.progress(),
            remaining: state.remaining(),
            filled_segments,
            segments,
        }
    }

    pub fn savings_label(&self) -> String {
        format!("Current Savings: {:.2}", self.current_savings)
    }

    pub fn percent_text(&self) -> String {
        format!("{:.1}", self.progress * 100.0)
    }

    pub fn progress_label(&self) -> String {
        format!("{}% of your goal achieved", self.percent_text())
    }

    pub fn remaining_label(&self) -> String {
        format!("{:.2} left to reach the goal", self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_view_of_quarter_progress() {
        let state = SavingsState::new("1000".to_string(), 250.0);
        let view = SavingsView::from_state(&state, 10);

        assert_eq!(view.filled_segments, 2);
        assert_eq!(
            view.segments,
            vec![true, true, false, false, false, false, false, false, false, false]
        );
        assert_eq!(view.savings_label(), "Current Savings: 250.00");
        assert_eq!(view.progress_label(), "25.0% of your goal achieved");
        assert_eq!(view.remaining_label(), "750.00 left to reach the goal");
    }

    #[test]
    fn test_overshoot_fills_every_cell() {
        let state = SavingsState::new("100".to_string(), 250.0);
        let view = SavingsView::from_state(&state, 4);

        assert_eq!(view.filled_segments, 10);
        assert_eq!(view.segments, vec![true; 4]);
        assert_eq!(view.percent_text(), "250.0");
    }

    #[test]
    fn test_empty_goal() {
        let state = SavingsState::new(String::new(), 50.0);
        let view = SavingsView::from_state(&state, 10);

        assert_eq!(view.segments, vec![false; 10]);
        assert_eq!(view.progress_label(), "0.0% of your goal achieved");
        assert_eq!(view.remaining_label(), "0.00 left to reach the goal");
    }
}
