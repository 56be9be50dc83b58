use thiserror::Error;

use crate::input::{parse_amount, parse_optional_amount};

pub const DEFAULT_SEGMENT_COUNT: usize = 10;

/// Why a balance update was refused. The state is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("cannot move {amount:.2} with a balance of {balance:.2}")]
    InsufficientFunds { balance: f64, amount: f64 },
    #[error("moving {amount:e} would take the balance of {balance:e} out of range")]
    OutOfRange { balance: f64, amount: f64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsState {
    pub goal_text: String,
    current_savings: f64,
    // Transient. Never written to the store.
    pending_amount_text: String,
}

impl SavingsState {
    /// Builds a state from persisted values. A negative or non-finite balance
    /// cannot be represented and is replaced by zero.
    pub fn new(goal_text: String, current_savings: f64) -> Self {
        let current_savings = if current_savings.is_finite() && current_savings >= 0.0 {
            current_savings
        } else {
            0.0
        };
        Self {
            goal_text,
            current_savings,
            pending_amount_text: String::new(),
        }
    }

    pub fn current_savings(&self) -> f64 {
        self.current_savings
    }

    pub fn pending_amount_text(&self) -> &str {
        &self.pending_amount_text
    }

    pub fn goal_value(&self) -> Option<f64> {
        parse_optional_amount(&self.goal_text)
    }

    pub fn set_goal(&mut self, text: impl Into<String>) {
        self.goal_text = text.into();
    }

    pub fn set_pending_amount(&mut self, text: impl Into<String>) {
        self.pending_amount_text = text.into();
    }

    /// Adds `amount_text` to the balance and clears the pending input.
    ///
    /// Negative amounts are accepted as long as the balance stays non-negative.
    pub fn add(&mut self, amount_text: &str) -> Result<f64, UpdateError> {
        let amount = parse_amount(amount_text)?;
        self.apply(amount, self.current_savings + amount)
    }

    pub fn withdraw(&mut self, amount_text: &str) -> Result<f64, UpdateError> {
        let amount = parse_amount(amount_text)?;
        self.apply(amount, self.current_savings - amount)
    }

    fn apply(&mut self, amount: f64, next: f64) -> Result<f64, UpdateError> {
        let balance = self.current_savings;
        if !next.is_finite() {
            return Err(UpdateError::OutOfRange { balance, amount });
        }
        if next < 0.0 {
            return Err(UpdateError::InsufficientFunds { balance, amount });
        }
        self.current_savings = next;
        self.pending_amount_text.clear();
        Ok(self.current_savings)
    }

    pub fn reset(&mut self) {
        self.current_savings = 0.0;
    }

    /// Fraction of the goal reached. Not clamped: 1.5 means 150%.
    pub fn progress(&self) -> f64 {
        match self.goal_value() {
            Some(goal) if goal > 0.0 => self.current_savings / goal,
            _ => 0.0,
        }
    }

    pub fn remaining(&self) -> f64 {
        match self.goal_value() {
            Some(goal) => (goal - self.current_savings).max(0.0),
            None => 0.0,
        }
    }

    /// Number of filled cells in a bar of `segment_count` cells.
    ///
    /// Follows `progress()` without clamping, so an overshooting balance can
    /// report more filled cells than the bar has.
    pub fn filled_segments(&self, segment_count: usize) -> usize {
        (segment_count as f64 * self.progress()).floor() as usize
    }
}
