use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{Config, GoalPersistence};
use crate::model::intent::Intent;
use crate::model::savings::{SavingsState, UpdateError};
use crate::repository::{KeyValueStore, KEY_CURRENT_SAVINGS, KEY_SAVINGS_GOAL};
use crate::service::dto::SavingsView;

/// Result of a user action that went through the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    /// Refused; state and pending input are unchanged.
    Rejected(UpdateError),
    /// Nothing to do for this intent.
    Unchanged,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Owns the savings state and writes it through to the store.
pub struct SavingsService<S: KeyValueStore> {
    store: S,
    state: SavingsState,
    config: Config,
    goal_dirty: bool,
}

impl<S: KeyValueStore> SavingsService<S> {
    /// Reads the persisted goal and balance once. Missing keys use `""` and 0.0.
    pub fn new(store: S, config: Config) -> Result<Self> {
        let goal_text = store
            .load_string(KEY_SAVINGS_GOAL)
            .context("loading savings goal")?
            .unwrap_or_default();
        let stored_savings = store
            .load_f64(KEY_CURRENT_SAVINGS)
            .context("loading current savings")?
            .unwrap_or(0.0);

        let state = SavingsState::new(goal_text, stored_savings);
        if state.current_savings() != stored_savings {
            warn!(stored_savings, "stored balance is not usable, starting from 0");
        }
        debug!(goal = %state.goal_text, savings = state.current_savings(), "loaded savings state");

        Ok(Self {
            store,
            state,
            config,
            goal_dirty: false,
        })
    }

    pub fn state(&self) -> &SavingsState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> SavingsView {
        SavingsView::from_state(&self.state, self.config.segment_count)
    }

    /// Goal edits not yet written to the store.
    pub fn has_unsaved_goal(&self) -> bool {
        self.goal_dirty
    }

    pub fn set_goal(&mut self, text: impl Into<String>) -> Result<()> {
        self.state.set_goal(text);
        self.goal_dirty = true;
        match self.config.goal_persistence {
            GoalPersistence::OnEdit => self.save(),
            GoalPersistence::OnCommit => Ok(()),
        }
    }

    /// Writes pending goal edits, if any.
    pub fn commit_goal(&mut self) -> Result<()> {
        if self.goal_dirty {
            self.save()?;
        }
        Ok(())
    }

    pub fn set_pending_amount(&mut self, text: impl Into<String>) {
        self.state.set_pending_amount(text);
    }

    pub fn add(&mut self, amount_text: &str) -> Result<Outcome> {
        let result = self.state.add(amount_text);
        self.finish_update("add", amount_text, result)
    }

    pub fn withdraw(&mut self, amount_text: &str) -> Result<Outcome> {
        let result = self.state.withdraw(amount_text);
        self.finish_update("withdraw", amount_text, result)
    }

    /// Applies the pending amount field as a deposit.
    pub fn add_pending(&mut self) -> Result<Outcome> {
        let amount_text = self.state.pending_amount_text().to_string();
        self.add(&amount_text)
    }

    pub fn withdraw_pending(&mut self) -> Result<Outcome> {
        let amount_text = self.state.pending_amount_text().to_string();
        self.withdraw(&amount_text)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();
        info!("savings reset to 0");
        self.save()
    }

    /// Writes both persisted fields.
    pub fn save(&mut self) -> Result<()> {
        self.store
            .save_string(KEY_SAVINGS_GOAL, &self.state.goal_text)
            .context("saving savings goal")?;
        self.store
            .save_f64(KEY_CURRENT_SAVINGS, self.state.current_savings())
            .context("saving current savings")?;
        self.goal_dirty = false;
        Ok(())
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::GoalTextChanged(text) => {
                self.set_goal(text)?;
                Ok(Outcome::Applied)
            }
            Intent::AmountTextChanged(text) => {
                self.set_pending_amount(text);
                Ok(Outcome::Applied)
            }
            Intent::AddPressed => self.add_pending(),
            Intent::WithdrawPressed => self.withdraw_pending(),
            Intent::ResetPressed => {
                self.reset()?;
                Ok(Outcome::Applied)
            }
            Intent::BackgroundTap => Ok(Outcome::Unchanged),
        }
    }

    fn finish_update(
        &mut self,
        action: &str,
        amount_text: &str,
        result: Result<f64, UpdateError>,
    ) -> Result<Outcome> {
        match result {
            Ok(balance) => {
                info!(action, amount = amount_text, balance, "savings updated");
                self.save()?;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                debug!(action, amount = amount_text, "rejected: {}", e);
                Ok(Outcome::Rejected(e))
            }
        }
    }
}
