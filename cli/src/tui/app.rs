use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use savings_core::{Intent, KeyValueStore, Outcome, SavingsService, SavingsView};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    None,
    Goal,
    Amount,
}

pub struct App<S: KeyValueStore> {
    pub service: SavingsService<S>,
    pub focus: Focus,
    pub cursor_position: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(service: SavingsService<S>) -> App<S> {
        App {
            service,
            focus: Focus::None,
            cursor_position: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> SavingsView {
        self.service.view()
    }

    /// Text of the focused field, empty when nothing is focused.
    pub fn focused_text(&self) -> &str {
        let state = self.service.state();
        match self.focus {
            Focus::Goal => state.goal_text.as_str(),
            Focus::Amount => state.pending_amount_text(),
            Focus::None => "",
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => self.cycle_focus()?,
            KeyCode::Esc => self.dispatch(Intent::BackgroundTap)?,
            KeyCode::Char('+') => self.dispatch(Intent::AddPressed)?,
            KeyCode::Char('-') => self.dispatch(Intent::WithdrawPressed)?,
            _ => match self.focus {
                Focus::None => self.handle_unfocused(key.code)?,
                Focus::Goal | Focus::Amount => self.handle_field(key.code)?,
            },
        }
        Ok(())
    }

    fn handle_unfocused(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') => self.quit()?,
            KeyCode::Char('r') => self.dispatch(Intent::ResetPressed)?,
            KeyCode::Char('g') => self.set_focus(Focus::Goal)?,
            KeyCode::Char('a') | KeyCode::Enter => self.set_focus(Focus::Amount)?,
            KeyCode::Char(c) if is_amount_char(c) => {
                self.set_focus(Focus::Amount)?;
                self.input_char(c)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_field(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char(c) if is_amount_char(c) => self.input_char(c)?,
            KeyCode::Backspace => self.delete_char()?,
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.focused_text().chars().count(),
            KeyCode::Enter => match self.focus {
                Focus::Goal => self.set_focus(Focus::Amount)?,
                _ => self.dispatch(Intent::AddPressed)?,
            },
            _ => {}
        }
        Ok(())
    }

    fn dispatch(&mut self, intent: Intent) -> Result<()> {
        if intent == Intent::BackgroundTap {
            self.set_focus(Focus::None)?;
        }
        let outcome = self.service.dispatch(intent)?;
        match outcome {
            Outcome::Rejected(e) if self.service.config().show_rejections => {
                self.status_message = Some(e.to_string());
            }
            Outcome::Rejected(_) | Outcome::Unchanged => {}
            Outcome::Applied => self.status_message = None,
        }
        self.clamp_cursor();
        Ok(())
    }

    fn set_focus(&mut self, focus: Focus) -> Result<()> {
        if self.focus == Focus::Goal && focus != Focus::Goal {
            self.service.commit_goal()?;
        }
        debug!(?focus, "focus changed");
        self.focus = focus;
        self.cursor_position = self.focused_text().chars().count();
        Ok(())
    }

    fn cycle_focus(&mut self) -> Result<()> {
        let next = match self.focus {
            Focus::None | Focus::Amount => Focus::Goal,
            Focus::Goal => Focus::Amount,
        };
        self.set_focus(next)
    }

    fn quit(&mut self) -> Result<()> {
        self.service.commit_goal()?;
        self.should_quit = true;
        Ok(())
    }

    fn replace_focused(&mut self, text: String) -> Result<()> {
        let intent = match self.focus {
            Focus::Goal => Intent::GoalTextChanged(text),
            Focus::Amount => Intent::AmountTextChanged(text),
            Focus::None => return Ok(()),
        };
        self.dispatch(intent)
    }

    fn input_char(&mut self, c: char) -> Result<()> {
        let mut text = self.focused_text().to_string();
        text.insert(byte_offset(&text, self.cursor_position), c);
        self.replace_focused(text)?;
        self.cursor_position += 1;
        Ok(())
    }

    fn delete_char(&mut self) -> Result<()> {
        if self.cursor_position > 0 {
            let mut text = self.focused_text().to_string();
            text.remove(byte_offset(&text, self.cursor_position - 1));
            self.replace_focused(text)?;
            self.cursor_position -= 1;
        }
        Ok(())
    }

    fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_text().chars().count() {
            self.cursor_position += 1;
        }
    }

    // A successful add or withdraw empties the amount field under the cursor.
    fn clamp_cursor(&mut self) {
        let len = self.focused_text().chars().count();
        if self.cursor_position > len {
            self.cursor_position = len;
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.chars().take(char_index).map(|c| c.len_utf8()).sum()
}

// Decimal-pad keys.
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}
