use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the shell should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum EditAction {
    /// The line changed; the suggestion is stale.
    Edited,
    /// The suggestion was appended to the line.
    Accepted,
    /// The suggestion was hidden; the line is unchanged.
    Dismissed,
    /// The user pressed Enter; carries the submitted line.
    Submit(String),
    /// Ctrl-C, or Ctrl-D on an empty line.
    Quit,
    /// Nothing to do.
    Ignored,
}

/// The line being typed plus the dimmed suggestion shown after it.
///
/// Pure state, no terminal I/O: the shell feeds it key events and redraws
/// from `line()` and `suggestion_tail()`.
#[derive(Debug, Default)]
pub struct LineEditor {
    line: String,
    suggestion: Option<String>,
}

impl LineEditor {
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Text the inline suggestion is computed for: the line without
    /// surrounding whitespace. Empty means no suggestion.
    pub fn prompt(&self) -> &str {
        self.line.trim()
    }

    pub fn set_suggestion(&mut self, word: Option<String>) {
        self.suggestion = word;
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// What accepting the suggestion would append, for display.
    pub fn suggestion_tail(&self) -> Option<String> {
        let word = self.suggestion.as_deref()?;
        if self.line.is_empty() || self.line.ends_with(char::is_whitespace) {
            Some(word.to_owned())
        } else {
            Some(format!(" {word}"))
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> EditAction {
        if key.kind != KeyEventKind::Press {
            return EditAction::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => EditAction::Quit,
            KeyCode::Char('d') if ctrl && self.line.is_empty() => EditAction::Quit,
            KeyCode::Char('u') if ctrl => {
                self.line.clear();
                self.suggestion = None;
                EditAction::Edited
            }
            KeyCode::Char(_) if ctrl => EditAction::Ignored,
            KeyCode::Char(c) => {
                self.line.push(c);
                self.suggestion = None;
                EditAction::Edited
            }
            KeyCode::Backspace => {
                if self.line.pop().is_none() {
                    return EditAction::Ignored;
                }
                self.suggestion = None;
                EditAction::Edited
            }
            KeyCode::Tab | KeyCode::Right => {
                if self.accept_suggestion() {
                    EditAction::Accepted
                } else {
                    EditAction::Ignored
                }
            }
            KeyCode::Enter => {
                self.suggestion = None;
                EditAction::Submit(std::mem::take(&mut self.line))
            }
            KeyCode::Esc => {
                if self.suggestion.take().is_some() {
                    EditAction::Dismissed
                } else {
                    EditAction::Ignored
                }
            }
            _ => EditAction::Ignored,
        }
    }

    /// Appends the suggestion as the next word, followed by a space so the
    /// user can keep typing.
    fn accept_suggestion(&mut self) -> bool {
        let Some(tail) = self.suggestion_tail() else {
            return false;
        };
        self.line.push_str(&tail);
        self.line.push(' ');
        self.suggestion = None;
        true
    }
}
