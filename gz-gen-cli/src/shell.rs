use std::io::{self, BufRead, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use gz_gen_core::{RankingCache, Scorer};

use crate::editor::{EditAction, LineEditor};
use crate::render::{write_listing, OutputFormat};

const PROMPT: &str = "> ";

/// Options fixed for the whole session.
#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    /// Number of ranked words printed per submitted line.
    pub top_k: usize,
    pub format: OutputFormat,
    /// Whether to show the best next word while typing.
    pub inline: bool,
}

/// The read loop around a `Scorer`.
///
/// Every submitted line is ranked and its top `top_k` words printed. On a
/// terminal with `inline` on, the single best word is also shown while
/// typing. Scoring errors never end the loop: inline ones are dropped,
/// listing ones are logged.
pub struct Shell<'a> {
    scorer: &'a Scorer,
    cache: RankingCache,
    options: ShellOptions,
}

/// What the inline loop needs from a terminal besides writing to it.
pub trait Terminal: Write {
    /// Blocks until the next key press. `None` ends the session.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
    /// Whether another key is already queued.
    fn key_pending(&mut self) -> io::Result<bool>;
    fn set_raw(&mut self, on: bool) -> io::Result<()>;
}

/// Leaves raw mode when dropped, including on early return.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// The process's own terminal, through crossterm.
struct Crossterm {
    stdout: io::Stdout,
    raw: Option<RawMode>,
}

impl Write for Crossterm {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Terminal for Crossterm {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
    }

    fn key_pending(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn set_raw(&mut self, on: bool) -> io::Result<()> {
        if !on {
            self.raw = None;
        } else if self.raw.is_none() {
            self.raw = Some(RawMode::enable()?);
        }
        Ok(())
    }
}

impl<'a> Shell<'a> {
    pub fn new(scorer: &'a Scorer, options: ShellOptions) -> Self {
        Self { scorer, cache: RankingCache::default(), options }
    }

    /// Ranks `line` and prints the listing to `out`.
    pub fn submit<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        match self.cache.score(self.scorer, line) {
            Ok(ranking) => write_listing(out, ranking.top(self.options.top_k), self.options.format),
            Err(e) => {
                log::error!("cannot rank {line:?}: {e}");
                Ok(())
            }
        }
    }

    /// Plain loop: one listing per input line, until end of input.
    pub fn run_lines<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, show_prompt: bool) -> io::Result<()> {
        if show_prompt {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line?;
            self.submit(&line, out)?;
            if show_prompt {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }
        }
        Ok(())
    }

    /// Raw-mode loop on the process's terminal.
    pub fn run_terminal(&mut self) -> io::Result<()> {
        let mut terminal = Crossterm { stdout: io::stdout(), raw: None };
        self.run_inline(&mut terminal)
    }

    /// Line editing with the best next word shown dimmed after the cursor.
    ///
    /// The suggestion is only recomputed once no further key is queued,
    /// so fast typing does not trigger one full scoring pass per key.
    /// Raw mode is left while a listing is printed.
    pub fn run_inline<T: Terminal>(&mut self, term: &mut T) -> io::Result<()> {
        let mut editor = LineEditor::default();
        term.set_raw(true)?;
        redraw(term, editor.line(), None)?;

        while let Some(key) = term.next_key()? {
            match editor.handle(key) {
                EditAction::Edited | EditAction::Accepted => {
                    if !term.key_pending()? {
                        self.suggest(&mut editor);
                    }
                    redraw(term, editor.line(), editor.suggestion_tail())?;
                }
                EditAction::Dismissed => redraw(term, editor.line(), None)?,
                EditAction::Submit(line) => {
                    redraw(term, &line, None)?;
                    term.set_raw(false)?;
                    writeln!(term)?;
                    self.submit(&line, term)?;
                    term.set_raw(true)?;
                    redraw(term, editor.line(), None)?;
                }
                EditAction::Quit => break,
                EditAction::Ignored => {}
            }
        }

        term.set_raw(false)?;
        writeln!(term)?;
        term.flush()
    }

    /// Updates the inline suggestion for the editor's current prompt.
    fn suggest(&mut self, editor: &mut LineEditor) {
        let prompt = editor.prompt();
        if prompt.is_empty() {
            editor.set_suggestion(None);
            return;
        }
        let best = match self.cache.score(self.scorer, prompt) {
            Ok(ranking) => ranking.best().map(|c| c.word.clone()),
            Err(e) => {
                log::debug!("no inline suggestion for {prompt:?}: {e}");
                None
            }
        };
        editor.set_suggestion(best);
    }
}

/// Rewrites the current terminal line: prompt, typed text, then the dimmed
/// suggestion, with the cursor left at the end of the typed text.
fn redraw<W: Write>(out: &mut W, line: &str, suggestion: Option<String>) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(PROMPT),
        Print(line)
    )?;
    if let Some(tail) = suggestion {
        queue!(out, SetForegroundColor(Color::DarkGrey), Print(tail), ResetColor)?;
    }
    let column = PROMPT.chars().count() + line.chars().count();
    execute!(out, MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)))
}
