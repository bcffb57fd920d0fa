use std::env;
use std::io::{self, IsTerminal, Write};
use reedline::{Signal, DefaultPrompt, DefaultPromptSegment, HistoryItem, Highlighter, StyledText};
use nu_ansi_term::Style;
use tracing::debug;
use crate::theme::Theme;
use crate::{cli_util, Settings};

pub const HELP: &str = r#"Enter single-line code to run it, or:
  :paste    paste multi-line code; two blank lines in a row run it
  :mode     toggle classic / default interpretation mode
  :numin    toggle numeric input mode
  :numout   toggle numeric output mode
  :help     show this help
  :quit     quit (Ctrl+C also quits)"#;

/// What the loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Run this program with the session's current settings.
    Run(String),
    /// Show this notice to the user.
    Message(String),
    Quit,
    Nothing,
}

#[derive(Debug, Default)]
struct PasteBuffer {
    code: String,
    blank_run: usize,
}

/// Mode flags and paste state carried between submissions.
///
/// The interpreter itself keeps nothing between runs; every submission gets
/// a fresh tape built from [`ReplSession::settings`].
#[derive(Debug)]
pub struct ReplSession {
    settings: Settings,
    paste: Option<PasteBuffer>,
}

impl ReplSession {
    pub fn new(settings: Settings) -> Self {
        Self { settings, paste: None }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn in_paste_mode(&self) -> bool {
        self.paste.is_some()
    }

    pub fn handle_line(&mut self, line: &str) -> ReplAction {
        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(paste) = self.paste.as_mut() {
            if line.trim().is_empty() {
                paste.blank_run += 1;
                if paste.blank_run >= 2 {
                    let code = std::mem::take(&mut paste.code);
                    self.paste = None;
                    return ReplAction::Run(code);
                }
            } else {
                paste.blank_run = 0;
            }
            paste.code.push_str(line);
            paste.code.push('\n');
            return ReplAction::Nothing;
        }

        match line.trim() {
            "" => ReplAction::Nothing,
            ":paste" => {
                self.paste = Some(PasteBuffer::default());
                ReplAction::Message(
                    "Entering multiline input mode.\nEnter two blank lines in a row to interpret.".to_string(),
                )
            }
            ":mode" => {
                self.settings = self.settings.classic(!self.settings.policy.is_classic());
                ReplAction::Message(format!("Changed interpretation mode to '{}'", self.settings.policy))
            }
            ":numin" => {
                self.settings = self.settings.numeric_input(!self.settings.numeric_input);
                ReplAction::Message(format!("Changed input mode to '{}'", io_mode(self.settings.numeric_input)))
            }
            ":numout" => {
                self.settings = self.settings.numeric_output(!self.settings.numeric_output);
                ReplAction::Message(format!("Changed output mode to '{}'", io_mode(self.settings.numeric_output)))
            }
            ":help" => ReplAction::Message(HELP.to_string()),
            ":quit" | ":exit" => ReplAction::Quit,
            cmd if cmd.starts_with(':') => {
                ReplAction::Message(format!("Unknown command {cmd}; type :help for a list"))
            }
            _ => ReplAction::Run(line.to_string()),
        }
    }
}

fn io_mode(numeric: bool) -> &'static str {
    if numeric { "numeric" } else { "character" }
}

/// Apply one action; returns false when the session should end.
fn dispatch(action: ReplAction, session: &ReplSession, notices: bool) -> bool {
    match action {
        ReplAction::Run(code) => {
            debug!(len = code.len(), "executing submission");
            cli_util::execute_program(None, &code, session.settings());
            true
        }
        ReplAction::Message(msg) => {
            if notices {
                cli_util::print_notice(&msg);
            }
            true
        }
        ReplAction::Quit => false,
        ReplAction::Nothing => true,
    }
}

/// Interactive loop on a line editor.
pub fn repl_loop(settings: Settings) -> io::Result<()> {
    let mut editor = init_line_editor()?;
    let mut session = ReplSession::new(settings);

    loop {
        let Some(line) = read_line_interactive(&mut editor, &session)? else {
            // EOF or Ctrl+C. End the session cleanly
            println!();
            io::stdout().flush()?;
            return Ok(());
        };

        let action = session.handle_line(&line);
        if !dispatch(action, &session, true) {
            return Ok(());
        }
    }
}

/// Non-interactive loop: read lines from stdin until EOF or `:quit`.
/// No prompts are printed; notices only appear if stderr is a terminal.
pub fn bare_loop(settings: Settings) -> io::Result<()> {
    let mut session = ReplSession::new(settings);
    let notices = io::stderr().is_terminal();

    loop {
        // Re-lock per line so ',' can read from stdin while a program runs.
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF: run anything still sitting in a paste buffer
            if session.in_paste_mode() {
                let action = session.handle_line("");
                let action = match action {
                    ReplAction::Nothing => session.handle_line(""),
                    other => other,
                };
                dispatch(action, &session, notices);
            }
            return Ok(());
        }

        let action = session.handle_line(&line);
        if !dispatch(action, &session, notices) {
            return Ok(());
        }
    }
}

fn init_line_editor() -> io::Result<reedline::Reedline> {
    use reedline::{default_emacs_keybindings, Emacs, FileBackedHistory, Reedline};

    // Enter submits one line; multi-line programs go through :paste.
    let keybindings = default_emacs_keybindings();

    let history = FileBackedHistory::new(1_000).map_err(|e| io::Error::other(e.to_string()))?;

    let editor = Reedline::create()
        .with_highlighter(Box::new(BrainfuckHighlighter::new(Theme::mocha())))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    Ok(editor)
}

fn read_line_interactive(editor: &mut reedline::Reedline, session: &ReplSession) -> io::Result<Option<String>> {
    let prompt = if session.in_paste_mode() {
        DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty)
    } else {
        let settings = session.settings();
        let modes = format!(
            "{} {}/{}",
            settings.policy,
            io_mode(settings.numeric_input),
            io_mode(settings.numeric_output)
        );
        DefaultPrompt::new(DefaultPromptSegment::Basic("🧠".to_string()), DefaultPromptSegment::Basic(modes))
    };

    match editor.read_line(&prompt) {
        Ok(Signal::Success(buffer)) => {
            if !buffer.trim().is_empty() && !session.in_paste_mode() {
                let _ = editor.history_mut().save(HistoryItem::from_command_line(buffer.clone()));
            }
            Ok(Some(buffer))
        }
        Ok(Signal::CtrlC) => Ok(None),
        Ok(Signal::CtrlD) => Ok(None),
        Err(e) => {
            eprintln!("repl: editor error: {e}");
            let _ = io::stderr().flush();
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Flags win over `BRAIN_REPL_MODE`, which wins over TTY auto-detection.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err("cannot start editor: stdin is not a TTY (use --bare or BRAIN_REPL_MODE=bare)".to_string());
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    if let Ok(val) = env::var("BRAIN_REPL_MODE") {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err("cannot start editor: stdin is not a TTY (use BRAIN_REPL_MODE=bare)".to_string());
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!("invalid BRAIN_REPL_MODE value: {val}, must be 'bare' or 'editor'")),
        };
    }

    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

struct BrainfuckHighlighter {
    theme: Theme,
}

impl BrainfuckHighlighter {
    fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Highlighter for BrainfuckHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        // Meta commands are not code
        if line.trim_start().starts_with(':') {
            out.push((Style::new(), line.to_string()));
            return out;
        }

        let mut current_style: Option<Style> = None;
        let mut buffer = String::new();
        for ch in line.chars() {
            let style = self.theme.style_for(ch);
            match current_style {
                Some(s) if s == style => buffer.push(ch),
                Some(s) => {
                    out.push((s, std::mem::take(&mut buffer)));
                    current_style = Some(style);
                    buffer.push(ch);
                }
                None => {
                    current_style = Some(style);
                    buffer.push(ch);
                }
            }
        }

        if let Some(s) = current_style {
            if !buffer.is_empty() {
                out.push((s, buffer));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::OverflowPolicy;

    #[test]
    fn plain_line_is_run_with_current_settings() {
        let mut session = ReplSession::new(Settings::default());
        assert_eq!(session.handle_line("+++.\n"), ReplAction::Run("+++.".to_string()));
        assert_eq!(session.handle_line("   "), ReplAction::Nothing);
    }

    #[test]
    fn toggles_flip_flags_and_report() {
        let mut session = ReplSession::new(Settings::default());

        let msg = session.handle_line(":mode");
        assert_eq!(msg, ReplAction::Message("Changed interpretation mode to 'classic'".to_string()));
        assert_eq!(session.settings().policy, OverflowPolicy::Classic);
        session.handle_line(":mode");
        assert_eq!(session.settings().policy, OverflowPolicy::Strict);

        let msg = session.handle_line(":numin");
        assert_eq!(msg, ReplAction::Message("Changed input mode to 'numeric'".to_string()));
        assert!(session.settings().numeric_input);

        let msg = session.handle_line(":numout");
        assert_eq!(msg, ReplAction::Message("Changed output mode to 'numeric'".to_string()));
        assert!(session.settings().numeric_output);
    }

    #[test]
    fn quit_and_unknown_commands() {
        let mut session = ReplSession::new(Settings::default());
        assert_eq!(session.handle_line(":quit"), ReplAction::Quit);
        assert_eq!(session.handle_line(":exit"), ReplAction::Quit);
        assert!(matches!(session.handle_line(":bogus"), ReplAction::Message(m) if m.contains("Unknown command")));
    }

    #[test]
    fn paste_mode_runs_after_two_blank_lines() {
        let mut session = ReplSession::new(Settings::default());
        assert!(matches!(session.handle_line(":paste"), ReplAction::Message(_)));
        assert!(session.in_paste_mode());

        assert_eq!(session.handle_line("++"), ReplAction::Nothing);
        assert_eq!(session.handle_line(""), ReplAction::Nothing);
        assert_eq!(session.handle_line(":mode"), ReplAction::Nothing);
        assert_eq!(session.handle_line("+."), ReplAction::Nothing);
        assert_eq!(session.handle_line(""), ReplAction::Nothing);
        assert_eq!(session.handle_line(""), ReplAction::Run("++\n\n:mode\n+.\n\n".to_string()));

        assert!(!session.in_paste_mode());
        // ':mode' inside a paste is code, not a command
        assert_eq!(session.settings().policy, OverflowPolicy::Strict);
    }

    #[test]
    fn highlighter_keeps_text_intact() {
        let h = BrainfuckHighlighter::new(Theme::mocha());
        let styled = h.highlight("++[>-]x", 0);
        let text: String = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(text, "++[>-]x");
        assert_eq!(styled.buffer.len(), 6);
    }
}
