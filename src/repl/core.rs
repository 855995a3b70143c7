use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

use super::release::*;
use super::validator::ScriptValidator;
use crate::error::{Error, Result};
use crate::lang::Interpreter;
use crate::session::Session;

const HISTORY_CAPACITY: usize = 1000;

pub fn repl(session: &Session) -> Result<()> {
    println!("{}", session_header());
    let interp = Interpreter::from(session);

    let line_editor = Reedline::create().with_validator(Box::new(ScriptValidator));

    let mut line_editor = if let Some(path) = &session.history {
        println!("Restoring session history...");
        let history = FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone())
            .map_err(|e| Error::Io(e.to_string()))?;
        line_editor.with_history(Box::new(history))
    } else {
        line_editor.with_history(Box::new(FileBackedHistory::new(HISTORY_CAPACITY)))
    };

    // initialize our repl prompt
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("seqview".to_string()),
        DefaultPromptSegment::Empty,
    );

    // REPL
    loop {
        let signal = line_editor.read_line(&prompt);
        match signal {
            Ok(Signal::Success(line)) => {
                // skip all-whitespace entries
                if line.chars().all(char::is_whitespace) {
                    continue;
                }

                // values are printed as they are evaluated
                let mut stdout = std::io::stdout();
                if let Err(e) = interp.run(&line, &mut stdout) {
                    tracing::debug!(?e, "statement failed");
                    eprintln!("Error: {e}");
                }
            }
            Ok(Signal::CtrlD) => break,
            Ok(Signal::CtrlC) => continue,
            Err(err) => return Err(Error::Io(err.to_string())),
        }
    }

    Ok(())
}
