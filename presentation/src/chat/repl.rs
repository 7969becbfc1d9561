//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! The conversation lives for the whole session, so follow-up questions can
//! refer back to earlier answers and observations. Ctrl-C cancels the turn
//! in flight without ending the session.

use quadbot_application::{RunTurnError, RunTurnInput, RunTurnUseCase};
use quadbot_domain::Conversation;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunTurnUseCase,
    conversation: Conversation,
}

impl ChatRepl {
    pub fn new(use_case: RunTurnUseCase) -> Self {
        Self {
            use_case,
            conversation: Conversation::new(),
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("quadbot").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn process_question(&mut self, question: &str) {
        let token = CancellationToken::new();
        let turn = self.use_case.execute(
            &mut self.conversation,
            RunTurnInput::new(question),
            &token,
        );

        let result = tokio::select! {
            result = turn => result,
            _ = tokio::signal::ctrl_c() => {
                token.cancel();
                Err(RunTurnError::Cancelled)
            }
        };

        match result {
            Ok(output) => {
                debug!(steps_used = output.steps_used, phase = %output.phase, "turn finished");
                println!();
                println!("{}", output.answer);
                println!();
            }
            Err(RunTurnError::Cancelled) => {
                println!();
                println!("(cancelled)");
            }
            Err(err) => {
                eprintln!();
                eprintln!("Error: {}", err);
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            quadbot - Chat Mode              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask about campus events, courses, or people.");
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /clear    - Forget the conversation so far");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?   - Show this help");
                println!("  /clear          - Forget the conversation so far");
                println!("  /quit, /q       - Exit chat");
                println!();
                false
            }
            "/clear" => {
                self.conversation = Conversation::new();
                println!("Conversation cleared.");
                false
            }
            _ => {
                println!("Unknown command: {} (try /help)", cmd);
                false
            }
        }
    }
}
