//! Interactive terminal client for a running banter relay
//!
//! Drives the conversation store line by line: each submitted line becomes
//! one user message, each settlement prints one bot reply. History is
//! restored from and persisted to the same file across sessions.

use banter::state_machine::{Message, Sender};
use banter::store::{ConversationStore, FileHistory, HttpRelayClient, ViewSink};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Prints bot replies as they are appended; the user's own line is already
/// on screen when the scroll request arrives.
struct TerminalView;

impl ViewSink for TerminalView {
    fn scroll_to_latest(&self, messages: &[Message]) {
        if let Some(message) = messages.last() {
            if message.sender == Sender::Bot {
                println!("{} {}", "bot>".green().bold(), message.text);
            }
        }
    }
}

fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{} {}", "you>".cyan().bold(), message.text),
        Sender::Bot => println!("{} {}", "bot>".green().bold(), message.text),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("BANTER_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    println!("{}", "Banter".bold());
    println!(
        "{}",
        format!("Relay: {base_url} • type 'exit' to quit, '/clear' to reset history")
            .bright_black()
    );

    let mut store = ConversationStore::new(
        FileHistory::new(FileHistory::default_path()),
        HttpRelayClient::new(&base_url),
    )
    .with_view(TerminalView);

    store.restore();
    if !store.messages().is_empty() {
        println!("{}", "-- restored history --".bright_black());
        for message in store.messages() {
            print_message(message);
        }
        println!("{}", "----------------------".bright_black());
    }

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                match line.as_str() {
                    "" => continue,
                    "exit" | "quit" => break,
                    "/clear" => {
                        store.clear();
                        println!("{}", "history cleared".bright_black());
                        continue;
                    }
                    _ => {}
                }
                rl.add_history_entry(&line)?;
                // Rejections (empty draft) are already filtered above; a
                // busy rejection cannot happen since we await each turn.
                if store.submit(&line).await.is_err() {
                    continue;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(Box::new(e) as Box<dyn std::error::Error>),
        }
    }

    Ok(())
}
