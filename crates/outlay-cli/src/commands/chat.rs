//! Chat command implementations (one-shot message and interactive session)

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use outlay_core::bot::ChatBot;
use outlay_core::db::Database;
use outlay_core::rules::CategoryRules;

pub fn cmd_chat_once(db: &Database, rules: &CategoryRules, message: &str) -> Result<()> {
    let bot = ChatBot::new(db, rules).context("Failed to start chat bot")?;
    let reply = bot.respond(message)?;
    println!("{}", reply);
    Ok(())
}

pub fn cmd_chat_repl(db: &Database, rules: &CategoryRules) -> Result<()> {
    let bot = ChatBot::new(db, rules).context("Failed to start chat bot")?;

    println!("💬 Outlay chat. Try 'spent 120 on pizza yesterday' or 'summary this week'.");
    println!("   Type 'exit' or 'quit' to leave.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // EOF (Ctrl+D or piped input ran out)
            None => break,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        // Bad input (like a zero amount) ends the request, not the session
        match bot.respond(line) {
            Ok(reply) => println!("bot> {}", reply),
            Err(e) => println!("bot> ⚠️  {}", e),
        }
    }

    println!("Bye!");
    Ok(())
}
