//! Terminal front end for the legal assistant.

use anyhow::Result;
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;

use legalconnect_core::service::chat::ChatReply;

use crate::state::AppState;

const EXIT_COMMANDS: [&str; 3] = ["/exit", "/quit", "exit"];

/// One-shot when `question` is given, otherwise an interactive loop.
pub async fn chat(state: &AppState, question: Option<String>, json: bool) -> Result<()> {
    let skin = MadSkin::default_dark();

    if let Some(question) = question {
        let reply = ask(state, &question, json).await?;
        render(&skin, &reply, json)?;
        return Ok(());
    }

    let intro = state.chat_service.intro();
    println!();
    skin.print_text(&intro.greeting.content);
    println!();
    println!("  {}", style("Try asking:").dim());
    for sample in intro.sample_questions.iter().take(4) {
        println!("  {} {}", style("•").cyan(), style(sample).dim());
    }
    println!("  {}", style("Type /exit to leave.").dim());
    println!();

    loop {
        let line: String = Input::new()
            .with_prompt(format!("{}", style("You").green().bold()))
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&line) {
            break;
        }
        let reply = ask(state, line, json).await?;
        render(&skin, &reply, json)?;
    }
    Ok(())
}

async fn ask(state: &AppState, question: &str, json: bool) -> Result<ChatReply> {
    let spinner = (!json).then(ProgressBar::new_spinner);
    if let Some(spinner) = &spinner {
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.set_message("Consulting the legal assistant...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    }
    let reply = state.chat_service.ask(question).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    Ok(reply?)
}

fn render(skin: &MadSkin, reply: &ChatReply, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }
    println!();
    println!("  {}", style("Assistant").cyan().bold());
    skin.print_text(&reply.message.content);
    if reply.fallback {
        println!(
            "  {}",
            style("The assistant is unavailable. Check the [llm] settings and API key.").yellow()
        );
    }
    println!();
    Ok(())
}
