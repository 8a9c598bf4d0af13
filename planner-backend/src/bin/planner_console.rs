//! Interactive console front end: calendar, schedule panel and a chat
//! transcript backed by the local model.
//!
//! Chat requests run on their own task and replies come back over a
//! channel, so the prompt stays usable while the model is thinking.

use dotenv::dotenv;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use planner_backend::ai::{ChatClient, ChatLog, LlamaClient, Message};
use planner_backend::config::Config;
use planner_backend::store::DayStore;
use planner_backend::ui::console::HELP;
use planner_backend::ui::transcript::{render, THINKING_PLACEHOLDER};
use planner_backend::ui::{ConsoleCommand, PlannerCommands};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = Arc::new(DayStore::new(&config.data_dir));
    store.ensure_dirs().await?;

    let model = LlamaClient::from_config(&config);
    let chat = Arc::new(ChatClient::new(
        Arc::new(model),
        ChatLog::new(&config.chat_log_path),
    ));
    let mut commands = PlannerCommands::new(store, chat, config.today());

    show_calendar(&commands).await;
    show_schedule(&commands).await;
    println!("{}", HELP);

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Help => println!("{}", HELP),
                    ConsoleCommand::ShowCalendar => show_calendar(&commands).await,
                    ConsoleCommand::ShowSchedule => show_schedule(&commands).await,
                    ConsoleCommand::OpenDay(date) => match commands.open_day_editor(&date).await {
                        Ok(editor) if editor.text.is_empty() => println!("{}: (no plan)", editor.date),
                        Ok(editor) => println!("=== {} ===\n{}", editor.date, editor.text),
                        Err(e) => println!("Error: {}", e),
                    },
                    ConsoleCommand::SaveDay { date, text } => {
                        match commands.save_day_editor(&date, &text).await {
                            Ok(notice) => println!("Assistant: {}", notice),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    ConsoleCommand::Chat(text) => {
                        if let Some(pending) = commands.begin_chat(&text) {
                            println!("Assistant: {}", THINKING_PLACEHOLDER);
                            let tx = reply_tx.clone();
                            tokio::spawn(async move {
                                let _ = tx.send(pending.run().await);
                            });
                        }
                    }
                    ConsoleCommand::Invalid(line) if line.is_empty() => {}
                    ConsoleCommand::Invalid(line) => println!("Unknown command: {} (try :help)", line),
                }
            }
            Some(reply) = reply_rx.recv() => {
                println!("{}", render(&Message::assistant(reply.as_str())));
                commands.finish_chat(reply);
            }
        }
    }

    log::info!("Console closed with {} transcript entries", commands.transcript().len());
    Ok(())
}

async fn show_calendar(commands: &PlannerCommands) {
    match commands.calendar().await {
        Ok(text) => println!("{}", text),
        Err(e) => println!("Error: {}", e),
    }
}

async fn show_schedule(commands: &PlannerCommands) {
    match commands.schedule_panel().await {
        Ok(text) => println!("Weekly Schedule\n{}\n", text),
        Err(e) => println!("Error: {}", e),
    }
}
