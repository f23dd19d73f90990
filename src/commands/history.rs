use crate::api::HttpChatApi;
use crate::cli::HistoryCommand;
use crate::commands::StdinConfirm;
use crate::config::Config;
use crate::controller::ChatController;
use crate::error::Result;
use crate::render;
use colored::Colorize;

/// Handle one-shot history commands
pub async fn handle_history(config: Config, command: HistoryCommand) -> Result<()> {
    let api = HttpChatApi::new(&config.server)?;
    let mut controller = ChatController::new(api, config.ui);

    match command {
        HistoryCommand::List { search, json } => {
            controller.load_history().await?;
            if let Some(term) = search {
                controller.set_search(term);
            }
            let rows = controller.visible_history();

            if json {
                println!("{}", render::history_json(&rows)?);
                return Ok(());
            }

            println!();
            print!(
                "{}",
                render::history_table(
                    &rows,
                    None,
                    controller.history().status(),
                    controller.search()
                )
            );
            if !rows.is_empty() {
                println!();
                println!(
                    "Use {} to read one.",
                    "serenity history show <ID>".cyan()
                );
            }
            println!();
        }
        HistoryCommand::Show { id } => {
            controller.load_history().await?;
            controller.open(id)?;
            println!();
            print!("{}", render::conversation(controller.view()));
            println!();
        }
        HistoryCommand::Delete { id, yes } => {
            if yes {
                controller.delete_chat(id, &mut |_: &str| true).await?;
            } else {
                controller.delete_chat(id, &mut StdinConfirm).await?;
            }
            println!("{}", format!("Deleted chat {}", id).green());
        }
        HistoryCommand::Clear { yes } => {
            if yes {
                controller.clear_history(&mut |_: &str| true).await?;
            } else {
                controller.clear_history(&mut StdinConfirm).await?;
            }
            println!("{}", "Cleared all chat history".green());
        }
    }

    Ok(())
}
