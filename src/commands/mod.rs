/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the following command modules:

- `chat`    — Interactive chat client and one-shot `send`
- `history` — List, show, and delete past conversations
- `faqs`    — Print the suggested prompts

Handlers build an [`HttpChatApi`] from configuration and drive a
[`ChatController`]; all state lives in the controller.
*/

use crate::api::{ChatApi, HttpChatApi};
use crate::config::Config;
use crate::controller::{ChatController, Confirm};
use crate::error::{Result, SerenityError};
use crate::render;
use crate::view::{Role, THINKING};
use colored::Colorize;
use std::io::{self, Write};

// Special commands parser for the interactive client
pub mod special_commands;

// History management commands
pub mod history;

/// Whether a confirmation answer means yes
///
/// Only `y` and `yes` (any case) count; anything else declines.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Confirmation read from standard input, for one-shot commands
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if let Err(e) = io::stdout().flush() {
            tracing::debug!("Failed to flush prompt: {}", e);
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

/// Print an error from a command, treating a declined confirmation gently
fn print_command_error(err: &anyhow::Error) {
    match err.downcast_ref::<SerenityError>() {
        Some(SerenityError::Cancelled(_)) => println!("{}", "Cancelled.".yellow()),
        _ => eprintln!("{}", format!("Error: {}", err).red()),
    }
}

/// Send the composer contents, printing the placeholder then the reply
async fn send_and_print<A: ChatApi>(controller: &mut ChatController<A>) {
    let Some(pending) = controller.begin_send() else {
        return;
    };
    print!("{}", render::message_line(Role::Bot, THINKING, true));
    if let Err(e) = io::stdout().flush() {
        tracing::debug!("Failed to flush output: {}", e);
    }

    let outcome = controller.api().send(pending.text()).await;
    let report = controller.finish_send(pending, outcome).await;
    print!("{}", render::message_line(Role::Bot, &report.content, false));
    if !report.delivered {
        tracing::debug!("Message was not delivered");
    }
    println!();
}

// Chat command handler
pub mod chat {
    //! Interactive chat client.
    //!
    //! Loads history and suggested prompts, then runs a readline loop. Lines
    //! starting with `/` are client commands; anything else is sent. A line
    //! ending in `\` continues the message on the next line.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::composer::KeyOutcome;
    use crate::controller::StatusSummary;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::PathBuf;

    /// Confirmation read through the line editor
    struct ReadlineConfirm<'a> {
        editor: &'a mut DefaultEditor,
    }

    impl Confirm for ReadlineConfirm<'_> {
        fn confirm(&mut self, prompt: &str) -> bool {
            match self.editor.readline(&format!("{} [y/N] ", prompt)) {
                Ok(answer) => is_yes(&answer),
                Err(e) => {
                    tracing::debug!("Confirmation aborted: {}", e);
                    false
                }
            }
        }
    }

    /// Start the interactive chat client
    ///
    /// # Examples
    ///
    /// ```
    /// use serenity_chat::commands::chat;
    /// use serenity_chat::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        let api = HttpChatApi::new(&config.server)?;
        let mut controller = ChatController::new(api, config.ui.clone());

        let mut rl = DefaultEditor::new().map_err(SerenityError::Readline)?;
        let history_file = readline_history_path();
        if let Some(path) = &history_file {
            if rl.load_history(path).is_err() {
                tracing::debug!("No readline history at {}", path.display());
            }
        }

        print_welcome_banner(&config.server.base_url);

        if let Err(e) = controller.boot().await {
            tracing::debug!("Starting without history: {}", e);
        }
        print_history(&controller);
        print!("{}", render::faq_list(controller.faqs()));
        println!();

        loop {
            let prompt = if controller.composer().is_continuing() {
                "... ".to_string()
            } else {
                format!("[{}] >> ", render::escape_terminal(controller.view().title()))
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    if !controller.composer().is_continuing() {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }

                        match parse_special_command(trimmed) {
                            Ok(SpecialCommand::None) => {}
                            Ok(SpecialCommand::Exit) => break,
                            Ok(command) => {
                                rl.add_history_entry(trimmed)
                                    .map_err(SerenityError::Readline)?;
                                if let Err(e) =
                                    handle_special(&mut controller, command, &mut rl).await
                                {
                                    print_command_error(&e);
                                }
                                continue;
                            }
                            Err(e) => {
                                eprintln!("{}", e.to_string().red());
                                continue;
                            }
                        }
                    }

                    match controller.composer_mut().feed_line(&line) {
                        KeyOutcome::Edited => continue,
                        KeyOutcome::Submit(None) => {
                            // whitespace-only multi-line input
                            controller.composer_mut().set_input("");
                            continue;
                        }
                        KeyOutcome::Submit(Some(text)) => {
                            rl.add_history_entry(text.as_str())
                                .map_err(SerenityError::Readline)?;
                            controller.composer_mut().set_input(text);
                            send_and_print(&mut controller).await;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if controller.composer().is_continuing() {
                        controller.composer_mut().set_input("");
                        println!("{}", "Message discarded.".yellow());
                        continue;
                    }
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &history_file {
            if let Err(e) = rl.save_history(path) {
                tracing::debug!("Failed to save readline history: {}", e);
            }
        }
        println!("Goodbye!");
        Ok(())
    }

    /// Send a single message and print the reply
    pub async fn run_send(config: Config, message: String) -> Result<()> {
        let api = HttpChatApi::new(&config.server)?;
        let mut controller = ChatController::new(api, config.ui);
        controller.composer_mut().set_input(message);

        if controller.composer().input().trim().is_empty() {
            return Err(SerenityError::Command("Message is empty".to_string()).into());
        }
        send_and_print(&mut controller).await;
        Ok(())
    }

    async fn handle_special(
        controller: &mut ChatController<HttpChatApi>,
        command: SpecialCommand,
        rl: &mut DefaultEditor,
    ) -> Result<()> {
        match command {
            SpecialCommand::ShowHistory => print_history(controller),
            SpecialCommand::Search(term) => {
                controller.set_search(term);
                print_history(controller);
            }
            SpecialCommand::Open(id) => {
                controller.open(id)?;
                print_conversation(controller);
            }
            SpecialCommand::Delete(id) => {
                controller
                    .delete_chat(id, &mut ReadlineConfirm { editor: rl })
                    .await?;
                println!("{}", format!("Deleted chat {}", id).green());
                print_history(controller);
            }
            SpecialCommand::ClearHistory => {
                controller
                    .clear_history(&mut ReadlineConfirm { editor: rl })
                    .await?;
                println!("{}", "Cleared all chat history".green());
            }
            SpecialCommand::NewChat => print_conversation_after(controller, |c| c.new_chat()),
            SpecialCommand::ClearView => print_conversation_after(controller, |c| c.clear_view()),
            SpecialCommand::ShowFaqs => print!("{}", render::faq_list(controller.faqs())),
            SpecialCommand::Faq(number) => {
                let prompt = controller.stage_faq(number)?.to_string();
                print!("{}", render::message_line(Role::User, &prompt, false));
                send_and_print(controller).await;
            }
            SpecialCommand::Reload => {
                let result = controller.load_history().await;
                print_history(controller);
                result?;
            }
            SpecialCommand::ShowStatus => print_status_display(&controller.status()),
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit | SpecialCommand::None => {}
        }
        Ok(())
    }

    fn print_conversation_after(
        controller: &mut ChatController<HttpChatApi>,
        action: impl FnOnce(&mut ChatController<HttpChatApi>),
    ) {
        action(controller);
        print_conversation(controller);
    }

    fn print_conversation(controller: &ChatController<HttpChatApi>) {
        println!();
        print!("{}", render::conversation(controller.view()));
        println!();
    }

    fn print_history(controller: &ChatController<HttpChatApi>) {
        println!();
        print!(
            "{}",
            render::history_table(
                &controller.visible_history(),
                controller.view().current(),
                controller.history().status(),
                controller.search(),
            )
        );
        println!();
    }

    fn readline_history_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "serenity", "serenity-chat")?;
        let dir = dirs.data_dir();
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::debug!("Cannot create {}: {}", dir.display(), e);
            return None;
        }
        Some(dir.join("readline_history.txt"))
    }

    fn print_welcome_banner(server: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Serenity Chat - Welcome!                          ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Server: {}", server.cyan());
        println!("Type '/help' for available commands, 'exit' to quit");
    }

    /// Display client state for `/status`
    fn print_status_display(status: &StatusSummary) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Serenity Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("History:           {} ({} chats)", status.history, status.chats);
        if status.search.trim().is_empty() {
            println!("Search:            none");
        } else {
            println!(
                "Search:            \"{}\" ({} shown)",
                render::escape_terminal(&status.search),
                status.visible
            );
        }
        match status.current {
            Some(id) => println!("Viewing:           chat {}", id),
            None => println!("Viewing:           live conversation"),
        }
        println!(
            "Title:             {}",
            render::escape_terminal(&status.title)
        );
        println!("Awaiting replies:  {}", status.pending);
        println!(
            "Suggested prompts: {} ({})",
            status.faq_count, status.faq_source
        );
        println!();
    }
}

// Suggested prompts command handler
pub mod faqs {
    //! Print the suggested prompts, falling back to the built-in list.

    use super::*;
    use crate::faq::load_faqs;

    /// Fetch and print the suggested prompts
    pub async fn show_faqs(config: &Config) -> Result<()> {
        let api = HttpChatApi::new(&config.server)?;
        let chips = load_faqs(&api, &config.ui.fallback_faqs).await;
        print!("{}", render::faq_list(&chips));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes_accepts_y_and_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES\n"));
        assert!(is_yes("  Yes "));
    }

    #[test]
    fn test_is_yes_declines_everything_else() {
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("sure"));
        assert!(!is_yes("yess"));
    }

    #[test]
    fn test_print_command_error_handles_cancelled() {
        let err: anyhow::Error = SerenityError::Cancelled("delete chat".to_string()).into();
        print_command_error(&err);
    }
}
