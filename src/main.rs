use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use arabicwriter_client::api::ApiClient;
use arabicwriter_client::config::Config;
use arabicwriter_client::controller::{Controller, UiEvent};
use arabicwriter_client::logging;

const HELP: &str = "Commands:
  add <word>      translate an Arabic word and save it
  search [text]   filter the list (empty text clears the filter)
  next / prev     change page
  size <n>        set page size
  del <id>        delete a word (asks for confirmation)
  clear           delete every word from this session (asks for confirmation)
  play <id>       play word audio
  stats           show word statistics
  freq            show most frequent words
  login / logout  show the login/logout URL
  refresh         reload the current page
  help            show this help
  quit            exit";

#[derive(Debug, PartialEq)]
enum Command {
    Event(UiEvent),
    ConfirmDelete(i64),
    ConfirmClear,
    Help,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match head {
        "add" => Command::Event(UiEvent::Submit(rest.to_string())),
        "search" => Command::Event(UiEvent::SearchInput(rest.to_string())),
        "next" => Command::Event(UiEvent::NextPage),
        "prev" => Command::Event(UiEvent::PrevPage),
        "size" => match rest.parse::<u32>() {
            Ok(size) => Command::Event(UiEvent::SetPageSize(size)),
            Err(_) => Command::Unknown,
        },
        "del" | "delete" => match rest.parse::<i64>() {
            Ok(id) => Command::ConfirmDelete(id),
            Err(_) => Command::Unknown,
        },
        "clear" => Command::ConfirmClear,
        "play" => match rest.parse::<i64>() {
            Ok(id) => Command::Event(UiEvent::PlayAudio(id)),
            Err(_) => Command::Unknown,
        },
        "stats" => Command::Event(UiEvent::ShowStats),
        "freq" | "frequency" => Command::Event(UiEvent::ShowFrequency),
        "login" => Command::Event(UiEvent::ShowLogin),
        "logout" => Command::Event(UiEvent::ShowLogout),
        "refresh" => Command::Event(UiEvent::Refresh),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    };
    Some(command)
}

async fn confirm(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> bool {
    println!("{prompt} (y/N)");
    matches!(
        lines.next_line().await,
        Ok(Some(answer)) if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    )
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(err) => {
            tracing::error!(error = %err, "failed to build API client");
            return;
        }
    };
    tracing::info!(
        base_url = %config.api_base_url,
        session = api.session_tag(),
        require_auth = config.require_auth,
        "arabicwriter client starting"
    );

    let (events, rx) = mpsc::channel(32);
    let controller = Controller::new(api, &config);
    let loop_handle = tokio::spawn(controller.run(rx));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                let _ = events.send(UiEvent::Quit).await;
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let Some(command) = parse_command(&line) else {
                            continue;
                        };
                        match command {
                            Command::Quit => {
                                let _ = events.send(UiEvent::Quit).await;
                                break;
                            }
                            Command::Help => println!("{HELP}"),
                            Command::Unknown => println!("Unknown command; type `help`."),
                            Command::ConfirmDelete(id) => {
                                let confirmed =
                                    confirm(&mut lines, &format!("Delete word #{id}?")).await;
                                let _ = events.send(UiEvent::Delete { id, confirmed }).await;
                            }
                            Command::ConfirmClear => {
                                let confirmed =
                                    confirm(&mut lines, "Delete every word from this session?")
                                        .await;
                                let _ = events.send(UiEvent::ClearAll { confirmed }).await;
                            }
                            Command::Event(event) => {
                                let _ = events.send(event).await;
                            }
                        }
                    }
                    Ok(None) => {
                        let _ = events.send(UiEvent::Quit).await;
                        break;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "stdin read failed");
                        break;
                    }
                }
            }
        }
    }

    let _ = loop_handle.await;
}
