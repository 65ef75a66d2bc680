//! NaviChat terminal client
//!
//! Plays a flow against a running NaviChat server from stdin. Type a keyword to
//! start, answer each prompt, type a hint label (e.g. `ヒント1`) after a retry,
//! or the reset command to start over.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use NaviChat::{
    config::Settings,
    handlers::types::ChatResponse,
    services::ChatClient,
    state::{
        session::{GREETING, RESET_NOTICE},
        ChatSession, HintButton, SessionEvent,
    },
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;
    let _guard = logging::init_logging(&settings.logging)?;

    let client = ChatClient::new(&settings.client)?;
    let mut session = ChatSession::new(settings.client.payload_limit);
    let mut hints: Vec<HintButton> = Vec::new();

    debug!(endpoint = client.endpoint(), "Client started");
    println!("{}", GREETING);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input == settings.client.reset_command {
            if let Some(keyword) = session.keyword() {
                logging::log_flow_event(keyword, "reset", None);
            }
            session.reset();
            hints.clear();
            println!("{}", RESET_NOTICE);
            continue;
        }

        let Some(keyword) = session.keyword().map(str::to_string) else {
            let request = session.begin(input);
            match client.send(&request).await {
                Ok(reply) => {
                    session.bind(&request.keyword);
                    logging::log_flow_event(&request.keyword, "bound", None);
                    show(&mut session, &mut hints, &reply);
                }
                Err(e) => report(&e),
            }
            continue;
        };

        let hint = hints.iter().find(|button| button.label == input).cloned();
        let request = match &hint {
            Some(button) => session.hint_request(button),
            None => session.answer_request(input),
        };
        let Some(request) = request else {
            continue;
        };

        match client.send(&request).await {
            Ok(reply) => {
                logging::log_turn_outcome(&keyword, &request.step, outcome(&reply, hint.is_some()), &reply.next);
                show(&mut session, &mut hints, &reply);
            }
            Err(e) => report(&e),
        }
    }

    Ok(())
}

fn outcome(reply: &ChatResponse, hint: bool) -> &'static str {
    if hint {
        "hint"
    } else if reply.retry.unwrap_or(false) {
        "retry"
    } else {
        "accepted"
    }
}

/// Print a reply and fold it into the session
fn show(session: &mut ChatSession, hints: &mut Vec<HintButton>, reply: &ChatResponse) {
    println!("{}：{}", reply.role, reply.prompt);

    if let Some(buttons) = &reply.hints {
        *hints = buttons.clone();
        let labels: Vec<&str> = buttons.iter().map(|button| button.label.as_str()).collect();
        println!("  [{}]", labels.join("] ["));
    } else if reply.next != session.step() {
        hints.clear();
    }

    if let SessionEvent::Finished { keyword, handoff_text } = session.apply(reply) {
        logging::log_handoff(&keyword, &handoff_text);
        logging::log_flow_event(&keyword, "finished", None);
        hints.clear();
        println!("----");
        println!("{}", handoff_text);
        println!("----");
    }
}

fn report(err: &NaviChat::NaviChatError) {
    if !err.is_not_found() {
        logging::log_api_error("chat", &err.to_string(), None);
    }
    println!("{}", ChatSession::failure_message(err));
}
