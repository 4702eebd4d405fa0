use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::Arc;

use anyhow::Context;
use completion_api::CompletionApiClient;
use publish_api::PublishApiClient;
use tracing_subscriber::EnvFilter;

use docdesk::app::{App, HostOps, STATUS_IDLE};
use docdesk::commands::{parse_slash_command, SlashCommand};
use docdesk::config::AppConfig;
use docdesk::render::render_entry;
use docdesk::runtime::{ExchangeEvent, ExchangeRuntime};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env();
    let extended = config.extended_mode();

    let completion =
        Arc::new(CompletionApiClient::new(config.completion).context("completion client")?);
    let publish = match config.publish {
        Some(config) => {
            Some(Arc::new(PublishApiClient::new(config).context("publish client")?))
        }
        None => None,
    };

    let (events_tx, events_rx) = mpsc::channel();
    let mut host =
        ExchangeRuntime::new(completion, publish, events_tx).context("exchange runtime")?;
    let mut app = App::new(extended);

    println!("docdesk — paste code to document it; end the paste with a blank line.");
    println!("/help for commands.");

    let stdin = io::stdin();
    let mut rendered_upto = 0usize;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();

        match parse_slash_command(&line) {
            Some(SlashCommand::Help) => {
                print_help(extended);
                continue;
            }
            Some(SlashCommand::Quit) => break,
            Some(SlashCommand::Publish(entry_id)) => {
                let title = prompt_title(&stdin)?;
                app.on_publish(entry_id, title, &mut host);
            }
            Some(SlashCommand::Unknown(command)) => {
                println!("Unknown command: {command}");
                continue;
            }
            None => {
                let block = read_block(line, &mut stdin.lock())?;
                app.on_submit(&block, &mut host);
            }
        }

        // Each flow allows one outstanding exchange; block until it settles.
        let mut last_status = String::new();
        while app.is_busy() {
            if app.status_text() != STATUS_IDLE && app.status_text() != last_status {
                println!("{}", app.status_text());
                last_status = app.status_text().to_string();
            }

            match events_rx.recv() {
                Ok(event) => apply_event(&mut app, event, &mut host),
                Err(_) => break,
            }
        }

        for entry in &app.transcript().entries()[rendered_upto..] {
            println!("\n{}", render_entry(entry, extended));
        }
        rendered_upto = app.transcript().len();

        if let Some(error) = app.last_error() {
            println!("\n{error}");
        }
        if let Some(alert) = app.take_alert() {
            println!("\n{alert}");
        }
    }

    Ok(())
}

fn apply_event(app: &mut App, event: ExchangeEvent, host: &mut dyn HostOps) {
    match event {
        ExchangeEvent::CompletionFinished { request_id, text } => {
            app.on_completion_finished(request_id, text, host);
        }
        ExchangeEvent::CompletionFailed { request_id, error } => {
            app.on_completion_failed(request_id, &error, host);
        }
        ExchangeEvent::PublishFinished { request_id } => {
            app.on_publish_finished(request_id, host);
        }
        ExchangeEvent::PublishFailed { request_id, error } => {
            app.on_publish_failed(request_id, &error, host);
        }
    }
}

fn prompt_title(stdin: &io::Stdin) -> io::Result<Option<String>> {
    print!("Title for the wiki page: ");
    io::stdout().flush()?;

    let mut title = String::new();
    if stdin.lock().read_line(&mut title)? == 0 {
        return Ok(None);
    }
    let title = title.trim().to_string();
    Ok((!title.is_empty()).then_some(title))
}

fn print_help(extended: bool) {
    let publish = if extended { ", /publish <entry>" } else { "" };
    println!("Commands: /help, /quit{publish}");
    println!("Anything else starts a code paste; a blank line submits it for analysis.");
}

/// Collects a pasted block: the opening line plus every following line, up to
/// a blank line or end of input.
fn read_block<R: BufRead>(first: String, input: &mut R) -> io::Result<String> {
    let mut block = first;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            break;
        }
        block.push('\n');
        block.push_str(line);
    }
    Ok(block)
}
