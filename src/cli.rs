//! Terminal host — stdin/stdout stand-in for the browser widget.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{RwLock, mpsc};

use crate::api::{HttpLeadApi, LeadApi, WidgetSettings};
use crate::config::WidgetConfig;
use crate::error::Result;
use crate::history::ConversationHistory;
use crate::lead::{LeadCollector, WidgetEvent};

/// Typed at the prompt to leave.
pub const QUIT_COMMAND: &str = "/quit";

/// Typed at the prompt to start lead collection directly.
pub const CONTACT_COMMAND: &str = "/contact";

const DEFAULT_WELCOME: &str = "Hi there! How can I help you today?";

/// Configure from the environment, greet, and run the REPL until the user
/// leaves.
pub async fn run() -> Result<()> {
    let config = WidgetConfig::from_env()?;

    eprintln!("💬 Lead Widget v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Service: {}", config.api_base);
    eprintln!("   Client: {}", config.client_id);
    match config.request_timeout {
        Some(t) => eprintln!("   Timeout: {}s", t.as_secs()),
        None => eprintln!("   Timeout: none"),
    }
    eprintln!("   Type a message and press Enter. {CONTACT_COMMAND} to leave your details, {QUIT_COMMAND} to exit.\n");

    let api: Arc<dyn LeadApi> = Arc::new(HttpLeadApi::new(config.api_base.clone()));
    let history = Arc::new(RwLock::new(ConversationHistory::new()));
    let (collector, events) = LeadCollector::new(api, config, history);
    let collector = Arc::new(collector);

    let settings = match collector.load_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Could not load widget settings; using defaults");
            WidgetSettings::default()
        }
    };
    let bot_name = settings
        .bot_settings
        .bot_name
        .unwrap_or_else(|| "Assistant".to_string());
    let welcome = settings
        .bot_settings
        .welcome_message
        .unwrap_or_else(|| DEFAULT_WELCOME.to_string());

    let renderer = spawn_renderer(events, bot_name);
    collector.announce(welcome).await?;

    run_repl(Arc::clone(&collector)).await?;

    // Closing the event channel ends the renderer
    drop(collector);
    if let Err(e) = renderer.await {
        tracing::error!("Renderer task failed: {}", e);
    }
    Ok(())
}

/// Render widget events to the terminal until the controller goes away.
pub fn spawn_renderer(
    mut events: mpsc::UnboundedReceiver<WidgetEvent>,
    bot_name: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                WidgetEvent::Message(text) => println!("\n{bot_name}: {text}\n"),
                WidgetEvent::Typing(true) => eprintln!("⏳ {bot_name} is typing..."),
                WidgetEvent::Typing(false) => {}
                WidgetEvent::Suggestions(questions) => {
                    for q in questions {
                        println!("  • {q}");
                    }
                    println!();
                }
                WidgetEvent::ShowContactButton => {
                    eprintln!("   Type {CONTACT_COMMAND} to reach our team.")
                }
                WidgetEvent::LeadSubmitted => tracing::debug!("Lead submitted"),
            }
        }
    })
}

/// Read lines from stdin and feed them to the collector until EOF or `/quit`.
pub async fn run_repl(collector: Arc<LeadCollector>) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    eprint!("> ");
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == QUIT_COMMAND {
            break;
        }

        if line == CONTACT_COMMAND {
            collector.request_contact().await?;
        } else {
            collector.handle_user_message(line).await?;
        }
        // let the renderer drain before prompting again
        tokio::task::yield_now().await;
        eprint!("> ");
    }
    Ok(())
}
