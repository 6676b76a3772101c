//! End-to-end keyword dispatch over the console adapter
//! Run with: cargo test --test keyword_dispatch_test

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration;

use tokio::sync::mpsc;

use keyword_bot::infrastructure::adapters::ConsoleAdapter;
use keyword_bot::infrastructure::config::Config;
use keyword_bot::infrastructure::display::PlainRenderer;
use keyword_bot::{action, CallbackError, ChatClient, ChatMessage, ChatSender, KeywordBot, MatchKind, SharedRegistry};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

async fn collect(rx: &mut mpsc::UnboundedReceiver<String>, expected: usize) -> Vec<String> {
    let mut lines = Vec::new();
    while lines.len() < expected {
        match tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Some(line)) => lines.push(line),
            _ => break,
        }
    }
    lines.sort();
    lines
}

/// Configured replies and a code-registered callback all answer through the client
#[tokio::test]
async fn test_console_session_fires_replies() {
    ensure_init();

    let config = Config::from_yaml(
        r#"
keywords:
  - kind: exact
    rule: "!hello"
    reply: "Hello, {sender}!"
  - kind: prefix
    rule: "!echo "
    reply: "{content}"
  - kind: contains
    rule: "gg"
    reply: "GG!"
"#,
    )
    .expect("config should parse");

    let input: &[u8] = b"<Ann> !hello\n<bob> !echo hi\njust chatting\n<ann> that was a ggwp\n";
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = ConsoleAdapter::from_reader(input, "test_channel").with_outbox(tx);

    let mut bot = KeywordBot::new(client, SharedRegistry::new()).with_renderer(Box::new(PlainRenderer));
    assert_eq!(bot.register_replies(&config.keywords).unwrap(), 3);

    bot.run().await.expect("run should finish at end of input");

    let replies = collect(&mut rx, 3).await;
    assert_eq!(
        replies,
        vec![
            "!echo hi".to_string(),
            "GG!".to_string(),
            "Hello, Ann!".to_string(),
        ]
    );
}

/// One failing callback leaves the other callbacks for the same message running
#[tokio::test]
async fn test_failure_is_isolated_per_callback() {
    ensure_init();

    let registry = SharedRegistry::new();
    let hits = Arc::new(AtomicUsize::new(0));

    registry
        .add_keyword(
            "go",
            action(|_msg: ChatMessage| async {
                Err::<(), CallbackError>(CallbackError::Failed("nope".to_string()))
            }),
        )
        .unwrap();

    let counted = hits.clone();
    registry
        .set(
            MatchKind::Prefix,
            "go",
            action(move |_msg: ChatMessage| {
                let counted = counted.clone();
                async move {
                    counted.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), CallbackError>(())
                }
            }),
        )
        .unwrap();

    let client = ConsoleAdapter::from_reader(&b""[..], "test_channel");
    let bot = KeywordBot::new(client, registry).with_renderer(Box::new(PlainRenderer));

    let processed = bot.process(&ChatMessage::from_text("viewer", "go")).unwrap();
    assert!(processed.dispatched.matched);
    assert_eq!(processed.dispatched.fired_kinds(), vec![MatchKind::Exact, MatchKind::Prefix]);
    processed.dispatched.settle().await;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// Callbacks can reply through the sender they captured
#[tokio::test]
async fn test_callback_replies_via_sender() {
    ensure_init();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = ConsoleAdapter::from_reader(&b"!ping\n"[..], "test_channel").with_outbox(tx);
    let sender = client.sender();

    let registry = SharedRegistry::new();
    registry
        .add_keyword(
            "!ping",
            action(move |msg: ChatMessage| {
                let sender = sender.clone();
                async move {
                    sender.say(&format!("pong @{}", msg.sender.name())).await?;
                    Ok::<(), CallbackError>(())
                }
            }),
        )
        .unwrap();

    let mut bot = KeywordBot::new(client, registry).with_renderer(Box::new(PlainRenderer));
    bot.run().await.unwrap();

    assert_eq!(collect(&mut rx, 1).await, vec!["pong @you".to_string()]);
}
