//! End-to-end tests: scripts run through the interpreter against the
//! dispatcher and an in-memory deck.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use decksh_kernel::{
    CommandHandler, DeckStore, Interpreter, InterpreterConfig, MemoryDeck, RunOutcome,
    SlidesDispatcher,
};
use decksh_types::{CommandResult, Slide, Value};

/// A deck seeded with the protected overview slide, wired to a dispatcher
/// and interpreter.
fn harness() -> (Arc<MemoryDeck>, Arc<SlidesDispatcher>, Interpreter) {
    let deck = Arc::new(MemoryDeck::with_slides(vec![Slide::new(
        "overview", "Overview",
    )]));
    let dispatcher = Arc::new(SlidesDispatcher::new(deck.clone()));
    let interp = Interpreter::new(dispatcher.clone());
    (deck, dispatcher, interp)
}

fn rc(outcome: &RunOutcome) -> Option<i64> {
    match outcome.variables.get("RC") {
        Some(Value::Int(i)) => Some(*i),
        _ => None,
    }
}

#[tokio::test]
async fn say_only_script_echoes_literals_in_order() {
    let (_, _, interp) = harness();
    let outcome = interp
        .execute("SAY \"alpha\"\nSAY \"beta\"\nSAY \"gamma\"")
        .await;
    assert!(outcome.success);
    assert_eq!(outcome.output, "alpha\nbeta\ngamma");
}

#[tokio::test]
async fn assignment_roundtrip() {
    let (_, _, interp) = harness();
    let outcome = interp.execute("msg = \"saved\"\nSAY msg").await;
    assert_eq!(outcome.output, "saved");
}

#[tokio::test]
async fn concatenation_is_associative() {
    let (_, _, interp) = harness();
    let outcome = interp.execute("SAY 'a' || 'b' || 'c'").await;
    assert_eq!(outcome.output, "abc");
}

#[tokio::test]
async fn new_slide_grows_deck_and_history() {
    let (deck, dispatcher, interp) = harness();
    let outcome = interp
        .execute("ADDRESS SLIDES \"new-slide slide=Second\"\nSAY RC")
        .await;
    assert!(outcome.success);
    assert_eq!(rc(&outcome), Some(0));
    assert_eq!(deck.state().await.slides.len(), 2);
    assert_eq!(dispatcher.history_len().await, 2);
    assert_eq!(dispatcher.history_cursor().await, 1);
}

#[tokio::test]
async fn undo_then_redo_roundtrips_slide_count() {
    let (deck, _, interp) = harness();

    interp.execute("ADDRESS SLIDES \"new-slide\"").await;
    assert_eq!(deck.state().await.slides.len(), 2);

    let outcome = interp.execute("ADDRESS SLIDES \"undo\"\nSAY RC").await;
    assert_eq!(rc(&outcome), Some(0));
    assert_eq!(deck.state().await.slides.len(), 1);

    let outcome = interp.execute("ADDRESS SLIDES \"redo\"\nSAY RC").await;
    assert_eq!(rc(&outcome), Some(0));
    assert_eq!(deck.state().await.slides.len(), 2);
}

#[tokio::test]
async fn undo_beyond_start_reports_nothing_to_undo() {
    let (_, _, interp) = harness();
    interp.execute("ADDRESS SLIDES \"new-slide\"").await;

    let script = "ADDRESS SLIDES \"undo\"\n\
                  ADDRESS SLIDES \"undo\"\n\
                  ADDRESS SLIDES \"undo\"\n\
                  SAY RC || ' ' || RESULT";
    let outcome = interp.execute(script).await;
    assert!(outcome.success);
    assert_eq!(outcome.output, "71 Nothing to undo");
}

#[tokio::test]
async fn delete_slide_zero_is_always_protected() {
    let (deck, _, interp) = harness();
    let outcome = interp
        .execute("ADDRESS SLIDES \"delete-slide number=0\"\nSAY RC")
        .await;
    assert_eq!(rc(&outcome), Some(51));
    assert_eq!(deck.state().await.slides.len(), 1);
}

#[tokio::test]
async fn goto_out_of_bounds_leaves_active_slide_alone() {
    let (deck, _, interp) = harness();
    interp.execute("ADDRESS SLIDES \"goto-slide number=0\"").await;

    let outcome = interp
        .execute("ADDRESS SLIDES \"goto-slide number=999\"\nSAY RC")
        .await;
    assert_eq!(rc(&outcome), Some(42));
    assert!(deck.state().await.slides[0].active);
}

#[tokio::test]
async fn unknown_command_reports_code_2_and_no_side_effect() {
    let (deck, dispatcher, interp) = harness();
    let outcome = interp
        .execute("ADDRESS SLIDES \"explode-deck now=true\"\nSAY RC")
        .await;
    assert_eq!(rc(&outcome), Some(2));
    assert_eq!(deck.state().await.slides.len(), 1);
    assert_eq!(dispatcher.history_len().await, 0);
}

#[tokio::test]
async fn script_can_branch_on_rc() {
    let (_, _, interp) = harness();
    let script = "ADDRESS SLIDES \"delete-slide number=0\"\n\
                  IF RC THEN\n\
                  SAY 'delete failed with ' || RC\n\
                  END\n\
                  SAY \"done\"";
    let outcome = interp.execute(script).await;
    assert_eq!(outcome.output, "delete failed with 51\ndone");
}

#[tokio::test]
async fn do_loop_builds_a_deck() {
    let (deck, _, interp) = harness();
    let script = "DO I = 1 TO 3\n\
                  ADDRESS SLIDES \"new-slide\"\n\
                  END\n\
                  SAY RC";
    let outcome = interp.execute(script).await;
    assert!(outcome.success);
    assert_eq!(outcome.output, "0");
    assert_eq!(deck.state().await.slides.len(), 4);
}

#[tokio::test]
async fn result_carries_structured_payload() {
    let (_, _, interp) = harness();
    let outcome = interp.execute("ADDRESS SLIDES \"list-slides\"").await;
    let Some(Value::Json(serde_json::Value::Array(list))) = outcome.variables.get("RESULT") else {
        panic!("expected a structured RESULT");
    };
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Overview");
}

#[tokio::test]
async fn set_title_then_read_back() {
    let (_, _, interp) = harness();
    let script = "ADDRESS SLIDES \"set-slide-title text=Welcome\"\n\
                  ADDRESS SLIDES \"get-current-slide\"\n\
                  SAY RESULT";
    let outcome = interp.execute(script).await;
    assert!(outcome.output.contains("\"title\":\"Welcome\""));
}

#[tokio::test]
async fn lowercase_address_directive_is_ignored() {
    let (deck, _, interp) = harness();
    let outcome = interp
        .execute("address slides \"new-slide\"\nSAY \"after\"")
        .await;
    assert_eq!(outcome.output, "after");
    assert_eq!(deck.state().await.slides.len(), 1);
    assert!(!outcome.variables.contains_key("RC"));
}

struct NeverResolves;

#[async_trait]
impl CommandHandler for NeverResolves {
    async fn run(&self, _command: &str) -> CommandResult {
        // Far longer than any test timeout; the interpreter cannot
        // preempt a pending handler, only notice afterwards.
        tokio::time::sleep(Duration::from_millis(200)).await;
        CommandResult::ok("too late")
    }
}

#[tokio::test]
async fn stalled_handler_surfaces_as_timeout_99() {
    let interp = Interpreter::new(Arc::new(NeverResolves))
        .with_config(InterpreterConfig::with_timeout_ms(50));

    let started = Instant::now();
    let outcome = interp
        .execute("ADDRESS SLIDES \"stall\"\nSAY \"unreachable\"")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_code, 99);
    assert!(outcome
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("timeout after 50ms"));
    assert!(!outcome.output.contains("unreachable"));
    // Resolution is bounded by the handler's own completion, not the
    // timeout instant.
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn two_runs_share_one_dispatcher_and_history() {
    let (deck, dispatcher, interp) = harness();
    interp.execute("ADDRESS SLIDES \"new-slide slide=A\"").await;
    interp.execute("ADDRESS SLIDES \"new-slide slide=B\"").await;

    assert_eq!(deck.state().await.slides.len(), 3);
    // Baseline + two mutations, accumulated across runs.
    assert_eq!(dispatcher.history_len().await, 3);

    let outcome = interp.execute("ADDRESS SLIDES \"undo\"\nSAY RC").await;
    assert_eq!(rc(&outcome), Some(0));
    assert_eq!(deck.state().await.slides.len(), 2);
}
