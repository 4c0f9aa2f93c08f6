//! The script interpreter: a line-by-line execution loop.
//!
//! Scripts execute against a fresh `Scope`; ADDRESS directives route
//! through an injected `CommandHandler` and write the reserved `RC` and
//! `RESULT` variables. The run resolves with a `RunOutcome` — it never
//! returns an error to the caller; internal failures (currently the
//! cooperative timeout) surface as `success: false` with code 99.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::eval::{evaluate, value_to_bool, value_to_string};
use crate::scope::Scope;
use crate::statement::{has_keyword_prefix, Classifier, Statement};

/// Receiver for ADDRESS-directive command strings.
///
/// The dispatcher implements this; tests substitute stubs.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, command: &str) -> CommandResult;
}

/// Interpreter settings.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Wall-clock budget for one run, checked once per source line.
    pub timeout: Duration,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30_000),
        }
    }
}

impl InterpreterConfig {
    /// Config with a timeout given in milliseconds.
    pub fn with_timeout_ms(ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(ms),
        }
    }
}

/// The aggregate result of one script run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// True when the script ran to completion.
    pub success: bool,
    /// Captured SAY output, newline-joined. On failure the final line is
    /// `ERROR: <message>`.
    pub output: String,
    /// Final variable bindings, including `RC`/`RESULT`.
    pub variables: HashMap<String, Value>,
    /// The failure message, when the run failed.
    pub error: Option<String>,
    /// 0 on success, 99 on any run failure.
    pub error_code: i64,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Script execution timeout after {0}ms")]
    Timeout(u128),
}

/// Executes scripts against an optional command handler.
pub struct Interpreter {
    handler: Option<Arc<dyn CommandHandler>>,
    config: InterpreterConfig,
    classifier: Classifier,
}

/// Mutable state threaded through one run.
struct RunState {
    lines: Vec<String>,
    scope: Scope,
    captured: Vec<String>,
    started: Instant,
}

impl Interpreter {
    /// Create an interpreter routing ADDRESS directives to `handler`.
    pub fn new(handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            handler: Some(handler),
            config: InterpreterConfig::default(),
            classifier: Classifier::new(),
        }
    }

    /// Create an interpreter with no command handler; ADDRESS directives
    /// fail with the handler-not-initialized code.
    pub fn unconnected() -> Self {
        Self {
            handler: None,
            config: InterpreterConfig::default(),
            classifier: Classifier::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute a script, discarding streaming output.
    pub async fn execute(&self, script: &str) -> RunOutcome {
        self.execute_streaming(script, &mut |_| {}).await
    }

    /// Execute a script, invoking `on_output` once per SAY line as it is
    /// produced, in order.
    #[tracing::instrument(level = "info", skip(self, script, on_output), fields(script_len = script.len()))]
    pub async fn execute_streaming(
        &self,
        script: &str,
        on_output: &mut (dyn FnMut(&str) + Send),
    ) -> RunOutcome {
        let mut run = RunState {
            lines: script.lines().map(str::to_string).collect(),
            scope: Scope::new(),
            captured: Vec::new(),
            started: Instant::now(),
        };

        let end = run.lines.len();
        match self.execute_range(&mut run, 0, end, on_output).await {
            Ok(()) => RunOutcome {
                success: true,
                output: run.captured.join("\n"),
                variables: run.scope.into_vars(),
                error: None,
                error_code: 0,
            },
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(error = %message, "script run failed");
                run.captured.push(format!("ERROR: {message}"));
                RunOutcome {
                    success: false,
                    output: run.captured.join("\n"),
                    variables: run.scope.into_vars(),
                    error: Some(message),
                    error_code: 99,
                }
            }
        }
    }

    /// Execute the lines in `[start, end)`. Loop bodies re-enter this with
    /// a narrower range, so the future is boxed for recursion.
    fn execute_range<'a>(
        &'a self,
        run: &'a mut RunState,
        start: usize,
        end: usize,
        on_output: &'a mut (dyn FnMut(&str) + Send),
    ) -> Pin<Box<dyn Future<Output = Result<(), RunError>> + Send + 'a>> {
        Box::pin(async move {
            let mut cursor = start;
            while cursor < end {
                // Cooperative timeout: once per line, never mid-await.
                if run.started.elapsed() > self.config.timeout {
                    return Err(RunError::Timeout(self.config.timeout.as_millis()));
                }

                let statement = self.classifier.classify(&run.lines[cursor]);
                cursor += 1;

                match statement {
                    Statement::Blank
                    | Statement::Comment
                    | Statement::End
                    | Statement::Unknown => {}

                    Statement::BlockCommentStart => {
                        // The scan starts at the following line even when
                        // the opening line carries its own closing marker.
                        while cursor < end && !run.lines[cursor].contains("*/") {
                            cursor += 1;
                        }
                        if cursor < end {
                            cursor += 1;
                        }
                    }

                    Statement::Say(expr) => {
                        let text = value_to_string(&evaluate(&expr, &run.scope));
                        run.captured.push(text.clone());
                        on_output(&text);
                    }

                    Statement::Address { command } => {
                        if let Some(cmd) = command {
                            let result = self.route("SLIDES", &cmd).await;
                            run.scope.apply_command_result(&result);
                        }
                    }

                    Statement::Assign { name, expr } => {
                        let value = evaluate(&expr, &run.scope);
                        run.scope.set(name, value);
                    }

                    Statement::If { condition } => {
                        if !value_to_bool(&evaluate(&condition, &run.scope)) {
                            cursor = skip_if_block(&run.lines, cursor, end);
                        }
                    }

                    Statement::Do { var, from, to } => {
                        let (body_end, resume) = do_body_extent(&run.lines, cursor, end);
                        for counter in from..=to {
                            run.scope.set(var.clone(), Value::Int(counter));
                            self.execute_range(&mut *run, cursor, body_end, &mut *on_output)
                                .await?;
                        }
                        cursor = resume;
                    }
                }
            }
            Ok(())
        })
    }

    /// Route an address/command pair to the injected handler.
    ///
    /// Only the SLIDES address is meaningful; anything else fails without
    /// invoking the handler.
    async fn route(&self, address: &str, command: &str) -> CommandResult {
        if !address.eq_ignore_ascii_case("SLIDES") {
            return CommandResult::fail(2, format!("Unknown address: {address}"));
        }
        match &self.handler {
            Some(handler) => handler.run(command).await,
            None => CommandResult::fail(1, "Slides handler not initialized"),
        }
    }
}

/// Skip a false IF branch: scan until the matching END at depth zero.
///
/// Only IF-leading lines open and END-leading lines close — a DO block
/// inside a skipped branch mis-counts. That is the language's documented
/// skip behavior, kept as-is.
fn skip_if_block(lines: &[String], start: usize, end: usize) -> usize {
    let mut cursor = start;
    let mut depth = 1i32;
    while cursor < end && depth > 0 {
        let line = lines[cursor].trim();
        cursor += 1;
        if has_keyword_prefix(line, "IF") {
            depth += 1;
        }
        if has_keyword_prefix(line, "END") {
            depth -= 1;
        }
    }
    cursor
}

/// Find a DO loop's body extent starting just past the DO line.
///
/// IF- and DO-leading lines open a block, END-leading lines close one.
/// Returns (body_end, resume): the body is `[start, body_end)` and
/// execution resumes at `resume`, past the matching END. An unterminated
/// loop runs to the end of the range.
fn do_body_extent(lines: &[String], start: usize, end: usize) -> (usize, usize) {
    let mut depth = 1i32;
    let mut cursor = start;
    while cursor < end {
        let line = lines[cursor].trim();
        if has_keyword_prefix(line, "IF") || has_keyword_prefix(line, "DO") {
            depth += 1;
        } else if has_keyword_prefix(line, "END") {
            depth -= 1;
            if depth == 0 {
                return (cursor, cursor + 1);
            }
        }
        cursor += 1;
    }
    (end, end)
}
