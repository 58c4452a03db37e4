use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use tejun::prelude::*;
use tracing_subscriber::EnvFilter;

/// Inspect, diff and interactively walk troubleshooting flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document JSON file
    flow_path: String,

    /// Validate the document and exit
    #[arg(long)]
    check: bool,

    /// Print a change summary against another flow document file and exit
    #[arg(long, value_name = "ORIGINAL")]
    diff: Option<String>,

    /// Step id to start the walk from
    #[arg(long, default_value = START_STEP_ID)]
    start: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let doc = load_document(&cli.flow_path)?;

    if cli.check {
        validate_for_save(&doc)?;
        println!(
            "OK: '{}' ({} steps, {} trigger keywords)",
            doc.title,
            doc.steps.len(),
            doc.trigger_keywords.len()
        );
        return Ok(());
    }

    if let Some(original_path) = cli.diff {
        let original = load_document(&original_path)?;
        let summary = analyze(&original, &doc);
        println!("Changes ({} -> {}):", original_path, cli.flow_path);
        println!("  added:    {}", summary.added);
        println!("  modified: {}", summary.modified);
        println!("  deleted:  {}", summary.deleted);
        return Ok(());
    }

    validate(&doc)?;
    walk(&doc, &cli.start)
}

fn load_document(path: &str) -> Result<FlowDocument> {
    let json = fs::read_to_string(path)?;
    Ok(wire::decode(&json)?)
}

/// Drives one interactive run session on stdin/stdout.
fn walk(doc: &FlowDocument, start: &str) -> Result<()> {
    let engine = ExecutionEngine::new(doc);
    let mut state = engine.start(start);
    let stdin = io::stdin();

    println!("== {} ==", if doc.title.is_empty() { &doc.id } else { &doc.title });
    println!("Commands: <number> choose option, n next, t <i> toggle checklist, b back, r reset, q quit");

    loop {
        let Some(step) = engine.current_step(&state) else {
            println!("Step '{}' is not part of this flow.", state.current_step_id);
            return Ok(());
        };

        print_step(&engine, &state, step);
        if engine.is_terminal(step) && step.options.is_empty() {
            println!("-- flow complete --");
            return Ok(());
        }

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match apply_command(&engine, &state, step, start, line.trim()) {
            Ok(Some(next)) => state = next,
            Ok(None) => return Ok(()),
            Err(err) => println!("! {}", err),
        }
    }
}

fn print_step(engine: &ExecutionEngine, state: &ExecutionState, step: &Step) {
    println!();
    println!("[{}] {}", step.id, step.title);
    if !step.message.is_empty() {
        println!("{}", step.message);
    }
    if !step.condition.is_empty() {
        println!("condition: {}", step.condition);
    }
    for (index, item) in step.checklist.iter().enumerate() {
        let mark = if state.is_checked(&step.id, index) { "x" } else { " " };
        println!("  [{}] {} {}", mark, index, item);
    }
    for (index, option) in step.options.iter().enumerate() {
        println!("  {}) {} -> {}", index + 1, option.text, option.next_step_id);
    }
    if !step.next.is_empty() && engine.is_advance_allowed(state) {
        println!("  (n to continue to '{}')", step.next);
    }
}

fn apply_command(
    engine: &ExecutionEngine,
    state: &ExecutionState,
    step: &Step,
    start: &str,
    command: &str,
) -> std::result::Result<Option<ExecutionState>, ExecutionError> {
    match command {
        "q" => Ok(None),
        "b" => Ok(Some(engine.back(state))),
        "r" => Ok(Some(engine.reset(start))),
        "n" => engine.advance(state).map(Some),
        _ => {
            if let Some(index) = command.strip_prefix("t ").and_then(|s| s.parse::<usize>().ok()) {
                return Ok(Some(engine.toggle_checklist_item(state, index)));
            }
            if let Some(choice) = command.parse::<usize>().ok().filter(|c| *c >= 1) {
                if let Some(option) = step.options.get(choice - 1) {
                    return engine.select_option(state, &option.next_step_id).map(Some);
                }
            }
            // Unknown input: stay on the current step.
            Ok(Some(state.clone()))
        }
    }
}
