use clap::Parser;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;
use tejun::prelude::*;

/// Generates random but well-formed flow documents for manual testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of steps to generate (start and end steps included)
    #[arg(long, default_value_t = 8)]
    steps: usize,

    /// Document id
    #[arg(long, default_value = "generated_flow")]
    id: String,

    /// Output file; prints to stdout when omitted
    #[arg(long)]
    out: Option<String>,
}

const TOPICS: &[&str] = &[
    "Check the hydraulic pressure",
    "Inspect the brake line",
    "Confirm the warning lamp state",
    "Restart the control unit",
    "Measure the battery voltage",
    "Secure the work area",
    "Drain the coolant",
    "Replace the fuse",
];

const KEYWORDS: &[&str] = &["brake", "engine", "hydraulic", "battery", "coolant", "fuse"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let step_count = cli.steps.max(2);
    let mut rng = rand::rng();

    let mut doc = FlowDocument::new(&cli.id);
    doc.title = format!("Generated flow ({} steps)", step_count);
    doc.description = "Randomly generated troubleshooting flow.".to_string();
    for keyword in KEYWORDS.choose_multiple(&mut rng, 2) {
        doc.trigger_keywords.push((*keyword).to_string());
    }

    let mut mutator = GraphMutator::new();
    for _ in 0..step_count - 1 {
        doc = mutator.add_step(&doc);
    }

    // Wire each step to the next one; sprinkle in decisions and checklists.
    let ids: Vec<String> = doc.steps.iter().map(|s| s.id.clone()).collect();
    for (index, id) in ids.iter().enumerate() {
        let last = index == ids.len() - 1;
        let mut patch = StepPatch::new()
            .title(*TOPICS.choose(&mut rng).unwrap_or(&TOPICS[0]))
            .message(format!("Instruction text for {}", id));

        if last {
            patch = patch.kind(StepKind::End);
        } else if index > 0 && rng.random_bool(0.3) {
            patch = patch.kind(StepKind::Decision);
        } else {
            patch = patch.next(ids[index + 1].clone());
        }
        doc = mutator.update_step(&doc, id, &patch)?;

        if !last && doc.step(id).map(|s| s.kind) == Some(StepKind::Decision) {
            let yes = StepOption::new("Yes", ids[index + 1].clone()).with_condition_type("yes");
            // "No" loops back to the start, exercising cyclic flows.
            let no = StepOption::new("No", ids[0].clone()).with_condition_type("no");
            doc = mutator.add_option(&doc, id, yes)?;
            doc = mutator.add_option(&doc, id, no)?;
        } else if rng.random_bool(0.4) {
            doc = mutator.add_checklist_item(&doc, id, "Area secured")?;
            doc = mutator.add_checklist_item(&doc, id, "Machine powered off")?;
        }
    }

    validate(&doc)?;
    let json = wire::encode_pretty(&doc)?;
    match cli.out {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!("Wrote {} steps to {}", step_count, path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
