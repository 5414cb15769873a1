use crate::input;
use crate::EvaluateArgs;
use anyhow::{Context, Result};
use earmark_curation::evaluate;
use earmark_retrieval::Prediction;
use std::collections::BTreeMap;
use std::fs;

pub(crate) fn run(args: &EvaluateArgs) -> Result<()> {
    let predictions: BTreeMap<String, Prediction> = {
        let json = fs::read_to_string(&args.predictions)
            .with_context(|| format!("reading predictions {}", args.predictions.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing predictions {}", args.predictions.display()))?
    };
    let ground_truth: BTreeMap<String, String> = {
        let json = fs::read_to_string(&args.ground_truth)
            .with_context(|| format!("reading ground truth {}", args.ground_truth.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing ground truth {}", args.ground_truth.display()))?
    };

    let predicted_labels: BTreeMap<String, String> = predictions
        .into_iter()
        .map(|(id, prediction)| (id, prediction.label))
        .collect();
    let report = evaluate(&predicted_labels, &ground_truth);

    for (label, accuracy) in &report.per_class {
        println!("{label}: {accuracy:.4}");
    }
    println!("Macro average: {:.4}", report.macro_average);
    println!("Micro average: {:.4}", report.micro_average);
    println!("Evaluated clips: {}", report.evaluated);

    if let Some(path) = &args.output {
        input::write_json(path, &report)?;
    }
    Ok(())
}
