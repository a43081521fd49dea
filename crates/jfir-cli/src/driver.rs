//! Loads the inputs, synthesizes the requested classes and renders them.

use crate::args::{CliArgs, OutputFormat};
use anyhow::{Context, Result, bail};
use jfir_common::InteropOptions;
use jfir_interop::{ClassView, InteropSession};
use jfir_model::{ClassModel, InMemoryClassFinder};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one invocation and returns what should be printed.
pub fn run(args: &CliArgs) -> Result<String> {
    let model = load_model(&args.classes)?;
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None => InteropOptions::default(),
    };
    options.ignore_nullability_annotations |= args.ignore_nullability;

    let class_names = if args.class_names.is_empty() {
        top_level_class_names(&model)
    } else {
        args.class_names.clone()
    };
    info!(classes = model.classes.len(), requested = class_names.len(), "jfir: model loaded");

    let session = InteropSession::builder(Arc::new(InMemoryClassFinder::new(model)))
        .options(options)
        .build();
    let views = class_names
        .par_iter()
        .map(|fq_name| class_view(&session, fq_name, args.scopes))
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Text => Ok(views
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Json => serde_json::to_string_pretty(&views).context("failed to serialize classes"),
    }
}

fn load_model(path: &Path) -> Result<ClassModel> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read class model {}", path.display()))?;
    ClassModel::from_json(&text).with_context(|| format!("invalid class model {}", path.display()))
}

fn load_options(path: &Path) -> Result<InteropOptions> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read options {}", path.display()))?;
    InteropOptions::from_json(&text).with_context(|| format!("invalid options {}", path.display()))
}

/// Dotted names of the model's top-level classes, sorted.
fn top_level_class_names(model: &ClassModel) -> Vec<String> {
    let mut names: Vec<String> = model
        .classes
        .iter()
        .filter(|class| class.is_top_level())
        .map(|class| class.class_id.as_fq_name().as_str().to_string())
        .collect();
    names.sort();
    names
}

fn class_view(session: &InteropSession, fq_name: &str, with_scopes: bool) -> Result<ClassView> {
    debug!(fq_name, "jfir: resolving class");
    let Some(class) = session
        .find_class_by_fq_name(fq_name)
        .with_context(|| format!("failed to synthesize {fq_name}"))?
    else {
        bail!("class `{fq_name}` not found");
    };
    let view = ClassView::new(session, &class);
    if with_scopes {
        return view
            .with_scopes(session, &class)
            .with_context(|| format!("failed to build scopes of {fq_name}"));
    }
    Ok(view)
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
