use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the jfir binary.
#[derive(Parser, Debug)]
#[command(
    name = "jfir",
    version,
    about = "Inspect Java classes as seen by the jfir frontend"
)]
pub struct CliArgs {
    /// JSON class model (`{ "classes": [...], "packages": [...] }`).
    #[arg(short = 'c', long = "classes")]
    pub classes: PathBuf,

    /// JSON session options. Defaults apply when omitted.
    #[arg(short = 'o', long = "options")]
    pub options: Option<PathBuf>,

    /// Dotted name of a class to show, e.g. `java.util.Map.Entry`.
    /// Every top-level class of the model is shown when omitted.
    #[arg(long = "class", value_name = "FQ_NAME")]
    pub class_names: Vec<String>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also list the use-site and static member scopes.
    #[arg(long)]
    pub scopes: bool,

    /// Ignore nullability annotations; every foreign type stays flexible.
    #[arg(long = "ignore-nullability")]
    pub ignore_nullability: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
