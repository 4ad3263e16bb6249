use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use batch_cli::render::{entry_views, render_tree};
use batch_cli::script::{self, Outcome};
use batch_editor::EditorSession;
use batch_model::BatchSchema;
use batch_store::BatchFile;

use crate::cli::{EditArgs, ShowArgs, ShowFormatArg};

pub fn run_edit(args: &EditArgs) -> Result<Outcome> {
    let schema = load_schema(args.schema.as_deref())?;
    let span = info_span!("edit", path = %args.path.display());
    let _guard = span.enter();

    let mut session = EditorSession::new(schema)?;
    session
        .open(&args.path, args.new)
        .with_context(|| format!("open {}", args.path.display()))?;
    if args.new {
        println!(
            "Created new batch file {} (not saved until commit)",
            args.path.display()
        );
    }

    let mut stdout = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            script::run(&mut session, BufReader::new(file), &mut stdout)
        }
        None => {
            println!("{}", script::HELP);
            script::run(&mut session, io::stdin().lock(), &mut stdout)
        }
    }
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref())?;
    let file = BatchFile::load(&args.path)?;
    file.expect_root(&schema.root_tag)?;
    match args.format {
        ShowFormatArg::Tree => print!("{}", render_tree(file.document(), &schema)),
        ShowFormatArg::Json => {
            let views = entry_views(file.document(), &schema);
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }
    Ok(())
}

pub fn run_schema() -> Result<()> {
    print!("{}", BatchSchema::default().to_toml_string()?);
    Ok(())
}

fn load_schema(path: Option<&Path>) -> Result<BatchSchema> {
    match path {
        Some(path) => BatchSchema::load_from(path)
            .with_context(|| format!("load schema {}", path.display())),
        None => Ok(BatchSchema::default()),
    }
}
