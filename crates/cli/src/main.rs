use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use catalog_infra::{CatalogConfig, InMemoryProductStore, ProductService};

fn main() -> anyhow::Result<ExitCode> {
    let config = CatalogConfig::from_env().context("invalid configuration")?;
    catalog_observability::init_with(&config.observability());

    let inputs: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        eprintln!("usage: catalog <products.json>...");
        return Ok(ExitCode::from(2));
    }

    let service = ProductService::new(InMemoryProductStore::new());

    if let Some(seed_file) = &config.seed_file {
        let drafts = catalog_cli::read_drafts(seed_file)?;
        let stored = catalog_cli::seed(&service, &drafts);
        tracing::info!(seed_file = %seed_file.display(), stored, "seed collection loaded");
    }

    let mut all_accepted = true;
    for path in &inputs {
        let outcomes = match catalog_cli::read_drafts(path) {
            Ok(records) => catalog_cli::process(&service, &records),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %format!("{err:#}"), "input skipped");
                vec![catalog_cli::Outcome::failed(format_args!("{err:#}"))]
            }
        };
        for outcome in outcomes {
            all_accepted &= outcome.is_accepted();
            println!("{}", serde_json::to_string(&outcome)?);
        }
    }

    Ok(if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
