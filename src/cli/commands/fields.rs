use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use kusto_conn::api::fields::{FieldBehaviour, FormWidget, connection_form_widgets, ui_field_behaviour};

#[derive(Args)]
pub struct FieldsArgs {
    /// Prefix non-standard keys with `extra__azure_data_explorer__`
    #[arg(long)]
    pub legacy_prefixes: bool,
}

#[derive(Serialize)]
struct FormMetadata {
    behaviour: FieldBehaviour,
    widgets: Vec<FormWidget>,
}

pub fn fields_command(args: FieldsArgs) -> Result<()> {
    let behaviour = if args.legacy_prefixes {
        ui_field_behaviour().with_legacy_prefixes()
    } else {
        ui_field_behaviour()
    };

    let metadata = FormMetadata {
        behaviour,
        widgets: connection_form_widgets(),
    };

    let json = serde_json::to_string_pretty(&metadata).context("Failed to serialize form metadata")?;
    println!("{}", json);
    Ok(())
}
