use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use columnify::{SchemaType, core::format_field_defs, read_schema_file};

use super::parse_schema_type;

#[derive(Args)]
pub struct SchemaArgs {
    /// Schema type: avro | bigquery
    #[arg(long, value_parser = parse_schema_type)]
    schema_type: SchemaType,

    /// Path to the schema file
    #[arg(long)]
    schema_file: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = read_schema_file(self.schema_type, &self.schema_file)?;
        let text = format_field_defs(&schema.fields)?;

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
