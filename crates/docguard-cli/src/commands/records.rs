//! Records command - List the records the store would be seeded with
//!
//! Reads metadata only. Content is never printed, since listing bypasses the
//! gateway and its clearance checks.

use anyhow::Result;
use clap::Args;

use docguard_core::domain::Record;

use crate::context::AppContext;
use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct RecordsCommand {}

impl RecordsCommand {
    pub async fn execute(&self, ctx: &AppContext, format: OutputFormat) -> Result<()> {
        let formatter = format.formatter();
        let mut records = ctx.seed_records()?;
        records.sort_by(|a, b| a.id().cmp(b.id()));

        if format.is_json() {
            formatter.print_json(&records_json(&records));
            return Ok(());
        }

        if records.is_empty() {
            formatter.info("The store holds no records.");
            return Ok(());
        }

        formatter.success(&format!("Records ({})", records.len()));
        formatter.info("");
        formatter.info("  Id       Clearance     Title");
        formatter.info("  -------- ------------- -----");
        for record in &records {
            formatter.info(&format!(
                "  {:<8} {:<13} {}",
                record.id().as_str(),
                record.required_clearance().as_str(),
                record.title()
            ));
        }
        Ok(())
    }
}

fn records_json(records: &[Record]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id().to_string(),
                "title": r.title(),
                "required_clearance": r.required_clearance().as_str(),
                "size_bytes": r.size_bytes(),
            })
        })
        .collect();
    serde_json::json!({
        "count": items.len(),
        "records": items,
    })
}

#[cfg(test)]
mod tests {
    use docguard_store::seed;

    use super::*;

    #[test]
    fn test_records_json_omits_content() {
        let value = records_json(&seed::default_records());

        assert_eq!(value["count"], 3);
        let first = &value["records"][0];
        assert_eq!(first["id"], "DOC001");
        assert_eq!(first["required_clearance"], "confidential");
        assert!(first.get("content").is_none());
    }
}
