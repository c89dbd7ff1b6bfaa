//! Edit command - Replace a record's content as a principal

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use docguard_core::domain::{ClearanceLevel, Principal, RecordId};

use crate::context::AppContext;
use crate::output::{Operation, OutputFormat, Reported, RequestReport};

#[derive(Debug, Args)]
pub struct EditCommand {
    /// Record identifier (e.g. DOC003)
    pub id: RecordId,

    /// Name of the principal making the request
    #[arg(long)]
    pub principal: String,

    /// Clearance held by the principal
    #[arg(long, default_value = "public")]
    pub clearance: ClearanceLevel,

    /// New content for the record
    #[arg(long)]
    pub content: String,
}

impl EditCommand {
    pub async fn execute(&self, ctx: &AppContext, format: OutputFormat) -> Result<()> {
        let formatter = format.formatter();
        let principal = Principal::new(self.principal.clone(), self.clearance)
            .context("Invalid principal")?;

        let (store, gateway) = ctx.open_gateway().await?;
        info!(record_id = %self.id, principal = %principal, "Editing record");

        let result = gateway.edit(&self.id, &principal, &self.content).await;
        let stored = store.peek(&self.id).await;

        formatter.print_request(&RequestReport {
            operation: Operation::Edit,
            record_id: &self.id,
            principal: &principal,
            outcome: Reported::from_edit(&result, stored.as_ref()),
            audit: gateway.audit_log(),
        });

        result.context("Edit failed")?;
        Ok(())
    }
}
