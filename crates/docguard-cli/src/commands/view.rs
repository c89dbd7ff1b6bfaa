//! View command - Read a record as a principal
//!
//! Opens the store, asks the gateway for the record, prints the outcome and
//! then the audit trail produced by the request.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use docguard_core::domain::{ClearanceLevel, Principal, RecordId};

use crate::context::AppContext;
use crate::output::{Operation, OutputFormat, Reported, RequestReport};

#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Record identifier (e.g. DOC001)
    pub id: RecordId,

    /// Name of the principal making the request
    #[arg(long)]
    pub principal: String,

    /// Clearance held by the principal
    #[arg(long, default_value = "public")]
    pub clearance: ClearanceLevel,
}

impl ViewCommand {
    pub async fn execute(&self, ctx: &AppContext, format: OutputFormat) -> Result<()> {
        let formatter = format.formatter();
        let principal = Principal::new(self.principal.clone(), self.clearance)
            .context("Invalid principal")?;

        let (_store, gateway) = ctx.open_gateway().await?;
        info!(record_id = %self.id, principal = %principal, "Viewing record");

        let result = gateway.view(&self.id, &principal).await;

        formatter.print_request(&RequestReport {
            operation: Operation::View,
            record_id: &self.id,
            principal: &principal,
            outcome: Reported::from_view(&result),
            audit: gateway.audit_log(),
        });

        result.context("View failed")?;
        Ok(())
    }
}
