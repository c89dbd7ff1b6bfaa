//! Demo command - Replay the manager/employee walkthrough
//!
//! Runs six requests against a freshly opened store:
//! 1. Manager views a TopSecret record
//! 2. Employee is denied the same record (served from cache)
//! 3. Manager views it again (cache hit, no store fetch)
//! 4. Employee views a Public record
//! 5. Manager edits that record (cache entry evicted)
//! 6. Manager re-reads it (store fetch, new content)
//!
//! Each step reports its outcome, how many store fetches it caused and how
//! long it took, then the full audit log is printed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use docguard_core::domain::{ClearanceLevel, Principal, RecordId};
use docguard_gateway::{AccessGateway, AccessOutcome};
use docguard_store::InMemoryRecordStore;

use crate::context::AppContext;
use crate::output::{print_audit, OutputFormat};

const UPDATED_CONTENT: &str = "Updated handbook content...";

#[derive(Debug, Args)]
pub struct DemoCommand {}

enum Action {
    View,
    Edit(&'static str),
}

struct Step<'a> {
    description: &'static str,
    record_id: &'static str,
    principal: &'a Principal,
    action: Action,
}

/// Result of one walkthrough step
#[derive(Debug)]
pub struct StepReport {
    pub number: usize,
    pub description: &'static str,
    pub record_id: &'static str,
    pub principal: String,
    pub action: &'static str,
    pub outcome: &'static str,
    pub title: Option<String>,
    pub store_fetches: u64,
    pub elapsed: Duration,
}

impl DemoCommand {
    pub async fn execute(&self, ctx: &AppContext, format: OutputFormat) -> Result<()> {
        let formatter = format.formatter();

        info!("Starting walkthrough");
        let (store, gateway) = ctx.open_gateway().await?;
        let reports = run_walkthrough(&store, &gateway).await?;

        if format.is_json() {
            let steps: Vec<serde_json::Value> = reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "step": r.number,
                        "description": r.description,
                        "record_id": r.record_id,
                        "principal": r.principal,
                        "action": r.action,
                        "outcome": r.outcome,
                        "title": r.title,
                        "store_fetches": r.store_fetches,
                        "elapsed_ms": r.elapsed.as_millis() as u64,
                    })
                })
                .collect();
            formatter.print_json(&serde_json::json!({
                "steps": steps,
                "cached": gateway.cached_ids().iter().map(ToString::to_string).collect::<Vec<_>>(),
                "audit": gateway.audit_log().to_json(),
            }));
            return Ok(());
        }

        formatter.success("docguard walkthrough");
        for r in &reports {
            formatter.info("");
            formatter.info(&format!("--- {}. {} ---", r.number, r.description));
            let detail = r
                .title
                .as_deref()
                .map(|t| format!(" \"{t}\""))
                .unwrap_or_default();
            formatter.info(&format!(
                "{} {} on {}{}: {} (store fetches: {}, {} ms)",
                r.principal,
                r.action,
                r.record_id,
                detail,
                r.outcome,
                r.store_fetches,
                r.elapsed.as_millis()
            ));
        }

        print_audit(formatter.as_ref(), gateway.audit_log());
        formatter.info("");
        formatter.success("Walkthrough complete");
        Ok(())
    }
}

/// Runs the six walkthrough steps in order
pub async fn run_walkthrough(
    store: &InMemoryRecordStore,
    gateway: &AccessGateway,
) -> Result<Vec<StepReport>> {
    let manager = Principal::new("joao.silva", ClearanceLevel::TopSecret)?;
    let employee = Principal::new("maria.santos", ClearanceLevel::Internal)?;

    let steps = [
        Step {
            description: "Manager views a TopSecret record",
            record_id: "DOC002",
            principal: &manager,
            action: Action::View,
        },
        Step {
            description: "Employee tries the same record",
            record_id: "DOC002",
            principal: &employee,
            action: Action::View,
        },
        Step {
            description: "Manager views it again (cached)",
            record_id: "DOC002",
            principal: &manager,
            action: Action::View,
        },
        Step {
            description: "Employee views a permitted record",
            record_id: "DOC003",
            principal: &employee,
            action: Action::View,
        },
        Step {
            description: "Manager edits the record",
            record_id: "DOC003",
            principal: &manager,
            action: Action::Edit(UPDATED_CONTENT),
        },
        Step {
            description: "Manager views the updated record",
            record_id: "DOC003",
            principal: &manager,
            action: Action::View,
        },
    ];

    let mut reports = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let record_id = RecordId::new(step.record_id)?;
        let fetches_before = store.fetch_count();
        let started = Instant::now();

        let (outcome, title) = match step.action {
            Action::View => {
                let outcome = gateway
                    .view(&record_id, step.principal)
                    .await
                    .with_context(|| format!("Step {} failed", index + 1))?;
                let title = match &outcome {
                    AccessOutcome::Granted(record) => Some(record.title().to_string()),
                    _ => None,
                };
                (outcome.as_str(), title)
            }
            Action::Edit(content) => {
                let outcome = gateway
                    .edit(&record_id, step.principal, content)
                    .await
                    .with_context(|| format!("Step {} failed", index + 1))?;
                (outcome.as_str(), None)
            }
        };

        reports.push(StepReport {
            number: index + 1,
            description: step.description,
            record_id: step.record_id,
            principal: step.principal.id().to_string(),
            action: match step.action {
                Action::View => "view",
                Action::Edit(_) => "edit",
            },
            outcome,
            title,
            store_fetches: store.fetch_count() - fetches_before,
            elapsed: started.elapsed(),
        });
    }

    Ok(reports)
}
