//! Output formatting for the docguard CLI
//!
//! Every command writes through an [`OutputFormatter`]. Gateway requests are
//! rendered as a [`RequestReport`]: the outcome followed by the audit trail
//! the request produced, either as text or as one JSON document.

use serde_json::{json, Value};

use docguard_audit::AuditLog;
use docguard_core::domain::{Principal, Record, RecordId};
use docguard_gateway::{AccessOutcome, GatewayError};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    pub fn formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Human => Box::new(HumanFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}

/// Kind of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Error,
    Info,
}

/// Gateway operation a report describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
        }
    }
}

/// What a gateway request ended with
#[derive(Debug)]
pub enum Reported<'a> {
    Viewed(&'a Record),
    /// Edit applied; carries the stored record afterwards, if readable
    Edited(Option<&'a Record>),
    Denied,
    NotFound,
    Failed(&'a GatewayError),
}

impl<'a> Reported<'a> {
    pub fn from_view(result: &'a Result<AccessOutcome<Record>, GatewayError>) -> Self {
        match result {
            Ok(AccessOutcome::Granted(record)) => Reported::Viewed(record),
            Ok(AccessOutcome::Denied) => Reported::Denied,
            Ok(AccessOutcome::NotFound) => Reported::NotFound,
            Err(e) => Reported::Failed(e),
        }
    }

    pub fn from_edit(
        result: &'a Result<AccessOutcome<()>, GatewayError>,
        stored: Option<&'a Record>,
    ) -> Self {
        match result {
            Ok(AccessOutcome::Granted(())) => Reported::Edited(stored),
            Ok(AccessOutcome::Denied) => Reported::Denied,
            Ok(AccessOutcome::NotFound) => Reported::NotFound,
            Err(e) => Reported::Failed(e),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Reported::Viewed(_) | Reported::Edited(_) => "granted",
            Reported::Denied => "denied",
            Reported::NotFound => "not_found",
            Reported::Failed(_) => "error",
        }
    }
}

/// One gateway request as the CLI prints it
pub struct RequestReport<'a> {
    pub operation: Operation,
    pub record_id: &'a RecordId,
    pub principal: &'a Principal,
    pub outcome: Reported<'a>,
    pub audit: &'a AuditLog,
}

impl RequestReport<'_> {
    /// Single JSON document: request, outcome and audit trail
    pub fn to_json(&self) -> Value {
        let mut result = json!({ "outcome": self.outcome.label() });
        match &self.outcome {
            Reported::Viewed(record) => result["record"] = record_json(record, true),
            Reported::Edited(Some(record)) => result["record"] = record_json(record, false),
            Reported::Failed(e) => result["error"] = json!(e.to_string()),
            Reported::Edited(None) | Reported::Denied | Reported::NotFound => {}
        }
        json!({
            "operation": self.operation.as_str(),
            "record_id": self.record_id.to_string(),
            "principal": self.principal.id().to_string(),
            "clearance": self.principal.clearance().to_string(),
            "result": result,
            "audit": self.audit.to_json(),
        })
    }

    /// Text lines for the outcome, without the audit trail
    pub fn outcome_lines(&self) -> Vec<(Status, String)> {
        let mut lines = Vec::new();
        match &self.outcome {
            Reported::Viewed(record) => {
                lines.push((Status::Success, format!("{} - {}", record.id(), record.title())));
                lines.extend(record_lines(record));
                lines.push((Status::Info, String::new()));
                lines.extend(
                    record
                        .content()
                        .lines()
                        .map(|line| (Status::Info, line.to_string())),
                );
            }
            Reported::Edited(stored) => {
                lines.push((Status::Success, format!("Updated {}", self.record_id)));
                if let Some(record) = stored {
                    lines.extend(record_lines(record));
                }
            }
            Reported::Denied => lines.push((
                Status::Warning,
                format!(
                    "Access denied: {} ({}) may not {} {}",
                    self.principal,
                    self.principal.clearance(),
                    self.operation.as_str(),
                    self.record_id
                ),
            )),
            Reported::NotFound => {
                lines.push((Status::Error, format!("Record {} not found", self.record_id)))
            }
            Reported::Failed(e) => lines.push((Status::Error, e.to_string())),
        }
        lines
    }
}

fn record_lines(record: &Record) -> [(Status, String); 2] {
    [
        (Status::Info, format!("Clearance: {}", record.required_clearance())),
        (Status::Info, format!("Size:      {} bytes", record.size_bytes())),
    ]
}

fn record_json(record: &Record, with_content: bool) -> Value {
    let mut value = json!({
        "id": record.id().to_string(),
        "title": record.title(),
        "required_clearance": record.required_clearance().as_str(),
        "size_bytes": record.size_bytes(),
    });
    if with_content {
        value["content"] = json!(record.content());
    }
    value
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn line(&self, status: Status, message: &str);
    fn print_json(&self, value: &Value);
    fn print_request(&self, report: &RequestReport<'_>);

    fn success(&self, message: &str) {
        self.line(Status::Success, message);
    }
    fn error(&self, message: &str) {
        self.line(Status::Error, message);
    }
    fn info(&self, message: &str) {
        self.line(Status::Info, message);
    }
}

/// Checkmarks and indentation; warnings and errors go to stderr
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn line(&self, status: Status, message: &str) {
        match status {
            Status::Success => println!("\u{2713} {message}"),
            Status::Info => println!("  {message}"),
            Status::Warning => eprintln!("\u{26a0} Warning: {message}"),
            Status::Error => eprintln!("\u{2717} Error: {message}"),
        }
    }

    fn print_json(&self, value: &Value) {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    }

    fn print_request(&self, report: &RequestReport<'_>) {
        for (status, message) in report.outcome_lines() {
            self.line(status, &message);
        }
        print_audit(self, report.audit);
    }
}

/// Machine-readable output: one JSON document on stdout per command
///
/// Only warnings and errors are reported as status lines, on stderr.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn line(&self, status: Status, message: &str) {
        let level = match status {
            Status::Warning => "warning",
            Status::Error => "error",
            Status::Success | Status::Info => return,
        };
        eprintln!("{}", json!({ "level": level, "message": message }));
    }

    fn print_json(&self, value: &Value) {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    }

    fn print_request(&self, report: &RequestReport<'_>) {
        self.print_json(&report.to_json());
    }
}

/// Prints the audit log as `[HH:MM:SS] message` lines
pub fn print_audit(formatter: &dyn OutputFormatter, log: &AuditLog) {
    formatter.info("");
    if log.is_empty() {
        formatter.info("Audit log is empty.");
        return;
    }
    formatter.success(&format!("Audit Log ({} entries)", log.len()));
    for line in log.render() {
        formatter.info(&line);
    }
}

#[cfg(test)]
mod tests {
    use docguard_core::domain::{AuditEntry, ClearanceLevel};

    use super::*;

    fn record() -> Record {
        Record::new(
            RecordId::new("DOC002").unwrap(),
            "Market Strategy 2025",
            "line one\nline two",
            ClearanceLevel::TopSecret,
        )
        .unwrap()
    }

    fn report<'a>(
        operation: Operation,
        id: &'a RecordId,
        who: &'a Principal,
        outcome: Reported<'a>,
        audit: &'a AuditLog,
    ) -> RequestReport<'a> {
        RequestReport {
            operation,
            record_id: id,
            principal: who,
            outcome,
            audit,
        }
    }

    #[test]
    fn test_viewed_json_includes_content_and_audit() {
        let record = record();
        let who = Principal::new("joao.silva", ClearanceLevel::TopSecret).unwrap();
        let audit = AuditLog::new();
        audit.record(AuditEntry::view_attempt(who.id(), record.id()));

        let value = report(Operation::View, record.id(), &who, Reported::Viewed(&record), &audit)
            .to_json();

        assert_eq!(value["operation"], "view");
        assert_eq!(value["clearance"], "top_secret");
        assert_eq!(value["result"]["outcome"], "granted");
        assert_eq!(value["result"]["record"]["content"], "line one\nline two");
        assert_eq!(value["audit"]["count"], 1);
    }

    #[test]
    fn test_edited_json_omits_content() {
        let record = record();
        let who = Principal::new("joao.silva", ClearanceLevel::TopSecret).unwrap();
        let audit = AuditLog::new();
        let result: Result<AccessOutcome<()>, GatewayError> = Ok(AccessOutcome::Granted(()));

        let value = report(
            Operation::Edit,
            record.id(),
            &who,
            Reported::from_edit(&result, Some(&record)),
            &audit,
        )
        .to_json();

        assert_eq!(value["result"]["outcome"], "granted");
        assert_eq!(value["result"]["record"]["size_bytes"], 17);
        assert!(value["result"]["record"].get("content").is_none());
    }

    #[test]
    fn test_failed_json_carries_error() {
        let id = RecordId::new("DOC001").unwrap();
        let who = Principal::new("maria", ClearanceLevel::Internal).unwrap();
        let audit = AuditLog::new();
        let result: Result<AccessOutcome<Record>, GatewayError> = Err(GatewayError::Timeout {
            operation: "fetch",
            after_ms: 100,
        });

        let value =
            report(Operation::View, &id, &who, Reported::from_view(&result), &audit).to_json();

        assert_eq!(value["result"]["outcome"], "error");
        assert_eq!(
            value["result"]["error"],
            "Record store fetch timed out after 100 ms"
        );
    }

    #[test]
    fn test_denied_lines_name_principal_and_operation() {
        let id = RecordId::new("DOC002").unwrap();
        let who = Principal::new("maria", ClearanceLevel::Internal).unwrap();
        let audit = AuditLog::new();

        let lines = report(Operation::Edit, &id, &who, Reported::Denied, &audit).outcome_lines();

        assert_eq!(
            lines,
            vec![(
                Status::Warning,
                "Access denied: maria (internal) may not edit DOC002".to_string()
            )]
        );
    }

    #[test]
    fn test_viewed_lines_show_metadata_then_content() {
        let record = record();
        let who = Principal::new("joao.silva", ClearanceLevel::TopSecret).unwrap();
        let audit = AuditLog::new();

        let lines = report(Operation::View, record.id(), &who, Reported::Viewed(&record), &audit)
            .outcome_lines();
        let text: Vec<&str> = lines.iter().map(|(_, m)| m.as_str()).collect();

        assert_eq!(lines[0].0, Status::Success);
        assert_eq!(
            text,
            vec![
                "DOC002 - Market Strategy 2025",
                "Clearance: top_secret",
                "Size:      17 bytes",
                "",
                "line one",
                "line two",
            ]
        );
    }

    #[test]
    fn test_not_found_is_an_error_line() {
        let id = RecordId::new("DOC999").unwrap();
        let who = Principal::new("maria", ClearanceLevel::Internal).unwrap();
        let audit = AuditLog::new();
        let result: Result<AccessOutcome<Record>, GatewayError> = Ok(AccessOutcome::NotFound);

        let lines =
            report(Operation::View, &id, &who, Reported::from_view(&result), &audit).outcome_lines();

        assert_eq!(lines, vec![(Status::Error, "Record DOC999 not found".to_string())]);
    }
}
