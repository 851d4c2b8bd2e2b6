use super::LinkCommandService;
use crate::{
    application::{
        csv_format::{self, NumberedRow},
        dto::{AuthenticatedUser, ImportReportDto, export::MAX_REPORTED_IMPORT_ERRORS},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        errors::DomainError,
        organization::OrganizationId,
    },
};
use serde_json::json;

pub struct ImportLinksCommand {
    pub filename: String,
    pub content: Vec<u8>,
}

impl LinkCommandService {
    /// Invalid rows are skipped and reported; valid rows are created.
    pub async fn import_csv(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        command: ImportLinksCommand,
    ) -> ApplicationResult<ImportReportDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        ctx.require_link_manager("import")?;
        if !command.filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApplicationError::validation("File must be a CSV"));
        }

        let rows = csv_format::read_rows(&command.content)?;
        let campaigns = self.campaign_repo.list(ctx.org_id(), None).await?;
        let mut report = ImportReportDto::default();
        let mut errors = Vec::new();

        for NumberedRow { number, row } in rows {
            let row = match row {
                Ok(row) => row,
                Err(reason) => {
                    errors.push(format!("Row {number}: {reason}"));
                    continue;
                }
            };
            if row.original_url().is_none() {
                errors.push(format!("Row {number}: missing original_url"));
                continue;
            }
            let input = match row.into_input(&campaigns) {
                Ok(input) => input,
                Err(reason) => {
                    errors.push(format!("Row {number}: {reason}"));
                    continue;
                }
            };
            if let Ok(Some(code)) = input.custom_code() {
                if self.read_repo.code_exists(&code).await? {
                    errors.push(format!("Row {number}: short code '{code}' already exists"));
                    continue;
                }
            }

            let inserted = match self.build_new_link(&ctx, input).await {
                Ok(new_link) => self.write_repo.insert(new_link).await.map_err(|err| match err {
                    DomainError::Conflict(_) => {
                        ApplicationError::validation("Short code already exists")
                    }
                    other => other.into(),
                }),
                Err(err) => Err(err),
            };
            match inserted {
                Ok(_) => report.created += 1,
                Err(err @ (ApplicationError::Infrastructure(_)
                | ApplicationError::Domain(DomainError::Persistence(_)))) => return Err(err),
                Err(err) => errors.push(format!("Row {number}: {}", err.message())),
            }
        }

        report.skipped = errors.len() as u32;
        errors.truncate(MAX_REPORTED_IMPORT_ERRORS);
        report.errors = errors;

        self.audit
            .record(
                &ctx,
                AuditAction::Import,
                AuditTarget::Link,
                None,
                format!("Imported {} links from CSV", report.created),
                json!({
                    "filename": command.filename,
                    "created": report.created,
                    "skipped": report.skipped,
                }),
            )
            .await?;

        tracing::info!(
            org_id = %ctx.org_id(),
            created = report.created,
            skipped = report.skipped,
            "csv import finished"
        );
        Ok(report)
    }
}
