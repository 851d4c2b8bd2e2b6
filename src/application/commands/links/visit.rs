use super::LinkCommandService;
use crate::{
    application::{
        analytics::{append_utm, local_country, normalize_referrer},
        dto::{AuthenticatedUser, VerifiedLinkDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        analytics::{NewClickEvent, classify_user_agent},
        link::{
            AccessAttempt, Link, RedirectType, ShortCode,
            access::{self, AccessDenial},
        },
    },
};

/// Request metadata recorded with a click.
#[derive(Debug, Clone, Default)]
pub struct VisitorInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Outcome of resolving a public short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    NotFound,
    /// Path (with query) inside the frontend application.
    Frontend(String),
    Destination {
        url: String,
        redirect_type: RedirectType,
    },
}

#[derive(Debug, Clone, Default)]
pub struct VerifyLinkCommand {
    pub password: Option<String>,
}

impl LinkCommandService {
    pub async fn resolve_redirect(
        &self,
        code: &str,
        visitor: VisitorInfo,
    ) -> ApplicationResult<RedirectDecision> {
        if code == "favicon.ico" {
            return Ok(RedirectDecision::NotFound);
        }
        if let Some(stats_code) = code.strip_suffix('+') {
            return Ok(RedirectDecision::Frontend(format!("/stats/{stats_code}")));
        }

        let link = match ShortCode::new(code) {
            Ok(code) => self.read_repo.find_by_code(&code).await?,
            Err(_) => None,
        };
        let Some(link) = link else {
            return Ok(RedirectDecision::Frontend("/404".into()));
        };

        if !link.is_active {
            return Ok(RedirectDecision::Frontend("/error?type=disabled".into()));
        }
        if link.is_expired(self.clock.now()) {
            return Ok(RedirectDecision::Frontend("/error?type=expired".into()));
        }
        if let Some(query) = link.protection().verify_query() {
            return Ok(RedirectDecision::Frontend(format!(
                "/verify/{}?{query}",
                link.short_code
            )));
        }

        self.record_visit(&link, &visitor).await;
        Ok(RedirectDecision::Destination {
            url: append_utm(link.original_url.as_str(), &link.utm),
            redirect_type: link.redirect_type,
        })
    }

    pub async fn verify(
        &self,
        code: &str,
        actor: Option<&AuthenticatedUser>,
        command: VerifyLinkCommand,
        visitor: VisitorInfo,
    ) -> ApplicationResult<VerifiedLinkDto> {
        let not_found = || ApplicationError::not_found("Link not found");
        let code = ShortCode::new(code).map_err(|_| not_found())?;
        let link = self
            .read_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(not_found)?;

        if !link.is_active {
            return Err(ApplicationError::validation("Link is inactive"));
        }
        if link.is_expired(self.clock.now()) {
            return Err(ApplicationError::validation("Link has expired"));
        }

        let visitor_email = match actor {
            Some(actor) => self
                .contexts
                .load_user(actor)
                .await
                .ok()
                .map(|user| user.email.to_string()),
            None => None,
        };
        let password = command.password.filter(|p| !p.is_empty());
        let password_matches = self.password_matches(&link, password.as_deref()).await?;

        let attempt = AccessAttempt {
            password_supplied: password.is_some(),
            password_matches,
            visitor_email: visitor_email.as_deref(),
        };
        access::evaluate(link.protection(), link.allowed_emails.as_ref(), &attempt)
            .map_err(denial_error)?;

        self.record_visit(&link, &visitor).await;
        Ok(VerifiedLinkDto {
            original_url: append_utm(link.original_url.as_str(), &link.utm),
        })
    }

    async fn password_matches(
        &self,
        link: &Link,
        password: Option<&str>,
    ) -> ApplicationResult<bool> {
        let (Some(password), Some(hash)) = (password, link.password_hash.as_ref()) else {
            return Ok(false);
        };
        match self.password_hasher.verify(password, hash.as_str()).await {
            Ok(()) => Ok(true),
            Err(ApplicationError::Unauthorized(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Counting and tracking never fail the visit; problems are logged.
    async fn record_visit(&self, link: &Link, visitor: &VisitorInfo) {
        if let Err(err) = self.write_repo.increment_clicks(link.id).await {
            tracing::warn!(link_id = %link.id, error = %err, "failed to increment click counter");
        }
        if !link.track_activity {
            return;
        }

        let country_code = self.lookup_country(visitor.ip.as_deref()).await;
        let agent = classify_user_agent(visitor.user_agent.as_deref().unwrap_or_default());
        let event = NewClickEvent {
            link_id: link.id,
            timestamp: self.clock.now(),
            ip_address: visitor.ip.clone(),
            country_code,
            user_agent: visitor.user_agent.clone(),
            referrer: normalize_referrer(visitor.referrer.as_deref()),
            device_type: agent.device_type,
            browser: agent.browser.to_string(),
            os: agent.os.to_string(),
        };
        if let Err(err) = self.click_repo.insert(event).await {
            tracing::warn!(link_id = %link.id, error = %err, "failed to record click event");
        }
    }

    async fn lookup_country(&self, ip: Option<&str>) -> Option<String> {
        let ip = ip?;
        if let Some(local) = local_country(ip) {
            return Some(local.to_string());
        }
        match self.geo.country_code(ip).await {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(ip, error = %err, "geoip lookup failed");
                None
            }
        }
    }
}

fn denial_error(denial: AccessDenial) -> ApplicationError {
    if denial.is_unauthenticated() {
        ApplicationError::unauthorized(denial.message())
    } else {
        ApplicationError::forbidden(denial.message())
    }
}
