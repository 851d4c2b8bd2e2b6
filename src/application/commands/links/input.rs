use super::LinkCommandService;
use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        link::{
            AllowedEmails, DestinationUrl, Link, LinkChanges, NewLink, RedirectType, ShortCode,
            Tags, UtmChanges, UtmParams,
        },
        user::PasswordHash,
    },
};
use chrono::{DateTime, Utc};

/// Link fields as submitted by a client. For nullable fields the outer
/// `Option` tells whether the field was sent at all.
#[derive(Debug, Clone, Default)]
pub struct LinkInput {
    pub original_url: Option<String>,
    pub short_code: Option<String>,
    pub title: Option<Option<String>>,
    pub tags: Option<Option<String>>,
    pub campaign_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// An empty string removes the password.
    pub password: Option<String>,
    pub require_login: Option<bool>,
    pub allowed_emails: Option<Option<Vec<String>>>,
    pub redirect_type: Option<i32>,
    pub track_activity: Option<bool>,
    pub utm_source: Option<Option<String>>,
    pub utm_medium: Option<Option<String>>,
    pub utm_campaign: Option<Option<String>>,
    pub utm_term: Option<Option<String>>,
    pub utm_content: Option<Option<String>>,
}

impl LinkInput {
    /// The custom code requested by the client, if any.
    pub(super) fn custom_code(&self) -> ApplicationResult<Option<ShortCode>> {
        self.short_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(parse_short_code)
            .transpose()
    }
}

/// Top-level paths served by the application itself; a link under one of
/// these names would never be reachable.
const RESERVED_CODES: &[&str] = &["api", "docs", "health", "openapi", "redoc"];

/// `+` is reserved for the stats shortcut `/{code}+`.
pub(crate) fn parse_short_code(raw: &str) -> ApplicationResult<ShortCode> {
    if raw.contains('+') {
        return Err(ApplicationError::unprocessable(
            "Short code cannot contain '+'",
        ));
    }
    let code = ShortCode::new(raw)?;
    if RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code.as_str()))
    {
        return Err(ApplicationError::validation("Short code is reserved"));
    }
    Ok(code)
}

pub(super) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LinkCommandService {
    pub(super) async fn build_new_link(
        &self,
        ctx: &RequestContext,
        input: LinkInput,
    ) -> ApplicationResult<NewLink> {
        let original_url = input
            .original_url
            .as_deref()
            .ok_or_else(|| ApplicationError::validation("original_url is required"))
            .and_then(|url| Ok(DestinationUrl::new(url)?))?;

        let short_code = match input.custom_code()? {
            Some(code) => {
                self.ensure_code_available(&code).await?;
                code
            }
            None => self.generate_code().await?,
        };

        let campaign_id = self
            .resolve_campaign(ctx, input.campaign_id.flatten())
            .await?;
        let password_hash = self.hash_link_password(input.password.as_deref()).await?;
        let redirect_type = input
            .redirect_type
            .map(RedirectType::from_code)
            .transpose()?
            .unwrap_or_default();

        Ok(NewLink {
            short_code,
            original_url,
            owner_id: ctx.user_id(),
            org_id: ctx.org_id(),
            campaign_id,
            title: clean(input.title.flatten()),
            tags: input.tags.flatten().as_deref().and_then(Tags::parse),
            is_active: input.is_active.unwrap_or(true),
            created_at: self.clock.now(),
            expires_at: input.expires_at.flatten(),
            password_hash,
            require_login: input.require_login.unwrap_or(false),
            allowed_emails: input.allowed_emails.flatten().and_then(AllowedEmails::from_list),
            redirect_type,
            track_activity: input.track_activity.unwrap_or(true),
            utm: UtmParams {
                source: clean(input.utm_source.flatten()),
                medium: clean(input.utm_medium.flatten()),
                campaign: clean(input.utm_campaign.flatten()),
                term: clean(input.utm_term.flatten()),
                content: clean(input.utm_content.flatten()),
            },
        })
    }

    pub(super) async fn build_changes(
        &self,
        ctx: &RequestContext,
        current: &Link,
        input: LinkInput,
    ) -> ApplicationResult<LinkChanges> {
        let short_code = match input.custom_code()? {
            Some(code) if code != current.short_code => {
                self.ensure_code_available(&code).await?;
                Some(code)
            }
            _ => None,
        };
        let original_url = input
            .original_url
            .as_deref()
            .map(DestinationUrl::new)
            .transpose()?;
        let campaign_id = match input.campaign_id {
            Some(raw) => Some(self.resolve_campaign(ctx, raw).await?),
            None => None,
        };
        let password_hash = match input.password.as_deref() {
            Some(raw) => Some(self.hash_link_password(Some(raw)).await?),
            None => None,
        };

        Ok(LinkChanges {
            short_code,
            original_url,
            is_active: input.is_active,
            campaign_id,
            title: input.title.map(clean),
            tags: input.tags.map(|tags| tags.as_deref().and_then(Tags::parse)),
            expires_at: input.expires_at,
            password_hash,
            require_login: input.require_login,
            allowed_emails: input
                .allowed_emails
                .map(|emails| emails.and_then(AllowedEmails::from_list)),
            redirect_type: input
                .redirect_type
                .map(RedirectType::from_code)
                .transpose()?,
            track_activity: input.track_activity,
            utm: UtmChanges {
                source: input.utm_source.map(clean),
                medium: input.utm_medium.map(clean),
                campaign: input.utm_campaign.map(clean),
                term: input.utm_term.map(clean),
                content: input.utm_content.map(clean),
            },
        })
    }

    /// `None` or an empty password means the link is not password protected.
    async fn hash_link_password(
        &self,
        password: Option<&str>,
    ) -> ApplicationResult<Option<PasswordHash>> {
        match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                let hashed = self.password_hasher.hash(password).await?;
                Ok(Some(PasswordHash::new(hashed)?))
            }
            None => Ok(None),
        }
    }
}
