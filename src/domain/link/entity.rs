// src/domain/link/entity.rs
use super::{
    access::Protection,
    value_objects::{
        AllowedEmails, DestinationUrl, LinkId, RedirectType, ShortCode, Tags, UtmParams,
    },
};
use crate::domain::{
    campaign::CampaignId,
    organization::OrganizationId,
    user::{PasswordHash, UserId},
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub short_code: ShortCode,
    pub original_url: DestinationUrl,
    pub owner_id: UserId,
    pub org_id: OrganizationId,
    pub campaign_id: Option<CampaignId>,
    pub title: Option<String>,
    pub tags: Option<Tags>,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub password_hash: Option<PasswordHash>,
    pub require_login: bool,
    pub allowed_emails: Option<AllowedEmails>,
    pub redirect_type: RedirectType,
    pub track_activity: bool,
    pub utm: UtmParams,
}

impl Link {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn protection(&self) -> Protection {
        Protection {
            password: self.password_hash.is_some(),
            login: self.require_login,
        }
    }

    /// Human readable list of what differs between `self` and `updated`.
    pub fn describe_changes(&self, updated: &Link) -> Vec<String> {
        let mut changes = Vec::new();
        if self.original_url != updated.original_url {
            changes.push(format!("url → {}", updated.original_url.preview(60)));
        }
        if self.short_code != updated.short_code {
            changes.push(format!("slug → /{}", updated.short_code));
        }
        if self.is_active != updated.is_active {
            changes.push(if updated.is_active { "activated" } else { "deactivated" }.into());
        }
        if self.campaign_id != updated.campaign_id {
            changes.push("campaign changed".into());
        }
        if self.title != updated.title {
            changes.push(format!(
                "title → {}",
                updated.title.as_deref().unwrap_or("(cleared)")
            ));
        }
        if self.tags != updated.tags {
            changes.push("tags updated".into());
        }
        if self.expires_at != updated.expires_at {
            changes.push("expiration changed".into());
        }
        if self.require_login != updated.require_login {
            changes.push(format!(
                "require login → {}",
                if updated.require_login { "yes" } else { "no" }
            ));
        }
        if self.redirect_type != updated.redirect_type {
            changes.push(format!("redirect → {}", updated.redirect_type));
        }
        changes
    }
}

#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: ShortCode,
    pub original_url: DestinationUrl,
    pub owner_id: UserId,
    pub org_id: OrganizationId,
    pub campaign_id: Option<CampaignId>,
    pub title: Option<String>,
    pub tags: Option<Tags>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub password_hash: Option<PasswordHash>,
    pub require_login: bool,
    pub allowed_emails: Option<AllowedEmails>,
    pub redirect_type: RedirectType,
    pub track_activity: bool,
    pub utm: UtmParams,
}

#[derive(Debug, Clone, Default)]
pub struct UtmChanges {
    pub source: Option<Option<String>>,
    pub medium: Option<Option<String>>,
    pub campaign: Option<Option<String>>,
    pub term: Option<Option<String>>,
    pub content: Option<Option<String>>,
}

impl UtmChanges {
    fn apply_to(&self, utm: &mut UtmParams) {
        let slots = [
            (&self.source, &mut utm.source),
            (&self.medium, &mut utm.medium),
            (&self.campaign, &mut utm.campaign),
            (&self.term, &mut utm.term),
            (&self.content, &mut utm.content),
        ];
        for (change, slot) in slots {
            if let Some(value) = change {
                *slot = value.clone().filter(|v| !v.trim().is_empty());
            }
        }
    }

    fn changed_names(&self, names: &mut Vec<&'static str>) {
        let fields = [
            ("utm source", self.source.is_some()),
            ("utm medium", self.medium.is_some()),
            ("utm campaign", self.campaign.is_some()),
            ("utm term", self.term.is_some()),
            ("utm content", self.content.is_some()),
        ];
        names.extend(fields.into_iter().filter(|(_, set)| *set).map(|(n, _)| n));
    }
}

/// Partial update of a link. `None` leaves a field untouched; for nullable
/// columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct LinkChanges {
    pub short_code: Option<ShortCode>,
    pub original_url: Option<DestinationUrl>,
    pub is_active: Option<bool>,
    pub campaign_id: Option<Option<CampaignId>>,
    pub title: Option<Option<String>>,
    pub tags: Option<Option<Tags>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub password_hash: Option<Option<PasswordHash>>,
    pub require_login: Option<bool>,
    pub allowed_emails: Option<Option<AllowedEmails>>,
    pub redirect_type: Option<RedirectType>,
    pub track_activity: Option<bool>,
    pub utm: UtmChanges,
}

impl LinkChanges {
    pub fn apply_to(&self, link: &mut Link) {
        if let Some(code) = &self.short_code {
            link.short_code = code.clone();
        }
        if let Some(url) = &self.original_url {
            link.original_url = url.clone();
        }
        if let Some(is_active) = self.is_active {
            link.is_active = is_active;
        }
        if let Some(campaign_id) = self.campaign_id {
            link.campaign_id = campaign_id;
        }
        if let Some(title) = &self.title {
            link.title = title.clone();
        }
        if let Some(tags) = &self.tags {
            link.tags = tags.clone();
        }
        if let Some(expires_at) = self.expires_at {
            link.expires_at = expires_at;
        }
        if let Some(hash) = &self.password_hash {
            link.password_hash = hash.clone();
        }
        if let Some(require_login) = self.require_login {
            link.require_login = require_login;
        }
        if let Some(emails) = &self.allowed_emails {
            link.allowed_emails = emails.clone();
        }
        if let Some(redirect_type) = self.redirect_type {
            link.redirect_type = redirect_type;
        }
        if let Some(track) = self.track_activity {
            link.track_activity = track;
        }
        self.utm.apply_to(&mut link.utm);
    }

    /// Field names touched by this change set, as shown in bulk edit summaries.
    pub fn changed_field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let fields = [
            ("short code", self.short_code.is_some()),
            ("original url", self.original_url.is_some()),
            ("is active", self.is_active.is_some()),
            ("campaign id", self.campaign_id.is_some()),
            ("title", self.title.is_some()),
            ("tags", self.tags.is_some()),
            ("expires at", self.expires_at.is_some()),
            ("password", self.password_hash.is_some()),
            ("require login", self.require_login.is_some()),
            ("allowed emails", self.allowed_emails.is_some()),
            ("redirect type", self.redirect_type.is_some()),
            ("track activity", self.track_activity.is_some()),
        ];
        names.extend(fields.into_iter().filter(|(_, set)| *set).map(|(n, _)| n));
        self.utm.changed_names(&mut names);
        names
    }

    pub fn is_empty(&self) -> bool {
        self.changed_field_names().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    pub search: Option<String>,
    pub campaign_id: Option<CampaignId>,
    pub is_active: Option<bool>,
}

impl LinkFilter {
    pub fn matches(&self, link: &Link) -> bool {
        if let Some(campaign_id) = self.campaign_id {
            if link.campaign_id != Some(campaign_id) {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if link.is_active != is_active {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                let haystacks = [
                    Some(link.short_code.as_str()),
                    Some(link.original_url.as_str()),
                    link.title.as_deref(),
                    link.tags.as_ref().map(Tags::as_str),
                ];
                haystacks
                    .into_iter()
                    .flatten()
                    .any(|value| value.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

/// Which links of an organization a caller may see.
#[derive(Debug, Clone, Copy)]
pub struct LinkScope {
    pub org_id: OrganizationId,
    pub owner_id: Option<UserId>,
}

impl LinkScope {
    pub fn includes(&self, link: &Link) -> bool {
        link.org_id == self.org_id
            && !link.is_deleted
            && self.owner_id.is_none_or(|owner| link.owner_id == owner)
    }
}
