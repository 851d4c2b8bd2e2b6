// tests/support/builders.rs
use super::mocks::{MemoryStore, fixed_now};
use chrono::{DateTime, Duration, Utc};
use linkforge::domain::link::{
    AllowedEmails, DestinationUrl, Link, LinkId, RedirectType, ShortCode, UtmParams,
};
use linkforge::domain::organization::{Invite, InviteId, InviteStatus, MemberRole, OrganizationId};
use linkforge::domain::user::{Email, PasswordHash, UserId};

/// Seeds a link straight into the store, bypassing validation in services.
pub struct LinkBuilder {
    code: String,
    url: String,
    owner_id: i64,
    org_id: i64,
    is_active: bool,
    expires_at: Option<DateTime<Utc>>,
    password: Option<String>,
    require_login: bool,
    allowed_emails: Vec<String>,
    redirect_type: RedirectType,
    track_activity: bool,
    utm: UtmParams,
}

impl LinkBuilder {
    pub fn new(code: &str, owner_id: i64, org_id: i64) -> Self {
        Self {
            code: code.into(),
            url: "https://example.com/landing".into(),
            owner_id,
            org_id,
            is_active: true,
            expires_at: None,
            password: None,
            require_login: false,
            allowed_emails: Vec::new(),
            redirect_type: RedirectType::Temporary,
            track_activity: true,
            utm: UtmParams::default(),
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn expired(mut self) -> Self {
        self.expires_at = Some(fixed_now() - Duration::hours(1));
        self
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Stored with the same scheme as the test password hasher.
    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn require_login(mut self, allowed: &[&str]) -> Self {
        self.require_login = true;
        self.allowed_emails = allowed.iter().map(|e| (*e).to_string()).collect();
        self
    }

    pub fn permanent(mut self) -> Self {
        self.redirect_type = RedirectType::Permanent;
        self
    }

    pub fn untracked(mut self) -> Self {
        self.track_activity = false;
        self
    }

    pub fn utm_source(mut self, source: &str) -> Self {
        self.utm.source = Some(source.into());
        self
    }

    pub fn insert(self, store: &MemoryStore) -> Link {
        let mut tables = store.lock();
        let link = Link {
            id: LinkId(tables.next_id("links")),
            short_code: ShortCode::new(self.code).unwrap(),
            original_url: DestinationUrl::new(self.url).unwrap(),
            owner_id: UserId(self.owner_id),
            org_id: OrganizationId(self.org_id),
            campaign_id: None,
            title: None,
            tags: None,
            is_active: self.is_active,
            clicks: 0,
            created_at: fixed_now(),
            expires_at: self.expires_at,
            is_deleted: false,
            password_hash: self
                .password
                .map(|p| PasswordHash::new(format!("hash::{p}")).unwrap()),
            require_login: self.require_login,
            allowed_emails: AllowedEmails::from_list(self.allowed_emails),
            redirect_type: self.redirect_type,
            track_activity: self.track_activity,
            utm: self.utm,
        };
        tables.links.push(link.clone());
        link
    }
}

/// Seeds a pending invite that expired an hour before the fixed clock.
pub fn seed_expired_invite(store: &MemoryStore, org_id: i64, invited_by: i64, email: &str) -> Invite {
    let mut tables = store.lock();
    let invite = Invite {
        id: InviteId(tables.next_id("invites")),
        org_id: OrganizationId(org_id),
        invited_by: UserId(invited_by),
        email: Email::new(email).unwrap(),
        role: MemberRole::Member,
        token: "stale-token".into(),
        status: InviteStatus::Pending,
        created_at: fixed_now() - Duration::days(8),
        expires_at: fixed_now() - Duration::hours(1),
    };
    tables.invites.push(invite.clone());
    invite
}
