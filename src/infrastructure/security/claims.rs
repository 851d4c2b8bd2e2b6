use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserId,
};
use biscuit_auth::builder::{Fact, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rebuild the caller identity from the authority block facts.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut claims = Claims::default();
    for fact in facts {
        claims.apply(&fact.predicate.name, &fact.predicate.terms);
    }
    claims.into_user()
}

#[derive(Default)]
struct Claims {
    user_id: Option<i64>,
    username: Option<String>,
    is_superuser: Option<bool>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl Claims {
    fn apply(&mut self, name: &str, terms: &[Term]) {
        match (name, terms) {
            ("user", [Term::Integer(id), Term::Str(username)]) => {
                self.user_id = Some(*id);
                self.username = Some(username.clone());
            }
            ("superuser", [Term::Bool(flag)]) => self.is_superuser = Some(*flag),
            ("issued_at", [Term::Date(secs)]) => self.issued_at = Some(from_epoch(*secs)),
            ("expires_at", [Term::Date(secs)]) => self.expires_at = Some(from_epoch(*secs)),
            _ => {}
        }
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let missing = |claim: &str| ApplicationError::unauthorized(format!("missing {claim}"));
        let id = self.user_id.ok_or_else(|| missing("user id"))?;
        Ok(AuthenticatedUser {
            id: UserId::new(id)?,
            username: self.username.ok_or_else(|| missing("username"))?,
            is_superuser: self.is_superuser.unwrap_or(false),
            issued_at: self
                .issued_at
                .map(DateTime::<Utc>::from)
                .ok_or_else(|| missing("issued_at"))?,
            expires_at: self
                .expires_at
                .map(DateTime::<Utc>::from)
                .ok_or_else(|| missing("expires_at"))?,
        })
    }
}

fn from_epoch(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}
