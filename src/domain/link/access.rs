// src/domain/link/access.rs
//! Access rules for password and login protected links.
//!
//! When a link carries both protections either one is sufficient.

use super::value_objects::AllowedEmails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Protection {
    pub password: bool,
    pub login: bool,
}

impl Protection {
    pub fn is_protected(&self) -> bool {
        self.password || self.login
    }

    /// Query string the verification page uses to render its form.
    pub fn verify_query(&self) -> Option<String> {
        let mut params = Vec::new();
        if self.password {
            params.push("pwd=1");
        }
        if self.login {
            params.push("login=1");
        }
        (!params.is_empty()).then(|| params.join("&"))
    }
}

/// What a visitor presented when trying to open a protected link.
#[derive(Debug, Clone, Default)]
pub struct AccessAttempt<'a> {
    pub password_supplied: bool,
    pub password_matches: bool,
    pub visitor_email: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    CredentialsRequired,
    IncorrectPassword,
    AccountNotAllowed,
    AuthenticationFailed,
    PasswordRequired,
    LoginRequired,
}

impl AccessDenial {
    pub fn message(&self) -> &'static str {
        match self {
            Self::CredentialsRequired => "Authentication required (Password or Login)",
            Self::IncorrectPassword => "Incorrect password",
            Self::AccountNotAllowed => "Access denied for this account",
            Self::AuthenticationFailed => "Authentication failed",
            Self::PasswordRequired => "Password required",
            Self::LoginRequired => "Login required",
        }
    }

    /// Denials the visitor can fix by authenticating map to 401, the rest to 403.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::CredentialsRequired
                | Self::IncorrectPassword
                | Self::AuthenticationFailed
                | Self::PasswordRequired
        )
    }
}

pub fn evaluate(
    protection: Protection,
    allowed: Option<&AllowedEmails>,
    attempt: &AccessAttempt<'_>,
) -> Result<(), AccessDenial> {
    let passed_password = protection.password && attempt.password_matches;
    let passed_login = protection.login
        && attempt
            .visitor_email
            .is_some_and(|email| allowed.is_none_or(|list| list.permits(email)));

    match (protection.password, protection.login) {
        (false, false) => Ok(()),
        (true, true) => {
            if passed_password || passed_login {
                return Ok(());
            }
            if !attempt.password_supplied && attempt.visitor_email.is_none() {
                Err(AccessDenial::CredentialsRequired)
            } else if attempt.password_supplied {
                Err(AccessDenial::IncorrectPassword)
            } else if attempt.visitor_email.is_some() {
                Err(AccessDenial::AccountNotAllowed)
            } else {
                Err(AccessDenial::AuthenticationFailed)
            }
        }
        (true, false) => {
            if passed_password {
                Ok(())
            } else if !attempt.password_supplied {
                Err(AccessDenial::PasswordRequired)
            } else {
                Err(AccessDenial::IncorrectPassword)
            }
        }
        (false, true) => {
            if passed_login {
                Ok(())
            } else if attempt.visitor_email.is_none() {
                Err(AccessDenial::LoginRequired)
            } else {
                Err(AccessDenial::AccountNotAllowed)
            }
        }
    }
}
