use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_ORG_SLUG: &str = "organizations_slug_key";
const CNT_MEMBERSHIP: &str = "memberships_pkey";
const CNT_INVITE_TOKEN: &str = "invites_token_key";
const CNT_LINK_SHORT_CODE: &str = "links_short_code_key";
const CNT_LINK_REDIRECT_TYPE: &str = "links_redirect_type_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                let mapped = match constraint {
                    CNT_USER_USERNAME => Some(DomainError::Conflict("username already exists".into())),
                    CNT_USER_EMAIL => Some(DomainError::Conflict("email already registered".into())),
                    CNT_ORG_SLUG => Some(DomainError::Conflict("slug already exists".into())),
                    CNT_MEMBERSHIP => Some(DomainError::Conflict("already a member".into())),
                    CNT_INVITE_TOKEN => Some(DomainError::Conflict("invite token collision".into())),
                    CNT_LINK_SHORT_CODE => {
                        Some(DomainError::Conflict("Short code already exists".into()))
                    }
                    CNT_LINK_REDIRECT_TYPE => Some(DomainError::Validation(
                        "redirect_type must be 301 or 302".into(),
                    )),
                    _ => None,
                };
                if let Some(mapped) = mapped {
                    return mapped;
                }
            }

            match db_err.code().as_deref() {
                Some("23505") => DomainError::Conflict("unique constraint violated".into()),
                Some("23503") => DomainError::Validation("referenced record not found".into()),
                Some("23514") => DomainError::Validation("check constraint violated".into()),
                _ => DomainError::Persistence(db_err.message().to_string()),
            }
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
