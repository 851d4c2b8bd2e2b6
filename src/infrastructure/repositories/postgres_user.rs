// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use super::postgres_organization::{ORG_COLUMNS, OrganizationRow};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::organization::{MemberRole, NewOrganization, Organization};
use crate::domain::user::{
    AccessRequestStatus, Email, NewUser, PasswordHash, Registration, User, UserId,
    UserRepository, UserUpdate, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, external_id, \
     password_hash, is_active, is_superuser, is_approved, request_status, created_at";

/// Transaction-scoped advisory lock serializing the first-account check.
const REGISTRATION_LOCK: i64 = 0x6c66_7267;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by<T>(&self, column: &str, value: T) -> DomainResult<Option<User>>
    where
        T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send + 'static,
    {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    full_name: Option<String>,
    avatar_url: Option<String>,
    external_id: Option<String>,
    password_hash: Option<String>,
    is_active: bool,
    is_superuser: bool,
    is_approved: bool,
    request_status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            email: Email::new(row.email)?,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            external_id: row.external_id,
            password_hash: row.password_hash.map(PasswordHash::new).transpose()?,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
            is_approved: row.is_approved,
            request_status: row.request_status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn register(
        &self,
        new_user: NewUser,
        bootstrap_org: NewOrganization,
    ) -> DomainResult<Registration> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REGISTRATION_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let has_users = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users)")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if has_users {
            let user = insert_user(&mut tx, new_user).await?;
            tx.commit().await.map_err(map_sqlx)?;
            return Ok(Registration {
                user,
                bootstrap_org: None,
            });
        }

        let user = insert_user(&mut tx, new_user.into_bootstrap_superuser()).await?;
        let org = insert_bootstrap_org(&mut tx, &user, bootstrap_org).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(Registration {
            user,
            bootstrap_org: Some(org),
        })
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        self.fetch_one_by("id", i64::from(id)).await
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        self.fetch_one_by("username", username.as_str().to_owned())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        self.fetch_one_by("email", email.as_str().to_owned()).await
    }

    async fn find_by_external_id(&self, external_id: &str) -> DomainResult<Option<User>> {
        self.fetch_one_by("external_id", external_id.to_owned())
            .await
    }

    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn list_by_request_status(
        &self,
        status: AccessRequestStatus,
    ) -> DomainResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE request_status = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        if update.is_empty() {
            return self
                .find_by_id(update.id)
                .await?
                .ok_or_else(|| DomainError::NotFound("user not found".into()));
        }
        let UserUpdate {
            id,
            is_active,
            is_approved,
            request_status,
            profile,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(is_active) = is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        if let Some(is_approved) = is_approved {
            fields.push("is_approved = ").push_bind_unseparated(is_approved);
        }
        if let Some(status) = request_status {
            fields
                .push("request_status = ")
                .push_bind_unseparated(status.as_str());
        }
        if let Some(profile) = profile {
            fields
                .push("external_id = ")
                .push_bind_unseparated(profile.external_id);
            fields
                .push("username = ")
                .push_bind_unseparated(profile.username.as_str().to_owned());
            fields
                .push("email = ")
                .push_bind_unseparated(profile.email.as_str().to_owned());
            fields
                .push("full_name = ")
                .push_bind_unseparated(profile.full_name);
            fields
                .push("avatar_url = ")
                .push_bind_unseparated(profile.avatar_url);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {USER_COLUMNS}"));

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }
}

async fn insert_user(conn: &mut PgConnection, new_user: NewUser) -> DomainResult<User> {
    let NewUser {
        username,
        email,
        full_name,
        avatar_url,
        external_id,
        password_hash,
        is_superuser,
        is_approved,
        request_status,
        created_at,
    } = new_user;

    let sql = format!(
        "INSERT INTO users (username, email, full_name, avatar_url, external_id, password_hash, \
         is_superuser, is_approved, request_status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(full_name)
        .bind(avatar_url)
        .bind(external_id)
        .bind(password_hash.as_ref().map(PasswordHash::as_str))
        .bind(is_superuser)
        .bind(is_approved)
        .bind(request_status.as_str())
        .bind(created_at)
        .fetch_one(conn)
        .await
        .map_err(map_sqlx)?;

    User::try_from(row)
}

async fn insert_bootstrap_org(
    conn: &mut PgConnection,
    owner: &User,
    new_org: NewOrganization,
) -> DomainResult<Organization> {
    let sql = format!(
        "INSERT INTO organizations (name, slug, plan, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING {ORG_COLUMNS}"
    );
    let row = sqlx::query_as::<_, OrganizationRow>(&sql)
        .bind(new_org.name.as_str())
        .bind(new_org.slug.as_str())
        .bind(new_org.plan.as_str())
        .bind(new_org.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    let org = Organization::try_from(row)?;

    sqlx::query(
        "INSERT INTO memberships (user_id, org_id, role, joined_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(i64::from(owner.id))
    .bind(i64::from(org.id))
    .bind(MemberRole::Owner.as_str())
    .bind(new_org.created_at)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(org)
}
