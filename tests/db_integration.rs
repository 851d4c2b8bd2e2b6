use chrono::Utc;
use linkforge::domain::analytics::{ClickEventRepository, DeviceType, NewClickEvent};
use linkforge::domain::link::{
    DestinationUrl, LinkChanges, LinkFilter, LinkReadRepository, LinkScope, LinkWriteRepository,
    NewLink, RedirectType, ShortCode, UtmParams,
};
use linkforge::domain::organization::{
    MemberRole, Membership, MembershipRepository, NewOrganization, OrganizationName,
    OrganizationRepository, OrganizationSlug, Plan,
};
use linkforge::domain::user::{Email, NewUser, PasswordHash, UserRepository, Username};
use linkforge::infrastructure::database::{init_pool, run_migrations};
use linkforge::infrastructure::repositories::{
    PostgresClickEventRepository, PostgresLinkRepository, PostgresMembershipRepository,
    PostgresOrganizationRepository, PostgresUserRepository,
};

fn enabled() -> bool {
    // Run only when explicitly enabled to avoid requiring Postgres in all environments
    if std::env::var("RUN_DB_INTEGRATION").unwrap_or_default() != "1" {
        eprintln!("skipping integration test: set RUN_DB_INTEGRATION=1 and DATABASE_URL to run");
        return false;
    }
    true
}

#[tokio::test]
async fn integration_link_lifecycle() {
    if !enabled() {
        return;
    }

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = init_pool(&database_url).await.expect("init pool");
    run_migrations(&pool).await.expect("run migrations");

    let suffix = Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string();
    let now = Utc::now();

    let users = PostgresUserRepository::new(pool.clone());
    let registration = users
        .register(
            NewUser::new(
                Username::new(format!("it{suffix}")).unwrap(),
                Email::new(format!("it{suffix}@example.com")).unwrap(),
                PasswordHash::new("$argon2id$placeholder").unwrap(),
                now,
            ),
            NewOrganization {
                name: OrganizationName::new(format!("Bootstrap {suffix}")).unwrap(),
                slug: OrganizationSlug::new(format!("bootstrap-{suffix}")).unwrap(),
                plan: Plan::Free,
                created_at: now,
            },
        )
        .await
        .expect("register user");
    let user = registration.user;
    // Only an empty database promotes the account.
    assert_eq!(user.is_superuser, registration.bootstrap_org.is_some());

    let external = users
        .register(
            NewUser::external(
                format!("ext-{suffix}"),
                Username::new(format!("ext{suffix}")).unwrap(),
                Email::new(format!("ext{suffix}@example.com")).unwrap(),
                now,
            ),
            NewOrganization {
                name: OrganizationName::new(format!("Unused {suffix}")).unwrap(),
                slug: OrganizationSlug::new(format!("unused-{suffix}")).unwrap(),
                plan: Plan::Free,
                created_at: now,
            },
        )
        .await
        .expect("register external user");
    assert!(external.bootstrap_org.is_none());
    assert!(!external.user.is_superuser);
    let found = users
        .find_by_external_id(&format!("ext-{suffix}"))
        .await
        .expect("find by external id");
    assert_eq!(found.map(|u| u.id), Some(external.user.id));

    let orgs = PostgresOrganizationRepository::new(pool.clone());
    let org = orgs
        .insert(NewOrganization {
            name: OrganizationName::new(format!("Integration {suffix}")).unwrap(),
            slug: OrganizationSlug::new(format!("integration-{suffix}")).unwrap(),
            plan: Plan::Free,
            created_at: now,
        })
        .await
        .expect("insert org");
    assert!(org.is_link_privacy_enabled);

    let memberships = PostgresMembershipRepository::new(pool.clone());
    memberships
        .insert(Membership {
            user_id: user.id,
            org_id: org.id,
            role: MemberRole::Owner,
            joined_at: now,
        })
        .await
        .expect("insert membership");
    let found = memberships
        .find(user.id, org.id)
        .await
        .expect("find membership");
    assert_eq!(found.map(|m| m.role), Some(MemberRole::Owner));

    let links = PostgresLinkRepository::new(pool.clone());
    let code = ShortCode::new(format!("it{suffix}")).unwrap();
    let link = links
        .insert(NewLink {
            short_code: code.clone(),
            original_url: DestinationUrl::new("https://example.com/integration").unwrap(),
            owner_id: user.id,
            org_id: org.id,
            campaign_id: None,
            title: Some("Integration".into()),
            tags: None,
            is_active: true,
            created_at: now,
            expires_at: None,
            password_hash: None,
            require_login: false,
            allowed_emails: None,
            redirect_type: RedirectType::Temporary,
            track_activity: true,
            utm: UtmParams::default(),
        })
        .await
        .expect("insert link");
    assert!(links.code_exists(&code).await.expect("code exists"));

    let updated = links
        .update(
            link.id,
            LinkChanges {
                is_active: Some(false),
                ..LinkChanges::default()
            },
        )
        .await
        .expect("update link");
    assert!(!updated.is_active);

    links.increment_clicks(link.id).await.expect("increment");
    let clicks = PostgresClickEventRepository::new(pool.clone());
    clicks
        .insert(NewClickEvent {
            link_id: link.id,
            timestamp: now,
            ip_address: Some("127.0.0.1".into()),
            country_code: Some("Local".into()),
            user_agent: Some("linkforge-integration-test".into()),
            referrer: None,
            device_type: DeviceType::Desktop,
            browser: "Other".into(),
            os: "Other".into(),
        })
        .await
        .expect("insert click");
    let devices = clicks
        .device_breakdown(link.id)
        .await
        .expect("device breakdown");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].count, 1);

    let stats = orgs.stats(org.id).await.expect("org stats");
    assert_eq!(stats.link_count, 1);
    assert_eq!(stats.total_clicks, 1);

    links.soft_delete(link.id).await.expect("soft delete");
    let visible = links
        .list(
            LinkScope {
                org_id: org.id,
                owner_id: None,
            },
            &LinkFilter::default(),
            0,
            10,
        )
        .await
        .expect("list links");
    assert!(visible.is_empty());
    // Deleted codes stay reserved.
    assert!(links.code_exists(&code).await.expect("code exists"));

    // cleanup test rows
    let org_ids: Vec<i64> = std::iter::once(org.id)
        .chain(registration.bootstrap_org.map(|o| o.id))
        .map(i64::from)
        .collect();
    sqlx::query("DELETE FROM organizations WHERE id = ANY($1)")
        .bind(&org_ids)
        .execute(&pool)
        .await
        .expect("cleanup orgs");
    sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(vec![i64::from(user.id), i64::from(external.user.id)])
        .execute(&pool)
        .await
        .expect("cleanup users");
}
