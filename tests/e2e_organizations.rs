use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::TestApp;

/// スーパーユーザーのみ組織を作成でき、スラッグは一意になる
#[tokio::test]
async fn superuser_creates_orgs_with_unique_slugs() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let bob = app.approved_member(&admin, "bob").await;

    let (status, org) = app
        .call(Method::POST, "/api/orgs", Some(&admin), Some(json!({"name": "Linkforge HQ"})))
        .await;
    assert_eq!(status, StatusCode::OK, "{org}");
    assert_eq!(org["slug"], "linkforge-hq-1");
    assert_eq!(org["plan"], "free");
    assert_eq!(org["is_link_privacy_enabled"], true);

    let (status, _) = app
        .call(Method::POST, "/api/orgs", Some(&bob), Some(json!({"name": "Side project"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, all) = app.call(Method::GET, "/api/orgs/all", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = app.call(Method::GET, "/api/orgs/all", Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, mine) = app.call(Method::GET, "/api/orgs", Some(&bob), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_requires_membership() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let outsider = app.register("outsider").await;
    let org_id = app.bootstrap_org_id();

    let (status, org) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(org["name"], support::PROJECT_NAME);

    let (status, body) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}"), Some(&outsider), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not a member of this organization");

    let (status, _) = app.call(Method::GET, "/api/orgs/999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 組織名の変更はスラッグを更新し監査ログを残す
#[tokio::test]
async fn update_renames_and_records_audit() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let bob = app.approved_member(&admin, "bob").await;
    let org_id = app.bootstrap_org_id();
    let uri = format!("/api/orgs/{org_id}");

    let (status, org) = app
        .call(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({"name": "Acme Links", "allow_member_edit": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{org}");
    assert_eq!(org["slug"], "acme-links");
    assert_eq!(org["allow_member_edit"], false);

    let summaries = support::audit_summaries(&app.store);
    assert_eq!(
        summaries,
        vec!["Updated organization 'Acme Links': name, member edit"]
    );

    let (status, _) = app
        .call(Method::PUT, &uri, Some(&bob), Some(json!({"name": "Mine now"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stats_count_members_links_and_clicks() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let bob = app.approved_member(&admin, "bob").await;
    let org_id = app.bootstrap_org_id();

    support::LinkBuilder::new("live", admin.user_id, org_id).insert(&app.store);
    support::LinkBuilder::new("paused", admin.user_id, org_id)
        .inactive()
        .insert(&app.store);
    let deleted = support::LinkBuilder::new("gone", admin.user_id, org_id).insert(&app.store);
    app.store
        .lock()
        .links
        .iter_mut()
        .filter(|l| l.id == deleted.id)
        .for_each(|l| {
            l.is_deleted = true;
            l.clicks = 50;
        });
    app.store.lock().links[0].clicks = 7;

    let (status, stats) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}/stats"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{stats}");
    assert_eq!(stats["member_count"], 2);
    assert_eq!(stats["link_count"], 2);
    assert_eq!(stats["active_links"], 1);
    assert_eq!(stats["campaign_count"], 0);
    assert_eq!(stats["total_clicks"], 7);

    let (status, _) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}/stats"), Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// 招待の作成・一覧・受諾
#[tokio::test]
async fn invite_lifecycle() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let org_id = app.bootstrap_org_id();
    let invites_uri = format!("/api/orgs/{org_id}/invites");

    let (status, invite) = app
        .call(
            Method::POST,
            &invites_uri,
            Some(&admin),
            Some(json!({"email": "Dana@Example.com", "role": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{invite}");
    assert_eq!(invite["email"], "dana@example.com");
    assert_eq!(invite["status"], "pending");
    assert_eq!(invite["expires_at"], "2024-01-08T00:00:00Z");
    let token = invite["token"].as_str().unwrap().to_string();

    let (_, pending) = app.call(Method::GET, &invites_uri, Some(&admin), None).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let eve = app.register("eve").await;
    let (status, _) = app
        .call(
            Method::POST,
            "/api/orgs/invites/accept",
            Some(&eve),
            Some(json!({"token": token})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let dana = app.register("dana").await;
    let (status, membership) = app
        .call(
            Method::POST,
            "/api/orgs/invites/accept",
            Some(&dana),
            Some(json!({"token": token})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{membership}");
    assert_eq!(membership["org_id"], org_id);
    assert_eq!(membership["role"], "admin");

    let (status, body) = app
        .call(
            Method::POST,
            "/api/orgs/invites/accept",
            Some(&dana),
            Some(json!({"token": token})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invite is no longer valid");

    let (status, body) = app
        .call(
            Method::POST,
            &invites_uri,
            Some(&admin),
            Some(json!({"email": "dana@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User is already a member");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/orgs/invites/accept",
            Some(&dana),
            Some(json!({"token": "no-such-token"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_invite_is_marked_and_rejected() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let org_id = app.bootstrap_org_id();
    let invite = support::seed_expired_invite(&app.store, org_id, admin.user_id, "late@example.com");
    let late = app.register("late").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/orgs/invites/accept",
            Some(&late),
            Some(json!({"token": invite.token})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invite has expired");
    assert_eq!(
        app.store.lock().invites[0].status,
        linkforge::domain::organization::InviteStatus::Expired
    );
}

#[tokio::test]
async fn only_owners_invite_owners_and_revoke_is_org_scoped() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let org_id = app.bootstrap_org_id();
    let bob = app.approved_member(&admin, "bob").await;

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/orgs/{org_id}/members/{}/role", bob.user_id),
            Some(&admin),
            Some(json!({"role": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/orgs/{org_id}/invites"),
            Some(&bob),
            Some(json!({"email": "boss@example.com", "role": "owner"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only owners can invite owners");

    let (_, invite) = app
        .call(
            Method::POST,
            &format!("/api/orgs/{org_id}/invites"),
            Some(&bob),
            Some(json!({"email": "new@example.com"})),
        )
        .await;
    let invite_id = invite["id"].as_i64().unwrap();

    let (_, other) = app
        .call(Method::POST, "/api/orgs", Some(&admin), Some(json!({"name": "Other"})))
        .await;
    let other_id = other["id"].as_i64().unwrap();
    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/orgs/{other_id}/invites/{invite_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, ok) = app
        .call(
            Method::DELETE,
            &format!("/api/orgs/{org_id}/invites/{invite_id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ok["ok"], true);

    let (_, pending) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}/invites"), Some(&admin), None)
        .await;
    assert!(pending.as_array().unwrap().is_empty());
}

/// オーナーへの昇格は既存オーナーを admin に降格させる
#[tokio::test]
async fn promoting_an_owner_demotes_the_previous_one() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let org_id = app.bootstrap_org_id();
    let bob = app.approved_member(&admin, "bob").await;
    let role_uri = format!("/api/orgs/{org_id}/members/{}/role", bob.user_id);

    let (status, body) = app
        .call(Method::PUT, &role_uri, Some(&admin), Some(json!({"role": "emperor"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid role 'emperor'. Must be one of: owner, admin, member"
    );

    let (status, _) = app
        .call(Method::PUT, &role_uri, Some(&bob), Some(json!({"role": "owner"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, membership) = app
        .call(Method::PUT, &role_uri, Some(&admin), Some(json!({"role": "owner"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(membership["role"], "owner");

    let (_, members) = app
        .call(Method::GET, &format!("/api/orgs/{org_id}/members"), Some(&bob), None)
        .await;
    let role_of = |username: &str| {
        members
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["username"] == username)
            .map(|m| m["role"].clone())
            .unwrap()
    };
    assert_eq!(role_of("admin"), "admin");
    assert_eq!(role_of("bob"), "owner");
}

#[tokio::test]
async fn owners_cannot_be_removed() {
    let app = TestApp::new();
    let admin = app.bootstrap_admin().await;
    let org_id = app.bootstrap_org_id();
    let bob = app.approved_member(&admin, "bob").await;

    let (status, body) = app
        .call(
            Method::DELETE,
            &format!("/api/orgs/{org_id}/members/{}", admin.user_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot remove the owner");

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/orgs/{org_id}/members/{}", bob.user_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/orgs/{org_id}/members/{}", bob.user_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(
        support::audit_summaries(&app.store),
        vec!["Removed bob from the organization"]
    );
}
