// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod analytics;
pub mod audit;
pub mod campaign_repo;
pub mod link_repos;
pub mod org_repos;
pub mod security;
pub mod store;
pub mod time;
pub mod user_repo;
pub mod util;

// ストア
pub use store::{MemoryStore, Tables};

// 時刻関連
pub use time::{FixedClock, fixed_now};

// セキュリティ関連
pub use security::{
    DummyTokenManager, EXPIRED_TOKEN, IDP_AUTHORIZE_URL, StrictPasswordHasher,
    StubIdentityProvider, external_identity, token_for,
};

// リポジトリ
pub use analytics::MemoryClickRepo;
pub use audit::{MemoryAuditRepo, audit_summaries};
pub use campaign_repo::MemoryCampaignRepo;
pub use link_repos::MemoryLinkRepo;
pub use org_repos::{MemoryInviteRepo, MemoryMembershipRepo, MemoryOrganizationRepo};
pub use user_repo::MemoryUserRepo;

// ユーティリティ関連
pub use util::{SequentialSecrets, SequentialShortCodes, StubGeoLocator};
