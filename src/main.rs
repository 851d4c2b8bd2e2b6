use anyhow::Result;
use linkforge::application::{
    ports::{geo::GeoLocator, identity::IdentityProvider},
    services::{ApplicationServices, Ports, Repositories},
};
use linkforge::config::AppConfig;
use linkforge::infrastructure::{
    database,
    geo::{DisabledGeoLocator, HttpGeoLocator},
    oauth::OAuthIdentityProvider,
    repositories::{
        PostgresAuditLogRepository, PostgresCampaignRepository, PostgresClickEventRepository,
        PostgresInviteRepository, PostgresLinkRepository, PostgresMembershipRepository,
        PostgresOrganizationRepository, PostgresUserRepository,
    },
    security::{
        login_state::InMemoryLoginStateStore, password::Argon2PasswordHasher,
        token::BiscuitTokenManager,
    },
    time::SystemClock,
    util::{DefaultSlugGenerator, RandomSecretGenerator, RandomShortCodeGenerator},
};
use linkforge::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let links = Arc::new(PostgresLinkRepository::new(pool.clone()));
    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        organizations: Arc::new(PostgresOrganizationRepository::new(pool.clone())),
        memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        invites: Arc::new(PostgresInviteRepository::new(pool.clone())),
        link_writes: links.clone(),
        link_reads: links,
        campaigns: Arc::new(PostgresCampaignRepository::new(pool.clone())),
        clicks: Arc::new(PostgresClickEventRepository::new(pool.clone())),
        audit_logs: Arc::new(PostgresAuditLogRepository::new(pool)),
    };

    let geo: Arc<dyn GeoLocator> = if config.geoip_enabled() {
        Arc::new(HttpGeoLocator::new(
            config.geoip_endpoint(),
            config.geoip_timeout(),
        )?)
    } else {
        tracing::info!("geo lookup disabled");
        Arc::new(DisabledGeoLocator)
    };

    let identity_provider: Option<Arc<dyn IdentityProvider>> = match config.oauth() {
        Some(settings) => Some(Arc::new(OAuthIdentityProvider::new(
            settings.clone(),
            config.oauth_timeout(),
        )?)),
        None => {
            tracing::info!("identity provider sign-in disabled");
            None
        }
    };

    let ports = Ports {
        password_hasher: Arc::new(Argon2PasswordHasher::default()),
        token_manager: Arc::new(BiscuitTokenManager::new(
            config.biscuit_private_key(),
            config.token_ttl(),
        )?),
        clock: Arc::new(SystemClock),
        slugger: Arc::new(DefaultSlugGenerator),
        short_codes: Arc::new(RandomShortCodeGenerator),
        secrets: Arc::new(RandomSecretGenerator),
        geo,
        identity_provider,
        login_states: Arc::new(InMemoryLoginStateStore::new()),
    };

    let services = Arc::new(ApplicationServices::new(
        repos,
        ports,
        config.project_name(),
    ));

    let state = HttpState {
        services,
        settings: Arc::new(HttpSettings {
            project_name: config.project_name().to_string(),
            frontend_url: config.frontend_url().to_string(),
            allowed_origins: config.allowed_origins().to_vec(),
            rate_limit: config.rate_limit(),
        }),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
