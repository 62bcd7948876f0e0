use sea_orm::Database;
use tracing::info;

use helpdesk::config::HelpdeskConfig;
use helpdesk::infra::ai::OpenAiClient;
use helpdesk::infra::files::FsFileStore;
use helpdesk::infra::mail::HttpMailer;
use helpdesk::router::build_router;
use helpdesk::state::AppState;
use helpdesk_core::middleware::AllowedHosts;
use helpdesk_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let config = HelpdeskConfig::from_env();
    init_tracing(config.debug);

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let media = FsFileStore::new(config.media_root.clone());
    media
        .ensure_layout()
        .await
        .expect("failed to prepare media directories");

    let mailer = HttpMailer::new(config.mail_api_url, config.mail_api_key, config.mail_from);
    let completion = config
        .openai_api_key
        .map(|key| OpenAiClient::new(key, config.openai_model.clone()));

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        media,
        mailer,
        completion,
        use_fake_ai: config.use_fake_ai,
    };

    let router = build_router(state, AllowedHosts::new(config.allowed_hosts));
    let addr = format!("0.0.0.0:{}", config.helpdesk_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("helpdesk service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
