use std::sync::Arc;

use auth::PasswordHasher;
use mongodb::Client;
use tokio::signal;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::reporter::ActiveUserReporter;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::AuthGrpcService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::repositories::client_options;
use user_service::outbound::repositories::MongoUserRepository;
use user_service::proto::auth_service_server::AuthServiceServer;
use user_service::proto::user_service_server::UserServiceServer;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_name = %config.database.name,
        min_pool_size = config.database.min_pool_size,
        max_pool_size = config.database.max_pool_size,
        grpc_port = config.server.grpc_port,
        request_timeout_secs = config.server.request_timeout_secs,
        bcrypt_cost = config.password.bcrypt_cost,
        "Configuration loaded"
    );

    let client = Client::with_options(client_options(&config.database).await?)?;
    let database = client.database(&config.database.name);
    tracing::info!(
        database = "mongodb",
        name = %config.database.name,
        "Database client created"
    );

    let user_repository = Arc::new(MongoUserRepository::new(&database));
    user_repository.ensure_indexes().await?;

    let password_hasher = PasswordHasher::new(config.password.bcrypt_cost);
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let reporter = config.reporting.active_users_interval().map(|interval| {
        let reporter = ActiveUserReporter::new(
            Arc::clone(&user_service),
            interval,
            config.server.request_timeout(),
        );
        tokio::spawn(async move {
            reporter.start_reporting().await;
        })
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let user_grpc_service =
        UserGrpcService::new(Arc::clone(&user_service), config.server.request_timeout());
    let auth_grpc_service =
        AuthGrpcService::new(Arc::clone(&user_service), config.server.request_timeout());
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let result = Server::builder()
        .add_service(UserServiceServer::new(user_grpc_service))
        .add_service(AuthServiceServer::new(auth_grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await;

    if let Some(reporter) = reporter {
        reporter.abort();
    }
    tracing::info!("user-service shutdown complete");

    result.map_err(Into::into)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
