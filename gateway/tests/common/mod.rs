#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth::TokenService;
use gateway::inbound::http::create_router;
use gateway::outbound::grpc::user::GrpcUserServiceClient;
use serde_json::json;
use serde_json::Value;
use tonic::transport::Channel;
use tonic::transport::Server;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::AuthGrpcService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::proto::auth_service_server::AuthServiceServer;
use user_service::proto::user_service_server::UserServiceServer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
const TEST_BCRYPT_COST: u32 = 4;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Gateway and user-service running in the background.
///
/// user-service keeps its records in memory, everything else is the real
/// stack: HTTP router, Auth Gate, gRPC client and server.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: Arc<TokenService>,
    pub repository: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(chrono::Duration::minutes(5)).await
    }

    pub async fn spawn_with_ttl(ttl: chrono::Duration) -> Self {
        let (grpc_address, repository) = spawn_user_service().await;

        let channel = connect(grpc_address).await;
        let user_client = Arc::new(GrpcUserServiceClient::from_channel(channel));
        let token_service = Arc::new(TokenService::new(JWT_SECRET, ttl));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(user_client, Arc::clone(&token_service), REQUEST_TIMEOUT);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service,
            repository,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register through the public endpoint.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Register a user, log in and return `(user_id, token)`.
    pub async fn signed_in_user(&self, name: &str, email: &str) -> (String, String) {
        let response = self.register(name, email, "password").await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let token = self.login(email, "password").await;
        let user_id = self
            .token_service
            .verify(&token)
            .expect("Issued token must verify")
            .sub;
        (user_id, token)
    }
}

async fn spawn_user_service() -> (SocketAddr, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UserService::new(
        Arc::clone(&repository),
        PasswordHasher::new(TEST_BCRYPT_COST),
    ));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let address = listener.local_addr().unwrap();
    drop(listener);

    let user_grpc_service = UserGrpcService::new(Arc::clone(&service), REQUEST_TIMEOUT);
    let auth_grpc_service = AuthGrpcService::new(service, REQUEST_TIMEOUT);

    tokio::spawn(async move {
        Server::builder()
            .add_service(UserServiceServer::new(user_grpc_service))
            .add_service(AuthServiceServer::new(auth_grpc_service))
            .serve(address)
            .await
            .expect("gRPC server error");
    });

    (address, repository)
}

/// Retry until the freshly spawned server accepts connections.
async fn connect(address: SocketAddr) -> Channel {
    let endpoint = format!("http://{}", address);

    for _ in 0..50 {
        if let Ok(channel) = Channel::from_shared(endpoint.clone())
            .expect("Invalid endpoint")
            .connect()
            .await
        {
            return channel;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("gRPC server at {} did not come up", address);
}
