#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use tonic::transport::Channel;
use tonic::transport::Server;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::AuthGrpcService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::proto::auth_service_client::AuthServiceClient;
use user_service::proto::auth_service_server::AuthServiceServer;
use user_service::proto::user_service_client::UserServiceClient;
use user_service::proto::user_service_server::UserServiceServer;
use user_service::proto::CreateUserRequest;

pub const TEST_BCRYPT_COST: u32 = 4;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub type TestUserService = UserService<InMemoryUserRepository>;

/// Domain service over an in-memory store, cheap bcrypt cost.
pub fn user_service() -> (Arc<TestUserService>, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UserService::new(
        Arc::clone(&repository),
        PasswordHasher::new(TEST_BCRYPT_COST),
    ));
    (service, repository)
}

/// gRPC server running in the background on a random port
pub struct TestApp {
    pub address: SocketAddr,
    pub repository: Arc<InMemoryUserRepository>,
    pub users: UserServiceClient<Channel>,
    pub auth: AuthServiceClient<Channel>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let (service, repository) = user_service();

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

        let channel = connect(address).await;

        Self {
            address,
            repository,
            users: UserServiceClient::new(channel.clone()),
            auth: AuthServiceClient::new(channel),
        }
    }

    /// Register a user and return its id.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        self.users
            .clone()
            .create_user(CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                created_by: None,
            })
            .await
            .expect("Failed to register user")
            .into_inner()
            .user
            .expect("Missing user")
            .id
    }
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
