pub mod errors;
pub mod grpc_auth_server;
pub mod grpc_user_server;
pub mod handlers;

pub use grpc_auth_server::AuthGrpcService;
pub use grpc_user_server::UserGrpcService;
