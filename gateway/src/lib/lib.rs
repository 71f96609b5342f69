pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::auth::service::LoginService;
pub use inbound::http::create_router;
pub use outbound::grpc::user::GrpcUserServiceClient;

// Include the generated proto code
pub mod proto {
    tonic::include_proto!("user");
}
