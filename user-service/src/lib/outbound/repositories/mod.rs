pub mod documents;
pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::client_options;
pub use user::MongoUserRepository;
