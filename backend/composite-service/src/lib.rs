pub mod configs;
pub mod error;
pub mod gateway;
pub mod logger;

pub use gateway::PaymentGateway;
