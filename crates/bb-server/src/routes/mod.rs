pub mod chat;
pub mod health;
pub mod nlp;
pub mod session;

pub use chat::chat_routes;
pub use health::health_routes;
pub use nlp::nlp_routes;
pub use session::session_routes;
