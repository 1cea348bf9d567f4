pub mod config;
pub mod http;
pub mod lifecycle;
pub mod socket;
pub mod spawner;

pub use config::load_config;
pub use http::HttpChatAdapter;
pub use lifecycle::PageLifecycle;
pub use socket::WebSocketAdapter;
pub use spawner::WasmSpawner;
