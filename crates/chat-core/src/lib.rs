pub mod event_bus;
pub mod ports;
pub mod transport;
pub mod state;
pub mod feedback;
pub mod reducer;
pub mod client;
