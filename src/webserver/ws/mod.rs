/// Real-time broadcast module
///
/// Implements the chat/event relay behind the `/ws` endpoint: every frame a
/// client sends is rebroadcast to all currently-connected clients, and the
/// hub itself announces joins and leaves.
///
/// ## Key Components
/// - `hub`: connection registry and broadcast fan-out with failure isolation
/// - `connection`: per-socket lifecycle driver (register, pump, deregister)
/// - `message`: the two-kind wire schema (`system` / `chat`)
pub mod connection;
pub mod hub;
pub mod message;

pub use hub::{ConnectionId, WsHub};
pub use message::EventMessage;
