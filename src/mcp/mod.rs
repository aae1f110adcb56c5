pub mod jsonrpc;
pub mod router;
pub mod transport;

pub use transport::serve_stdio;
