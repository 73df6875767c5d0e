//! Free-port probing for tests and tooling
//!
//! Availability is probed by actually binding a TCP listener, the only
//! reliable check. The listener is dropped before the port is returned, so
//! a small window remains in which another process could claim it; callers
//! that need a hard reservation should bind the port themselves and keep
//! the listener alive.

use crate::Result;
use std::net::{SocketAddr, TcpListener};
use tracing::debug;

/// Find a currently free TCP port on the loopback interface
///
/// # Errors
///
/// Returns an IO error if no ephemeral port can be bound.
pub fn reserve_free_port() -> Result<u16> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr)?;
    let port = listener.local_addr()?.port();
    debug!("Probed free port {}", port);
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_port_is_nonzero() {
        let port = reserve_free_port().expect("an ephemeral port is available");
        assert!(port > 0);
    }

    #[test]
    fn test_reserved_port_is_bindable() {
        let port = reserve_free_port().expect("an ephemeral port is available");
        // Immediately rebinding the probed port should succeed
        let listener = TcpListener::bind(("127.0.0.1", port)).expect("port still free");
        assert_eq!(listener.local_addr().unwrap().port(), port);
    }
}
