// Listener construction module
// Binds the fixed local address with SO_REUSEADDR so a restart immediately
// after shutdown is not blocked by a socket in TIME_WAIT.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create a bound `TcpListener` for the given address.
///
/// `SO_REUSEADDR` is set; `SO_REUSEPORT` deliberately is not, so a second
/// instance started while one is running fails its bind instead of silently
/// sharing the port.
pub fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
