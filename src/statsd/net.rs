use std::io::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError};
use tracing::debug;

use super::client::Client;
use crate::{MetricResult, MetricsError};

/// A connected UDP socket used as a byte sink. Every write is one datagram.
#[derive(Debug)]
pub struct UdpSink {
    sock: UdpSocket,
}

impl UdpSink {
    /// Resolves `addr` and connects an ephemeral socket to the first address
    /// that accepts it.
    ///
    /// # Errors
    /// Returns [`MetricsError::Resolve`] when `addr` yields no address, or the
    /// last bind/connect error.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> MetricResult<Self> {
        let mut last_err = None;
        for dst in addr.to_socket_addrs()? {
            match connect_to(dst) {
                Ok(sock) => return Ok(Self { sock }),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.map_or_else(
            || MetricsError::Resolve("address resolved to nothing".to_string()),
            MetricsError::from,
        ))
    }

    /// Wraps an already connected socket.
    #[must_use]
    pub const fn from_socket(sock: UdpSocket) -> Self {
        Self { sock }
    }

    /// Address of the collector.
    ///
    /// # Errors
    /// Returns the socket error.
    pub fn peer_addr(&self) -> MetricResult<SocketAddr> {
        Ok(self.sock.peer_addr()?)
    }

    /// Local address the socket is bound to.
    ///
    /// # Errors
    /// Returns the socket error.
    pub fn local_addr(&self) -> MetricResult<SocketAddr> {
        Ok(self.sock.local_addr()?)
    }
}

fn connect_to(dst: SocketAddr) -> io::Result<UdpSocket> {
    let bind_addr: SocketAddr = if dst.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let sock = UdpSocket::bind(bind_addr)?;
    sock.connect(dst)?;
    Ok(sock)
}

impl Write for UdpSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let r = self.sock.send(buf);
        if let Err(ref err) = r {
            debug!("UDP send error: {err}");
        }
        r
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Connects to a collector at `addr` with the default packet size.
///
/// # Errors
/// Returns the resolution or socket error.
pub fn dial<A: ToSocketAddrs>(addr: A) -> MetricResult<Client<UdpSink>> {
    Ok(Client::new(UdpSink::connect(addr)?))
}

/// Like [`dial`] but with packets of at most `size` bytes (zero selects the
/// default).
///
/// # Errors
/// Returns the resolution or socket error.
pub fn dial_size<A: ToSocketAddrs>(addr: A, size: usize) -> MetricResult<Client<UdpSink>> {
    Ok(Client::with_size(UdpSink::connect(addr)?, size))
}

/// Like [`dial`] but gives up after `timeout`. The timeout includes name
/// resolution.
///
/// # Errors
/// Returns [`MetricsError::Timeout`] when the deadline passes, otherwise the
/// resolution or socket error.
pub fn dial_timeout(addr: &str, timeout: Duration) -> MetricResult<Client<UdpSink>> {
    let (sender, receiver) = bounded::<MetricResult<UdpSink>>(1);
    let addr = addr.to_string();
    // resolution can block far beyond the deadline, the thread is left to finish on its own
    let _detached = thread::Builder::new()
        .name("statsd-dial".to_string())
        .spawn(move || {
            let _ = sender.send(UdpSink::connect(addr.as_str()));
        })?;

    Ok(Client::new(await_sink(&receiver, timeout)?))
}

fn await_sink(
    receiver: &Receiver<MetricResult<UdpSink>>,
    timeout: Duration,
) -> MetricResult<UdpSink> {
    match receiver.recv_timeout(timeout) {
        Ok(sink) => sink,
        Err(RecvTimeoutError::Timeout) => Err(MetricsError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err("dial thread exited without result".into()),
    }
}
