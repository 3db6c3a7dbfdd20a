use crate::error::{DnsError, Result};
use crate::framer::{next_frame, write_frame};
use crate::protocol::{Message, Query, Response};
use once_cell::sync::Lazy;
use std::io::{self, ErrorKind};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static NEXT_ID: Lazy<AtomicU16> = Lazy::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u16)
        .unwrap_or(1);
    AtomicU16::new(seed)
});

pub fn next_id() -> u16 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Blocking resolver connection; one exchange per [`Client::query`].
///
/// Any failure after a query has been sent leaves the stream at an unknown
/// frame boundary, so the connection is shut down and every later query fails
/// until the caller reconnects.
pub struct Client {
    stream: TcpStream,
    broken: bool,
}

impl Client {
    pub fn connect<A: ToSocketAddrs>(addr: A, read_timeout: Duration) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(read_timeout))?;
        stream.set_nodelay(true)?;
        Ok(Client {
            stream,
            broken: false,
        })
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn query(&mut self, name: &str) -> Result<Response> {
        if self.broken {
            return Err(DnsError::Io(io::Error::new(
                ErrorKind::NotConnected,
                "connection broken by an earlier failure, reconnect",
            )));
        }
        let query = Query::new(next_id(), name)?;
        let result = self.exchange(&query);
        if let Err(e) = &result {
            warn!("close connection after failed query {}: {}", query.id(), e);
            self.broken = true;
            if let Err(e) = self.stream.shutdown(Shutdown::Both) {
                debug!("shutdown after failed query: {}", e);
            }
        }
        result
    }

    fn exchange(&mut self, query: &Query) -> Result<Response> {
        write_frame(&mut self.stream, &query.encode())?;
        debug!("sent query {} for {}", query.id(), query.query());
        loop {
            let frame = match next_frame(&mut self.stream) {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    return Err(DnsError::Io(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "server closed the connection before answering",
                    )))
                }
                Err(DnsError::Io(e))
                    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    return Err(DnsError::Timeout(format!(
                        "no response to query {} for {}",
                        query.id(),
                        query.query()
                    )))
                }
                Err(e) => return Err(e),
            };
            match Message::decode(&frame) {
                Ok(Message::Response(response)) if response.id() == query.id() => {
                    return Ok(response)
                }
                Ok(other) => debug!("skip message {} while waiting for {}", other.id(), query.id()),
                Err(e) => warn!("skip undecodable frame: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{next_id, Client};
    use crate::error::DnsError;
    use crate::framer::{frame, next_frame};
    use crate::handler::Responder;
    use crate::master::{Section, StaticMasterFile};
    use crate::protocol::{Message, RCode, ResourceRecord, Response};
    use crate::server::serve;
    use std::io::{ErrorKind, Write};
    use std::net::{Ipv4Addr, TcpListener};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn should_return_distinct_ids_when_next_id_given_consecutive_calls() {
        let first = next_id();
        let second = next_id();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn should_return_answer_when_query_given_running_server() {
        let master = StaticMasterFile::new();
        let record = ResourceRecord::a("foo.com.", 300, Ipv4Addr::new(1, 2, 3, 4)).unwrap();
        master.insert("foo.com.", Section::Answer, record.clone()).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(
            listener,
            Responder::new(Arc::new(master)),
            Duration::from_secs(5),
        ));

        let (found, missing) = tokio::task::spawn_blocking(move || {
            let mut client = Client::connect(addr, Duration::from_secs(5)).unwrap();
            (client.query("foo.com.").unwrap(), client.query("bar.com.").unwrap())
        })
        .await
        .unwrap();

        assert_eq!(RCode::NoError, found.rcode());
        assert_eq!(vec![record], found.answers().to_vec());
        assert_eq!(RCode::NameError, missing.rcode());
    }

    #[test]
    fn should_return_timeout_when_query_given_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client =
            Client::connect(listener.local_addr().unwrap(), Duration::from_millis(100)).unwrap();

        let result = client.query("foo.com.");

        assert!(matches!(result, Err(DnsError::Timeout(_))));
    }

    #[test]
    fn should_refuse_later_queries_when_query_given_server_stalling_mid_frame() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = next_frame(&mut stream).unwrap().unwrap();
            let id = Message::decode(&request).unwrap().id();
            let answer = frame(&Response::new(id, "foo.com.", RCode::NoError).unwrap().encode()).unwrap();
            stream.write_all(&answer[..5]).unwrap();
            thread::sleep(Duration::from_millis(400));
            let _ = stream.write_all(&answer[5..]);
        });
        let mut client = Client::connect(addr, Duration::from_millis(150)).unwrap();

        let first = client.query("foo.com.");
        let second = client.query("bar.com.");

        assert!(matches!(first, Err(DnsError::Timeout(_))));
        assert!(client.is_broken());
        match second {
            Err(DnsError::Io(e)) => assert_eq!(ErrorKind::NotConnected, e.kind()),
            other => panic!("expected a broken connection, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn should_keep_client_usable_when_query_given_relative_name() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = Client::connect(listener.local_addr().unwrap(), Duration::from_millis(100)).unwrap();

        let result = client.query("foo");

        assert!(result.unwrap_err().is_validation());
        assert!(!client.is_broken());
    }
}
