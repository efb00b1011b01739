use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use ssc_core::Identifier;

use crate::error::BackendError;
use crate::protocol::{Command, ResponseLine, SessionRequest};

/// Live session attributes in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    attributes: Vec<(String, String)>,
}

impl SessionRecord {
    pub fn new(attributes: Vec<(String, String)>) -> Self {
        Self { attributes }
    }

    /// No attributes means no live session.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// `Key=Value` lines for display, e.g. `Domain=00:02:9b:30:bf:5d`.
    pub fn human_readable(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|(key, value)| format!("{}={}", humanize_key(key), value))
            .collect()
    }
}

/// `ip-address` -> `Ip address`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Queries and drops subscriber sessions on behalf of an operator.
pub trait SessionClient: Send + Sync {
    fn query(
        &self,
        operator: &str,
        login: &Identifier,
    ) -> impl std::future::Future<Output = Result<SessionRecord, BackendError>> + Send;

    fn delete(
        &self,
        operator: &str,
        login: &Identifier,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;
}

/// Session service reached over its TCP line protocol.
/// One connection per request.
pub struct SocketSessionClient {
    addr: String,
    timeout: Duration,
}

impl SocketSessionClient {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    async fn exchange(&self, request: &SessionRequest<'_>) -> Result<SessionRecord, BackendError> {
        let stream = TcpStream::connect(&self.addr).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(request.encode().as_bytes()).await?;
        writer.flush().await?;

        let mut lines = BufReader::new(reader).lines();
        let mut attributes = Vec::new();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match ResponseLine::parse(&line)? {
                ResponseLine::Attribute(key, value) => attributes.push((key, value)),
                ResponseLine::End | ResponseLine::Ok => return Ok(SessionRecord::new(attributes)),
                ResponseLine::Error(text) => return Err(BackendError::Server(text)),
            }
        }

        Err(BackendError::malformed("connection closed before END"))
    }

    async fn send(&self, request: SessionRequest<'_>) -> Result<SessionRecord, BackendError> {
        timeout(self.timeout, self.exchange(&request))
            .await
            .map_err(|_| BackendError::Timeout(self.timeout))?
    }
}

impl SessionClient for SocketSessionClient {
    async fn query(
        &self,
        operator: &str,
        login: &Identifier,
    ) -> Result<SessionRecord, BackendError> {
        tracing::debug!(operator, %login, addr = %self.addr, "session query");
        self.send(SessionRequest::new(Command::ShowSession, operator, login))
            .await
    }

    async fn delete(&self, operator: &str, login: &Identifier) -> Result<(), BackendError> {
        tracing::debug!(operator, %login, addr = %self.addr, "session delete");
        let record = self
            .send(SessionRequest::new(Command::DeleteSession, operator, login))
            .await?;
        if !record.is_empty() {
            return Err(BackendError::malformed("unexpected attributes in delete reply"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssc_core::Grammar;
    use tokio::net::TcpListener;

    fn login() -> Identifier {
        Identifier::parse("KHARKOV-K13 PON 1/1/04/04:60.1.2", &Grammar::default()).unwrap()
    }

    /// Accept one connection, record the request line, answer with `reply`.
    async fn fake_server(reply: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (reader, mut writer) = stream.into_split();
            let mut request = String::new();
            BufReader::new(reader).read_line(&mut request).await.unwrap();
            writer.write_all(reply.as_bytes()).await.unwrap();
            writer.shutdown().await.unwrap();
            request
        });
        (addr, handle)
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("domain"), "Domain");
        assert_eq!(humanize_key("ip-address"), "Ip address");
        assert_eq!(humanize_key("lease_time"), "Lease time");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn test_human_readable() {
        let record = SessionRecord::new(vec![
            ("domain".to_string(), "00:02:9b:30:bf:5d".to_string()),
            ("ip-lease".to_string(), "10.0.0.1".to_string()),
        ]);
        assert_eq!(
            record.human_readable(),
            vec!["Domain=00:02:9b:30:bf:5d", "Ip lease=10.0.0.1"]
        );
        assert_eq!(record.get("domain"), Some("00:02:9b:30:bf:5d"));
    }

    #[tokio::test]
    async fn test_query_session() {
        let (addr, server) =
            fake_server("domain=00:02:9b:30:bf:5d\nip-lease=10.0.0.1\nEND\n").await;
        let client = SocketSessionClient::new(addr, Duration::from_secs(2));

        let record = client.query("max", &login()).await.unwrap();
        assert_eq!(record.get("domain"), Some("00:02:9b:30:bf:5d"));
        assert_eq!(record.attributes().len(), 2);

        let request = server.await.unwrap();
        assert_eq!(
            request,
            "show-session user=\"max\" login=\"KHARKOV-K13 PON 1/1/04/04:60.1.2\"\n"
        );
    }

    #[tokio::test]
    async fn test_query_no_session() {
        let (addr, _server) = fake_server("END\n").await;
        let client = SocketSessionClient::new(addr, Duration::from_secs(2));

        let record = client.query("max", &login()).await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_server_error() {
        let (addr, _server) = fake_server("ERROR permission denied\n").await;
        let client = SocketSessionClient::new(addr, Duration::from_secs(2));

        match client.query("max", &login()).await {
            Err(BackendError::Server(text)) => assert_eq!(text, "permission denied"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_truncated_reply() {
        let (addr, _server) = fake_server("domain=00:02:9b:30:bf:5d\n").await;
        let client = SocketSessionClient::new(addr, Duration::from_secs(2));

        assert!(matches!(
            client.query("max", &login()).await,
            Err(BackendError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (addr, server) = fake_server("OK\n").await;
        let client = SocketSessionClient::new(addr, Duration::from_secs(2));

        client.delete("max", &login()).await.unwrap();
        assert!(server.await.unwrap().starts_with("delete-session user=\"max\""));
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let _server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = SocketSessionClient::new(addr, Duration::from_millis(100));
        assert!(matches!(
            client.query("max", &login()).await,
            Err(BackendError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let client = SocketSessionClient::new(addr, Duration::from_secs(2));
        assert!(matches!(
            client.query("max", &login()).await,
            Err(BackendError::Io(_))
        ));
    }
}
