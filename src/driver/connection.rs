//! Connection
//!
//! 엔드포인트, 연결 설정, 전송 채널 소유

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::wire::{
    Connector, Credentials, GqlTransport, HandshakeRequest, TransportError, PROTOCOL_VERSION,
};

use super::error::{DriverError, DriverResult};
use super::session::{Session, SessionConfig};

/// 기본 포트
pub const DEFAULT_PORT: u16 = 50051;

// ============================================================================
// Endpoint - 서버 엔드포인트
// ============================================================================

/// 서버 엔드포인트
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// 호스트
    pub host: String,
    /// 포트
    pub port: u16,
    /// TLS 사용
    pub tls: bool,
}

impl Endpoint {
    /// 새 엔드포인트 생성
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            tls: false,
        }
    }

    /// TLS 설정
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// 주소 문자열에서 파싱
    ///
    /// `host`, `host:port`, `[::1]:port` 형식과 `gwp://`, `gwp+s://`,
    /// `http://`, `https://` 스킴을 받습니다.
    pub fn parse(address: &str) -> DriverResult<Self> {
        let address = address.trim();
        let (tls, rest) = match address.split_once("://") {
            Some(("gwp", rest)) | Some(("http", rest)) => (false, rest),
            Some(("gwp+s", rest)) | Some(("https", rest)) => (true, rest),
            Some((scheme, _)) => {
                return Err(DriverError::configuration(format!(
                    "Unsupported scheme '{}'",
                    scheme
                )))
            }
            None => (false, address),
        };

        let authority = rest.split('/').next().unwrap_or_default();

        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            let (host, after) = bracketed.split_once(']').ok_or_else(|| {
                DriverError::configuration(format!("Unterminated IPv6 address '{}'", authority))
            })?;
            let port = match after.strip_prefix(':') {
                Some(port) => parse_port(port)?,
                None if after.is_empty() => DEFAULT_PORT,
                None => {
                    return Err(DriverError::configuration(format!(
                        "Invalid server address '{}'",
                        authority
                    )))
                }
            };
            (host, port)
        } else {
            match authority.split(':').count() {
                1 => (authority, DEFAULT_PORT),
                2 => {
                    let (host, port) = authority.split_once(':').unwrap_or((authority, ""));
                    (host, parse_port(port)?)
                }
                // 괄호 없는 IPv6
                _ => (authority, DEFAULT_PORT),
            }
        };

        if host.is_empty() {
            return Err(DriverError::configuration(format!(
                "Missing host in '{}'",
                address
            )));
        }

        Ok(Self::new(host, port).with_tls(tls))
    }

    /// 채널 URI
    pub fn uri(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}", scheme, self)
    }
}

fn parse_port(port: &str) -> DriverResult<u16> {
    port.parse()
        .map_err(|_| DriverError::configuration(format!("Invalid port '{}'", port)))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}

// ============================================================================
// ConnectionConfig - 연결 설정
// ============================================================================

/// 연결 설정
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// 서버 엔드포인트
    pub endpoint: Endpoint,
    /// 인증 정보
    pub credentials: Option<Credentials>,
    /// 연결 타임아웃
    pub connection_timeout: Duration,
    /// RPC 요청 타임아웃
    pub request_timeout: Option<Duration>,
    /// User Agent
    pub user_agent: String,
    /// 프로토콜 버전
    pub protocol_version: u32,
    /// 핸드셰이크에 실을 클라이언트 정보
    pub client_info: HashMap<String, String>,
}

impl ConnectionConfig {
    /// 새 설정 생성
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            credentials: None,
            connection_timeout: Duration::from_secs(30),
            request_timeout: None,
            user_agent: format!("gwp-driver/{}", env!("CARGO_PKG_VERSION")),
            protocol_version: PROTOCOL_VERSION,
            client_info: HashMap::new(),
        }
    }

    /// 빌더 시작
    pub fn builder(address: &str) -> DriverResult<ConnectionConfigBuilder> {
        let endpoint = Endpoint::parse(address)?;
        Ok(ConnectionConfigBuilder {
            config: Self::new(endpoint),
        })
    }

    /// 핸드셰이크 요청
    fn handshake_request(&self) -> HandshakeRequest {
        let mut client_info = self.client_info.clone();
        client_info
            .entry("user_agent".to_string())
            .or_insert_with(|| self.user_agent.clone());

        HandshakeRequest {
            protocol_version: self.protocol_version,
            credentials: self.credentials.clone(),
            client_info,
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

/// 연결 설정 빌더
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// 인증 정보 설정
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// TLS 설정
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.config.endpoint.tls = tls;
        self
    }

    /// 연결 타임아웃 설정
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.config.connection_timeout = timeout;
        self
    }

    /// 요청 타임아웃 설정
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// User Agent 설정
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// 프로토콜 버전 설정
    pub fn with_protocol_version(mut self, version: u32) -> Self {
        self.config.protocol_version = version;
        self
    }

    /// 클라이언트 정보 추가
    pub fn with_client_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.client_info.insert(key.into(), value.into());
        self
    }

    /// 빌드
    pub fn build(self) -> ConnectionConfig {
        self.config
    }
}

// ============================================================================
// Connection - 연결
// ============================================================================

/// 서버와의 전송 채널
///
/// 복제본은 같은 채널을 공유합니다. `close` 후에는 모든 세션의 대기 중인
/// 작업이 취소됩니다.
#[derive(Clone)]
pub struct Connection {
    /// 설정
    config: Arc<ConnectionConfig>,
    /// 전송 계층
    transport: Arc<dyn GqlTransport>,
    /// 루트 취소 토큰
    root: CancellationToken,
    /// 열린 상태
    open: Arc<RwLock<bool>>,
}

impl Connection {
    /// 주소로 연결
    pub async fn connect(
        connector: &dyn Connector,
        address: &str,
        credentials: Option<Credentials>,
    ) -> DriverResult<Self> {
        let mut config = ConnectionConfig::new(Endpoint::parse(address)?);
        config.credentials = credentials;
        Self::connect_with_config(connector, config).await
    }

    /// 설정으로 연결
    pub async fn connect_with_config(
        connector: &dyn Connector,
        config: ConnectionConfig,
    ) -> DriverResult<Self> {
        let endpoint = config.endpoint.to_string();
        tracing::debug!(endpoint = %endpoint, tls = config.endpoint.tls, "connecting");

        let uri = config.endpoint.uri();
        let connecting = connector.connect(&uri, config.credentials.as_ref());
        let transport = match tokio::time::timeout(config.connection_timeout, connecting).await {
            Ok(Ok(transport)) => transport,
            Ok(Err(e)) => {
                return Err(DriverError::connection(endpoint, "failed to connect", Some(e)))
            }
            Err(_) => {
                return Err(DriverError::connection(
                    endpoint,
                    format!("timed out after {:?}", config.connection_timeout),
                    Some(TransportError::Timeout),
                ))
            }
        };

        Ok(Self::from_transport(transport, config))
    }

    /// 이미 연결된 전송 계층으로 생성
    pub fn from_transport(transport: Arc<dyn GqlTransport>, config: ConnectionConfig) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            root: CancellationToken::new(),
            open: Arc::new(RwLock::new(true)),
        }
    }

    /// 기본 설정으로 세션 생성
    pub async fn create_session(&self) -> DriverResult<Session> {
        self.session(SessionConfig::default()).await
    }

    /// 세션 생성
    pub async fn session(&self, config: SessionConfig) -> DriverResult<Session> {
        self.ensure_open()?;
        Session::open(
            Arc::clone(&self.transport),
            self.root.child_token(),
            self.config.request_timeout,
            self.config.handshake_request(),
            config,
        )
        .await
    }

    /// 연결 종료. 두 번째 호출부터는 아무것도 하지 않습니다.
    pub async fn close(&self) -> DriverResult<()> {
        {
            let mut open = self.open.write();
            if !*open {
                return Ok(());
            }
            *open = false;
        }

        self.root.cancel();
        tracing::debug!(endpoint = %self.config.endpoint, "connection closed");
        self.transport.shutdown().await?;
        Ok(())
    }

    /// 열린 상태 여부
    pub fn is_open(&self) -> bool {
        *self.open.read()
    }

    /// 연결 설정
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// 열린 상태 확인
    fn ensure_open(&self) -> DriverResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DriverError::connection(
                self.config.endpoint.to_string(),
                "Connection is closed",
                None,
            ))
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.config.endpoint)
            .field("open", &*self.open.read())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
