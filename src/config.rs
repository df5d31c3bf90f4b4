/// Number of cells on the 3x3 board.
pub const BOARD_CELLS: usize = 9;

/// Every line that decides a game when one mark occupies all of it.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Default listening port, matching the original LAN deployment.
pub const DEFAULT_PORT: u16 = 3000;

/// Route browsers open their WebSocket on.
pub const WS_PATH: &str = "/ws";

/// Largest frame accepted from or sent to a peer (64 KiB).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 64 * 1024;

/// Default upper bound on a single outbound frame write, in milliseconds.
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 5_000;

/// Who may wipe the board with an explicit reset intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum ResetPolicy {
    /// Any live connection, spectators included.
    #[default]
    Anyone,
    /// Only the holders of the two player seats.
    #[cfg_attr(feature = "std", value(name = "players"))]
    PlayersOnly,
}

/// Wire carrying the JSON messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum TransportKind {
    /// One text message per WebSocket frame on [`WS_PATH`].
    #[default]
    #[cfg_attr(feature = "std", value(name = "ws"))]
    WebSocket,
    /// Raw TCP with a 4-byte big-endian length prefix per message.
    Tcp,
}

/// Runtime settings for the session server.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: std::string::String,
    pub transport: TransportKind,
    pub reset_policy: ResetPolicy,
    pub max_frame_size: u32,
    pub send_timeout: core::time::Duration,
}

#[cfg(feature = "std")]
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: std::format!("0.0.0.0:{}", DEFAULT_PORT),
            transport: TransportKind::default(),
            reset_policy: ResetPolicy::default(),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            send_timeout: core::time::Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
        }
    }
}

#[cfg(feature = "std")]
impl ServerConfig {
    /// Build a config bound to `host:port` with every other setting defaulted.
    pub fn with_addr(host: &str, port: u16) -> Self {
        Self {
            bind: std::format!("{}:{}", host, port),
            ..Self::default()
        }
    }

    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}
