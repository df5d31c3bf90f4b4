#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod common;
pub mod config;
pub mod role;
pub mod status;
pub mod validator;

#[cfg(feature = "std")]
pub mod broadcast;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use role::*;
pub use status::*;
pub use validator::*;

#[cfg(feature = "std")]
pub use broadcast::Broadcaster;
#[cfg(feature = "std")]
pub use client::GameClient;
#[cfg(feature = "std")]
pub use logging::{format_record, init_logging, init_logging_with, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{ClientMessage, DecodeError, ServerMessage, StateSnapshot};
#[cfg(feature = "std")]
pub use server::Connection;
#[cfg(feature = "std")]
pub use session::{Dispatch, Session, SessionController, SessionHandle};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, ws::WsTransport, Transport};
