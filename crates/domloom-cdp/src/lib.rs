//! Chrome DevTools Protocol (CDP) transport for domloom.
//!
//! Implements [`DomSession`](domloom_protocols::DomSession) and
//! [`FrameResolver`](domloom_protocols::FrameResolver) over a single browser
//! WebSocket, using flattened target sessions for every frame.
//!
//! Start Chrome with remote debugging first:
//!
//! ```bash
//! chrome --remote-debugging-port=9222
//! ```
//!
//! ```rust,ignore
//! let client = Arc::new(CdpClient::connect("http://localhost:9222").await?);
//! let (resolver, main) = CdpFrameResolver::attach_page(client, Some("example.com")).await?;
//! ```

mod client;
mod error;
mod protocol;
mod resolver;
mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{CdpClient, DEFAULT_CALL_TIMEOUT};
pub use error::CdpError;
pub use protocol::{BrowserVersion, CdpErrorResponse, CdpRequest, CdpResponse, TargetInfo};
pub use resolver::{CdpFrameResolver, urls_match};
pub use session::FrameSession;
