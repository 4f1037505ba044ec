//! Host channels: an in-memory recorder and a framed byte-stream transport.
//!
//! The stream transport uses native-messaging framing: a `u32` little-endian
//! length prefix followed by that many bytes of UTF-8 JSON.

use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::mpsc::UnboundedSender;

use verify_dialog_core::{ChannelConnector, ChannelPort, OutboundMessage, PortError};

#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    name: String,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl MemoryChannel {
    pub fn sent(&self) -> Result<Vec<OutboundMessage>, PortError> {
        let g = self
            .sent
            .lock()
            .map_err(|e| PortError::Transport(format!("channel lock poisoned: {e}")))?;
        Ok(g.clone())
    }
}

impl ChannelPort for MemoryChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn post(&self, message: &OutboundMessage) -> Result<(), PortError> {
        let mut g = self
            .sent
            .lock()
            .map_err(|e| PortError::Transport(format!("channel lock poisoned: {e}")))?;
        g.push(message.clone());
        Ok(())
    }
}

/// Hands out channels that share one outbound log, so tests can inspect it.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl MemoryConnector {
    pub fn sent(&self) -> Result<Vec<OutboundMessage>, PortError> {
        let g = self
            .sent
            .lock()
            .map_err(|e| PortError::Transport(format!("channel lock poisoned: {e}")))?;
        Ok(g.clone())
    }
}

impl ChannelConnector for MemoryConnector {
    type Channel = MemoryChannel;

    fn connect(&self, name: &str) -> Result<MemoryChannel, PortError> {
        Ok(MemoryChannel {
            name: name.to_owned(),
            sent: Arc::clone(&self.sent),
        })
    }
}

pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), PortError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| PortError::Validation(format!("frame too large: {}", payload.len())))?;
    write_all_flushed(writer, &len.to_le_bytes(), payload)
        .map_err(|e| PortError::Transport(format!("frame write failed: {e}")))
}

fn write_all_flushed<W: Write>(writer: &mut W, header: &[u8], payload: &[u8]) -> io::Result<()> {
    writer.write_all(header)?;
    writer.write_all(payload)?;
    writer.flush()
}

/// Reads one frame. `Ok(None)` on a clean end of stream.
pub fn read_frame<R: Read>(reader: &mut R, max_bytes: usize) -> Result<Option<String>, PortError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(PortError::Transport(format!("frame header read failed: {e}"))),
    }
    let len = u32::from_le_bytes(len_buf) as usize;
    if len > max_bytes {
        return Err(PortError::Validation(format!(
            "frame of {len} bytes exceeds limit of {max_bytes}"
        )));
    }
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(|e| PortError::Transport(format!("frame body read failed: {e}")))?;
    String::from_utf8(payload)
        .map(Some)
        .map_err(|e| PortError::Validation(format!("frame is not utf-8: {e}")))
}

#[derive(Debug)]
pub struct FramedChannel<W: Write> {
    name: String,
    writer: Arc<Mutex<W>>,
}

impl<W: Write> Clone for FramedChannel<W> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<W: Write> FramedChannel<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn into_inner(self) -> Result<W, PortError> {
        Arc::try_unwrap(self.writer)
            .map_err(|_| PortError::Transport("framed channel still shared".to_owned()))?
            .into_inner()
            .map_err(|e| PortError::Transport(format!("channel lock poisoned: {e}")))
    }
}

impl<W: Write> ChannelPort for FramedChannel<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn post(&self, message: &OutboundMessage) -> Result<(), PortError> {
        let json = message
            .to_json()
            .map_err(|e| PortError::Validation(e.to_string()))?;
        let mut g = self
            .writer
            .lock()
            .map_err(|e| PortError::Transport(format!("channel lock poisoned: {e}")))?;
        write_frame(&mut *g, json.as_bytes())
    }
}

/// Connects to a host that spawned this process and speaks over stdio.
#[derive(Debug, Clone, Default)]
pub struct StdioConnector;

impl ChannelConnector for StdioConnector {
    type Channel = FramedChannel<io::Stdout>;

    fn connect(&self, name: &str) -> Result<Self::Channel, PortError> {
        Ok(FramedChannel::new(name, io::stdout()))
    }
}

/// Forwards inbound frames to `sink` until end of stream, a framing error,
/// or the receiver going away. Frames arrive in the order the host sent them.
pub fn spawn_frame_reader<R>(
    mut reader: R,
    max_bytes: usize,
    sink: UnboundedSender<String>,
) -> io::Result<JoinHandle<Result<(), PortError>>>
where
    R: Read + Send + 'static,
{
    std::thread::Builder::new()
        .name("verify-dialog-inbound".to_owned())
        .spawn(move || loop {
            match read_frame(&mut reader, max_bytes) {
                Ok(Some(frame)) => {
                    if sink.send(frame).is_err() {
                        tracing::debug!("inbound receiver dropped; stopping reader");
                        return Ok(());
                    }
                }
                Ok(None) => {
                    tracing::info!("host closed the channel");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!("inbound channel failed: {e}");
                    return Err(e);
                }
            }
        })
}
