use crate::compress::compress;
use crate::error::CompressionError;
use crate::registry::NameRegistry;
use crate::{Result, MAX_SCAN_LEN, MAX_TCP_MESSAGE_LEN, MAX_UDP_MESSAGE_LEN};
use bytes::{Bytes, BytesMut};
use std::default::Default;
use tracing::{instrument, trace};

#[derive(Debug, Clone)]
pub struct WriterConfig {
    max_message_len: usize,
    registry_capacity: usize,
    compression: bool,
}

impl WriterConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// A config for messages carried over TCP, which may use the full
    /// 16 bit length.
    pub fn tcp() -> Self {
        Self::new().max_message_len(MAX_TCP_MESSAGE_LEN)
    }

    pub fn max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    pub fn registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    pub fn compression(mut self, compression: bool) -> Self {
        self.compression = compression;
        self
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_message_len: MAX_UDP_MESSAGE_LEN,
            registry_capacity: 64,
            compression: true,
        }
    }
}

/// Assembles the names of one message, compressing each against the names
/// written before it.
///
/// Octets that are not names (the header, types, classes, ...) are appended
/// with [`NameWriter::append_slice`] so that name offsets line up with the
/// final message.
#[derive(Debug)]
pub struct NameWriter {
    buf: BytesMut,
    registry: NameRegistry,
    config: WriterConfig,
}

impl NameWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.max_message_len.min(MAX_UDP_MESSAGE_LEN)),
            registry: NameRegistry::new(config.registry_capacity),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Appends raw octets.
    pub fn append_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let len = self.buf.len() + bytes.len();
        if len > self.config.max_message_len {
            return Err(CompressionError::MessageTooLong {
                len,
                max: self.config.max_message_len,
            });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends a domain name, returning the number of bytes it took. On
    /// error the message is left as it was.
    #[instrument(skip(self, name))]
    pub fn append_name<N: AsRef<[u8]>>(&mut self, name: N) -> Result<usize> {
        let dst = self.buf.len();
        // No name encodes to more than this.
        let end = (dst + MAX_SCAN_LEN + 2).min(self.config.max_message_len);
        self.buf.resize(dst.max(end), 0);

        let registry = if self.config.compression {
            Some(&mut self.registry)
        } else {
            None
        };

        match compress(name.as_ref(), &mut self.buf, dst, registry) {
            Ok(written) => {
                self.buf.truncate(dst + written);
                trace!("Name at {} took {} bytes", dst, written);
                Ok(written)
            }
            Err(e) => {
                self.buf.truncate(dst);
                Err(e)
            }
        }
    }

    /// Empties the message and forgets all names, keeping the config.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.registry.clear();
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for NameWriter {
    fn default() -> Self {
        NameWriter::new(WriterConfig::default())
    }
}
