//! Assembling small EVM programs.

use alloy_primitives::Bytes;
use revm::bytecode::opcode::{CODECOPY, DUP1, PUSH0, RETURN};

/// A builder for assembling EVM bytecode.
#[derive(Debug, Default)]
pub struct BytecodeBuilder {
    code: Vec<u8>,
}

impl BytecodeBuilder {
    /// Build the bytecode.
    pub fn build(self) -> Bytes {
        self.code.into()
    }

    /// Get the length of the bytecode.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if the bytecode is empty.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Append a single opcode or byte.
    pub fn append(mut self, opcode: u8) -> Self {
        self.code.push(opcode);
        self
    }

    /// Append a series of opcodes or bytes.
    pub fn append_many(mut self, items: impl IntoIterator<Item = u8>) -> Self {
        self.code.extend(items);
        self
    }

    /// Append a PUSH opcode and the bytes to push.
    ///
    /// # Panics
    ///
    /// If more than 32 bytes are pushed.
    pub fn push_bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        let bytes: &[u8] = bytes.as_ref();
        assert!(bytes.len() <= 32, "PUSH takes at most 32 bytes");
        self.code.push(PUSH0 + bytes.len() as u8);
        self.code.extend_from_slice(bytes);
        self
    }

    /// Append a PUSH1 opcode and the byte to push.
    pub fn push_u8(self, value: u8) -> Self {
        self.push_bytes([value])
    }

    /// Append a PUSH2 opcode and the big-endian value to push.
    pub fn push_u16(self, value: u16) -> Self {
        self.push_bytes(value.to_be_bytes())
    }
}

/// Length of the prologue emitted by [`creation_code`].
const CREATION_PROLOGUE_LEN: u8 = 12;

/// Wraps `runtime` in init code that installs it verbatim.
///
/// # Panics
///
/// If `runtime` is longer than `u16::MAX` bytes.
pub fn creation_code(runtime: &[u8]) -> Bytes {
    assert!(runtime.len() <= u16::MAX as usize, "runtime code exceeds 64 KiB");
    let len = runtime.len() as u16;
    let prologue = BytecodeBuilder::default()
        .push_u16(len)
        .append(DUP1)
        .push_u8(CREATION_PROLOGUE_LEN)
        .push_u8(0)
        .append(CODECOPY)
        .push_u8(0)
        .append(RETURN);
    debug_assert_eq!(prologue.len(), CREATION_PROLOGUE_LEN as usize);
    prologue.append_many(runtime.iter().copied()).build()
}
