//! # mapwire
//!
//! A binary command-encoding layer for server-resident map operations:
//! - One builder per map operation, from single-key writes to rank-range reads
//! - Opcode-tagged payloads with a marker-based value encoding
//! - Write-mode policies resolved to opcodes at encode time
//! - Symmetric unpacker for decoding payloads in tests and tooling
//!
//! ## Encoding Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Operation Builders                       │
//! │         (put, increment, remove_by_key_range, ...)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Policy Resolution                         │
//! │        (MapWriteMode + MapOrder -> opcode + arity)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Packer                                │
//! │          (opcode + count-prefixed argument list)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │ MapOperation  │
//!               │ (bin, bytes)  │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod value;

pub mod maps;
pub mod operation;
pub mod packer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MapwireError, Result};
pub use maps::{MapOrder, MapPolicy, MapReturnType, MapWriteMode};
pub use operation::{MapOperation, OperationType};
pub use value::Value;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mapwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
