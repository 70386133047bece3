//! murmel-core – Gemeinsame Typen und Protokoll-Konstanten
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von den
//! Codec- und Krypto-Crates gemeinsam genutzt werden.

pub mod stats;
pub mod version;

// Re-Exporte fuer bequemen Zugriff
pub use stats::CryptStats;
pub use version::{version_packed, version_unpacked, PROTOCOL_VERSION};
