//! # murmel-crypto
//!
//! OCB2-AES128 Verschluesselung des Mumble-Voice-Channels.
//!
//! Jedes UDP-Datagramm wird unter einer 128-Bit-Nonce authentifiziert
//! verschluesselt; auf dem Draht erscheint nur das unterste Nonce-Byte plus
//! ein 3-Byte-Tag-Praefix. [`CryptState`] verwaltet beide Nonce-Zaehler,
//! erkennt Replays ueber eine 256-Slot-Historie und fuehrt Buch ueber
//! verspaetete und verlorene Pakete.
//!
//! ## Module
//! - [`state`] – Krypto-Zustand mit Nonce-Synchronisation und Replay-Schutz
//! - [`ocb2`] – OCB2-Blockoperationen ueber AES-128
//! - [`error`] – Fehlertypen

pub mod error;
pub mod ocb2;
pub mod state;

// Bequeme Re-Exports
pub use error::{CryptError, CryptResult};
pub use ocb2::BLOCK_SIZE;
pub use state::{CryptState, HEADER_SIZE};
