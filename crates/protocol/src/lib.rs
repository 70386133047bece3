//! murmel-protocol – Wire-Codecs fuer das Mumble-Protokoll
//!
//! Dieses Crate uebersetzt zwischen rohen Byte-Stroemen und typisierten
//! Paketen. Es enthaelt keinerlei I/O; die Codecs werden vom Transport des
//! Aufrufers getrieben.
//!
//! ## Module
//! - [`wire`] – Frame-Codec des Control-Channels (Typ-ID + Laenge + Payload)
//! - [`voice`] – Paket-Codec fuer Audio- und Ping-Datagramme
//! - [`varint`] – Mumble-Varint (vorzeichenbehaftet, max. 32 Bit)
//! - [`registry`] – Nachrichten-Registry und Schema-Zuordnung
//! - [`messages`] – prost-Strukturen der 26 Control-Nachrichten
//! - [`error`] – Fehlertypen

pub mod error;
pub mod messages;
pub mod registry;
pub mod varint;
pub mod voice;
pub mod wire;

// Re-Exporte fuer bequemen Zugriff
pub use error::{VarintError, VoiceError, WireError};
pub use registry::{ControlMessage, MumbleSchemas, SchemaRegistry};
pub use voice::{AudioCodec, Direction, PingPacket, Target, VoiceCodec, VoiceDatagram, VoicePacket};
pub use wire::ControlCodec;
