//! Wire-Format des Control-Channels (TCP/TLS)
//!
//! Frame-basiertes Protokoll: jeder Frame traegt einen festen 6-Byte-Header
//! gefolgt vom Schema-serialisierten Payload.
//!
//! ## Frame-Format
//!
//! ```text
//! +--------+--------+--------+--------+--------+--------+----...----+
//! | Typ-ID (u16 BE) | Payload-Laenge (u32 BE)           | Payload   |
//! +--------+--------+--------+--------+--------+--------+----...----+
//! ```
//!
//! Die Laenge gibt die Anzahl der Payload-Bytes an (ohne die 6 Header-Bytes).
//! Maximale Frame-Groesse ist konfigurierbar (Standard: 8 MB).

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::WireError;
use crate::registry::{name_for_id, ControlMessage, MumbleSchemas, SchemaRegistry};

// ---------------------------------------------------------------------------
// Konstanten
// ---------------------------------------------------------------------------

/// Standard-maximale Frame-Groesse (8 MB, Platz fuer Texturen und Blobs)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 8 * 1024 * 1024;

/// Groesse des Frame-Headers in Bytes (Typ-ID + Laengen-Feld)
pub const HEADER_SIZE: usize = 6;

// ---------------------------------------------------------------------------
// ControlCodec
// ---------------------------------------------------------------------------

/// tokio-util Codec fuer den frame-basierten Control-Channel
///
/// Implementiert `Encoder<ControlMessage>` und `Decoder` fuer nahtlose
/// Integration mit `tokio_util::codec::Framed`. Der Decoder ist zustandsbehaftet:
/// unvollstaendige Frames bleiben gepuffert bis weitere Chunks eintreffen.
///
/// Die Schema-Zuordnung ist ueber den Typ-Parameter austauschbar; die
/// Standardbelegung sind die prost-Schemata des Referenzprofils.
#[derive(Debug, Clone)]
pub struct ControlCodec<R: SchemaRegistry = MumbleSchemas> {
    /// Schema-Registry fuer Payload-Serialisierung
    schemas: R,
    /// Maximale erlaubte Payload-Groesse in Bytes
    max_frame_size: usize,
}

impl ControlCodec<MumbleSchemas> {
    /// Erstellt einen Codec mit den Standard-Schemata und -Limits
    pub fn new() -> Self {
        Self::with_schemas(MumbleSchemas)
    }
}

impl Default for ControlCodec<MumbleSchemas> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SchemaRegistry> ControlCodec<R> {
    /// Erstellt einen Codec mit einer eigenen Schema-Registry
    pub fn with_schemas(schemas: R) -> Self {
        Self {
            schemas,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Setzt die maximale Frame-Groesse
    pub fn with_max_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    /// Gibt die konfigurierte maximale Frame-Groesse zurueck
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

// ---------------------------------------------------------------------------
// Decoder-Implementierung
// ---------------------------------------------------------------------------

impl<R: SchemaRegistry> Decoder for ControlCodec<R> {
    type Item = ControlMessage;
    type Error = WireError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Warte auf den vollstaendigen Header
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }

        // Typ-ID und Laenge lesen ohne den Buffer zu veraendern
        let typ = u16::from_be_bytes([src[0], src[1]]);
        let laenge = u32::from_be_bytes([src[2], src[3], src[4], src[5]]) as usize;

        if laenge > self.max_frame_size {
            return Err(WireError::FrameTooBig {
                laenge,
                maximum: self.max_frame_size,
            });
        }

        // Pruefen ob der vollstaendige Frame bereits im Buffer ist
        let gesamt = HEADER_SIZE + laenge;
        if src.len() < gesamt {
            // Speicher vorbelegen um Reallocations zu vermeiden
            src.reserve(gesamt - src.len());
            return Ok(None);
        }

        // Frame verbrauchen, bevor der Typ geprueft wird: so bleibt der
        // Decoder nach einer unbekannten ID auf dem naechsten Frame nutzbar
        src.advance(HEADER_SIZE);
        let payload = src.split_to(laenge);

        if name_for_id(typ).is_none() {
            return Err(WireError::UnknownMessageId(typ));
        }

        let msg = self.schemas.decode_payload(typ, &payload)?;
        Ok(Some(msg))
    }
}

// ---------------------------------------------------------------------------
// Encoder-Implementierung
// ---------------------------------------------------------------------------

impl<R: SchemaRegistry> Encoder<ControlMessage> for ControlCodec<R> {
    type Error = WireError;

    fn encode(&mut self, item: ControlMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = self.schemas.encode_payload(&item)?;

        if payload.len() > self.max_frame_size {
            return Err(WireError::FrameTooBig {
                laenge: payload.len(),
                maximum: self.max_frame_size,
            });
        }

        dst.reserve(HEADER_SIZE + payload.len());
        dst.put_u16(item.type_id());
        dst.put_u32(payload.len() as u32);
        dst.put_slice(&payload);

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
