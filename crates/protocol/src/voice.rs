//! Voice-Protokoll (UDP)
//!
//! Definiert die binaere Paketstruktur fuer Audio- und Ping-Datagramme.
//! Jedes Datagramm ist selbst-begrenzend (ein Paket pro Transport-Einheit).
//!
//! ## Paketformat
//!
//! ```text
//! Offset  Len      Beschreibung
//! ------  ---      -----------
//!  0       1       Header: CodecId (3 hohe Bits) | Mode (5 niedrige Bits)
//!  1+      Varint  Session-ID der Quelle (nur Server -> Client)
//!          Varint  Sequenznummer des ersten Frames
//!          N       Codec-abhaengige Frame-Nutzdaten
//!          0|12    Optionale Position (3 x f32 big-endian)
//! ```
//!
//! Ping-Pakete tragen Codec-ID 1 und nach dem Header nur einen
//! Varint-Zeitstempel.
//!
//! Die Dekodierung ist tolerant: fehlerhafte Pakete werden still verworfen
//! und nur als `tracing::debug!`-Diagnose gemeldet, damit ein korruptes
//! Datagramm den Audio-Strom nicht abreisst.

use crate::error::VoiceError;
use crate::varint;

/// Maximale Frame-Laenge fuer CELT/Speex (7-Bit-Laengenfeld)
pub const MAX_LEGACY_FRAME_SIZE: usize = 0x7F;

/// Maximale Frame-Laenge fuer Opus (13-Bit-Laengenfeld)
pub const MAX_OPUS_FRAME_SIZE: usize = 0x1FFF;

/// Ende-Bit im Opus-Laengenfeld
const OPUS_END_BIT: i64 = 0x2000;

/// Codec-ID fuer Ping-Pakete im Header-Byte
const PING_CODEC_ID: u8 = 1;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Audio-Codec eines Voice-Pakets
///
/// Die Diskriminanten sind die Codec-IDs im Header-Byte; ID 1 ist kein
/// Codec sondern kennzeichnet Ping-Pakete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AudioCodec {
    /// CELT 0.7.x Bitstream
    CeltAlpha = 0,
    /// Speex – Fallback fuer alte Clients
    Speex = 2,
    /// CELT 0.11.x Bitstream
    CeltBeta = 3,
    /// Opus – Standard-Codec
    Opus = 4,
}

impl AudioCodec {
    /// Konvertiert eine Header-Codec-ID in einen `AudioCodec`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::CeltAlpha),
            2 => Some(Self::Speex),
            3 => Some(Self::CeltBeta),
            4 => Some(Self::Opus),
            _ => None,
        }
    }

    /// Codec-ID im Header-Byte
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Einordnung eines Voice-Pakets anhand der Mode-Bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Normale Sprache in den aktuellen Kanal
    Normal,
    /// Kanal-Whisper (Shout)
    Shout,
    /// Direkt-Whisper an Benutzer
    Whisper,
    /// Server-Loopback und alle uebrigen Whisper-Ziele
    Loopback,
}

/// Richtung eines Codec-Endpunkts
///
/// Pakete an den Server tragen keine Quell-Session; Pakete an den Client
/// beginnen nach dem Header mit der Session-ID des Sprechers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Datagramme fuer den Server (Client -> Server)
    ToServer,
    /// Datagramme fuer den Client (Server -> Client)
    ToClient,
}

// ---------------------------------------------------------------------------
// Pakettypen
// ---------------------------------------------------------------------------

/// Ein Voice-Paket mit Audio-Frames
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePacket {
    /// Whisper-Ziel bzw. Loopback (0 = normal, 31 = Loopback, 1..30 Whisper)
    pub mode: u8,
    /// Verwendeter Audio-Codec
    pub codec: AudioCodec,
    /// Session-ID des Sprechers; nur auf Server -> Client Paketen vorhanden
    pub source: Option<u32>,
    /// Sequenznummer des ersten Frames
    pub seq_num: u32,
    /// Letztes Paket einer Transmission
    pub end: bool,
    /// Rohe Codec-Frames (Opus: hoechstens einer)
    pub frames: Vec<Vec<u8>>,
    /// Optionale Sprecherposition (x, y, z)
    pub position: Option<[f32; 3]>,
}

impl VoicePacket {
    /// Einordnung des Pakets anhand der unteren 5 Mode-Bits
    pub fn target(&self) -> Target {
        match self.mode & 0x1F {
            0 => Target::Normal,
            1 => Target::Shout,
            2 => Target::Whisper,
            _ => Target::Loopback,
        }
    }
}

/// Ein UDP-Ping-Paket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingPacket {
    /// Vom Sender gewaehlter Zeitstempel, wird unveraendert zurueckgesendet
    pub timestamp: u64,
}

/// Ein dekodiertes UDP-Datagramm: Audio oder Ping
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceDatagram {
    Audio(VoicePacket),
    Ping(PingPacket),
}

// ---------------------------------------------------------------------------
// VoiceCodec
// ---------------------------------------------------------------------------

/// Paket-Codec fuer den Voice-Channel
///
/// Direkte Byte-Serialisierung, kein serde (Performance-kritisch). Der Codec
/// haelt keinen Zustand zwischen Paketen; die Richtung bestimmt nur ob die
/// Quell-Session auf dem Draht erscheint.
#[derive(Debug, Clone, Copy)]
pub struct VoiceCodec {
    direction: Direction,
}

impl VoiceCodec {
    /// Erstellt einen Codec fuer die gegebene Richtung
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Richtung des Codecs
    pub fn direction(&self) -> Direction {
        self.direction
    }

    // -- Encode ------------------------------------------------------------

    /// Serialisiert ein Datagramm in einen frischen Byte-Vec
    ///
    /// # Fehler
    /// - `MissingSource` wenn Richtung `ToClient` ohne Quell-Session
    /// - `OpusMultiframe`, `FrameTooLarge`, `NoFramesNoEnd` bei ungueltigen
    ///   Frame-Kombinationen
    /// - `Varint` wenn ein Feld die 32-Bit-Kodierung sprengt
    pub fn encode(&self, datagram: &VoiceDatagram) -> Result<Vec<u8>, VoiceError> {
        match datagram {
            VoiceDatagram::Ping(ping) => Self::encode_ping(ping),
            VoiceDatagram::Audio(paket) => self.encode_audio(paket),
        }
    }

    fn encode_ping(ping: &PingPacket) -> Result<Vec<u8>, VoiceError> {
        let mut buf = Vec::with_capacity(6);
        buf.push(PING_CODEC_ID << 5);
        varint::encode_into(&mut buf, ping.timestamp as i64)?;
        Ok(buf)
    }

    fn encode_audio(&self, paket: &VoicePacket) -> Result<Vec<u8>, VoiceError> {
        let nutzlast: usize = paket.frames.iter().map(|f| f.len() + 2).sum();
        let mut buf = Vec::with_capacity(16 + nutzlast);
        buf.push(paket.codec.id() << 5 | (paket.mode & 0x1F));

        if self.direction == Direction::ToClient {
            let source = paket.source.ok_or(VoiceError::MissingSource)?;
            varint::encode_into(&mut buf, source as i64)?;
        }
        varint::encode_into(&mut buf, paket.seq_num as i64)?;

        match paket.codec {
            AudioCodec::Opus => Self::encode_opus_frames(&mut buf, paket)?,
            _ => Self::encode_legacy_frames(&mut buf, paket)?,
        }

        if let Some([x, y, z]) = paket.position {
            buf.extend_from_slice(&x.to_be_bytes());
            buf.extend_from_slice(&y.to_be_bytes());
            buf.extend_from_slice(&z.to_be_bytes());
        }
        Ok(buf)
    }

    /// Opus: hoechstens ein Frame, Laenge und Ende-Bit in einem Varint
    fn encode_opus_frames(buf: &mut Vec<u8>, paket: &VoicePacket) -> Result<(), VoiceError> {
        let end_bit = if paket.end { OPUS_END_BIT } else { 0 };
        match paket.frames.as_slice() {
            [] => varint::encode_into(buf, end_bit)?,
            [frame] => {
                if frame.len() > MAX_OPUS_FRAME_SIZE {
                    return Err(VoiceError::FrameTooLarge {
                        laenge: frame.len(),
                        maximum: MAX_OPUS_FRAME_SIZE,
                    });
                }
                varint::encode_into(buf, frame.len() as i64 | end_bit)?;
                buf.extend_from_slice(frame);
            }
            mehr => return Err(VoiceError::OpusMultiframe(mehr.len())),
        }
        Ok(())
    }

    /// CELT/Speex: 7-Bit-Laengenfeld mit Fortsetzungs-Bit pro Frame
    ///
    /// Das Ende einer Transmission traegt einen Null-Header als Terminator;
    /// das Fortsetzungs-Bit des letzten echten Frames bleibt dann gesetzt.
    fn encode_legacy_frames(buf: &mut Vec<u8>, paket: &VoicePacket) -> Result<(), VoiceError> {
        if paket.frames.is_empty() && !paket.end {
            return Err(VoiceError::NoFramesNoEnd);
        }

        let mut letzter_header = None;
        for frame in &paket.frames {
            if frame.len() > MAX_LEGACY_FRAME_SIZE {
                return Err(VoiceError::FrameTooLarge {
                    laenge: frame.len(),
                    maximum: MAX_LEGACY_FRAME_SIZE,
                });
            }
            letzter_header = Some(buf.len());
            buf.push(frame.len() as u8 | 0x80);
            buf.extend_from_slice(frame);
        }

        if paket.end {
            buf.push(0x00);
        } else if let Some(pos) = letzter_header {
            buf[pos] &= 0x7F;
        }
        Ok(())
    }

    // -- Decode ------------------------------------------------------------

    /// Dekodiert ein Datagramm; fehlerhafte Pakete werden still verworfen
    ///
    /// Auf jedem verworfenen Paket wird eine Debug-Diagnose mit Grund und
    /// Paketlaenge emittiert. Der Codec bleibt danach uneingeschraenkt
    /// nutzbar.
    pub fn decode(&self, chunk: &[u8]) -> Option<VoiceDatagram> {
        match self.try_decode(chunk) {
            Ok(datagram) => Some(datagram),
            Err(grund) => {
                tracing::debug!(
                    grund = %grund,
                    laenge = chunk.len(),
                    paket = ?chunk,
                    "Voice-Paket verworfen"
                );
                None
            }
        }
    }

    /// Strikte Dekodierung mit Fehlergrund (fuer Diagnose und Tests)
    pub fn try_decode(&self, chunk: &[u8]) -> Result<VoiceDatagram, VoiceError> {
        if chunk.is_empty() {
            return Err(VoiceError::Empty);
        }
        let codec_id = chunk[0] >> 5;
        let mode = chunk[0] & 0x1F;
        let mut rest = &chunk[1..];

        if codec_id == PING_CODEC_ID {
            let timestamp = feld_u64(&mut rest, "timestamp")?;
            // Nachlaufende Bytes werden ignoriert
            return Ok(VoiceDatagram::Ping(PingPacket { timestamp }));
        }

        let codec = AudioCodec::from_id(codec_id).ok_or(VoiceError::UnknownCodec(codec_id))?;

        let source = if self.direction == Direction::ToClient {
            Some(feld_u32(&mut rest, "source")?)
        } else {
            None
        };
        let seq_num = feld_u32(&mut rest, "seq_num")?;

        let (frames, end) = match codec {
            AudioCodec::Opus => Self::decode_opus_frames(&mut rest)?,
            _ => Self::decode_legacy_frames(&mut rest)?,
        };

        // Strikte Ungleichung erhaelt die Wire-Kompatibilitaet: genau 12
        // Rest-Bytes zaehlen nicht als Position
        let position = if rest.len() > 12 {
            let mut koord = [0f32; 3];
            for (i, wert) in koord.iter_mut().enumerate() {
                let start = i * 4;
                *wert = f32::from_be_bytes([
                    rest[start],
                    rest[start + 1],
                    rest[start + 2],
                    rest[start + 3],
                ]);
            }
            Some(koord)
        } else {
            None
        };

        Ok(VoiceDatagram::Audio(VoicePacket {
            mode,
            codec,
            source,
            seq_num,
            end,
            frames,
            position,
        }))
    }

    fn decode_opus_frames(rest: &mut &[u8]) -> Result<(Vec<Vec<u8>>, bool), VoiceError> {
        let size_and_end = feld_u32(rest, "opus_laenge")? as i64;
        let end = size_and_end & OPUS_END_BIT != 0;
        let size = (size_and_end & (OPUS_END_BIT - 1)) as usize;

        if rest.len() < size {
            return Err(VoiceError::Truncated {
                benoetigt: size,
                vorhanden: rest.len(),
            });
        }
        let frames = if size == 0 {
            Vec::new()
        } else {
            let frame = rest[..size].to_vec();
            *rest = &rest[size..];
            vec![frame]
        };
        Ok((frames, end))
    }

    fn decode_legacy_frames(rest: &mut &[u8]) -> Result<(Vec<Vec<u8>>, bool), VoiceError> {
        let mut frames = Vec::new();
        loop {
            let header = *rest.first().ok_or(VoiceError::Truncated {
                benoetigt: 1,
                vorhanden: 0,
            })?;
            *rest = &rest[1..];

            if header == 0 {
                return Ok((frames, true));
            }

            let laenge = (header & 0x7F) as usize;
            if rest.len() < laenge {
                return Err(VoiceError::Truncated {
                    benoetigt: laenge,
                    vorhanden: rest.len(),
                });
            }
            frames.push(rest[..laenge].to_vec());
            *rest = &rest[laenge..];

            if header & 0x80 == 0 {
                return Ok((frames, false));
            }
        }
    }
}

/// Liest ein Varint-Feld und prueft den u32-Wertebereich
fn feld_u32(rest: &mut &[u8], feld: &'static str) -> Result<u32, VoiceError> {
    let (wert, verbraucht) = varint::decode(rest)?;
    *rest = &rest[verbraucht..];
    u32::try_from(wert).map_err(|_| VoiceError::ValueOutOfRange(feld))
}

/// Wie [`feld_u32`], aber mit u64-Ergebnis (Ping-Zeitstempel)
fn feld_u64(rest: &mut &[u8], feld: &'static str) -> Result<u64, VoiceError> {
    let (wert, verbraucht) = varint::decode(rest)?;
    *rest = &rest[verbraucht..];
    u64::try_from(wert).map_err(|_| VoiceError::ValueOutOfRange(feld))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn opus_paket(mode: u8, seq_num: u32, end: bool, frames: Vec<Vec<u8>>) -> VoicePacket {
        VoicePacket {
            mode,
            codec: AudioCodec::Opus,
            source: None,
            seq_num,
            end,
            frames,
            position: None,
        }
    }

    #[test]
    fn opus_zum_server_feste_bytes() {
        // Header 4<<5|0 = 0x80, varint(5), varint(2), Frame-Bytes
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = opus_paket(0, 5, false, vec![vec![0xAA, 0xBB]]);
        let bytes = codec.encode(&VoiceDatagram::Audio(paket)).unwrap();
        assert_eq!(bytes, vec![0x80, 0x05, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn opus_zum_client_mit_ende_und_position() {
        let codec = VoiceCodec::new(Direction::ToClient);
        let paket = VoicePacket {
            mode: 1,
            codec: AudioCodec::Opus,
            source: Some(7),
            seq_num: 300,
            end: true,
            frames: vec![vec![0xCC]],
            position: Some([1.0, 2.0, -1.5]),
        };
        let bytes = codec.encode(&VoiceDatagram::Audio(paket)).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x81, 0x07, 0x81, 0x2C, 0xA0, 0x01, 0xCC, 0x3F, 0x80, 0x00, 0x00, 0x40, 0x00,
                0x00, 0x00, 0xBF, 0xC0, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn celt_mehrere_frames_mit_ende() {
        // Terminator 0x00 beendet die Transmission; das Fortsetzungs-Bit des
        // letzten echten Frames bleibt gesetzt, sonst waere der Terminator
        // beim Dekodieren unerreichbar
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = VoicePacket {
            mode: 0,
            codec: AudioCodec::CeltAlpha,
            source: None,
            seq_num: 0,
            end: true,
            frames: vec![vec![0x11], vec![0x22]],
            position: None,
        };
        let bytes = codec.encode(&VoiceDatagram::Audio(paket)).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x81, 0x11, 0x81, 0x22, 0x00]);
    }

    #[test]
    fn celt_letzter_frame_ohne_fortsetzung() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = VoicePacket {
            mode: 0,
            codec: AudioCodec::CeltBeta,
            source: None,
            seq_num: 9,
            end: false,
            frames: vec![vec![0x11, 0x12], vec![0x22]],
            position: None,
        };
        let bytes = codec.encode(&VoiceDatagram::Audio(paket)).unwrap();
        // 3<<5 = 0x60; Frame 1: 0x82 (len 2, Fortsetzung); Frame 2: 0x01 (len 1, Ende)
        assert_eq!(bytes, vec![0x60, 0x09, 0x82, 0x11, 0x12, 0x01, 0x22]);
    }

    #[test]
    fn ping_feste_bytes() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let bytes = codec
            .encode(&VoiceDatagram::Ping(PingPacket { timestamp: 1_234_567 }))
            .unwrap();
        assert_eq!(bytes, vec![0x20, 0xD2, 0xD6, 0x87]);
    }

    #[test]
    fn ping_round_trip_mit_nachlaufenden_bytes() {
        let codec = VoiceCodec::new(Direction::ToClient);
        let mut bytes = codec
            .encode(&VoiceDatagram::Ping(PingPacket { timestamp: 42 }))
            .unwrap();
        bytes.extend_from_slice(&[0xFF, 0xFF]);

        let decoded = codec.try_decode(&bytes).unwrap();
        assert_eq!(decoded, VoiceDatagram::Ping(PingPacket { timestamp: 42 }));
    }

    fn round_trip(direction: Direction, paket: VoicePacket) {
        let codec = VoiceCodec::new(direction);
        let bytes = codec
            .encode(&VoiceDatagram::Audio(paket.clone()))
            .expect("Kodierung muss erfolgreich sein");
        let decoded = codec
            .try_decode(&bytes)
            .expect("Dekodierung muss erfolgreich sein");
        assert_eq!(decoded, VoiceDatagram::Audio(paket));
    }

    #[test]
    fn round_trip_beide_richtungen_und_codecs() {
        round_trip(Direction::ToServer, opus_paket(0, 1, false, vec![vec![1, 2, 3]]));
        round_trip(Direction::ToServer, opus_paket(31, 77, true, vec![]));
        round_trip(
            Direction::ToClient,
            VoicePacket {
                mode: 2,
                codec: AudioCodec::Opus,
                source: Some(1000),
                seq_num: 268_435_456,
                end: false,
                frames: vec![vec![0u8; MAX_OPUS_FRAME_SIZE]],
                position: Some([0.5, -0.5, 100.0]),
            },
        );
        round_trip(
            Direction::ToClient,
            VoicePacket {
                mode: 0,
                codec: AudioCodec::Speex,
                source: Some(3),
                seq_num: 2,
                end: false,
                frames: vec![vec![9u8; 127], vec![], vec![7u8; 5]],
                position: None,
            },
        );
        round_trip(
            Direction::ToServer,
            VoicePacket {
                mode: 0,
                codec: AudioCodec::CeltAlpha,
                source: None,
                seq_num: 0,
                end: true,
                frames: vec![],
                position: None,
            },
        );
    }

    #[test]
    fn target_einordnung() {
        assert_eq!(opus_paket(0, 0, false, vec![]).target(), Target::Normal);
        assert_eq!(opus_paket(1, 0, false, vec![]).target(), Target::Shout);
        assert_eq!(opus_paket(2, 0, false, vec![]).target(), Target::Whisper);
        assert_eq!(opus_paket(3, 0, false, vec![]).target(), Target::Loopback);
        assert_eq!(opus_paket(31, 0, false, vec![]).target(), Target::Loopback);
    }

    // --- Encode-Fehler ---

    #[test]
    fn opus_mit_mehreren_frames_wird_abgelehnt() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = opus_paket(0, 0, false, vec![vec![1], vec![2]]);
        assert_eq!(
            codec.encode(&VoiceDatagram::Audio(paket)),
            Err(VoiceError::OpusMultiframe(2))
        );
    }

    #[test]
    fn zu_grosse_frames_werden_abgelehnt() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = opus_paket(0, 0, false, vec![vec![0u8; MAX_OPUS_FRAME_SIZE + 1]]);
        assert!(matches!(
            codec.encode(&VoiceDatagram::Audio(paket)),
            Err(VoiceError::FrameTooLarge { .. })
        ));

        let paket = VoicePacket {
            mode: 0,
            codec: AudioCodec::Speex,
            source: None,
            seq_num: 0,
            end: false,
            frames: vec![vec![0u8; 128]],
            position: None,
        };
        assert!(matches!(
            codec.encode(&VoiceDatagram::Audio(paket)),
            Err(VoiceError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn celt_ohne_frames_und_ohne_ende_wird_abgelehnt() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let paket = VoicePacket {
            mode: 0,
            codec: AudioCodec::CeltAlpha,
            source: None,
            seq_num: 0,
            end: false,
            frames: vec![],
            position: None,
        };
        assert_eq!(
            codec.encode(&VoiceDatagram::Audio(paket)),
            Err(VoiceError::NoFramesNoEnd)
        );
    }

    #[test]
    fn fehlende_quelle_zum_client_wird_abgelehnt() {
        let codec = VoiceCodec::new(Direction::ToClient);
        let paket = opus_paket(0, 0, false, vec![]);
        assert_eq!(
            codec.encode(&VoiceDatagram::Audio(paket)),
            Err(VoiceError::MissingSource)
        );
    }

    // --- Decode-Toleranz ---

    #[test]
    fn verworfene_pakete_liefern_none_und_codec_bleibt_nutzbar() {
        let codec = VoiceCodec::new(Direction::ToServer);

        // Leeres Paket
        assert_eq!(codec.decode(&[]), None);
        // Unbekannte Codec-ID 5 -> Header 0xA0
        assert_eq!(codec.decode(&[0xA0, 0x00]), None);
        // Abgeschnittenes Varint
        assert_eq!(codec.decode(&[0x80, 0xF0, 0x01]), None);
        // Opus-Frame kuerzer als deklariert
        assert_eq!(codec.decode(&[0x80, 0x00, 0x05, 0xAA]), None);
        // CELT: Fortsetzungs-Bit ohne folgenden Frame-Header
        assert_eq!(codec.decode(&[0x00, 0x00, 0x81, 0x11]), None);

        // Danach dekodiert ein gueltiges Paket weiterhin
        let decoded = codec.decode(&[0x80, 0x05, 0x02, 0xAA, 0xBB]);
        assert!(decoded.is_some());
    }

    #[test]
    fn fehlergruende_sind_praezise() {
        let codec = VoiceCodec::new(Direction::ToServer);
        assert_eq!(codec.try_decode(&[]), Err(VoiceError::Empty));
        assert_eq!(
            codec.try_decode(&[0xA0, 0x00]),
            Err(VoiceError::UnknownCodec(5))
        );
        assert!(matches!(
            codec.try_decode(&[0x80, 0x00, 0x05, 0xAA]),
            Err(VoiceError::Truncated { .. })
        ));
    }

    #[test]
    fn genau_zwoelf_restbytes_sind_keine_position() {
        let codec = VoiceCodec::new(Direction::ToServer);
        let mut bytes = codec
            .encode(&VoiceDatagram::Audio(opus_paket(0, 1, false, vec![vec![0xAB]])))
            .unwrap();
        bytes.extend_from_slice(&[0u8; 12]);

        let VoiceDatagram::Audio(paket) = codec.try_decode(&bytes).unwrap() else {
            panic!("Audio-Paket erwartet");
        };
        assert_eq!(paket.position, None);

        // Ein Byte mehr und die ersten 12 Rest-Bytes werden als Position gelesen
        bytes.push(0);
        let VoiceDatagram::Audio(paket) = codec.try_decode(&bytes).unwrap() else {
            panic!("Audio-Paket erwartet");
        };
        assert_eq!(paket.position, Some([0.0, 0.0, 0.0]));
    }
}
