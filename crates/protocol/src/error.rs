//! Fehlertypen der Protokoll-Codecs

use thiserror::Error;

/// Fehler des Varint-Codecs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VarintError {
    #[error("Varint abgeschnitten: {benoetigt} Bytes benoetigt, {vorhanden} vorhanden")]
    Truncated { benoetigt: usize, vorhanden: usize },

    #[error("Ungueltiges Varint-Praefix: {0:#04x}")]
    Malformed(u8),

    #[error("Wert {0} passt nicht in die 32-Bit-Kodierung")]
    Unsupported(i64),

    #[error("64-Bit-Varints (Praefix 0xF4) werden nicht unterstuetzt")]
    Unsupported64Bit,
}

/// Fehler des Control-Channel-Framings
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Unbekannte Nachrichten-ID: {0}")]
    UnknownMessageId(u16),

    #[error("Unbekannter Nachrichtenname: '{0}'")]
    UnknownMessageName(String),

    #[error("Schema-Kodierung fehlgeschlagen fuer '{name}': {grund}")]
    SchemaEncode { name: &'static str, grund: String },

    #[error("Schema-Dekodierung fehlgeschlagen fuer '{name}': {grund}")]
    SchemaDecode { name: &'static str, grund: String },

    #[error("Frame zu gross: {laenge} Bytes (Maximum: {maximum} Bytes)")]
    FrameTooBig { laenge: usize, maximum: usize },

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

/// Fehler des Voice-Paket-Codecs
///
/// Beim Dekodieren werden diese Fehler nicht nach aussen gereicht, sondern
/// fuehren zum stillen Verwerfen des Pakets (siehe `VoiceCodec::decode`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Leeres Paket")]
    Empty,

    #[error("Unbekannte Codec-ID: {0}")]
    UnknownCodec(u8),

    #[error("Paket abgeschnitten: {benoetigt} Bytes benoetigt, {vorhanden} vorhanden")]
    Truncated { benoetigt: usize, vorhanden: usize },

    #[error("Opus-Pakete tragen hoechstens einen Frame (waren: {0})")]
    OpusMultiframe(usize),

    #[error("Frame zu gross: {laenge} Bytes (Maximum: {maximum} Bytes)")]
    FrameTooLarge { laenge: usize, maximum: usize },

    #[error("Paket ohne Frames und ohne Ende-Markierung")]
    NoFramesNoEnd,

    #[error("Server-Pakete benoetigen eine Session-ID als Quelle")]
    MissingSource,

    #[error("Feld '{0}' ausserhalb des gueltigen Wertebereichs")]
    ValueOutOfRange(&'static str),

    #[error(transparent)]
    Varint(#[from] VarintError),
}
