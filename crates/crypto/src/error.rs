//! Fehlertypen des Kryptografie-Subsystems

use thiserror::Error;

/// Fehler der UDP-Verschluesselung
///
/// Jeder fehlgeschlagene `decrypt`-Aufruf laesst den Krypto-Zustand
/// unveraendert; der Aufrufer verwirft das Paket.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptError {
    #[error("Schluesselmaterial unvollstaendig, Krypto-Zustand nicht bereit")]
    NotReady,

    #[error("Ungueltige Schluessel-Laenge: erwartet {erwartet}, erhalten {erhalten}")]
    BadKeyLength { erwartet: usize, erhalten: usize },

    #[error("Paket zu kurz: {0} Bytes (Header benoetigt 4)")]
    TooShort(usize),

    #[error("Wiederholtes Paket verworfen")]
    Replay,

    #[error("Nonce ausserhalb des Toleranzfensters")]
    OutOfRange,

    #[error("Authentifizierungs-Tag stimmt nicht ueberein")]
    AuthFailure,
}

/// Result-Alias des Kryptografie-Subsystems
pub type CryptResult<T> = Result<T, CryptError>;
