//! Krypto-Zustand des UDP-Channels
//!
//! [`CryptState`] haelt Schluessel, beide Nonce-Zaehler und die
//! Replay-Historie einer Verbindung. Auf dem Draht wird nur das unterste
//! Nonce-Byte uebertragen; der Empfaenger rekonstruiert die restlichen 15
//! Bytes aus seinem eigenen Zaehlerstand und toleriert dabei verspaetete,
//! verlorene und umgeordnete Pakete.
//!
//! ## Datagramm-Format
//!
//! ```text
//! [nonce_byte (1)] [tag_praefix (3)] [ciphertext (= Plaintext-Laenge)]
//! ```
//!
//! Die Nonce-Synchronisation arbeitet auf einer lokalen Kopie des
//! Decrypt-IV und schreibt erst nach erfolgreicher Authentifizierung in den
//! Zustand zurueck; ein fehlgeschlagener `decrypt` laesst den Zustand
//! unveraendert.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::KeyInit;
use aes::Aes128;
use rand::rngs::OsRng;
use rand::RngCore;

use murmel_core::CryptStats;

use crate::error::{CryptError, CryptResult};
use crate::ocb2::{ocb_decrypt, ocb_encrypt, Block, BLOCK_SIZE};

/// Groesse des Datagramm-Headers: Nonce-Byte + Tag-Praefix
pub const HEADER_SIZE: usize = 4;

/// Laenge des uebertragenen Tag-Praefixes
const TAG_PREFIX_SIZE: usize = 3;

/// Toleranzfenster fuer verspaetete Pakete (Abstand im Nonce-Byte)
const LATE_WINDOW: i32 = 30;

/// Authentifizierte Verschluesselung des Voice-Channels (OCB2-AES128)
///
/// Ein `CryptState` gehoert genau einer Verbindungshaelfte und ist nicht
/// synchronisiert; der Aufrufer serialisiert die Zugriffe. Der Zustand wird
/// leer angelegt und ist erst nach [`generate_key`](Self::generate_key)
/// oder dem Setzen aller drei Bestandteile bereit.
pub struct CryptState {
    cipher: Option<Aes128>,
    key: Option<Block>,
    encrypt_iv: Option<Block>,
    decrypt_iv: Option<Block>,
    /// Pro Nonce-Byte das zweite Nonce-Byte des zuletzt akzeptierten Pakets
    decrypt_history: [u8; 256],
    /// Paketzaehler, fortgeschrieben bei jedem erfolgreichen `decrypt`
    pub stats: CryptStats,
}

impl CryptState {
    /// Erstellt einen leeren Zustand ohne Schluesselmaterial
    pub fn new() -> Self {
        Self {
            cipher: None,
            key: None,
            encrypt_iv: None,
            decrypt_iv: None,
            decrypt_history: [0u8; 256],
            stats: CryptStats::default(),
        }
    }

    /// Bereit sobald Schluessel und beide IVs gesetzt sind
    pub fn is_ready(&self) -> bool {
        self.cipher.is_some() && self.encrypt_iv.is_some() && self.decrypt_iv.is_some()
    }

    /// Zieht 48 Zufallsbytes und belegt Schluessel, Decrypt-IV und
    /// Encrypt-IV (in dieser Reihenfolge)
    pub fn generate_key(&mut self) {
        let mut material = [0u8; 3 * BLOCK_SIZE];
        OsRng.fill_bytes(&mut material);

        let mut key = [0u8; BLOCK_SIZE];
        key.copy_from_slice(&material[..BLOCK_SIZE]);
        self.install_key(key);

        let mut decrypt_iv = [0u8; BLOCK_SIZE];
        decrypt_iv.copy_from_slice(&material[BLOCK_SIZE..2 * BLOCK_SIZE]);
        self.decrypt_iv = Some(decrypt_iv);

        let mut encrypt_iv = [0u8; BLOCK_SIZE];
        encrypt_iv.copy_from_slice(&material[2 * BLOCK_SIZE..]);
        self.encrypt_iv = Some(encrypt_iv);
    }

    /// Setzt den AES-Schluessel (genau 16 Bytes)
    pub fn set_key(&mut self, key: &[u8]) -> CryptResult<()> {
        let key = block_aus(key)?;
        self.install_key(key);
        Ok(())
    }

    /// Setzt den Encrypt-IV (genau 16 Bytes)
    pub fn set_encrypt_iv(&mut self, iv: &[u8]) -> CryptResult<()> {
        self.encrypt_iv = Some(block_aus(iv)?);
        Ok(())
    }

    /// Setzt den Decrypt-IV (genau 16 Bytes)
    pub fn set_decrypt_iv(&mut self, iv: &[u8]) -> CryptResult<()> {
        self.decrypt_iv = Some(block_aus(iv)?);
        Ok(())
    }

    /// Aktueller AES-Schluessel (fuer `CryptSetup`-Nachrichten)
    pub fn key(&self) -> Option<Block> {
        self.key
    }

    /// Aktueller Encrypt-IV-Zaehlerstand
    pub fn encrypt_iv(&self) -> Option<Block> {
        self.encrypt_iv
    }

    /// Aktueller Decrypt-IV-Zaehlerstand
    pub fn decrypt_iv(&self) -> Option<Block> {
        self.decrypt_iv
    }

    fn install_key(&mut self, key: Block) {
        self.cipher = Some(Aes128::new(GenericArray::from_slice(&key)));
        self.key = Some(key);
    }

    // -- Encrypt -----------------------------------------------------------

    /// Verschluesselt ein Datagramm
    ///
    /// Der Encrypt-IV wird vor jedem Paket als little-endian Zaehler
    /// inkrementiert (Wrap bei 2^128 ist beabsichtigt). Das Ergebnis ist
    /// `[iv[0], tag[0..3], ciphertext]`.
    pub fn encrypt(&mut self, plain: &[u8]) -> CryptResult<Vec<u8>> {
        let (Some(cipher), Some(iv)) = (self.cipher.as_ref(), self.encrypt_iv.as_mut()) else {
            return Err(CryptError::NotReady);
        };

        for byte in iv.iter_mut() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }

        let (verschluesselt, tag) = ocb_encrypt(cipher, iv, plain);

        let mut out = Vec::with_capacity(HEADER_SIZE + verschluesselt.len());
        out.push(iv[0]);
        out.extend_from_slice(&tag[..TAG_PREFIX_SIZE]);
        out.extend_from_slice(&verschluesselt);
        Ok(out)
    }

    // -- Decrypt -----------------------------------------------------------

    /// Entschluesselt ein Datagramm
    ///
    /// Rekonstruiert die volle Nonce aus dem uebertragenen Nonce-Byte,
    /// prueft die Replay-Historie und das Tag-Praefix. Bei jedem Fehler
    /// bleiben Decrypt-IV, Historie und Statistik unveraendert.
    pub fn decrypt(&mut self, source: &[u8]) -> CryptResult<Vec<u8>> {
        let (Some(cipher), Some(aktuell)) = (self.cipher.as_ref(), self.decrypt_iv.as_ref())
        else {
            return Err(CryptError::NotReady);
        };
        if source.len() < HEADER_SIZE {
            return Err(CryptError::TooShort(source.len()));
        }

        let ivbyte = source[0];
        let mut iv = *aktuell;
        let mut festhalten = false;
        let mut late = 0u32;
        let mut lost = 0i64;

        if iv[0].wrapping_add(1) == ivbyte {
            // In Reihenfolge: nur das unterste Byte aendert sich, beim Wrap
            // von 0xFF auf 0x00 wandert der Uebertrag nach oben
            if ivbyte > iv[0] {
                iv[0] = ivbyte;
            } else {
                iv[0] = ivbyte;
                uebertrag_hoch(&mut iv);
            }
        } else {
            // Ausser der Reihe: Abstand auf (-128, 128] normalisieren
            let mut diff = ivbyte as i32 - iv[0] as i32;
            if diff > 128 {
                diff -= 256;
            } else if diff < -128 {
                diff += 256;
            }

            if ivbyte < iv[0] && diff > -LATE_WINDOW && diff < 0 {
                // Nachzuegler ohne Wrap: frueher als verloren gezaehlt
                late = 1;
                lost = -1;
                iv[0] = ivbyte;
                festhalten = true;
            } else if ivbyte > iv[0] && diff > -LATE_WINDOW && diff < 0 {
                // Nachzuegler ueber den Wrap hinweg
                late = 1;
                lost = -1;
                iv[0] = ivbyte;
                uebertrag_runter(&mut iv);
                festhalten = true;
            } else if ivbyte > iv[0] && diff > 0 {
                // Luecke ohne Wrap
                lost = (ivbyte - iv[0]) as i64 - 1;
                iv[0] = ivbyte;
            } else if ivbyte < iv[0] && diff > 0 {
                // Luecke ueber den Wrap hinweg
                lost = 255 - iv[0] as i64 + ivbyte as i64;
                iv[0] = ivbyte;
                uebertrag_hoch(&mut iv);
            } else if diff == 0 && self.decrypt_history[iv[0] as usize] == iv[1] {
                // Exaktes Duplikat des zuletzt akzeptierten Pakets
                return Err(CryptError::Replay);
            } else {
                return Err(CryptError::OutOfRange);
            }

            if self.decrypt_history[iv[0] as usize] == iv[1] {
                return Err(CryptError::Replay);
            }
        }

        let (klar, tag) = ocb_decrypt(cipher, &iv, &source[HEADER_SIZE..]);
        if tag[..TAG_PREFIX_SIZE] != source[1..HEADER_SIZE] {
            return Err(CryptError::AuthFailure);
        }

        // Erst jetzt in den Zustand schreiben; Nachzuegler lassen den
        // Zaehler auf dem juengsten Paket stehen
        self.decrypt_history[iv[0] as usize] = iv[1];
        if !festhalten {
            self.decrypt_iv = Some(iv);
        }

        self.stats.good += 1;
        self.stats.late += late;
        self.stats.lost += lost;
        if late != 0 || lost != 0 {
            tracing::debug!(ivbyte, late, lost, "Paketstrom ausser der Reihe");
        }

        Ok(klar)
    }
}

impl Default for CryptState {
    fn default() -> Self {
        Self::new()
    }
}

/// Uebertrag in die hoeheren Nonce-Bytes (Index 1 aufwaerts)
fn uebertrag_hoch(iv: &mut Block) {
    for byte in iv.iter_mut().skip(1) {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// Borgen aus den hoeheren Nonce-Bytes (Index 1 aufwaerts)
fn uebertrag_runter(iv: &mut Block) {
    for byte in iv.iter_mut().skip(1) {
        *byte = byte.wrapping_sub(1);
        if *byte != 0xFF {
            break;
        }
    }
}

fn block_aus(bytes: &[u8]) -> CryptResult<Block> {
    if bytes.len() != BLOCK_SIZE {
        return Err(CryptError::BadKeyLength {
            erwartet: BLOCK_SIZE,
            erhalten: bytes.len(),
        });
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(bytes);
    Ok(block)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
