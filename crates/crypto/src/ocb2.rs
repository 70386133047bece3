//! OCB2-Betriebsmodus ueber AES-128
//!
//! Implementiert die reinen Block-Operationen: Offset-Arithmetik in
//! GF(2^128) und die symmetrischen Encrypt-/Decrypt-Durchlaeufe mit
//! Checksummen-Tag. Nonce-Verwaltung und Replay-Schutz liegen in
//! [`crate::state`].
//!
//! Der letzte Block nimmt immer den Partial-Pfad (auch bei exakt 16 Bytes);
//! dort wird die Blocklaenge in Bits in den Pad-Input gemischt.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt};
use aes::Aes128;

/// AES-Blockgroesse in Bytes; Schluessel und Nonce sind genauso lang
pub const BLOCK_SIZE: usize = 16;

/// Ein roher AES-Block
pub(crate) type Block = [u8; BLOCK_SIZE];

// ---------------------------------------------------------------------------
// GF(2^128)-Offset-Arithmetik
// ---------------------------------------------------------------------------

/// Multiplikation mit `x` im OCB2-Polynomkoerper
///
/// Ein-Bit-Linksshift des big-endian interpretierten Blocks; laeuft das
/// oberste Bit heraus, wird das Reduktionspolynom 0x87 eingemischt.
fn s2(block: &mut Block) {
    let uebertrag = block[0] >> 7;
    for i in 0..BLOCK_SIZE - 1 {
        block[i] = (block[i] << 1) | (block[i + 1] >> 7);
    }
    block[BLOCK_SIZE - 1] = (block[BLOCK_SIZE - 1] << 1) ^ (uebertrag * 0x87);
}

/// Multiplikation mit `x + 1`: `b XOR S2(b)`
fn s3(block: &mut Block) {
    let mut verdoppelt = *block;
    s2(&mut verdoppelt);
    xor_into(block, &verdoppelt);
}

fn xor_into(ziel: &mut Block, quelle: &Block) {
    for i in 0..BLOCK_SIZE {
        ziel[i] ^= quelle[i];
    }
}

fn xor(a: &Block, b: &Block) -> Block {
    let mut ergebnis = *a;
    xor_into(&mut ergebnis, b);
    ergebnis
}

fn aes_encrypt(cipher: &Aes128, block: &Block) -> Block {
    let mut puffer = *block;
    cipher.encrypt_block(GenericArray::from_mut_slice(&mut puffer));
    puffer
}

fn aes_decrypt(cipher: &Aes128, block: &Block) -> Block {
    let mut puffer = *block;
    cipher.decrypt_block(GenericArray::from_mut_slice(&mut puffer));
    puffer
}

/// Pad-Input des letzten Blocks: Restlaenge in Bits im letzten Byte
fn laengen_block(rest_laenge: usize) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[BLOCK_SIZE - 1] = (rest_laenge * 8) as u8;
    block
}

// ---------------------------------------------------------------------------
// Encrypt / Decrypt
// ---------------------------------------------------------------------------

/// OCB2-Verschluesselung eines Pakets unter der gegebenen Nonce
///
/// Gibt den Ciphertext (gleiche Laenge wie der Plaintext) und das volle
/// 16-Byte-Tag zurueck.
pub(crate) fn ocb_encrypt(cipher: &Aes128, nonce: &Block, plain: &[u8]) -> (Vec<u8>, Block) {
    let mut delta = aes_encrypt(cipher, nonce);
    let mut checksum = [0u8; BLOCK_SIZE];
    let mut out = Vec::with_capacity(plain.len());

    let mut rest = plain;
    while rest.len() > BLOCK_SIZE {
        s2(&mut delta);
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&rest[..BLOCK_SIZE]);
        xor_into(&mut checksum, &block);
        xor_into(&mut block, &delta);
        let verschluesselt = aes_encrypt(cipher, &block);
        out.extend_from_slice(&xor(&delta, &verschluesselt));
        rest = &rest[BLOCK_SIZE..];
    }

    // Partial-Pfad fuer den letzten Block (0..=16 Bytes)
    s2(&mut delta);
    let pad = aes_encrypt(cipher, &xor(&laengen_block(rest.len()), &delta));
    let mut letzter = pad;
    letzter[..rest.len()].copy_from_slice(rest);
    xor_into(&mut checksum, &letzter);
    let chiffre = xor(&pad, &letzter);
    out.extend_from_slice(&chiffre[..rest.len()]);

    s3(&mut delta);
    let tag = aes_encrypt(cipher, &xor(&delta, &checksum));
    (out, tag)
}

/// OCB2-Entschluesselung, symmetrisch zu [`ocb_encrypt`]
///
/// Der Aufrufer vergleicht das zurueckgegebene Tag mit dem uebertragenen
/// Tag-Praefix bevor er den Plaintext akzeptiert.
pub(crate) fn ocb_decrypt(cipher: &Aes128, nonce: &Block, verschluesselt: &[u8]) -> (Vec<u8>, Block) {
    let mut delta = aes_encrypt(cipher, nonce);
    let mut checksum = [0u8; BLOCK_SIZE];
    let mut out = Vec::with_capacity(verschluesselt.len());

    let mut rest = verschluesselt;
    while rest.len() > BLOCK_SIZE {
        s2(&mut delta);
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&rest[..BLOCK_SIZE]);
        xor_into(&mut block, &delta);
        let mut klar = aes_decrypt(cipher, &block);
        xor_into(&mut klar, &delta);
        checksum_und_ausgabe(&mut checksum, &mut out, &klar, BLOCK_SIZE);
        rest = &rest[BLOCK_SIZE..];
    }

    s2(&mut delta);
    let pad = aes_encrypt(cipher, &xor(&laengen_block(rest.len()), &delta));
    let mut letzter = [0u8; BLOCK_SIZE];
    letzter[..rest.len()].copy_from_slice(rest);
    xor_into(&mut letzter, &pad);
    checksum_und_ausgabe(&mut checksum, &mut out, &letzter, rest.len());

    s3(&mut delta);
    let tag = aes_encrypt(cipher, &xor(&delta, &checksum));
    (out, tag)
}

fn checksum_und_ausgabe(checksum: &mut Block, out: &mut Vec<u8>, klar: &Block, laenge: usize) {
    xor_into(checksum, klar);
    out.extend_from_slice(&klar[..laenge]);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::KeyInit;

    // Referenzvektoren aus der OCB2-Spezifikation:
    // Schluessel und Nonce 000102...0F, Plaintext 000102...27
    const SCHLUESSEL: Block = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
        0x0E, 0x0F,
    ];
    const NONCE: Block = SCHLUESSEL;

    fn referenz_cipher() -> Aes128 {
        Aes128::new(GenericArray::from_slice(&SCHLUESSEL))
    }

    #[test]
    fn leerer_plaintext_referenzvektor() {
        let (chiffre, tag) = ocb_encrypt(&referenz_cipher(), &NONCE, &[]);
        assert!(chiffre.is_empty());
        assert_eq!(
            tag,
            [
                0xBF, 0x31, 0x08, 0x13, 0x07, 0x73, 0xAD, 0x5E, 0xC7, 0x0E, 0xC6, 0x9E, 0x78,
                0x75, 0xA7, 0xB0
            ]
        );
    }

    #[test]
    fn referenzvektor_40_bytes() {
        let klartext: Vec<u8> = (0u8..40).collect();
        let erwartete_chiffre: [u8; 40] = [
            0xF7, 0x5D, 0x6B, 0xC8, 0xB4, 0xDC, 0x8D, 0x66, 0xB8, 0x36, 0xA2, 0xB0, 0x8B, 0x32,
            0xA6, 0x36, 0x9F, 0x1C, 0xD3, 0xC5, 0x22, 0x8D, 0x79, 0xFD, 0x6C, 0x26, 0x7F, 0x5F,
            0x6A, 0xA7, 0xB2, 0x31, 0xC7, 0xDF, 0xB9, 0xD5, 0x99, 0x51, 0xAE, 0x9C,
        ];
        let erwartetes_tag: Block = [
            0x9D, 0xB0, 0xCD, 0xF8, 0x80, 0xF7, 0x3E, 0x3E, 0x10, 0xD4, 0xEB, 0x32, 0x17, 0x76,
            0x66, 0x88,
        ];

        let cipher = referenz_cipher();
        let (chiffre, tag) = ocb_encrypt(&cipher, &NONCE, &klartext);
        assert_eq!(chiffre, erwartete_chiffre);
        assert_eq!(tag, erwartetes_tag);

        let (klar, tag_rueck) = ocb_decrypt(&cipher, &NONCE, &chiffre);
        assert_eq!(klar, klartext);
        assert_eq!(tag_rueck, erwartetes_tag);
    }

    #[test]
    fn round_trip_alle_restlaengen() {
        let cipher = referenz_cipher();
        // 0..=33 deckt leere Pakete, Partial-, Voll- und Mehrblock-Pfade ab
        for laenge in 0..=33usize {
            let klartext: Vec<u8> = (0..laenge as u8).map(|b| b.wrapping_mul(7)).collect();
            let (chiffre, tag) = ocb_encrypt(&cipher, &NONCE, &klartext);
            assert_eq!(chiffre.len(), klartext.len());

            let (entschluesselt, tag_rueck) = ocb_decrypt(&cipher, &NONCE, &chiffre);
            assert_eq!(entschluesselt, klartext, "Laenge {}", laenge);
            assert_eq!(tag, tag_rueck, "Tag bei Laenge {}", laenge);
        }
    }

    #[test]
    fn s2_schiebt_und_reduziert() {
        let mut block = [0u8; BLOCK_SIZE];
        block[BLOCK_SIZE - 1] = 0x01;
        s2(&mut block);
        assert_eq!(block[BLOCK_SIZE - 1], 0x02);

        // Oberstes Bit gesetzt: Reduktionspolynom wird eingemischt
        let mut block = [0u8; BLOCK_SIZE];
        block[0] = 0x80;
        s2(&mut block);
        let mut erwartet = [0u8; BLOCK_SIZE];
        erwartet[BLOCK_SIZE - 1] = 0x87;
        assert_eq!(block, erwartet);
    }

    #[test]
    fn s3_ist_xor_aus_original_und_s2() {
        let mut block: Block = (0..16u8).collect::<Vec<_>>().try_into().unwrap();
        let original = block;
        let mut verdoppelt = block;
        s2(&mut verdoppelt);
        s3(&mut block);
        assert_eq!(block, xor(&original, &verdoppelt));
    }

    #[test]
    fn verfaelschte_chiffre_aendert_tag() {
        let cipher = referenz_cipher();
        let klartext = b"Angriffserkennung";
        let (mut chiffre, tag) = ocb_encrypt(&cipher, &NONCE, klartext);
        chiffre[3] ^= 0x01;
        let (_, tag_rueck) = ocb_decrypt(&cipher, &NONCE, &chiffre);
        assert_ne!(tag, tag_rueck);
    }
}
