//! Mumble-Varint
//!
//! Laengenpraefix-Kodierung fuer vorzeichenbehaftete Ganzzahlen. Das erste
//! Byte bestimmt die Gesamtlaenge:
//!
//! ```text
//! 0xxxxxxx                        7 Bit direkt
//! 10xxxxxx + 1 Byte              14 Bit
//! 110xxxxx + 2 Bytes             21 Bit
//! 1110xxxx + 3 Bytes             28 Bit
//! 111100__ + 4 Bytes (BE)        32 Bit
//! 111101__                       64 Bit – nicht unterstuetzt
//! 111110__ + Varint              Komplement des folgenden Varints
//! 111111xx                       Komplement der untersten 2 Bit (-1..-4)
//! ```
//!
//! Negative Werte werden ueber das Bit-Komplement abgebildet; 64-Bit-Werte
//! lehnt der Codec ausdruecklich ab.

use crate::error::VarintError;

/// Kodiert einen Wert als Varint in einen frischen Puffer
pub fn encode(wert: i64) -> Result<Vec<u8>, VarintError> {
    let mut buf = Vec::with_capacity(5);
    encode_into(&mut buf, wert)?;
    Ok(buf)
}

/// Kodiert einen Wert als Varint und haengt ihn an `buf` an
pub fn encode_into(buf: &mut Vec<u8>, wert: i64) -> Result<(), VarintError> {
    if wert < 0 {
        let komplement = !wert;
        if komplement <= 3 {
            buf.push(0xFC | komplement as u8);
            return Ok(());
        }
        buf.push(0xF8);
        return encode_unsigned(buf, komplement);
    }
    encode_unsigned(buf, wert)
}

fn encode_unsigned(buf: &mut Vec<u8>, wert: i64) -> Result<(), VarintError> {
    if wert < 0x80 {
        buf.push(wert as u8);
    } else if wert < 0x4000 {
        buf.push(0x80 | (wert >> 8) as u8);
        buf.push(wert as u8);
    } else if wert < 0x20_0000 {
        buf.push(0xC0 | (wert >> 16) as u8);
        buf.push((wert >> 8) as u8);
        buf.push(wert as u8);
    } else if wert < 0x1000_0000 {
        buf.push(0xE0 | (wert >> 24) as u8);
        buf.push((wert >> 16) as u8);
        buf.push((wert >> 8) as u8);
        buf.push(wert as u8);
    } else if wert <= 0xFFFF_FFFF {
        buf.push(0xF0);
        buf.extend_from_slice(&(wert as u32).to_be_bytes());
    } else {
        return Err(VarintError::Unsupported(wert));
    }
    Ok(())
}

/// Dekodiert ein Varint vom Anfang von `buf`
///
/// Gibt den Wert und die Anzahl der verbrauchten Bytes zurueck.
pub fn decode(buf: &[u8]) -> Result<(i64, usize), VarintError> {
    let b0 = *buf.first().ok_or(VarintError::Truncated {
        benoetigt: 1,
        vorhanden: 0,
    })?;

    if b0 & 0x80 == 0 {
        return Ok((b0 as i64, 1));
    }
    if b0 & 0xC0 == 0x80 {
        let rest = nehmen(buf, 2)?;
        return Ok((((b0 & 0x3F) as i64) << 8 | rest[1] as i64, 2));
    }
    if b0 & 0xE0 == 0xC0 {
        let rest = nehmen(buf, 3)?;
        return Ok((
            ((b0 & 0x1F) as i64) << 16 | (rest[1] as i64) << 8 | rest[2] as i64,
            3,
        ));
    }
    if b0 & 0xF0 == 0xE0 {
        let rest = nehmen(buf, 4)?;
        return Ok((
            ((b0 & 0x0F) as i64) << 24
                | (rest[1] as i64) << 16
                | (rest[2] as i64) << 8
                | rest[3] as i64,
            4,
        ));
    }

    match b0 & 0xFC {
        0xF0 => {
            let rest = nehmen(buf, 5)?;
            let wert = u32::from_be_bytes([rest[1], rest[2], rest[3], rest[4]]);
            Ok((wert as i64, 5))
        }
        0xF4 => Err(VarintError::Unsupported64Bit),
        0xF8 => {
            let (wert, verbraucht) = decode(&buf[1..])?;
            Ok((!wert, verbraucht + 1))
        }
        0xFC => Ok((!((b0 & 0x03) as i64), 1)),
        _ => Err(VarintError::Malformed(b0)),
    }
}

fn nehmen(buf: &[u8], n: usize) -> Result<&[u8], VarintError> {
    if buf.len() < n {
        return Err(VarintError::Truncated {
            benoetigt: n,
            vorhanden: buf.len(),
        });
    }
    Ok(&buf[..n])
}
