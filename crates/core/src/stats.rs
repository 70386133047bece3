//! Paket-Statistiken der UDP-Verschluesselung
//!
//! Die Zaehler werden von der Krypto-Schicht bei jedem erfolgreich
//! entschluesselten Paket fortgeschrieben und koennen vom Aufrufer in
//! `Ping`- oder `UserStats`-Nachrichten eingebettet werden.

use serde::{Deserialize, Serialize};

/// Zaehler fuer gute, verspaetete und verlorene UDP-Pakete
///
/// `lost` ist vorzeichenbehaftet: trifft ein zuvor als verloren gezaehltes
/// Paket doch noch ein, wird der Zaehler um eins korrigiert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptStats {
    /// Erfolgreich entschluesselte Pakete
    pub good: u32,
    /// Verspaetet eingetroffene Pakete
    pub late: u32,
    /// Als verloren gezaehlte Pakete (korrigierbar durch Nachzuegler)
    pub lost: i64,
}

impl CryptStats {
    /// Setzt alle Zaehler auf null zurueck
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_start_bei_null() {
        let stats = CryptStats::default();
        assert_eq!(stats.good, 0);
        assert_eq!(stats.late, 0);
        assert_eq!(stats.lost, 0);
    }

    #[test]
    fn stats_reset() {
        let mut stats = CryptStats {
            good: 10,
            late: 2,
            lost: -1,
        };
        stats.reset();
        assert_eq!(stats, CryptStats::default());
    }

    #[test]
    fn stats_sind_serde_kompatibel() {
        let stats = CryptStats {
            good: 7,
            late: 1,
            lost: 3,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let decoded: CryptStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, decoded);
    }
}
