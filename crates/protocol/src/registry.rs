//! Nachrichten-Registry des Control-Channels
//!
//! Bildet die 26 Nachrichtennamen auf ihre 16-Bit-Typ-IDs ab und buendelt
//! die Schema-Zuordnung hinter dem [`SchemaRegistry`]-Trait. Die
//! prost-gestuetzte Standardbelegung ist [`MumbleSchemas`]; Tests koennen
//! eine eigene Registry einsetzen um Schemata zu ersetzen.
//!
//! `UDPTunnel` (ID 1) ist ein Pseudo-Schema: sein Payload ist eine rohe
//! Bytefolge und wird unveraendert durchgereicht.

use prost::Message;

use crate::error::WireError;
use crate::messages;

/// Alle Nachrichtennamen in Wire-Reihenfolge; der Index ist die Typ-ID
pub const MESSAGE_NAMES: [&str; 26] = [
    "Version",
    "UDPTunnel",
    "Authenticate",
    "Ping",
    "Reject",
    "ServerSync",
    "ChannelRemove",
    "ChannelState",
    "UserRemove",
    "UserState",
    "BanList",
    "TextMessage",
    "PermissionDenied",
    "ACL",
    "QueryUsers",
    "CryptSetup",
    "ContextActionModify",
    "ContextAction",
    "UserList",
    "VoiceTarget",
    "PermissionQuery",
    "CodecVersion",
    "UserStats",
    "RequestBlob",
    "ServerConfig",
    "SuggestConfig",
];

/// Typ-ID des `UDPTunnel`-Pseudo-Schemas
pub const UDP_TUNNEL_ID: u16 = 1;

/// Gibt die Typ-ID zu einem Nachrichtennamen zurueck
pub fn id_for_name(name: &str) -> Option<u16> {
    MESSAGE_NAMES
        .iter()
        .position(|&n| n == name)
        .map(|i| i as u16)
}

/// Gibt den Nachrichtennamen zu einer Typ-ID zurueck
pub fn name_for_id(id: u16) -> Option<&'static str> {
    MESSAGE_NAMES.get(id as usize).copied()
}

/// Wie [`id_for_name`], aber mit `UnknownMessageName` als Fehler
pub fn resolve_name(name: &str) -> Result<u16, WireError> {
    id_for_name(name).ok_or_else(|| WireError::UnknownMessageName(name.to_string()))
}

// ---------------------------------------------------------------------------
// ControlMessage
// ---------------------------------------------------------------------------

/// Eine dekodierte Control-Nachricht
///
/// Jede Variante traegt die zugehoerige prost-Struktur aus [`messages`];
/// `UdpTunnel` traegt den rohen Datagramm-Inhalt.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    Version(messages::Version),
    UdpTunnel(Vec<u8>),
    Authenticate(messages::Authenticate),
    Ping(messages::Ping),
    Reject(messages::Reject),
    ServerSync(messages::ServerSync),
    ChannelRemove(messages::ChannelRemove),
    ChannelState(messages::ChannelState),
    UserRemove(messages::UserRemove),
    UserState(messages::UserState),
    BanList(messages::BanList),
    TextMessage(messages::TextMessage),
    PermissionDenied(messages::PermissionDenied),
    Acl(messages::Acl),
    QueryUsers(messages::QueryUsers),
    CryptSetup(messages::CryptSetup),
    ContextActionModify(messages::ContextActionModify),
    ContextAction(messages::ContextAction),
    UserList(messages::UserList),
    VoiceTarget(messages::VoiceTarget),
    PermissionQuery(messages::PermissionQuery),
    CodecVersion(messages::CodecVersion),
    UserStats(messages::UserStats),
    RequestBlob(messages::RequestBlob),
    ServerConfig(messages::ServerConfig),
    SuggestConfig(messages::SuggestConfig),
}

impl ControlMessage {
    /// Registry-Name der Nachricht
    pub fn name(&self) -> &'static str {
        MESSAGE_NAMES[self.type_id() as usize]
    }

    /// Typ-ID der Nachricht im Frame-Header
    pub fn type_id(&self) -> u16 {
        match self {
            ControlMessage::Version(_) => 0,
            ControlMessage::UdpTunnel(_) => 1,
            ControlMessage::Authenticate(_) => 2,
            ControlMessage::Ping(_) => 3,
            ControlMessage::Reject(_) => 4,
            ControlMessage::ServerSync(_) => 5,
            ControlMessage::ChannelRemove(_) => 6,
            ControlMessage::ChannelState(_) => 7,
            ControlMessage::UserRemove(_) => 8,
            ControlMessage::UserState(_) => 9,
            ControlMessage::BanList(_) => 10,
            ControlMessage::TextMessage(_) => 11,
            ControlMessage::PermissionDenied(_) => 12,
            ControlMessage::Acl(_) => 13,
            ControlMessage::QueryUsers(_) => 14,
            ControlMessage::CryptSetup(_) => 15,
            ControlMessage::ContextActionModify(_) => 16,
            ControlMessage::ContextAction(_) => 17,
            ControlMessage::UserList(_) => 18,
            ControlMessage::VoiceTarget(_) => 19,
            ControlMessage::PermissionQuery(_) => 20,
            ControlMessage::CodecVersion(_) => 21,
            ControlMessage::UserStats(_) => 22,
            ControlMessage::RequestBlob(_) => 23,
            ControlMessage::ServerConfig(_) => 24,
            ControlMessage::SuggestConfig(_) => 25,
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Schema-Zuordnung fuer den Control-Codec
///
/// Der Codec selbst kennt nur das Frame-Format; Serialisierung und
/// Deserialisierung der Payloads laufen ueber diese Schnittstelle. Tests
/// ersetzen die Standardbelegung durch eigene Schemata (Mocks).
pub trait SchemaRegistry {
    /// Serialisiert den Payload einer Nachricht
    fn encode_payload(&self, msg: &ControlMessage) -> Result<Vec<u8>, WireError>;

    /// Deserialisiert den Payload zur gegebenen Typ-ID
    ///
    /// Der Aufrufer hat die ID bereits ueber [`name_for_id`] validiert.
    fn decode_payload(&self, id: u16, payload: &[u8]) -> Result<ControlMessage, WireError>;
}

/// Prost-gestuetzte Standard-Schemata (Referenzprofil)
#[derive(Debug, Clone, Copy, Default)]
pub struct MumbleSchemas;

fn decode_err(name: &'static str, e: prost::DecodeError) -> WireError {
    WireError::SchemaDecode {
        name,
        grund: e.to_string(),
    }
}

impl SchemaRegistry for MumbleSchemas {
    fn encode_payload(&self, msg: &ControlMessage) -> Result<Vec<u8>, WireError> {
        let bytes = match msg {
            ControlMessage::Version(m) => m.encode_to_vec(),
            // Identitaets-Schema: Tunnel-Bytes unveraendert durchreichen
            ControlMessage::UdpTunnel(bytes) => bytes.clone(),
            ControlMessage::Authenticate(m) => m.encode_to_vec(),
            ControlMessage::Ping(m) => m.encode_to_vec(),
            ControlMessage::Reject(m) => m.encode_to_vec(),
            ControlMessage::ServerSync(m) => m.encode_to_vec(),
            ControlMessage::ChannelRemove(m) => m.encode_to_vec(),
            ControlMessage::ChannelState(m) => m.encode_to_vec(),
            ControlMessage::UserRemove(m) => m.encode_to_vec(),
            ControlMessage::UserState(m) => m.encode_to_vec(),
            ControlMessage::BanList(m) => m.encode_to_vec(),
            ControlMessage::TextMessage(m) => m.encode_to_vec(),
            ControlMessage::PermissionDenied(m) => m.encode_to_vec(),
            ControlMessage::Acl(m) => m.encode_to_vec(),
            ControlMessage::QueryUsers(m) => m.encode_to_vec(),
            ControlMessage::CryptSetup(m) => m.encode_to_vec(),
            ControlMessage::ContextActionModify(m) => m.encode_to_vec(),
            ControlMessage::ContextAction(m) => m.encode_to_vec(),
            ControlMessage::UserList(m) => m.encode_to_vec(),
            ControlMessage::VoiceTarget(m) => m.encode_to_vec(),
            ControlMessage::PermissionQuery(m) => m.encode_to_vec(),
            ControlMessage::CodecVersion(m) => m.encode_to_vec(),
            ControlMessage::UserStats(m) => m.encode_to_vec(),
            ControlMessage::RequestBlob(m) => m.encode_to_vec(),
            ControlMessage::ServerConfig(m) => m.encode_to_vec(),
            ControlMessage::SuggestConfig(m) => m.encode_to_vec(),
        };
        Ok(bytes)
    }

    fn decode_payload(&self, id: u16, payload: &[u8]) -> Result<ControlMessage, WireError> {
        let msg = match id {
            0 => ControlMessage::Version(
                messages::Version::decode(payload).map_err(|e| decode_err("Version", e))?,
            ),
            1 => ControlMessage::UdpTunnel(payload.to_vec()),
            2 => ControlMessage::Authenticate(
                messages::Authenticate::decode(payload)
                    .map_err(|e| decode_err("Authenticate", e))?,
            ),
            3 => ControlMessage::Ping(
                messages::Ping::decode(payload).map_err(|e| decode_err("Ping", e))?,
            ),
            4 => ControlMessage::Reject(
                messages::Reject::decode(payload).map_err(|e| decode_err("Reject", e))?,
            ),
            5 => ControlMessage::ServerSync(
                messages::ServerSync::decode(payload).map_err(|e| decode_err("ServerSync", e))?,
            ),
            6 => ControlMessage::ChannelRemove(
                messages::ChannelRemove::decode(payload)
                    .map_err(|e| decode_err("ChannelRemove", e))?,
            ),
            7 => ControlMessage::ChannelState(
                messages::ChannelState::decode(payload)
                    .map_err(|e| decode_err("ChannelState", e))?,
            ),
            8 => ControlMessage::UserRemove(
                messages::UserRemove::decode(payload).map_err(|e| decode_err("UserRemove", e))?,
            ),
            9 => ControlMessage::UserState(
                messages::UserState::decode(payload).map_err(|e| decode_err("UserState", e))?,
            ),
            10 => ControlMessage::BanList(
                messages::BanList::decode(payload).map_err(|e| decode_err("BanList", e))?,
            ),
            11 => ControlMessage::TextMessage(
                messages::TextMessage::decode(payload).map_err(|e| decode_err("TextMessage", e))?,
            ),
            12 => ControlMessage::PermissionDenied(
                messages::PermissionDenied::decode(payload)
                    .map_err(|e| decode_err("PermissionDenied", e))?,
            ),
            13 => ControlMessage::Acl(
                messages::Acl::decode(payload).map_err(|e| decode_err("ACL", e))?,
            ),
            14 => ControlMessage::QueryUsers(
                messages::QueryUsers::decode(payload).map_err(|e| decode_err("QueryUsers", e))?,
            ),
            15 => ControlMessage::CryptSetup(
                messages::CryptSetup::decode(payload).map_err(|e| decode_err("CryptSetup", e))?,
            ),
            16 => ControlMessage::ContextActionModify(
                messages::ContextActionModify::decode(payload)
                    .map_err(|e| decode_err("ContextActionModify", e))?,
            ),
            17 => ControlMessage::ContextAction(
                messages::ContextAction::decode(payload)
                    .map_err(|e| decode_err("ContextAction", e))?,
            ),
            18 => ControlMessage::UserList(
                messages::UserList::decode(payload).map_err(|e| decode_err("UserList", e))?,
            ),
            19 => ControlMessage::VoiceTarget(
                messages::VoiceTarget::decode(payload).map_err(|e| decode_err("VoiceTarget", e))?,
            ),
            20 => ControlMessage::PermissionQuery(
                messages::PermissionQuery::decode(payload)
                    .map_err(|e| decode_err("PermissionQuery", e))?,
            ),
            21 => ControlMessage::CodecVersion(
                messages::CodecVersion::decode(payload)
                    .map_err(|e| decode_err("CodecVersion", e))?,
            ),
            22 => ControlMessage::UserStats(
                messages::UserStats::decode(payload).map_err(|e| decode_err("UserStats", e))?,
            ),
            23 => ControlMessage::RequestBlob(
                messages::RequestBlob::decode(payload).map_err(|e| decode_err("RequestBlob", e))?,
            ),
            24 => ControlMessage::ServerConfig(
                messages::ServerConfig::decode(payload)
                    .map_err(|e| decode_err("ServerConfig", e))?,
            ),
            25 => ControlMessage::SuggestConfig(
                messages::SuggestConfig::decode(payload)
                    .map_err(|e| decode_err("SuggestConfig", e))?,
            ),
            _ => return Err(WireError::UnknownMessageId(id)),
        };
        Ok(msg)
    }
}
