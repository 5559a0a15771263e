use serde::{Deserialize, Serialize};

/// Events a client may send. Wire form: `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "chooseName")]
    ChooseName(String),
    #[serde(rename = "create room")]
    CreateRoom(String),
    #[serde(rename = "join room")]
    JoinRoom(String),
    #[serde(rename = "chat message")]
    ChatMessage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "chooseName")]
    ChooseName,
    #[serde(rename = "update current room")]
    UpdateCurrentRoom(String),
    #[serde(rename = "updateUserList")]
    UpdateUserList(Vec<String>),
    #[serde(rename = "update room list")]
    UpdateRoomList(Vec<String>),
    #[serde(rename = "chat message")]
    ChatMessage(String),
}
