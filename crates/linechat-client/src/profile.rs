//! User identity sent during login.

use linechat_proto::ClientCommand;

/// Identity announced to the server right after connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Account name (`LOGIN`).
    pub user: String,
    /// Numeric user id (`SET_ID`).
    pub id: u64,
    /// Self introduction (`SET_INTRO`).
    pub introduction: String,
    /// Level string (`SET_LEVEL`).
    pub level: String,
    /// Client description (`CLIENT_INFO`).
    pub client_info: String,
}

impl UserProfile {
    /// Commands of the login conversation, in send order.
    pub fn login_commands(&self) -> [ClientCommand; 5] {
        [
            ClientCommand::Login { user: self.user.clone() },
            ClientCommand::SetIntro(self.introduction.clone()),
            ClientCommand::SetLevel(self.level.clone()),
            ClientCommand::ClientInfo(self.client_info.clone()),
            ClientCommand::SetId(self.id),
        ]
    }
}
