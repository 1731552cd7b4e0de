//! Application state machine.
//!
//! [`App`] owns everything the user sees: the input line, the connection
//! log, the room registry with its chat logs, and the current mode and view.
//! It consumes [`AppEvent`]s and returns [`AppAction`]s for the event loop
//! to carry out; it never touches the network or the terminal itself.
//!
//! # Modes
//!
//! The submitted line is interpreted according to [`Mode`]:
//!
//! - `Direct`: sent to the server as typed
//! - `Room`: `open <id>` and `close <id>`
//! - `Chat`: `room <id>` selects a room, anything else is shouted into it
//! - `Member`: input is ignored
//!
//! `quit` as the first word logs out and quits in every mode.

use linechat_proto::{ClientCommand, OkReply, RoomId, ServerEvent};

use crate::{
    AppAction, AppEvent, ChatLogs, EditBuffer, KeyInput, Mode, Region, RingLog, RoomEntry, View,
};

/// Lines kept in the connection log.
pub const CONNECTION_LOG_LINES: usize = 20;

/// Application state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Logged-in user name, for display.
    user: String,
    mode: Mode,
    view: View,
    edit: EditBuffer,
    /// Every raw line received from the server.
    connection_log: RingLog,
    chat: ChatLogs,
    /// Feedback for the last rejected input. `None` if nothing to report.
    status_message: Option<String>,
}

impl App {
    /// Create the state for a session logged in as `user`.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            mode: Mode::default(),
            view: View::default(),
            edit: EditBuffer::new(),
            connection_log: RingLog::new(CONNECTION_LOG_LINES),
            chat: ChatLogs::default(),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Line(line) => self.handle_line(&line),
            AppEvent::Disconnected => {
                tracing::info!("server closed the connection");
                vec![AppAction::Quit]
            },
            AppEvent::Tick => vec![AppAction::Render],
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => self.edit.insert_char(c),
            KeyInput::Space => self.edit.insert_char(' '),
            KeyInput::Left => self.edit.move_cursor_backward(),
            KeyInput::Right => self.edit.move_cursor_forward(),
            KeyInput::Backspace => self.edit.delete_char_backward(),
            KeyInput::Enter => return self.submit(),
            KeyInput::Esc => {
                tracing::info!("quit by escape key");
                return vec![AppAction::Quit];
            },
            KeyInput::NextMode => self.enter_mode(self.mode.next()),
            KeyInput::ShowConnectionLog => self.view = View::ConnectionLog,
        }
        vec![AppAction::Render]
    }

    fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Direct => {
                self.chat.set_show_members(false);
                self.view = View::ConnectionLog;
            },
            Mode::Room => self.view = View::RoomList,
            Mode::Chat => {
                self.chat.set_show_members(false);
                self.view = View::Chat;
            },
            Mode::Member => self.chat.set_show_members(true),
        }
        tracing::debug!(%mode, "mode changed");
    }

    fn submit(&mut self) -> Vec<AppAction> {
        let line = self.edit.take_and_clear();
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return vec![AppAction::Render];
        };
        self.status_message = None;

        if first == "quit" {
            tracing::info!("quit by keyboard command");
            return vec![AppAction::Send(ClientCommand::Logout), AppAction::Quit];
        }

        let command = match self.mode {
            Mode::Direct => Some(ClientCommand::Direct(line.clone())),
            Mode::Room => {
                let room = words.next().and_then(|word| word.parse::<RoomId>().ok());
                match (first, room) {
                    ("open", Some(room)) => Some(ClientCommand::OpenRoom(room)),
                    ("close", Some(room)) => Some(ClientCommand::CloseRoom(room)),
                    ("open" | "close", None) => {
                        self.set_status(format!("usage: {first} <room id>"));
                        None
                    },
                    _ => {
                        self.set_status(format!("unknown room command: {first}"));
                        None
                    },
                }
            },
            Mode::Chat => {
                let room = words.next().and_then(|word| word.parse::<RoomId>().ok());
                match (first, room, self.chat.current_room()) {
                    ("room", Some(room), _) => {
                        self.chat.set_current_room(Some(room));
                        None
                    },
                    (_, _, Some(current)) => {
                        Some(ClientCommand::Shout { room_id: current, text: line.clone() })
                    },
                    (_, _, None) => {
                        self.set_status("no room selected; use: room <id>");
                        None
                    },
                }
            },
            Mode::Member => None,
        };

        match command {
            Some(command) => vec![AppAction::Send(command), AppAction::Render],
            None => vec![AppAction::Render],
        }
    }

    fn handle_line(&mut self, line: &str) -> Vec<AppAction> {
        self.connection_log.append(format!("Server response: {line}"));

        let event = match ServerEvent::decode(line) {
            Ok(event) => event,
            Err(error) => {
                tracing::debug!(%error, line, "dropping undecodable server line");
                return vec![AppAction::Render];
            },
        };

        match event {
            ServerEvent::Quit => {
                tracing::info!("quit by server message");
                return vec![AppAction::Quit];
            },
            ServerEvent::Message { room_id, text } => self.chat.append_text(room_id, text),
            ServerEvent::Ok(OkReply::Ping) => {
                return vec![AppAction::ResetDeadlines, AppAction::Render];
            },
            ServerEvent::Ok(OkReply::OpenRoom(room_id)) => {
                self.chat.set_current_room(Some(room_id));
                self.chat.registry_mut().set_entered(room_id, true);
            },
            ServerEvent::Ok(OkReply::AddRoom(room_id)) => {
                self.chat.set_current_room(Some(room_id));
            },
            ServerEvent::Ok(OkReply::CloseRoom(room_id)) => {
                self.chat.registry_mut().set_entered(room_id, false);
            },
            ServerEvent::Ok(OkReply::Other(_)) => {},
            ServerEvent::ServerPing => {
                return vec![AppAction::Send(ClientCommand::AckServerPing), AppAction::Render];
            },
            ServerEvent::RoomAdded { room_id, owner, name } => {
                self.chat.add_room(RoomEntry::new(room_id, name, owner));
            },
            ServerEvent::RoomRemoved { room_id } => self.chat.registry_mut().remove(room_id),
            ServerEvent::Enter { room_id, user } => {
                self.chat.registry_mut().add_member(room_id, &user);
            },
            ServerEvent::Leave { room_id, user } => {
                self.chat.registry_mut().remove_member(room_id, &user);
            },
            ServerEvent::Users { room_id, users } => {
                for user in &users {
                    self.chat.registry_mut().add_member(room_id, user);
                }
            },
        }
        vec![AppAction::Render]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Logged-in user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Current input mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Region shown in the main pane.
    pub fn view(&self) -> View {
        self.view
    }

    /// The input line.
    pub fn edit(&self) -> &EditBuffer {
        &self.edit
    }

    /// Raw server lines, newest first.
    pub fn connection_log(&self) -> &RingLog {
        &self.connection_log
    }

    /// Rooms and their logs.
    pub fn chat(&self) -> &ChatLogs {
        &self.chat
    }

    /// Selected room and whether we are inside it.
    pub fn current_room(&self) -> Option<(RoomId, bool)> {
        let room = self.chat.current_room()?;
        let entered = self.chat.registry().get(room).is_some_and(|entry| entry.entered);
        Some((room, entered))
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The region selected by the current view.
    pub fn text_region(&self) -> Region<'_> {
        match self.view {
            View::ConnectionLog => Region::Log(&self.connection_log),
            View::RoomList => Region::RoomList(self.chat.registry()),
            View::Chat => Region::Chat(&self.chat),
        }
    }

    /// The input line as a region.
    pub fn edit_region(&self) -> Region<'_> {
        Region::Edit(&self.edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_line(app: &mut App, text: &str) -> Vec<AppAction> {
        for c in text.chars() {
            let key = if c == ' ' { KeyInput::Space } else { KeyInput::Char(c) };
            app.handle(AppEvent::Key(key));
        }
        app.handle(AppEvent::Key(KeyInput::Enter))
    }

    fn app_in(mode: Mode) -> App {
        let mut app = App::new("alice");
        while app.mode != mode {
            app.handle(AppEvent::Key(KeyInput::NextMode));
        }
        app
    }

    fn server(app: &mut App, line: &str) -> Vec<AppAction> {
        app.handle(AppEvent::Line(line.to_owned()))
    }

    #[test]
    fn starts_in_direct_mode_on_connection_log() {
        let app = App::new("alice");

        assert_eq!(app.mode(), Mode::Direct);
        assert_eq!(app.view(), View::ConnectionLog);
        assert!(matches!(app.text_region(), Region::Log(_)));
    }

    #[test]
    fn mode_cycle_switches_views() {
        let mut app = App::new("alice");

        app.handle(AppEvent::Key(KeyInput::NextMode));
        assert_eq!((app.mode(), app.view()), (Mode::Room, View::RoomList));

        app.handle(AppEvent::Key(KeyInput::NextMode));
        assert_eq!((app.mode(), app.view()), (Mode::Chat, View::Chat));
        assert!(!app.chat().show_members());

        app.handle(AppEvent::Key(KeyInput::NextMode));
        assert_eq!((app.mode(), app.view()), (Mode::Member, View::Chat));
        assert!(app.chat().show_members());

        app.handle(AppEvent::Key(KeyInput::NextMode));
        assert_eq!((app.mode(), app.view()), (Mode::Direct, View::ConnectionLog));
        assert!(!app.chat().show_members());
    }

    #[test]
    fn f3_shows_connection_log_without_mode_change() {
        let mut app = app_in(Mode::Chat);

        app.handle(AppEvent::Key(KeyInput::ShowConnectionLog));

        assert_eq!(app.mode(), Mode::Chat);
        assert_eq!(app.view(), View::ConnectionLog);
    }

    #[test]
    fn direct_sends_verbatim() {
        let mut app = App::new("alice");

        let actions = type_line(&mut app, "ADD_ROOM x");

        assert_eq!(actions, [
            AppAction::Send(ClientCommand::Direct("ADD_ROOM x".into())),
            AppAction::Render
        ]);
        assert!(app.edit().is_empty());
    }

    #[test]
    fn quit_logs_out_in_every_mode() {
        for mode in [Mode::Direct, Mode::Room, Mode::Chat, Mode::Member] {
            let mut app = app_in(mode);

            let actions = type_line(&mut app, "quit now");

            assert_eq!(actions, [AppAction::Send(ClientCommand::Logout), AppAction::Quit], "{mode}");
        }
    }

    #[test]
    fn empty_submit_sends_nothing() {
        let mut app = App::new("alice");

        assert_eq!(type_line(&mut app, ""), [AppAction::Render]);
        assert_eq!(type_line(&mut app, "   "), [AppAction::Render]);
    }

    #[test]
    fn escape_quits_without_logout() {
        let mut app = App::new("alice");

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
    }

    #[test]
    fn room_mode_commands() {
        let mut app = app_in(Mode::Room);

        assert_eq!(type_line(&mut app, "open 3")[0], AppAction::Send(ClientCommand::OpenRoom(3)));
        assert_eq!(type_line(&mut app, "close 3")[0], AppAction::Send(ClientCommand::CloseRoom(3)));
    }

    #[test]
    fn room_mode_rejects_bad_input() {
        let mut app = app_in(Mode::Room);

        assert_eq!(type_line(&mut app, "open"), [AppAction::Render]);
        assert_eq!(app.status_message(), Some("usage: open <room id>"));

        assert_eq!(type_line(&mut app, "close abc"), [AppAction::Render]);
        assert_eq!(type_line(&mut app, "hello 1"), [AppAction::Render]);
        assert_eq!(app.status_message(), Some("unknown room command: hello"));
    }

    #[test]
    fn chat_mode_selects_room_then_shouts() {
        let mut app = app_in(Mode::Chat);

        assert_eq!(type_line(&mut app, "hi"), [AppAction::Render]);
        assert!(app.status_message().is_some());

        assert_eq!(type_line(&mut app, "room 2"), [AppAction::Render]);
        assert_eq!(app.chat().current_room(), Some(2));

        assert_eq!(type_line(&mut app, "hi there"), [
            AppAction::Send(ClientCommand::Shout { room_id: 2, text: "hi there".into() }),
            AppAction::Render
        ]);
    }

    #[test]
    fn chat_mode_non_numeric_room_is_shouted() {
        let mut app = app_in(Mode::Chat);
        type_line(&mut app, "room 5");

        assert_eq!(type_line(&mut app, "room service")[0], AppAction::Send(ClientCommand::Shout {
            room_id: 5,
            text: "room service".into()
        }));
    }

    #[test]
    fn member_mode_ignores_input() {
        let mut app = app_in(Mode::Member);

        assert_eq!(type_line(&mut app, "open 1"), [AppAction::Render]);
    }

    #[test]
    fn every_server_line_is_logged() {
        let mut app = App::new("alice");

        server(&mut app, "OK LOGIN");
        server(&mut app, "garbage here");

        assert_eq!(app.connection_log().get(0), "Server response: garbage here");
        assert_eq!(app.connection_log().get(1), "Server response: OK LOGIN");
    }

    #[test]
    fn server_ping_is_acknowledged() {
        let mut app = App::new("alice");

        assert_eq!(server(&mut app, "SVR_PING"), [
            AppAction::Send(ClientCommand::AckServerPing),
            AppAction::Render
        ]);
    }

    #[test]
    fn ping_reply_resets_deadlines() {
        let mut app = App::new("alice");

        assert_eq!(server(&mut app, "OK PING"), [AppAction::ResetDeadlines, AppAction::Render]);
    }

    #[test]
    fn server_quit() {
        let mut app = App::new("alice");

        assert_eq!(server(&mut app, "quit"), [AppAction::Quit]);
        assert_eq!(app.handle(AppEvent::Disconnected), [AppAction::Quit]);
    }

    #[test]
    fn open_and_close_room() {
        let mut app = App::new("alice");
        server(&mut app, "ROOM_ADDED 7 bob x lobby");

        server(&mut app, "OK OPEN_ROOM 7");
        assert_eq!(app.current_room(), Some((7, true)));
        assert_eq!(app.chat().registry().line(0), "7 lobby bob entered");

        server(&mut app, "OK CLOSE_ROOM 7");
        assert_eq!(app.current_room(), Some((7, false)));

        server(&mut app, "OK ADD_ROOM 9");
        assert_eq!(app.chat().current_room(), Some(9));
    }

    #[test]
    fn messages_land_in_room_log() {
        let mut app = app_in(Mode::Chat);
        server(&mut app, "MESSAGE 4 hello  world");
        type_line(&mut app, "room 4");

        assert_eq!(app.text_region().line(0), "hello  world");
    }

    #[test]
    fn roster_updates() {
        let mut app = app_in(Mode::Member);
        server(&mut app, "ROOM_ADDED 1 bob x lobby");
        server(&mut app, "OK OPEN_ROOM 1");
        server(&mut app, "USERS 1 ann:bob:");
        server(&mut app, "ENTER 1 cy");
        server(&mut app, "LEAVE 1 bob");

        let region = app.text_region();
        let members: Vec<String> = (0..3).map(|n| region.line(n)).collect();
        assert_eq!(members, ["ann", "cy", ""]);
    }

    #[test]
    fn early_message_does_not_hide_room_name() {
        let mut app = App::new("alice");
        server(&mut app, "MESSAGE 4 early bird");
        server(&mut app, "ROOM_ADDED 4 bob x lobby");

        assert_eq!(app.chat().registry().line(0), "4 lobby bob");
    }

    #[test]
    fn room_removed() {
        let mut app = App::new("alice");
        server(&mut app, "ROOM_ADDED 1 bob x lobby");
        server(&mut app, "ROOM_REMOVED 1");

        assert!(app.chat().registry().is_empty());
    }

    #[test]
    fn cursor_keys_edit_line() {
        let mut app = App::new("alice");
        app.handle(AppEvent::Key(KeyInput::Char('a')));
        app.handle(AppEvent::Key(KeyInput::Char('c')));
        app.handle(AppEvent::Key(KeyInput::Left));
        app.handle(AppEvent::Key(KeyInput::Char('b')));
        app.handle(AppEvent::Key(KeyInput::Right));
        app.handle(AppEvent::Key(KeyInput::Backspace));

        assert_eq!(app.edit().text(), "ab");
        assert_eq!(app.edit_region().line(0), "ab");
    }
}
