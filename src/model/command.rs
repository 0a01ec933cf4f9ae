//! Closed enumerations driving the pipeline: what to do, how to run it, and how
//! it ended.

use std::fmt::Display;

/// The operation requested by a transport request.
///
/// `None` only exists before inbound mapping; reaching the outbound mapper with
/// it is an internal-consistency failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Command {
    #[default]
    None,
    Create,
    Read,
    Update,
    Delete,
    Search,
    Enable,
    Disable,
    Accessible,
}

impl Command {
    /// Every command a request can carry, in wire order.
    pub const ALL: [Command; 8] = [
        Command::Create,
        Command::Read,
        Command::Update,
        Command::Delete,
        Command::Search,
        Command::Enable,
        Command::Disable,
        Command::Accessible,
    ];

    /// Search and Accessible answer with a list of streams, the rest with one.
    pub fn is_multi(self) -> bool {
        matches!(self, Command::Search | Command::Accessible)
    }

    /// Commands addressing a single existing stream by id.
    pub fn takes_id(self) -> bool {
        matches!(
            self,
            Command::Read | Command::Update | Command::Delete | Command::Enable | Command::Disable
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::None => "none",
            Command::Create => "create",
            Command::Read => "read",
            Command::Update => "update",
            Command::Delete => "delete",
            Command::Search => "search",
            Command::Enable => "enable",
            Command::Disable => "disable",
            Command::Accessible => "accessible",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which execution strategy answers the command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkMode {
    #[default]
    Prod,
    Test,
    Stub,
}

impl Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WorkMode::Prod => "prod",
            WorkMode::Test => "test",
            WorkMode::Stub => "stub",
        })
    }
}

/// Canned outcome selector, only meaningful under [`WorkMode::Stub`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StubCase {
    #[default]
    None,
    Success,
    NotFound,
    BadId,
    BadClass,
    BadMethod,
    BadDescription,
    CannotDelete,
    BadSearchString,
    DbError,
}

impl Display for StubCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StubCase::None => "none",
            StubCase::Success => "success",
            StubCase::NotFound => "not_found",
            StubCase::BadId => "bad_id",
            StubCase::BadClass => "bad_class",
            StubCase::BadMethod => "bad_method",
            StubCase::BadDescription => "bad_description",
            StubCase::CannotDelete => "cannot_delete",
            StubCase::BadSearchString => "bad_search_string",
            StubCase::DbError => "db_error",
        })
    }
}

/// Outcome classification of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    None,
    Running,
    Failing,
    Finishing,
}

impl State {
    /// `None` while undecided, otherwise whether the caller sees success.
    pub fn is_success(self) -> Option<bool> {
        match self {
            State::None => None,
            State::Running | State::Finishing => Some(true),
            State::Failing => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Command::default(), Command::None);
        assert_eq!(WorkMode::default(), WorkMode::Prod);
        assert_eq!(StubCase::default(), StubCase::None);
        assert_eq!(State::default(), State::None);
    }

    #[test]
    fn test_payload_shape_per_command() {
        let multi: Vec<_> = Command::ALL.into_iter().filter(|c| c.is_multi()).collect();
        assert_eq!(multi, vec![Command::Search, Command::Accessible]);
        assert!(!Command::Create.takes_id());
        assert!(Command::Disable.takes_id());
    }

    #[test]
    fn test_state_success_classification() {
        assert_eq!(State::None.is_success(), None);
        assert_eq!(State::Running.is_success(), Some(true));
        assert_eq!(State::Finishing.is_success(), Some(true));
        assert_eq!(State::Failing.is_success(), Some(false));
    }
}
