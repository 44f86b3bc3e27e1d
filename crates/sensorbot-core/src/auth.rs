//! The set of users allowed to talk to the bot.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error::{AuthorizationError, InvalidUserId};

/// User ids permitted to use the bot.
///
/// Built once at startup and shared read-only afterwards. An empty set
/// authorizes nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizedUsers {
    ids: HashSet<i64>,
}

impl AuthorizedUsers {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `user_id` is on the list.
    #[must_use]
    pub fn contains(&self, user_id: i64) -> bool {
        self.ids.contains(&user_id)
    }

    /// Check a possibly-absent sender against the list.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError`] when the sender is missing or not
    /// listed.
    pub fn check(&self, sender_id: Option<i64>) -> Result<i64, AuthorizationError> {
        let sender_id = sender_id.ok_or(AuthorizationError::AnonymousSender)?;
        if self.contains(sender_id) {
            Ok(sender_id)
        } else {
            Err(AuthorizationError::NotAuthorized { sender_id })
        }
    }

    /// Number of authorized users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nobody is authorized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<i64> for AuthorizedUsers {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl FromStr for AuthorizedUsers {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_user_ids(s).map(|ids| ids.into_iter().collect())
    }
}

/// Parse a comma-separated list of user ids.
///
/// Surrounding whitespace is trimmed and empty entries are skipped, so
/// `"1, 2,3 , ,4"` yields `[1, 2, 3, 4]`.
///
/// # Errors
///
/// Returns [`InvalidUserId`] for the first entry that is not an integer.
pub fn parse_user_ids(list: &str) -> Result<Vec<i64>, InvalidUserId> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<i64>().map_err(|_| InvalidUserId {
                entry: entry.to_owned(),
            })
        })
        .collect()
}
