//! Source to target user identity resolution.

use crate::gitlab::GitLabUser;
use std::collections::BTreeMap;

/// Maps source user identities onto GitLab users.
///
/// Resolution never fails: an identity that cannot be matched resolves to the
/// configured fallback account, so a misattributed author is preferred over a
/// stalled migration.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    overrides: BTreeMap<String, String>,
    roster: Vec<GitLabUser>,
    fallback: String,
}

impl IdentityResolver {
    /// Creates a resolver.
    ///
    /// * `overrides` - source display name to GitLab username
    /// * `roster` - GitLab users fetched at startup
    /// * `fallback` - username used when nothing matches
    pub fn new(
        overrides: BTreeMap<String, String>,
        roster: Vec<GitLabUser>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            overrides,
            roster,
            fallback: fallback.into(),
        }
    }

    /// Resolves a source identity to a GitLab username.
    ///
    /// Lookup order: override table, exact (case-sensitive) roster username,
    /// fallback account.
    #[must_use]
    pub fn resolve(&self, source_identity: &str) -> &str {
        if let Some(username) = self.overrides.get(source_identity) {
            return username;
        }
        self.roster
            .iter()
            .find(|user| user.username == source_identity)
            .map_or(self.fallback.as_str(), |user| user.username.as_str())
    }

    /// Resolves a source identity to a GitLab user id for assignment.
    ///
    /// Matches the override or roster username first, then the roster display
    /// name. Unlike [`resolve`](Self::resolve) there is no fallback; unknown
    /// users leave the issue unassigned.
    #[must_use]
    pub fn user_id(&self, source_identity: &str) -> Option<u64> {
        let username = self
            .overrides
            .get(source_identity)
            .map_or(source_identity, String::as_str);

        self.roster
            .iter()
            .find(|user| user.username == username)
            .or_else(|| self.roster.iter().find(|user| user.name == source_identity))
            .map(|user| user.id)
    }

    /// Returns the fallback username.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, username: &str, name: &str) -> GitLabUser {
        GitLabUser {
            id,
            username: username.to_string(),
            name: name.to_string(),
        }
    }

    fn resolver() -> IdentityResolver {
        let overrides = BTreeMap::from([
            ("Alice Smith".to_string(), "asmith".to_string()),
            ("bob".to_string(), "robert".to_string()),
        ]);
        let roster = vec![
            user(1, "asmith", "Alice Smith"),
            user(2, "bob", "Bob Jones"),
            user(3, "robert", "Robert Jones"),
            user(4, "carol", "Carol White"),
        ];
        IdentityResolver::new(overrides, roster, "migration-bot")
    }

    #[test]
    fn override_wins_over_roster_match() {
        // "bob" is both an override key and a roster username.
        assert_eq!(resolver().resolve("bob"), "robert");
    }

    #[test]
    fn roster_match_is_exact() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("carol"), "carol");
        assert_eq!(resolver.resolve("Carol"), "migration-bot");
    }

    #[test]
    fn unknown_identity_falls_back() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("Someone Else"), "migration-bot");
        assert_eq!(resolver.fallback(), "migration-bot");
    }

    #[test]
    fn user_id_follows_override_then_display_name() {
        let resolver = resolver();
        assert_eq!(resolver.user_id("Alice Smith"), Some(1));
        assert_eq!(resolver.user_id("bob"), Some(3));
        assert_eq!(resolver.user_id("Carol White"), Some(4));
        assert_eq!(resolver.user_id("Nobody"), None);
    }
}
