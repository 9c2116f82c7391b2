use harbor_types::prelude::{ObjectId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyCommon {
    pub id: ObjectId,
    pub name: String,
    pub realm_id: ObjectId,
    pub created_at: Timestamp,
    pub active: bool,
    #[serde(default)]
    pub acl_entry_ids: Vec<ObjectId>,
}

impl PartyCommon {
    pub fn new(id: ObjectId, name: impl Into<String>, realm_id: ObjectId) -> Self {
        Self {
            id,
            name: name.into(),
            realm_id,
            created_at: Timestamp::now(),
            active: true,
            acl_entry_ids: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub at: Timestamp,
    pub succeeded: bool,
}

impl LoginAttempt {
    pub fn now(succeeded: bool) -> Self {
        Self {
            at: Timestamp::now(),
            succeeded,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub common: PartyCommon,
    /// Login name, distinct from the object id.
    pub user_id: UserId,
    pub password_hash: String,
    /// Insertion order; groups are consulted in this order.
    #[serde(default)]
    pub group_ids: Vec<ObjectId>,
    #[serde(default)]
    pub login_attempts: Vec<LoginAttempt>,
    #[serde(default)]
    pub event_ids: Vec<ObjectId>,
}

impl User {
    pub fn new(common: PartyCommon, user_id: UserId, password_hash: impl Into<String>) -> Self {
        Self {
            common,
            user_id,
            password_hash: password_hash.into(),
            group_ids: Vec::new(),
            login_attempts: Vec::new(),
            event_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.common.id
    }

    /// Attempt times in Unix seconds, newest last.
    pub fn most_recent_login_attempts(&self) -> Vec<i64> {
        self.login_attempts
            .iter()
            .map(|attempt| attempt.at.as_unix_seconds())
            .collect()
    }

    /// Failures at or after `since` that were not followed by a success.
    pub fn recent_failures(&self, since: Timestamp) -> usize {
        self.login_attempts
            .iter()
            .rev()
            .take_while(|attempt| !attempt.succeeded)
            .filter(|attempt| attempt.at >= since)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub common: PartyCommon,
    pub description: Option<String>,
    /// Member users' object ids. Groups never contain groups.
    #[serde(default)]
    pub user_ids: Vec<ObjectId>,
}

impl Group {
    pub fn new(common: PartyCommon, description: Option<String>) -> Self {
        Self {
            common,
            description,
            user_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.common.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Party {
    User(User),
    Group(Group),
}

impl Party {
    pub fn common(&self) -> &PartyCommon {
        match self {
            Party::User(user) => &user.common,
            Party::Group(group) => &group.common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut PartyCommon {
        match self {
            Party::User(user) => &mut user.common,
            Party::Group(group) => &mut group.common,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.common().id
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn realm_id(&self) -> &ObjectId {
        &self.common().realm_id
    }

    pub fn is_active(&self) -> bool {
        self.common().active
    }

    pub fn acl_entry_ids(&self) -> &[ObjectId] {
        &self.common().acl_entry_ids
    }

    /// Groups a user belongs to; always empty for a group.
    pub fn group_ids(&self) -> &[ObjectId] {
        match self {
            Party::User(user) => &user.group_ids,
            Party::Group(_) => &[],
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Party::User(user) => Some(user),
            Party::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Party::Group(group) => Some(group),
            Party::User(_) => None,
        }
    }
}

impl From<User> for Party {
    fn from(user: User) -> Self {
        Party::User(user)
    }
}

impl From<Group> for Party {
    fn from(group: Group) -> Self {
        Party::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            PartyCommon::new(ObjectId::new("u1"), "Alice", ObjectId::new("realm")),
            UserId::new("alice"),
            "hash",
        )
    }

    #[test]
    fn recent_failures_stop_at_last_success() {
        let mut user = user();
        let at = |ms| Timestamp(ms);
        user.login_attempts = vec![
            LoginAttempt { at: at(1_000), succeeded: false },
            LoginAttempt { at: at(2_000), succeeded: true },
            LoginAttempt { at: at(3_000), succeeded: false },
            LoginAttempt { at: at(4_000), succeeded: false },
        ];
        assert_eq!(user.recent_failures(at(0)), 2);
        assert_eq!(user.recent_failures(at(3_500)), 1);
        assert_eq!(user.most_recent_login_attempts(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn groups_report_no_group_ids() {
        let group = Group::new(
            PartyCommon::new(ObjectId::new("g1"), "devs", ObjectId::new("realm")),
            None,
        );
        let party: Party = group.into();
        assert!(party.group_ids().is_empty());
        assert!(party.as_group().is_some());
        let party: Party = user().into();
        assert_eq!(party.name(), "Alice");
        assert!(party.is_active());
    }
}
