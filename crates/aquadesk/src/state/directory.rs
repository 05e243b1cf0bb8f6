use std::collections::BTreeMap;

use aquadesk_core::resources::User;

/// Users lookup shared by screens that show or check account holders.
///
/// Filled from the users collection whenever it is loaded or changed.
#[derive(Debug, Default)]
pub struct Directory {
    users: BTreeMap<i64, String>,
    loaded: bool,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_users(&mut self, users: &[User]) {
        self.users = users.iter().map(|u| (u.id, u.name.clone())).collect();
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn user_name(&self, id: i64) -> Option<&str> {
        self.users.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// One-line description of a user id typed into a form
    pub fn describe_user(&self, raw_id: &str) -> Option<String> {
        if !self.loaded {
            return None;
        }
        let id = raw_id.trim().parse::<i64>().ok()?;
        Some(match self.user_name(id) {
            Some(name) => format!("Account holder: {name}"),
            None => format!("No user with id {id}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_describe_user() {
        let mut directory = Directory::new();
        assert_eq!(directory.describe_user("1"), None);

        directory.replace_users(&[user(1, "Ana Ruiz"), user(2, "Ben Cole")]);
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.describe_user(" 2 ").as_deref(),
            Some("Account holder: Ben Cole")
        );
        assert_eq!(
            directory.describe_user("7").as_deref(),
            Some("No user with id 7")
        );
        assert_eq!(directory.describe_user("abc"), None);
    }

    #[test]
    fn test_replace_drops_old_entries() {
        let mut directory = Directory::new();
        directory.replace_users(&[user(1, "Ana Ruiz")]);
        directory.replace_users(&[user(3, "Cy Ng")]);
        assert_eq!(directory.user_name(1), None);
        assert_eq!(directory.user_name(3), Some("Cy Ng"));
    }
}
