use crate::auth::User;

#[derive(Debug, Default)]
pub struct Registry {
    users: Vec<User>,
}

impl Registry {
    pub fn add_user(&mut self, user: User) {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    #[cfg(test)]
    pub fn find_user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.validate_password(password))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[test]
fn authenticate_test() {
    use crate::auth::Role;

    let mut registry = Registry::default();
    registry.add_user(User::new(1, "admin", "admin123", Role::Admin));
    registry.add_user(User::new(2, "rider1", "pass123", Role::Rider));

    let user = registry.authenticate("rider1", "pass123").unwrap();
    assert_eq!(user.id, 2);
    assert_eq!(user.role, Role::Rider);

    assert!(registry.authenticate("rider1", "wrong").is_none());
    assert!(registry.authenticate("nobody", "pass123").is_none());
    assert!(registry.authenticate("admin", "pass123").is_none());
}

#[test]
fn add_user_overwrites_by_id_test() {
    use crate::auth::Role;

    let mut registry = Registry::default();
    registry.add_user(User::new(1, "first", "a", Role::Rider));
    registry.add_user(User::new(2, "second", "b", Role::Driver));
    registry.add_user(User::new(1, "renamed", "c", Role::Admin));

    assert_eq!(registry.len(), 2);
    assert!(registry.authenticate("first", "a").is_none());
    assert_eq!(registry.find_user(1).unwrap().username, "renamed");
    assert_eq!(registry.find_user(1).unwrap().role, Role::Admin);
}

#[test]
fn duplicate_usernames_shadow_test() {
    use crate::auth::Role;

    let mut registry = Registry::default();
    registry.add_user(User::new(5, "sam", "same", Role::Driver));
    registry.add_user(User::new(4, "sam", "same", Role::Rider));
    registry.add_user(User::new(6, "sam", "other", Role::Admin));

    // first in insertion order wins, not lowest id
    assert_eq!(registry.authenticate("sam", "same").unwrap().id, 5);
    assert_eq!(registry.authenticate("sam", "other").unwrap().id, 6);
}
