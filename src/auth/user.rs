use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Rider,
    Driver,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: u64,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn validate_password(&self, password: &str) -> bool {
        self.password == password
    }
}

#[test]
fn validate_password_test() {
    let user = User::new(2, "rider1", "pass123", Role::Rider);

    assert!(user.validate_password("pass123"));
    assert!(!user.validate_password("pass1234"));
    assert!(!user.validate_password("PASS123"));
    assert!(!user.validate_password(""));
}
