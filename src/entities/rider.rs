use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub id: u64,
}

impl Rider {
    pub fn new(user_id: u64) -> Self {
        Self { id: user_id }
    }
}
