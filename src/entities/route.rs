use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Route {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    pub fn distance(&self) -> usize {
        let origin = self.origin.chars().count();
        let destination = self.destination.chars().count();

        origin.abs_diff(destination)
    }
}

#[test]
fn route_distance_test() {
    assert_eq!(Route::new("A", "ABCDE").distance(), 4);
    assert_eq!(Route::new("ABCDE", "A").distance(), 4);
    assert_eq!(Route::new("X", "Y").distance(), 0);
    assert_eq!(Route::new("", "").distance(), 0);

    // multi-byte characters count once
    assert_eq!(Route::new("Zürich", "Bern").distance(), 2);
}
