macro_rules! read_or_quit {
    ($console:expr, $label:expr) => {
        match $console.prompt($label)? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        }
    };
}

mod admin;
mod console;
mod driver;
mod rider;

use std::io::{BufRead, Write};

pub use console::Console;

use crate::{
    api::{DynAPI, UserAPI},
    auth::Role,
    error::{invalid_input_error, Error},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Back,
    Quit,
}

pub async fn run<R: BufRead, W: Write>(
    api: &DynAPI,
    console: &mut Console<R, W>,
) -> Result<(), Error> {
    loop {
        console.say("\nWelcome to RideShare!")?;
        console.say("1. Login")?;
        console.say("2. Exit")?;

        let choice = match console.prompt("Select an option: ")? {
            Some(choice) => choice,
            None => return Ok(()),
        };

        match choice.trim() {
            "1" => {
                if login(api, console).await? == Flow::Quit {
                    return Ok(());
                }
            }
            "2" => return Ok(()),
            _ => console.say("Invalid option!")?,
        }
    }
}

async fn login<R: BufRead, W: Write>(
    api: &DynAPI,
    console: &mut Console<R, W>,
) -> Result<Flow, Error> {
    let username = read_or_quit!(console, "Enter username: ");
    let password = read_or_quit!(console, "Enter password: ");

    let user = match api.authenticate(&username, &password).await? {
        Some(user) => user,
        None => {
            console.say("Authentication failed.")?;
            return Ok(Flow::Back);
        }
    };

    match user.role {
        Role::Rider => rider::menu(api, console, &user).await,
        Role::Driver => driver::menu(api, console, &user).await,
        Role::Admin => admin::menu(console),
    }
}

pub fn parse_seats(input: &str) -> Result<u32, Error> {
    match input.trim().parse::<u32>() {
        Ok(seats) if seats > 0 => Ok(seats),
        _ => Err(invalid_input_error()),
    }
}

#[cfg(test)]
fn run_script(api: &DynAPI, script: &str) -> String {
    use std::io::Cursor;
    use tokio_test::block_on;

    let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    block_on(run(api, &mut console)).unwrap();

    String::from_utf8(console.into_output()).unwrap()
}

#[cfg(test)]
fn seeded_api() -> DynAPI {
    use crate::engine::Engine;
    use crate::seed::Seed;
    use std::sync::Arc;
    use tokio_test::block_on;

    let api: DynAPI = Arc::new(Engine::new());
    block_on(Seed::default().apply(api.as_ref())).unwrap();

    api
}

#[test]
fn parse_seats_test() {
    assert_eq!(parse_seats("2").unwrap(), 2);
    assert_eq!(parse_seats(" 4 ").unwrap(), 4);
    assert!(parse_seats("0").unwrap_err().is_invalid_input_error());
    assert!(parse_seats("two").is_err());
    assert!(parse_seats("-1").is_err());
    assert!(parse_seats("1.5").is_err());
    assert!(parse_seats("").is_err());
}

#[test]
fn exit_and_invalid_option_test() {
    let api = seeded_api();
    let output = run_script(&api, "9\n2\n");

    assert!(output.contains("Welcome to RideShare!"));
    assert!(output.contains("Invalid option!"));
    assert_eq!(output.matches("Welcome to RideShare!").count(), 2);
}

#[test]
fn end_of_input_ends_session_test() {
    let api = seeded_api();

    assert!(run_script(&api, "").contains("Welcome to RideShare!"));
    assert!(run_script(&api, "1\nrider1\n").contains("Enter password: "));
    assert!(run_script(&api, "1\nrider1\npass123\n1\nA\n").contains("Enter destination: "));
}

#[test]
fn authentication_failed_test() {
    let api = seeded_api();
    let output = run_script(&api, "1\nrider1\nwrong\n2\n");

    assert!(output.contains("Authentication failed."));
    assert!(!output.contains("Rider Menu:"));
}

#[test]
fn rider_request_and_history_test() {
    use crate::api::TripAPI;
    use crate::entities::TripId;
    use tokio_test::block_on;

    let api = seeded_api();
    let output = run_script(&api, "1\nrider1\npass123\n2\n1\nA\nABCDE\n2\n2\n4\n2\n");

    assert!(output.contains("Rider Menu:"));
    assert!(output.contains("No trip history."));
    assert!(output.contains("Ride requested successfully with Trip ID: 1"));
    assert!(output.contains("Trip ID: 1, Status: IN_PROGRESS"));

    let trip = block_on(api.find_trip(TripId(1))).unwrap();
    assert_eq!(trip.fare, 12.0);
    assert_eq!(trip.rider_id, 2);
    assert_eq!(trip.driver_id, 3);
}

#[test]
fn rider_invalid_seats_test() {
    let api = seeded_api();
    let output = run_script(&api, "1\nrider1\npass123\n1\nA\nB\ntwo\n2\n4\n2\n");

    assert!(output.contains("Invalid number of seats!"));
    assert!(output.contains("No trip history."));
}

#[test]
fn rider_second_request_fails_while_driver_busy_test() {
    let api = seeded_api();
    let output = run_script(&api, "1\nrider1\npass123\n1\nA\nB\n1\n1\nA\nB\n1\n4\n2\n");

    assert!(output.contains("Ride requested successfully with Trip ID: 1"));
    assert!(output.contains("Failed to request ride."));
}

#[test]
fn rider_withdraw_test() {
    let api = seeded_api();
    let output = run_script(
        &api,
        "1\nrider1\npass123\n1\nA\nB\n1\n3\n1\n3\n1\n3\nnope\n3\n99\n2\n4\n2\n",
    );

    assert!(output.contains("Trip ID: 1 withdrawn."));
    assert_eq!(output.matches("Failed to withdraw ride request.").count(), 3);
    assert!(output.contains("Trip ID: 1, Status: WITHDRAWN"));
}

#[test]
fn rider_cannot_withdraw_others_trip_test() {
    use crate::api::{RiderAPI, TripAPI};
    use crate::auth::User;
    use crate::entities::{Rider, Route};
    use tokio_test::block_on;

    let api = seeded_api();
    block_on(api.add_user(User::new(4, "rider2", "pw", Role::Rider))).unwrap();
    block_on(api.create_rider(Rider::new(4))).unwrap();
    let trip = block_on(api.create_trip(2, Route::new("A", "B"), 1))
        .unwrap()
        .unwrap();

    let output = run_script(&api, "1\nrider2\npw\n3\n1\n4\n2\n");

    assert!(output.contains("Failed to withdraw ride request."));
    assert!(block_on(api.find_trip(trip.id)).unwrap().is_in_progress());
}

#[test]
fn driver_complete_trip_test() {
    let api = seeded_api();
    let output = run_script(
        &api,
        "1\nrider1\npass123\n1\nX\nY\n1\n4\n1\ndriver1\npass123\n1\n2\n1\n2\n4\n1\nrider1\npass123\n2\n4\n2\n",
    );

    assert!(output.contains("Driver Menu:"));
    assert!(output.contains("Current Trip ID: 1, Status: IN_PROGRESS"));
    assert!(output.contains("Trip ID: 1 completed."));
    assert!(output.contains("No current trip."));
    assert!(output.contains("No trip to complete."));
    assert!(output.contains("Trip ID: 1, Status: COMPLETED"));
}

#[test]
fn driver_availability_test() {
    let api = seeded_api();
    let output = run_script(
        &api,
        "1\ndriver1\npass123\n3\nn\n4\n1\nrider1\npass123\n1\nX\nY\n1\n4\n1\ndriver1\npass123\n3\nY\n4\n1\nrider1\npass123\n1\nX\nY\n1\n4\n2\n",
    );

    assert!(output.contains("Driver availability set to false."));
    assert!(output.contains("Failed to request ride."));
    assert!(output.contains("Driver availability set to true."));
    assert!(output.contains("Ride requested successfully with Trip ID: 1"));
}

#[test]
fn admin_placeholders_test() {
    let api = seeded_api();
    let output = run_script(&api, "1\nadmin\nadmin123\n1\n2\n3\n4\n6\n5\n2\n");

    assert!(output.contains("Admin Menu:"));
    assert!(output.contains("Manage Users: This feature is a placeholder."));
    assert!(output.contains("Monitor Rides: This feature is a placeholder."));
    assert!(output.contains("Generate Reports: This feature is a placeholder."));
    assert!(output.contains("Enforce Policy: This feature is a placeholder."));
    assert!(output.contains("Invalid option!"));
}
