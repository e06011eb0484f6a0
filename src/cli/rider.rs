use std::io::{BufRead, Write};

use super::{parse_seats, Console, Flow};
use crate::{
    api::{DynAPI, TripAPI},
    auth::User,
    entities::{Route, TripId},
    error::{invalid_input_error, Error},
};

#[tracing::instrument(skip(api, console, user), fields(user_id = user.id))]
pub async fn menu<R: BufRead, W: Write>(
    api: &DynAPI,
    console: &mut Console<R, W>,
    user: &User,
) -> Result<Flow, Error> {
    loop {
        console.say("\nRider Menu:")?;
        console.say("1. Request Ride")?;
        console.say("2. View Trip History")?;
        console.say("3. Withdraw Ride Request")?;
        console.say("4. Exit")?;

        let choice = read_or_quit!(console, "Select an option: ");

        match choice.trim() {
            "1" => {
                let origin = read_or_quit!(console, "Enter origin: ");
                let destination = read_or_quit!(console, "Enter destination: ");
                let seats = read_or_quit!(console, "Enter number of seats: ");

                let seats = match parse_seats(&seats) {
                    Ok(seats) => seats,
                    Err(_) => {
                        console.say("Invalid number of seats!")?;
                        continue;
                    }
                };

                let route = Route::new(origin, destination);

                match api.create_trip(user.id, route, seats).await? {
                    Some(trip) => console.say(format!(
                        "Ride requested successfully with Trip ID: {}",
                        trip.id
                    ))?,
                    None => console.say("Failed to request ride.")?,
                }
            }
            "2" => {
                let trips = api.trip_history(user.id).await?;

                if trips.is_empty() {
                    console.say("No trip history.")?;
                }

                for trip in trips.iter() {
                    console.say(format!(
                        "Trip ID: {}, Status: {}",
                        trip.id,
                        trip.status.name()
                    ))?;
                }
            }
            "3" => {
                let trip_id = read_or_quit!(console, "Enter Trip ID to withdraw: ");

                match withdraw(api, user, &trip_id).await {
                    Ok(id) => console.say(format!("Trip ID: {} withdrawn.", id))?,
                    Err(err) if err.is_internal_error() => return Err(err),
                    Err(err) => {
                        tracing::warn!(%err, "withdraw rejected");
                        console.say("Failed to withdraw ride request.")?;
                    }
                }
            }
            "4" => return Ok(Flow::Back),
            _ => console.say("Invalid option!")?,
        }
    }
}

async fn withdraw(api: &DynAPI, user: &User, trip_id: &str) -> Result<TripId, Error> {
    let id: TripId = trip_id.parse()?;
    let trip = api.find_trip(id).await?;

    if trip.rider_id != user.id {
        return Err(invalid_input_error());
    }

    api.withdraw_trip(id).await?;

    Ok(id)
}
