use std::io::{BufRead, Write};

use super::{Console, Flow};
use crate::{
    api::{DriverAPI, DynAPI, TripAPI},
    auth::User,
    entities::TripId,
    error::Error,
};

#[tracing::instrument(skip(api, console, user), fields(user_id = user.id))]
pub async fn menu<R: BufRead, W: Write>(
    api: &DynAPI,
    console: &mut Console<R, W>,
    user: &User,
) -> Result<Flow, Error> {
    loop {
        console.say("\nDriver Menu:")?;
        console.say("1. View Current Trip")?;
        console.say("2. Complete Current Trip")?;
        console.say("3. Set Availability")?;
        console.say("4. Exit")?;

        let choice = read_or_quit!(console, "Select an option: ");

        match choice.trim() {
            "1" => match current_trip(api, user).await? {
                Some(id) => {
                    let trip = api.find_trip(id).await?;
                    console.say(format!(
                        "Current Trip ID: {}, Status: {}",
                        trip.id,
                        trip.status.name()
                    ))?;
                }
                None => console.say("No current trip.")?,
            },
            "2" => match current_trip(api, user).await? {
                Some(id) => {
                    api.end_trip(id).await?;
                    console.say(format!("Trip ID: {} completed.", id))?;
                }
                None => console.say("No trip to complete.")?,
            },
            "3" => {
                let answer = read_or_quit!(console, "Set availability (y/n): ");
                let accepting = answer.trim().eq_ignore_ascii_case("y");

                api.update_driver_availability(user.id, accepting).await?;
                console.say(format!("Driver availability set to {}.", accepting))?;
            }
            "4" => return Ok(Flow::Back),
            _ => console.say("Invalid option!")?,
        }
    }
}

async fn current_trip(api: &DynAPI, user: &User) -> Result<Option<TripId>, Error> {
    let driver = api.find_driver(user.id).await?;

    Ok(driver.and_then(|d| d.current_trip))
}
