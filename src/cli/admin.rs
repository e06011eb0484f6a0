use std::io::{BufRead, Write};

use super::{Console, Flow};
use crate::error::Error;

const PLACEHOLDERS: [(&str, &str, &str); 4] = [
    ("1", "Manage Users", "Manage Users (Mockup)"),
    ("2", "Monitor Rides", "Monitor Rides (Mockup)"),
    ("3", "Generate Reports", "Generate Reports (Mockup)"),
    ("4", "Enforce Policy", "Enforce Policy (Mockup)"),
];

#[tracing::instrument(skip_all)]
pub fn menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Flow, Error> {
    loop {
        console.say("\nAdmin Menu:")?;
        for (key, _, label) in PLACEHOLDERS.iter() {
            console.say(format!("{}. {}", key, label))?;
        }
        console.say("5. Exit")?;

        let choice = read_or_quit!(console, "Select an option: ");

        match PLACEHOLDERS.iter().find(|(key, _, _)| *key == choice.trim()) {
            Some((_, action, _)) => {
                console.say(format!("{}: This feature is a placeholder.", action))?
            }
            None if choice.trim() == "5" => return Ok(Flow::Back),
            None => console.say("Invalid option!")?,
        }
    }
}
