use continuity_core::engagement::parse_date;
use continuity_core::milestone;

use crate::session::{self, SessionOptions};

pub fn run(opts: &SessionOptions, date: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = session::open(opts)?;
    let date = match date {
        Some(date) => parse_date(&date)?,
        None => store.today(),
    };

    let event = store.toggle_day(date);
    println!("{}", serde_json::to_string_pretty(&event)?);

    if let Some(reached) = milestone::crossed(store.current_streak(), store.previous_streak()) {
        eprintln!("{}", reached.message());
    }
    Ok(())
}
