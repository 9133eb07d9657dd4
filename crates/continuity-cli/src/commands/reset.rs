use std::io::{BufRead, Write};

use crate::session::{self, SessionOptions};

fn confirm() -> Result<bool, std::io::Error> {
    eprint!("Are you sure you want to reset all data? This cannot be undone. [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub fn run(opts: &SessionOptions, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes && !confirm()? {
        println!("reset cancelled");
        return Ok(());
    }

    let (_, mut store) = session::open(opts)?;
    let event = store.reset_all();
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
