use crate::session::{self, SessionOptions};

pub fn run(opts: &SessionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = session::open(opts)?;
    let snapshot = store.log_snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
