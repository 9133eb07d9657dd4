use crate::render;
use crate::session::{self, SessionOptions};

pub fn run(opts: &SessionOptions, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = session::open(opts)?;

    if json {
        let view = render::status_view(&store).ok_or("engagement data is still loading")?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::page(&store, None));
    }
    Ok(())
}
