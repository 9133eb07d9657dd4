//! Opening a store the way every command needs it.

use continuity_core::engagement::parse_date;
use continuity_core::{
    Clock, Config, EngagementStore, FixedClock, LogStorage, MemoryStorage, SqliteStorage,
    SystemClock,
};

pub struct SessionOptions {
    pub today: Option<String>,
    pub ephemeral: bool,
}

pub type Store = EngagementStore<Box<dyn LogStorage>>;

/// Load config, open storage, and load the engagement log.
pub fn open(opts: &SessionOptions) -> Result<(Config, Store), Box<dyn std::error::Error>> {
    let config = if opts.ephemeral {
        Config::default()
    } else {
        Config::load()?
    };

    let storage: Box<dyn LogStorage> = if opts.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(SqliteStorage::open()?)
    };

    let clock: Box<dyn Clock> = match &opts.today {
        Some(date) => Box::new(FixedClock::new(parse_date(date)?)),
        None => Box::new(SystemClock),
    };

    let store = EngagementStore::open(storage, clock, &config);
    Ok((config, store))
}
