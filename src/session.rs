//! one run of the application on an open connection:
//! schema, seed, menu, then close

use std::io::{BufRead, Write};

use rusqlite::Connection;
use tracing::debug;

use crate::config::Config;
use crate::console::Console;
use crate::db::{self, SeedOutcome};
use crate::error::Result;
use crate::menu;

/// run the session and release the connection however it ends;
/// a session error wins over a close error
pub fn run<R : BufRead, W : Write, E : Write>(
    conn    : Connection,
    config  : &Config,
    console : &mut Console<R, W, E>,
    ) -> Result<()>
{
    let outcome = start(&conn, config, console);
    let closed = db::close(conn);

    outcome?;
    closed
}

fn start<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    config  : &Config,
    console : &mut Console<R, W, E>,
    ) -> Result<()>
{
    // no tables, no menu
    db::init_schema(db)?;

    match db::load_seed(db)
    {
        Ok(SeedOutcome::Applied) => console.msgln("Initial data loaded")?,
        Ok(SeedOutcome::AlreadySeeded) => (),
        Err(e) if config.strict_seed => return Err(e),
        Err(e) => {
            // carry on; listing/modifying still works on whatever is there
            debug!(error = ?e, "seeding failed, continuing");
            console.errln(&e.to_string())?;
        }
    }

    menu::run(db, console)?;

    Ok(())
}
