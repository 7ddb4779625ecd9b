//! main menu run loop and dispatch to the table operations

use std::io::{self, BufRead, Write};

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::console::Console;

pub const MIN_OPTION : i64 = 0;
pub const MAX_OPTION : i64 = 4;

/// one of the menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice
{
    Exit,
    ListActivities,
    ModifyActivity,
    ListUsers,
    DeleteUser,
}

impl TryFrom<i64> for Choice
{
    type Error = i64;

    fn try_from(value : i64) -> Result<Self, Self::Error>
    {
        match value {
            0 => Ok(Choice::Exit),
            1 => Ok(Choice::ListActivities),
            2 => Ok(Choice::ModifyActivity),
            3 => Ok(Choice::ListUsers),
            4 => Ok(Choice::DeleteUser),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State
{
    Running,
    Exiting,
}

/// state the loop is in after handling `choice`
pub fn transition(choice : Choice) -> State
{
    match choice {
        Choice::Exit => State::Exiting,
        _ => State::Running,
    }
}

fn print_menu<R : BufRead, W : Write, E : Write>(console : &mut Console<R, W, E>)
    -> io::Result<()>
{
    let out = console.out();

    writeln!(out)?;
    writeln!(out, "-------------------------------")?;
    writeln!(out, "--- Activity database menu ---")?;
    writeln!(out, "-------------------------------")?;
    writeln!(out, "  1) list activities")?;
    writeln!(out, "  2) modify activity")?;
    writeln!(out, "  3) list users")?;
    writeln!(out, "  4) delete user")?;
    writeln!(out)?;
    writeln!(out, "  0) exit")?;
    writeln!(out)?;

    Ok(())
}

/// run the menu until exit is chosen or input runs out
pub fn run<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    ) -> io::Result<()>
{
    let mut state = State::Running;

    while state == State::Running
    {
        print_menu(console)?;

        let option = match console.read_int_in("Your option:", MIN_OPTION, MAX_OPTION)
        {
            Ok(value) => value,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed, leaving menu");
                break;
            }
            Err(e) => return Err(e),
        };

        state = match Choice::try_from(option)
        {
            Ok(choice) => dispatch(db, console, choice)?,
            Err(value) => {
                warn!(value, "option out of range, ignored");
                State::Running
            }
        };
    }

    debug!("menu loop finished");
    Ok(())
}

fn dispatch<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    choice  : Choice,
    ) -> io::Result<State>
{
    debug!(?choice, "menu option chosen");

    let outcome = match choice {
        Choice::Exit => None,
        Choice::ListActivities => Some(crate::list_activities(db, console)?),
        Choice::ModifyActivity => Some(crate::modify_activity(db, console)?),
        Choice::ListUsers => Some(crate::list_users(db, console)?),
        Choice::DeleteUser => Some(crate::delete_user(db, console)?),
    };

    if let Some(outcome) = outcome
    {
        debug!(?outcome, "menu option done");
    }

    Ok(transition(choice))
}
