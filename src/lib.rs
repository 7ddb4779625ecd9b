use std::io::{self, BufRead, Write};

use rusqlite::Connection;
use tracing::debug;

pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod menu;
pub mod session;

use console::Console;
use db::{ActivityRow, UserRow};
use error::Error;

/// what a menu operation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome
{
    /// rows printed
    Listed(usize),
    /// rows affected by an update/delete
    Changed(usize),
    /// update/delete matched nothing
    Unchanged,
    /// db error, diagnostic already printed
    Failed,
}

const ACT_RULE : &str = "------ ------------------------ --------- ----------";
const USR_RULE : &str = "------ ------------------------";

pub fn render_activities<W : Write>(out : &mut W, activities : &[ActivityRow])
    -> io::Result<()>
{
    writeln!(out, "------------- Activity list ---------------")?;
    writeln!(out, "Code   Type                     Duration  Distance")?;
    writeln!(out, "{}", ACT_RULE)?;

    for act in activities
    {
        writeln!(out, "{:6} {:<24} {:9} {:10.6}",
                 act.code, act.kind, act.duration, act.distance)?;
    }

    writeln!(out, "{}", ACT_RULE)?;
    writeln!(out, "{} activities", activities.len())
}

pub fn render_users<W : Write>(out : &mut W, users : &[UserRow])
    -> io::Result<()>
{
    writeln!(out, "------------- User list ---------------")?;
    writeln!(out, "Code   Name")?;
    writeln!(out, "{}", USR_RULE)?;

    for user in users
    {
        writeln!(out, "{:6} {:<24}", user.code, user.name)?;
    }

    writeln!(out, "{}", USR_RULE)?;
    writeln!(out, "{} users", users.len())
}

// print a failed operation as a single line on the error sink
fn report<R : BufRead, W : Write, E : Write>(
    console : &mut Console<R, W, E>,
    err     : Error,
    ) -> io::Result<Outcome>
{
    debug!(error = ?err, "menu operation failed");
    console.errln(&err.to_string())?;
    Ok(Outcome::Failed)
}

/// print every activity as a table
pub fn list_activities<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    ) -> io::Result<Outcome>
{
    match db::get_activities(db)
    {
        Ok(activities) => {
            render_activities(console.out(), &activities)?;
            Ok(Outcome::Listed(activities.len()))
        }
        Err(source) => report(console, Error::Operation {
            action: "listing activities".to_string(),
            source,
        }),
    }
}

/// ask for an activity code plus new duration and distance, then update
pub fn modify_activity<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    ) -> io::Result<Outcome>
{
    let code = console.read_int("Activity code to modify:")?;
    let duration = console.read_int("New duration (minutes):")?;
    let distance = console.read_decimal("New distance:")?;

    match db::update_activity(db, code, duration, distance)
    {
        Ok(0) => {
            console.msgln("No modification was made in the database.")?;
            Ok(Outcome::Unchanged)
        }
        Ok(rows) => {
            console.msgln("Activity modified.")?;
            Ok(Outcome::Changed(rows))
        }
        Err(source) => report(console, Error::Operation {
            action: format!("modifying activity {}", code),
            source,
        }),
    }
}

/// print every user as a table
pub fn list_users<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    ) -> io::Result<Outcome>
{
    match db::get_users(db)
    {
        Ok(users) => {
            render_users(console.out(), &users)?;
            Ok(Outcome::Listed(users.len()))
        }
        Err(source) => report(console, Error::Operation {
            action: "listing users".to_string(),
            source,
        }),
    }
}

/// ask for a user code and delete that user
pub fn delete_user<R : BufRead, W : Write, E : Write>(
    db      : &Connection,
    console : &mut Console<R, W, E>,
    ) -> io::Result<Outcome>
{
    let code = console.read_int("User code to delete:")?;

    match db::delete_user(db, code)
    {
        Ok(0) => {
            console.msgln("Nothing was deleted from the database.")?;
            Ok(Outcome::Unchanged)
        }
        Ok(rows) => {
            console.msgln(&format!("Deleted user with code {}.", code))?;
            Ok(Outcome::Changed(rows))
        }
        Err(source) => report(console, Error::Operation {
            action: format!("deleting user {}", code),
            source,
        }),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::test; // module w/ shared test logic

    #[test]
    fn modified_activity_shows_in_listing()
    {
        let db = test::seeded_db();

        let mut console = test::console("1001\n45\n7.5\n");
        assert_eq!(modify_activity(&db, &mut console).unwrap(), Outcome::Changed(1));

        let mut console = test::console("");
        assert_eq!(list_activities(&db, &mut console).unwrap(), Outcome::Listed(5));

        let (_, out, _) = console.into_parts();
        let out = test::text(out);
        let line = out
            .lines()
            .find(|l| l.trim_start().starts_with("1001"))
            .unwrap();
        assert_eq!(line, format!("{:6} {:<24} {:9} {:10.6}", 1001, "Running", 45, 7.5));
        assert!(line.contains("7.500000"));
    }

    #[test]
    fn modify_unknown_activity_reports_no_change()
    {
        let db = test::seeded_db();
        let before = db::get_activities(&db).unwrap();

        let mut console = test::console("9999\n10\n1,0\n");
        assert_eq!(modify_activity(&db, &mut console).unwrap(), Outcome::Unchanged);
        assert_eq!(db::get_activities(&db).unwrap(), before);

        let (_, out, err) = console.into_parts();
        assert!(test::text(out).contains("No modification was made"));
        assert!(err.is_empty());
    }

    #[test]
    fn deleted_user_is_gone_and_second_delete_is_noop()
    {
        let db = test::seeded_db();

        let mut console = test::console("5\n");
        assert_eq!(delete_user(&db, &mut console).unwrap(), Outcome::Changed(1));

        let mut console = test::console("");
        assert_eq!(list_users(&db, &mut console).unwrap(), Outcome::Listed(5));
        let (_, out, _) = console.into_parts();
        let out = test::text(out);
        assert!(!out.contains("Ana"));
        assert!(!out.contains(&format!("{:6} {:<24}", 5, "Ana")));
        assert!(db::get_users(&db).unwrap().iter().all(|u| u.code != 5));

        let mut console = test::console("5\n");
        assert_eq!(delete_user(&db, &mut console).unwrap(), Outcome::Unchanged);
        let (_, out, _) = console.into_parts();
        assert!(test::text(out).contains("Nothing was deleted"));
    }

    #[test]
    fn empty_tables_print_header_and_footer()
    {
        let db = test::empty_db();

        let mut console = test::console("");
        assert_eq!(list_activities(&db, &mut console).unwrap(), Outcome::Listed(0));
        assert_eq!(list_users(&db, &mut console).unwrap(), Outcome::Listed(0));

        let (_, out, err) = console.into_parts();
        let out = test::text(out);
        assert_eq!(out.matches(ACT_RULE).count(), 2);
        assert!(out.contains("0 activities"));
        assert!(out.contains("0 users"));
        assert!(err.is_empty());
    }

    #[test]
    fn db_errors_are_reported_not_raised()
    {
        let db = Connection::open_in_memory().unwrap(); // no tables

        let mut console = test::console("1001\n45\n7.5\n");
        assert_eq!(modify_activity(&db, &mut console).unwrap(), Outcome::Failed);
        assert_eq!(list_users(&db, &mut console).unwrap(), Outcome::Failed);

        let (_, out, err) = console.into_parts();
        let err = test::text(err);
        assert!(err.contains("Problem modifying activity 1001"));
        assert!(err.contains("Problem listing users"));
        assert_eq!(err.lines().count(), 2);
        assert!(!test::text(out).contains("User list"));
    }

    #[test]
    fn closed_input_aborts_prompting()
    {
        let db = test::seeded_db();
        let mut console = test::console("1001\n");

        let err = modify_activity(&db, &mut console).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
