//! Command registry and dispatch
//!
//! Commands live in a static, ordered table. `dispatch` resolves the first
//! argument against it, runs the handler and turns user-facing errors into a
//! message plus exit code. Anything else (I/O, SQLite, consistency failures)
//! is returned to the caller.

use crate::cli::output;
use crate::domain::TodoId;
use crate::error::{Result, TodoError};
use crate::infrastructure::TodoStore;
use std::io::Write;

/// What a handler gets to work with
pub struct Context<'a> {
    pub store: &'a mut dyn TodoStore,
    pub out: &'a mut dyn Write,
}

pub type Handler = fn(&mut Context<'_>, &[String]) -> Result<()>;

/// A registered command
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

pub static COMMANDS: &[Command] = &[
    Command {
        name: "help",
        description: "Display help message",
        usage: "todo help [command]",
        handler: cmd_help,
    },
    Command {
        name: "add",
        description: "Add a new todo",
        usage: "todo add <title>",
        handler: cmd_add,
    },
    Command {
        name: "remove",
        description: "Remove a todo by ID",
        usage: "todo remove <id>",
        handler: cmd_remove,
    },
    Command {
        name: "list",
        description: "List all todos",
        usage: "todo list",
        handler: cmd_list,
    },
    Command {
        name: "toggle",
        description: "Toggle the status of a todo by ID",
        usage: "todo toggle <id>",
        handler: cmd_toggle,
    },
];

/// Look a command up by exact name
pub fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Run one command line against `store`, returning the process exit code
pub fn dispatch(
    store: &mut dyn TodoStore,
    args: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let Some((name, rest)) = args.split_first() else {
        writeln!(err, "Expected a command name, but got none")?;
        writeln!(err)?;
        write!(err, "{}", output::format_help(COMMANDS))?;
        return Ok(1);
    };

    let Some(command) = find_command(name) else {
        write!(err, "{}", output::format_unknown_command(name, COMMANDS))?;
        return Ok(1);
    };

    log::debug!("dispatching '{}' with {} argument(s)", name, rest.len());

    let mut ctx = Context { store, out };
    match (command.handler)(&mut ctx, rest) {
        Ok(()) => Ok(0),
        Err(e) if e.is_user_error() => {
            writeln!(err, "{}", e)?;
            if e.wants_usage() {
                writeln!(err, "Usage: {}", command.usage)?;
            }
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

/// Dispatch, then close the store whatever the outcome.
///
/// A close failure after a successful command is returned; after a failed
/// command the original error wins and the close failure is logged.
pub fn dispatch_and_close(
    store: &mut dyn TodoStore,
    args: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let dispatched = dispatch(store, args, out, err);
    let closed = store.close();

    match (dispatched, closed) {
        (Ok(code), Ok(())) => Ok(code),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                log::error!("failed to close store after error: {}", close_err);
            }
            Err(e)
        }
    }
}

fn expect_args(args: &[String], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        let noun = if count == 1 { "argument" } else { "arguments" };
        Err(TodoError::Usage(format!(
            "Expected {} {}, got {}",
            count,
            noun,
            args.len()
        )))
    }
}

fn parse_id(arg: &str) -> Result<TodoId> {
    arg.parse::<TodoId>()
        .map_err(|_| TodoError::Usage(format!("ID '{}' is not a valid ID number", arg)))
}

fn cmd_help(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    match args {
        [] => write!(ctx.out, "{}", output::format_help(COMMANDS))?,
        [name] => match find_command(name) {
            Some(cmd) => write!(ctx.out, "{}", output::format_command_usage(cmd))?,
            None => write!(ctx.out, "{}", output::format_unknown_command(name, COMMANDS))?,
        },
        _ => {
            return Err(TodoError::Usage(format!(
                "Expected 0 or 1 arguments, got {}",
                args.len()
            )))
        }
    }
    Ok(())
}

fn cmd_add(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    expect_args(args, 1)?;

    let id = ctx.store.add(&args[0])?;
    writeln!(ctx.out, "Todo added successfully. ID = {}", id)?;
    Ok(())
}

fn cmd_remove(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    expect_args(args, 1)?;
    let id = parse_id(&args[0])?;

    if !ctx.store.remove(id)? {
        return Err(TodoError::NotFound(id));
    }
    writeln!(ctx.out, "Todo removed successfully")?;
    Ok(())
}

fn cmd_list(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    expect_args(args, 0)?;

    let items = ctx.store.get_all()?;
    write!(ctx.out, "{}", output::format_item_list(&items))?;
    Ok(())
}

fn cmd_toggle(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    expect_args(args, 1)?;
    let id = parse_id(&args[0])?;

    if !ctx.store.toggle_done(id)? {
        return Err(TodoError::NotFound(id));
    }
    let item = ctx.store.get_one(id)?;
    writeln!(ctx.out, "Todo toggled successfully")?;
    writeln!(ctx.out, "  {}", item)?;
    Ok(())
}
