//! # User directory command line
//!
//! Thin wrapper around `user-core`. Each subcommand maps to one client
//! operation; `demo` runs the whole tour against the configured service.
//!
//! ```bash
//! users list
//! users --api-root http://127.0.0.1:3000 find Bret
//! users save-comments 1 --dir ./out
//! ```

mod config;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use user_core::{CommentsExport, NewUser, User, UserClient, UreqTransport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML file with `api_root` and `timeout_secs`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service root; users live under `<root>/users`
    #[arg(long, env = "USER_API_ROOT")]
    api_root: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "USER_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a user and print the assigned id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    /// List every user
    List,
    /// Show one user
    Get { id: u64 },
    /// Find users by exact username
    Find { username: String },
    /// Replace a user's fields
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a user
    Delete { id: u64 },
    /// Save the comments of a user's latest post as JSON
    SaveComments {
        user_id: u64,
        /// Output directory (defaults to the working directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print a user's open todos
    OpenTodos { user_id: u64 },
    /// Run every operation once, in order
    Demo {
        #[arg(long, default_value_t = 1)]
        user_id: u64,
    },
}

/// Logs go to stderr at INFO unless `RUST_LOG` says otherwise.
fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn print_user(user: &User) {
    println!("{:>4}  {:<24} {:<16} {}", user.id, user.name, user.username, user.email);
}

fn report_export(export: &CommentsExport) {
    match export {
        CommentsExport::NoPosts => println!("User has no posts."),
        CommentsExport::Saved { path, .. } => println!("Comments saved to file: {}", path.display()),
    }
}

fn demo(client: &UserClient<UreqTransport>, user_id: u64) -> Result<()> {
    let created = client.create(&NewUser::new("Alex", "alex123", "alex@example.com"))?;
    println!("Created user ID: {}", created.id);

    let users = client.list_all()?;
    println!("Total users: {}", users.len());

    let user = client.get_by_id(user_id)?;
    println!("ID {user_id}: {}", user.name);

    match client.find_by_username("Bret")?.first() {
        Some(found) => println!("By username Bret: {}", found.name),
        None => println!("By username Bret: no match"),
    }

    let changed = User {
        email: "new@example.com".to_string(),
        ..created
    };
    let updated = client.update(&changed)?;
    println!("Updated email: {}", updated.email);

    let deleted = client.delete(changed.id)?;
    println!("Deleted: {deleted}");

    report_export(&client.save_last_post_comments_to_file(user_id)?);

    println!("Open todos of user {user_id}:");
    client.print_open_todos(user_id, &mut io::stdout().lock())?;
    Ok(())
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let config = config::resolve(args.config.as_deref(), args.api_root, args.timeout_secs)?;
    let client = UserClient::from_config(&config);

    match args.command {
        Command::Create {
            name,
            username,
            email,
        } => {
            let created = client.create(&NewUser { name, username, email })?;
            println!("Created user ID: {}", created.id);
        }
        Command::List => {
            let users = client.list_all()?;
            users.iter().for_each(print_user);
            println!("Total users: {}", users.len());
        }
        Command::Get { id } => print_user(&client.get_by_id(id)?),
        Command::Find { username } => client.find_by_username(&username)?.iter().for_each(print_user),
        Command::Update {
            id,
            name,
            username,
            email,
        } => {
            let updated = client.update(&User {
                id,
                name,
                username,
                email,
            })?;
            print_user(&updated);
        }
        Command::Delete { id } => println!("Deleted: {}", client.delete(id)?),
        Command::SaveComments { user_id, dir } => {
            let export = match dir {
                Some(dir) => client.save_last_post_comments_in(user_id, &dir)?,
                None => client.save_last_post_comments_to_file(user_id)?,
            };
            report_export(&export);
        }
        Command::OpenTodos { user_id } => {
            println!("Open todos of user {user_id}:");
            client.print_open_todos(user_id, &mut io::stdout().lock())?;
        }
        Command::Demo { user_id } => demo(&client, user_id)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_subcommand_with_global_flags() {
        let args = Args::try_parse_from([
            "users",
            "--api-root",
            "http://127.0.0.1:3000",
            "save-comments",
            "1",
            "--dir",
            "out",
        ])
        .unwrap();
        assert_eq!(args.api_root.as_deref(), Some("http://127.0.0.1:3000"));
        match args.command {
            Command::SaveComments { user_id, dir } => {
                assert_eq!(user_id, 1);
                assert_eq!(dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn demo_defaults_to_user_one() {
        let args = Args::try_parse_from(["users", "demo"]).unwrap();
        assert!(matches!(args.command, Command::Demo { user_id: 1 }));
    }
}
