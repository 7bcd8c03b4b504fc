use gitlet::commands;
use gitlet::config::Config;
use gitlet::error::GitletError;
use gitlet::repository::Repository;

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = "gitlet")]
#[command(about = "A miniature content-addressed version-control system")]
struct Cli {
    /// Command name followed by its operands, taken verbatim so the
    /// dispatcher below can enforce the exact per-command operand counts
    /// and error text the external contract specifies.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    if let Err(err) = run() {
        println!("{err}");
    }
}

fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GITLET_LOG", "warn")).init();

    let mut args = Cli::parse().args.into_iter();
    let command = args.next().ok_or(GitletError::NoCommand)?;
    let operands: Vec<String> = args.collect();

    debug!("dispatching command={command} operands={operands:?}");
    let config = Config::resolve()?;

    if command == "init" {
        require(&operands, 0)?;
        return commands::init::run(&config.root);
    }

    let repo = Repository::discover(&config.root)?;

    match command.as_str() {
        "add" => {
            require(&operands, 1)?;
            commands::add::run(&repo, &operands[0])
        }
        "commit" => {
            require(&operands, 1)?;
            commands::commit::run(&repo, &operands[0])
        }
        "rm" => {
            require(&operands, 1)?;
            commands::rm::run(&repo, &operands[0])
        }
        "checkout" => checkout(&repo, &operands),
        "reset" => {
            require(&operands, 1)?;
            commands::reset::run(&repo, &operands[0])
        }
        "branch" => {
            require(&operands, 1)?;
            commands::branch::create(&repo, &operands[0])
        }
        "rm-branch" => {
            require(&operands, 1)?;
            commands::branch::remove(&repo, &operands[0])
        }
        "status" => {
            require(&operands, 0)?;
            commands::status::run(&repo)
        }
        "log" => {
            require(&operands, 0)?;
            commands::log::run(&repo)
        }
        "global-log" => {
            require(&operands, 0)?;
            commands::global_log::run(&repo)
        }
        "find" => {
            require(&operands, 1)?;
            commands::find::run(&repo, &operands[0])
        }
        "merge" => {
            require(&operands, 1)?;
            commands::merge::run(&repo, &operands[0])
        }
        "add-remote" => {
            require(&operands, 2)?;
            commands::remote::add(&repo, &operands[0], &operands[1])
        }
        "rm-remote" => {
            require(&operands, 1)?;
            commands::remote::remove(&repo, &operands[0])
        }
        "push" => {
            require(&operands, 2)?;
            commands::remote::push(&repo, &operands[0], &operands[1])
        }
        "fetch" => {
            require(&operands, 2)?;
            commands::remote::fetch(&repo, &operands[0], &operands[1])
        }
        "pull" => {
            require(&operands, 2)?;
            commands::remote::pull(&repo, &operands[0], &operands[1])
        }
        _ => Err(GitletError::IncorrectOperands.into()),
    }
}

fn checkout(repo: &Repository, operands: &[String]) -> anyhow::Result<()> {
    match operands {
        [marker, file] if marker == "--" => commands::checkout::file_from_head(repo, file),
        [id, marker, file] if marker == "--" => {
            let commit_id = repo
                .objects
                .resolve_commit_prefix(id)?
                .ok_or(GitletError::NoSuchCommit)?;
            commands::checkout::file_from_commit(repo, commit_id, file)
        }
        [branch] => commands::checkout::branch(repo, branch),
        _ => Err(GitletError::IncorrectOperands.into()),
    }
}

fn require(operands: &[String], count: usize) -> Result<(), GitletError> {
    if operands.len() == count {
        Ok(())
    } else {
        Err(GitletError::IncorrectOperands)
    }
}
