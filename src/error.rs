//! The fixed catalog of user-facing outcomes. Every string here is part of
//! the external contract (§7 of the spec) and must be preserved verbatim —
//! test suites match on exact text.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileDoesNotExist,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("No such branch exists.")]
    NoSuchBranchForCheckout,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("That remote does not have that branch.")]
    RemoteMissingBranch,
    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("No changes added to the commit.")]
    NoChangesToCommit,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("Please pull down remote changes before pushing.")]
    PullBeforePush,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
}

pub type Result<T> = std::result::Result<T, GitletError>;
