use crate::commands::log::print_commit;
use crate::repository::Repository;

use anyhow::Result;

/// Every commit in the store, in no particular graph order (sorted by id
/// for determinism), each printed the same way `log` prints one entry.
pub fn run(repo: &Repository) -> Result<()> {
    let mut ids = repo.objects.all_commit_ids()?;
    ids.sort();
    for id in ids {
        let commit = repo.objects.get_commit(&id)?;
        print_commit(&id, &commit);
    }
    Ok(())
}
