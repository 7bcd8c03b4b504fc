use crate::repository::Repository;

use std::path::Path;

use anyhow::Result;

pub fn run(root: &Path) -> Result<()> {
    Repository::init(root)?;
    Ok(())
}
