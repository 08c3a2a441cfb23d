//! List command implementation

use crate::config::Config;
use crate::repository::{AssetClass, InstrumentRepository};
use anyhow::Context;
use clap::Args;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Asset class to list
    #[arg(value_enum)]
    pub asset_class: AssetClass,
}

impl ListArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repository =
            InstrumentRepository::load(&config.data).context("Failed to load instrument data")?;

        for identifier in repository.identifiers(self.asset_class) {
            println!("{}", identifier);
        }

        Ok(())
    }
}
