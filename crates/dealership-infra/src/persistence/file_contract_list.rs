//! Text-file contract list
//!
//! One tagged contract row per line. Blank lines are skipped on load; any
//! other unreadable row aborts it.

use std::borrow::Cow;

use dealership_domain::{Contract, ContractList};
use dealership_types::Result;
use tracing::{debug, info};

use super::memory::InMemoryContractList;
use super::resource::{append_rows, overwrite_lines, read_lines, TextResource};

pub struct FileBackedContractList<R: TextResource> {
    contracts: InMemoryContractList,
    resource: R,
}

impl<R: TextResource> FileBackedContractList<R> {
    pub fn open(resource: R) -> Result<Self> {
        let contracts = read_lines(&resource)?
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Contract::from_csv(line))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            "Loaded {} contracts from {}",
            contracts.len(),
            resource.describe()
        );

        Ok(Self {
            contracts: InMemoryContractList::from(contracts),
            resource,
        })
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }
}

impl<R: TextResource> ContractList for FileBackedContractList<R> {
    fn add(&mut self, contract: Contract) -> Result<()> {
        let row = contract.to_csv();
        self.contracts.add(contract)?;
        append_rows(&self.resource, [row])?;
        Ok(())
    }

    fn remove(&mut self, contract: &Contract) -> Result<bool> {
        if !self.contracts.remove(contract)? {
            return Ok(false);
        }

        let rows: Vec<String> = self.contracts.contracts()?.iter().map(Contract::to_csv).collect();
        debug!("Rewriting {} with {} contracts", self.resource.describe(), rows.len());
        overwrite_lines(&self.resource, rows)?;
        Ok(true)
    }

    fn contracts(&self) -> Result<Cow<'_, [Contract]>> {
        self.contracts.contracts()
    }
}
