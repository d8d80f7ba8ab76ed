//! Backend selection for the configured persistence layer

use std::rc::Rc;

use dealership_domain::{ContractList, Dealership};
use dealership_infra::persistence::{
    open_database, FileBackedContractList, FileBackedDealership, FileResource, InMemoryContractList,
    InMemoryDealership, SqliteDealership,
};
use dealership_types::{BackendKind, Error, Result};
use tracing::info;

use crate::config::Config;

/// Dealership and contract list opened from the same backend
pub struct Session {
    pub dealership: Box<dyn Dealership>,
    pub contracts: Box<dyn ContractList>,
}

/// Open the backend named by `config.backend`
pub fn open_session(config: &Config) -> Result<Session> {
    match config.backend {
        BackendKind::Memory => Ok(open_memory_session(config)),
        BackendKind::File => open_file_session(config),
        BackendKind::Sqlite => open_sqlite_session(config),
    }
}

fn configured_identity(config: &Config) -> InMemoryDealership {
    InMemoryDealership::new(&config.display_name, &config.address, &config.phone)
}

fn open_memory_session(config: &Config) -> Session {
    Session {
        dealership: Box::new(configured_identity(config)),
        contracts: Box::new(InMemoryContractList::new()),
    }
}

/// Open file-based inventory and contracts
pub fn open_file_session(config: &Config) -> Result<Session> {
    let dealership = FileBackedDealership::open(
        configured_identity(config),
        FileResource::new(config.inventory_path()?),
    )?;
    let contracts = FileBackedContractList::open(FileResource::new(config.contracts_path()?))?;
    Ok(Session {
        dealership: Box::new(dealership),
        contracts: Box::new(contracts),
    })
}

/// Open the SQLite database, registering the configured dealership when the
/// configured id does not exist yet
pub fn open_sqlite_session(config: &Config) -> Result<Session> {
    let conn = Rc::new(open_database(config.database_path()?)?);

    let dealership = match SqliteDealership::open(Rc::clone(&conn), config.dealership_id) {
        Ok(dealership) => dealership,
        Err(Error::DealershipNotFound(id)) => {
            let new_id =
                SqliteDealership::register(&conn, &config.display_name, &config.address, &config.phone)?;
            info!("Dealership {id} not found, registered \"{}\" as {new_id}", config.display_name);
            SqliteDealership::open(conn, new_id)?
        }
        Err(e) => return Err(e),
    };

    let contracts = dealership.contract_list();
    Ok(Session {
        dealership: Box::new(dealership),
        contracts: Box::new(contracts),
    })
}
