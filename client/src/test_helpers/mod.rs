//! In-memory stand-ins for a cluster, for tests and dry runs of the scripts.

pub mod mock_ledger;
pub mod test_accounts;
