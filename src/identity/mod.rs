// Identity module - who is calling the ledger
// Addresses are derived from ed25519 public keys; the ledger only compares them

mod address;
mod keypair;

pub use address::{Identity, IdentityError, IDENTITY_LEN};
pub use keypair::{Keypair, KeypairError, PublicKey};
