/// Module for handling the signer list API
pub mod signers;
