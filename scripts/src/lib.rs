//! Scripts for deploying and initializing the FundMe contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod chains;
pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
mod solidity;
pub mod storage;
pub mod types;
pub mod utils;
pub mod verify;
