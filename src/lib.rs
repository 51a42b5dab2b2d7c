pub mod args;
pub mod cli;
pub mod ledger;
pub mod parse;
pub mod terminal;
