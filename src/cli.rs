mod octocrab_utils;
mod parser;
mod tracing;

pub(crate) use parser::{Auth, Cli, Commands, ServeArgs};
pub(crate) use tracing::init as init_tracing;
