//! Command-line interface.
//!
//! | Module  | Purpose                              |
//! |---------|--------------------------------------|
//! | `args`  | clap argument definitions            |
//! | `init`  | starter project scaffolding          |
//! | `serve` | development server                   |

pub mod args;
mod init;
mod serve;

pub use args::{BuildArgs, Cli, Commands};
pub use init::init_site;
pub use serve::serve;
