// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "sigauth-server";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn cli() -> Command {
    Command::new(BINARY_NAME)
        .about("Sign-in with an Ethereum wallet signature")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity (repeat for more)"),
        )
        .subcommand(
            Command::new("run")
                .about("Serve the login API over HTTP")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("YAML configuration file"),
                )
                .arg(
                    Arg::new("address")
                        .long("address")
                        .value_name("ADDR")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Address to listen on, overrides the config file"),
                )
                .arg(
                    Arg::new("database-url")
                        .long("database-url")
                        .value_name("URL")
                        .help("SQLite connection string, e.g. sqlite://sigauth.db"),
                ),
        )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub config_path: Option<PathBuf>,
    pub address: Option<SocketAddr>,
    pub database_url: Option<String>,
    pub verbosity_level: u8,
}

impl RunArgs {
    pub fn from_matches(run_matches: &ArgMatches) -> Self {
        Self {
            config_path: run_matches.get_one::<PathBuf>("config").cloned(),
            address: run_matches.get_one::<SocketAddr>("address").copied(),
            database_url: run_matches.get_one::<String>("database-url").cloned(),
            verbosity_level: run_matches.get_count("verbose"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
