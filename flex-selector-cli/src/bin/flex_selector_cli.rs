// Copyright 2023 The Flex Selector Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::process;

use clap::Parser;
use flex_selector_cli::cli_config::SelectorCliConfig;
use flex_selector_cli::command_line::RootCli;
use flex_selector_cli::commands::describe_error;
use flex_selector_cli::commands::CommandExecute;
use flex_selector_cli::log::init_logger_with_level;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = RootCli::parse();

    let config = SelectorCliConfig::load(cli.config.as_deref())?;
    init_logger_with_level(config.log_level.as_deref())?;
    debug!("flex-selector config: {:?}", config);

    match cli.command.execute(&config) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", describe_error(&e));
            process::exit(1);
        }
    }
}
