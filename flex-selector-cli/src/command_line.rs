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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
    name = "flex-selector",
    author = "The Flex Selector Authors",
    version,
    about = "Evaluate and check Flex message selectors"
)]
pub struct RootCli {
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "TOML config file; FLEX_SELECTOR_* environment variables override it"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(arg_required_else_help = true, about = "evaluate selectors against a set of variables")]
    Eval {
        #[arg(
            short = 'e',
            long = "expression",
            value_name = "EXPR",
            required = true,
            help = "selector to evaluate; repeat to evaluate several against the same variables"
        )]
        expressions: Vec<String>,

        #[arg(long, value_name = "FILE", help = "JSON object of variable bindings")]
        vars_file: Option<PathBuf>,

        #[arg(
            long = "var",
            value_name = "NAME=VALUE",
            help = "variable binding; VALUE is read as a JSON scalar, otherwise as a plain string"
        )]
        vars: Vec<String>,

        #[arg(
            short = 't',
            long = "type",
            value_name = "TYPE",
            help = "filter type, defaults to SQL92"
        )]
        filter_type: Option<String>,
    },

    #[command(arg_required_else_help = true, about = "compile a selector and print its parenthesized form")]
    Check {
        #[arg(short = 'e', long = "expression", value_name = "EXPR", required = true)]
        expression: String,

        #[arg(short = 't', long = "type", value_name = "TYPE", help = "filter type, defaults to SQL92")]
        filter_type: Option<String>,
    },
}
