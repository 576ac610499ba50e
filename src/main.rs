// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use json_assert::{compare_json_with, CompareError, CompareMode, CustomComparator, Customization};

#[doc(hidden)]
#[macro_export]
macro_rules! handle_error {
    ($code:expr, $msg:expr, $($arg:tt)*) => {
        eprintln!($msg, $($arg)*);
        std::process::exit($code);
    };

    ($code:expr, $msg:expr) => {
        eprintln!($msg);
        std::process::exit($code);
    };
}

#[doc(hidden)]
struct Code;

impl Code {
    const SUCCESS: i32 = 0;
    const INTERNAL_ERROR: i32 = 1;
    const INVALID_ARGUMENT: i32 = 2;
    const JSON_PARSING_ERROR: i32 = 3;
    const COMPARISON_FAILED: i32 = 4;
}

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File with the expected JSON document
    expected: PathBuf,

    /// File with the actual JSON document
    actual: PathBuf,

    /// Compare mode: strict, lenient, non-extensible or strict-order
    #[clap(short, long, env = "JSON_ASSERT_MODE", default_value = "strict")]
    mode: CompareMode,

    /// Path pattern whose values are not compared, e.g. `**.timestamp`
    #[clap(short, long)]
    ignore: Vec<String>,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

#[doc(hidden)]
fn read(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            handle_error!(
                Code::INVALID_ARGUMENT,
                "Error reading {}: {}",
                path.display(),
                err
            );
        }
    }
}

#[doc(hidden)]
fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        handle_error!(Code::INTERNAL_ERROR, "Error: {}", err);
    }

    let cli = Cli::parse();
    debug!(?cli, "starting");

    let mut comparator = CustomComparator::new(cli.mode);
    for pattern in &cli.ignore {
        match Customization::ignore(pattern) {
            Ok(customization) => comparator = comparator.with_customization(customization),
            Err(err) => {
                handle_error!(Code::INVALID_ARGUMENT, "Error: {}", err);
            }
        }
    }

    let expected = read(&cli.expected);
    let actual = read(&cli.actual);

    let result = match compare_json_with(&expected, &actual, &comparator) {
        Ok(result) => result,
        Err(err @ CompareError::Parse { .. }) => {
            handle_error!(Code::JSON_PARSING_ERROR, "Error: {}", err);
        }
        Err(err) => {
            handle_error!(Code::INTERNAL_ERROR, "Error: {}", err);
        }
    };

    if cli.json {
        let report = json!({"passed": result.passed(), "result": result});
        match serde_json::to_string_pretty(&report) {
            Ok(report) => println!("{}", report),
            Err(err) => {
                handle_error!(Code::INTERNAL_ERROR, "Error: {}", err);
            }
        }
    } else if result.passed() {
        println!("test result: PASSED");
    } else {
        println!(
            "{}\ntest result: FAILED. {} failure(s)",
            result.messages().join("\n"),
            result.messages().len()
        );
    }

    if result.passed() {
        std::process::exit(Code::SUCCESS);
    }
    std::process::exit(Code::COMPARISON_FAILED);
}
