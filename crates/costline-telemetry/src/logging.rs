// Copyright 2025 eraflo
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

//! Logger setup for binaries embedding the cost monitor.

use anyhow::Result;
use env_logger::{Builder, Env};

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs an `env_logger` logger honoring `RUST_LOG`, falling back to `default_filter`.
///
/// Fails if a global logger is already installed.
pub fn init(default_filter: &str) -> Result<()> {
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()?;
    log::debug!("Logger initialized (default filter: {default_filter})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        assert!(init("debug").is_ok());
        assert!(init("debug").is_err());
    }
}
