/*
 *  bin/fetch_fonts.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Companion tool: downloads the clock's font set over HTTP. Partial
 *  results are a degraded mode, not an error; the tool exits zero
 *  regardless.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::Result;
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use klokka::fonts::{fetch_all, fetch_client, FONT_SOURCES};

#[derive(Debug, Parser)]
#[command(name = "fetch-fonts", about = "Download the klokka font set", version)]
struct Cli {
    /// Directory to download the .ttf files into
    #[arg(long, default_value = "fonts")]
    fonts_dir: PathBuf,

    /// Enable debug log level
    #[arg(long, short = 'v', action = ArgAction::SetTrue)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    info!("fetching {} fonts", FONT_SOURCES.len());

    let client = fetch_client()?;
    let report = fetch_all(&client, &cli.fonts_dir).await;

    // Missing fonts degrade to the surface's default font at runtime.
    info!(
        "done: {}/{} available in {}",
        report.succeeded,
        report.total,
        cli.fonts_dir.display()
    );
    Ok(())
}
