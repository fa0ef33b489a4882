/*
 *  main.rs
 *
 *  LyClock - worth the squeeze
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{sleep_until, Instant};

use lyclock::config::{self, Cli};
use lyclock::display::{DisplayDriverFactory, DisplayManager};
use lyclock::sensors::CpuThermal;
use lyclock::snapshot::SystemClock;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP and returns so the caller can
/// blank the panel and exit.
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Tick forever, sleeping until the manager wants the next frame: the
/// normal tick, or sooner while the ticker or an overlay is moving. A late
/// frame runs at once instead of queueing catch-up ticks. A failed frame is
/// logged and the next tick tries again.
async fn clock_loop(manager: &mut DisplayManager) {
    loop {
        if let Err(e) = manager.tick() {
            error!("Failed to render frame: {}", e);
        }
        sleep_until(Instant::from_std(manager.next_frame_at())).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize the logger with the appropriate level based on debug flag
    env_logger::Builder::from_env(Env::default().default_filter_or(if cli.debug {"debug"} else {"info"}))
        .format_timestamp_secs()
        .init();

    info!("This {} worth the Squeeze", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let config = config::load(&cli)?;
    if cli.dump_config {
        println!("{}", config::dump(&config)?);
        return Ok(());
    }

    let emulated = config.runtime.emulated;
    let driver = DisplayDriverFactory::create(&config.display, emulated)?;
    let mut manager = DisplayManager::new(
        &config,
        driver,
        Box::new(SystemClock::new()),
        Box::new(CpuThermal::new()),
    );
    manager.init()?;
    info!("{} blocks, tick {:?}{}",
          config.display.cascaded, config.runtime.tick(),
          if emulated { ", emulated" } else { "" });

    tokio::select! {
        _ = clock_loop(&mut manager) => {}
        res = signal_handler() => {
            if let Err(e) = res {
                error!("Signal handling failed: {}", e);
            }
        }
    }

    manager.shutdown()?;
    info!("Goodbye, avg frame {}μs", manager.metrics.avg_frame_time_us);
    Ok(())
}
