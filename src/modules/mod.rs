use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded};
use log::info;
use parking_lot::Mutex;

use crate::utilities::call_table::CallTable;
use crate::utilities::clock_barrier::ClockBarrier;
use crate::utilities::config::SimConfig;
use crate::utilities::dice::new_dice;
use crate::utilities::error::SimError;
use crate::utilities::pacer::Pacer;
use crate::utilities::stats::{Stats, Summary};

pub mod call_generator;
pub mod console;
pub mod dispatcher;
pub mod run_timer;

use call_generator::CallGenerator;
use dispatcher::Dispatcher;

pub fn run(config: SimConfig) -> Result<Summary, SimError> {
    run_with_output(config, io::stdout())
}

/// Runs a whole simulation, narrating to `out`, and returns the figures
/// reported when the run timer fired.
pub fn run_with_output<W: Write + Send + 'static>(config: SimConfig, out: W) -> Result<Summary, SimError> {
    let settings = config.settings.clone();
    let num_floors = config.floors;
    info!("starting simulation: {} floors, call interval {}, duration {}", num_floors, config.call_interval, config.sim_duration);

    // SHARED STATE
    let table = Arc::new(CallTable::new(num_floors));
    let stats = Arc::new(Mutex::new(Stats::new()));
    let clock = Arc::new(ClockBarrier::new(num_floors, config.call_interval));

    // INITIALIZE CHANNELS
    let (events_tx, events_rx) = unbounded();
    let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
    let pacer = Pacer::new(settings.time_unit(), shutdown_rx);

    // INITIALIZE CONSOLE
    let status_board = settings.status_board;
    let console_handle = thread::Builder::new()
        .name("console".to_string())
        .spawn(move || console::main(out, events_rx, status_board))?;

    // INITIALIZE ONE CALL GENERATOR PER FLOOR
    let mut generator_handles = Vec::new();
    for floor in 1..=num_floors {
        let generator = CallGenerator::new(
            floor,
            Arc::clone(&table),
            Arc::clone(&clock),
            new_dice(settings.seed, floor as u64),
            events_tx.clone(),
            settings.call_probability,
        );
        let pacer = pacer.clone();
        let period = settings.generator_period;
        let handle = thread::Builder::new()
            .name(format!("call_generator_f{}", floor))
            .spawn(move || call_generator::main(generator, pacer, period))?;
        generator_handles.push(handle);
    }

    // INITIALIZE RUN TIMER
    let timer_handle = {
        let stats = Arc::clone(&stats);
        let events_tx = events_tx.clone();
        let run_length = Duration::from_millis(settings.time_unit_ms.saturating_mul(config.sim_duration));
        thread::Builder::new()
            .name("run_timer".to_string())
            .spawn(move || run_timer::main(run_length, stats, events_tx, shutdown_tx))?
    };

    // DISPATCHER RUNS ON THIS THREAD
    let dispatcher = Dispatcher::new(
        Arc::clone(&table),
        Arc::clone(&stats),
        pacer,
        new_dice(settings.seed, 0),
        events_tx,
        settings,
    );
    dispatcher.run();

    let summary = join(timer_handle)?;
    for handle in generator_handles {
        join(handle)?;
    }
    join(console_handle)??;
    Ok(summary)
}

fn join<T>(handle: JoinHandle<T>) -> Result<T, SimError> {
    let name = handle.thread().name().unwrap_or("unnamed").to_string();
    handle.join().map_err(|_| SimError::ThreadPanicked(name))
}
