//! Contains the main `run()` function of the round-trip driver.

use std::process::ExitCode;

use enum_as_inner::EnumAsInner;
use polyser_object::{Registry, Serializable};
use thiserror::Error;

pub mod record;
pub mod round_trip;

pub use record::{instantiate_record, RecordError};
pub use round_trip::{
    deserialize_all, deserialize_to_end, round_trip, serialize_all, RoundTrip,
    RoundTripError,
};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "polyser",
    about = "Round-trips serializable variants through a whitespace-delimited \
             token stream",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The records to round-trip, each written as `TAG` or `TAG=FIELDS`.
    #[clap(default_values_t = ["Dog".to_owned(), "Cat".to_owned()])]
    pub records: Vec<String>,

    /// Reads every record of the given token stream instead of round-tripping
    /// `records`.
    #[clap(short, long, conflicts_with = "records")]
    pub input: Option<String>,

    /// Prints the registered type tags and exits.
    #[clap(short, long)]
    pub list: bool,
}

/// Is an enumeration of every error [`run`] reports.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error,
)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    RoundTrip(#[from] RoundTripError),

    #[error(transparent)]
    Deserialize(#[from] polyser_object::Error),
}

/// Executes the action requested by `argument` against `registry` and
/// returns the lines to print.
///
/// # Errors
///
/// See [`Error`].
pub fn execute(
    registry: &Registry<dyn Serializable>,
    argument: &Arguments,
) -> Result<Vec<String>, Error> {
    if argument.list {
        return Ok(registry.tags().into_iter().map(ToString::to_string).collect());
    }

    if let Some(stream) = &argument.input {
        let instances = deserialize_to_end(registry, stream)?;

        log::info!("read {} instance(s) from the stream", instances.len());

        return Ok(instances
            .iter()
            .map(|instance| format!("{instance:?}"))
            .collect());
    }

    let instances = argument
        .records
        .iter()
        .map(|record| instantiate_record(registry, record))
        .collect::<Result<Vec<_>, _>>()?;

    let RoundTrip { stream, instances } = round_trip(registry, &instances)?;

    Ok(std::iter::once(stream.trim_end().to_owned())
        .chain(instances.iter().map(|instance| format!("{instance:?}")))
        .collect())
}

/// Runs the program with the given arguments against the built-in registry.
#[must_use]
pub fn run(argument: Arguments) -> ExitCode {
    match execute(polyser_animal::registry(), &argument) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }

            ExitCode::SUCCESS
        }

        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
