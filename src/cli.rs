mod period;

use clap::{Parser, Subcommand};
use fennec_periods::{
    Bounds,
    Sequence,
    format::{Pattern, Rfc3339},
};

pub use self::period::PeriodArg;
use crate::{prelude::*, tables::build_periods_table};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Log the debug events.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fuse overlapping and consecutive periods.
    #[clap(name = "merge")]
    Merge(SingleArgs),

    /// List the uncovered spans between the periods.
    #[clap(name = "gaps")]
    Gaps(SingleArgs),

    /// Log the bounding span, total duration and count, and print the bounding span.
    #[clap(name = "inspect")]
    Inspect(SingleArgs),

    /// All periods of both lists, without exact duplicates.
    #[clap(name = "union")]
    Union(PairArgs),

    /// Common parts of both lists.
    #[clap(name = "intersect")]
    Intersect(PairArgs),

    /// Periods of the first list which do not overlap any of the other list.
    #[clap(name = "subtract")]
    Subtract(PairArgs),
}

#[derive(Parser)]
pub struct PeriodOptions {
    /// Bounds of the given periods: `[)`, `(]`, `[]` or `()`.
    #[clap(long, env = "FENNEC_PERIODS_BOUNDS", default_value = "[)")]
    bounds: Bounds,

    /// Truncate the endpoints to midnight UTC.
    #[clap(long)]
    calendar_dates: bool,

    /// Render the endpoints with the `strftime` pattern instead of RFC 3339, for example `%Y-%m-%d`.
    #[clap(long, env = "FENNEC_PERIODS_PATTERN")]
    pattern: Option<String>,
}

impl PeriodOptions {
    fn sequence(&self, periods: &[PeriodArg]) -> Result<Sequence> {
        periods.iter().map(|period| period.to_interval(self.bounds, self.calendar_dates)).collect()
    }

    fn print(&self, sequence: &Sequence) {
        let table = match &self.pattern {
            Some(pattern) => build_periods_table(sequence, &Pattern(pattern)),
            None => build_periods_table(sequence, &Rfc3339),
        };
        println!("{table}");
    }
}

#[derive(Parser)]
pub struct SingleArgs {
    #[clap(flatten)]
    options: PeriodOptions,

    /// Periods as `START..END`, where an endpoint is `YYYY-MM-DD` or an RFC 3339 instant.
    #[clap(required = true)]
    periods: Vec<PeriodArg>,
}

impl SingleArgs {
    #[instrument(skip_all)]
    pub fn run(&self, operation: impl FnOnce(&Sequence) -> Sequence) -> Result {
        let sequence = self.options.sequence(&self.periods)?;
        let output = operation(&sequence);
        info!(n_input = sequence.len(), n_output = output.len(), "done");
        self.options.print(&output);
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn inspect(&self) -> Result {
        let sequence = self.options.sequence(&self.periods)?;
        let boundaries = sequence.boundaries().context("there are no periods to inspect")?;
        info!(
            n_periods = sequence.len(),
            %boundaries,
            total_duration = %sequence.total_duration(),
            n_gaps = sequence.gaps().len(),
            "inspected",
        );
        self.options.print(&Sequence::from_sorted([boundaries]));
        Ok(())
    }
}

#[derive(Parser)]
pub struct PairArgs {
    #[clap(flatten)]
    options: PeriodOptions,

    /// Periods as `START..END`, where an endpoint is `YYYY-MM-DD` or an RFC 3339 instant.
    #[clap(required = true)]
    periods: Vec<PeriodArg>,

    /// Second list of periods, in the same format.
    #[clap(long, required = true, num_args = 1..)]
    other: Vec<PeriodArg>,
}

impl PairArgs {
    #[instrument(skip_all)]
    pub fn run(&self, operation: impl FnOnce(&Sequence, &Sequence) -> Sequence) -> Result {
        let left = self.options.sequence(&self.periods)?;
        let right = self.options.sequence(&self.other)?;
        let output = operation(&left, &right);
        info!(n_left = left.len(), n_right = right.len(), n_output = output.len(), "done");
        self.options.print(&output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_pair() {
        let args = Args::try_parse_from([
            "fennec-periods",
            "subtract",
            "--bounds",
            "[]",
            "2024-01-01..2024-01-15",
            "--other",
            "2024-01-10..2024-01-25",
        ])
        .unwrap();
        let Command::Subtract(args) = args.command else {
            panic!("expected `subtract`");
        };
        assert_eq!(args.options.bounds, Bounds::BothInclusive);
        assert_eq!(args.periods.len(), 1);
        assert_eq!(args.other.len(), 1);
    }

    #[test]
    fn test_sequence_rejects_invalid_period() {
        let args = Args::try_parse_from(["fennec-periods", "merge", "2024-01-15..2024-01-01"]).unwrap();
        let Command::Merge(args) = args.command else {
            panic!("expected `merge`");
        };
        assert!(args.options.sequence(&args.periods).is_err());
    }
}
