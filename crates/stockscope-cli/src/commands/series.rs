use stockscope_core::SeriesSource;

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{Report, SeriesReport};

pub async fn run(args: &SeriesArgs, source: &dyn SeriesSource) -> Result<Report, CliError> {
    let series = super::fetch(source, &args.symbol).await?;
    let symbol = series.symbol().to_owned();
    let last_refreshed = series.last_refreshed().to_owned();
    let total_points = series.len();

    let mut points = series.into_points();
    if let Some(limit) = args.limit {
        points.truncate(limit);
    }

    Ok(Report::Series(SeriesReport {
        symbol,
        last_refreshed,
        total_points,
        points,
    }))
}
