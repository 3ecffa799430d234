use stockscope_core::{MovingAverageProjection, SeriesSource, SeriesSummary};

use crate::cli::SummaryArgs;
use crate::error::CliError;

use super::{Report, SummaryReport};

pub async fn run(args: &SummaryArgs, source: &dyn SeriesSource) -> Result<Report, CliError> {
    // Reject a bad window before spending a provider call on it.
    if args.window == 0 {
        return Err(stockscope_core::ValidationError::ZeroWindow.into());
    }

    let series = super::fetch(source, &args.symbol).await?;
    let summary = SeriesSummary::from_series(&series);
    let projection = MovingAverageProjection::from_series(&series, args.window)?;

    Ok(Report::Summary(SummaryReport {
        symbol: series.symbol().to_owned(),
        last_refreshed: series.last_refreshed().to_owned(),
        summary,
        projection,
    }))
}
