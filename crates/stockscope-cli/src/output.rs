use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::{Report, SeriesReport, SummaryReport};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => match report {
            Report::Series(series) => write_series_table(out, series)?,
            Report::Summary(summary) => write_summary_table(out, summary)?,
        },
    }

    Ok(())
}

fn write_series_table<W: Write>(out: &mut W, report: &SeriesReport) -> io::Result<()> {
    writeln!(out, "symbol        : {}", report.symbol)?;
    writeln!(out, "last_refreshed: {}", report.last_refreshed)?;
    writeln!(
        out,
        "points        : {} of {}",
        report.points.len(),
        report.total_points
    )?;
    writeln!(
        out,
        "{:<10}  {:>12}  {:>12}  {:>12}  {:>12}  {:>14}",
        "date", "open", "high", "low", "close", "volume"
    )?;
    for bar in &report.points {
        writeln!(
            out,
            "{:<10}  {:>12.4}  {:>12.4}  {:>12.4}  {:>12.4}  {:>14}",
            bar.date.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )?;
    }
    Ok(())
}

fn write_summary_table<W: Write>(out: &mut W, report: &SummaryReport) -> io::Result<()> {
    let summary = &report.summary;
    let projection = &report.projection;

    writeln!(out, "symbol        : {}", report.symbol)?;
    writeln!(out, "last_refreshed: {}", report.last_refreshed)?;
    writeln!(out, "points        : {}", summary.points)?;
    writeln!(out, "latest_close  : {:.4}", summary.latest_close)?;
    writeln!(out, "average_close : {:.4}", summary.average_close)?;
    writeln!(out, "average_volume: {:.0}", summary.average_volume)?;
    writeln!(out, "volatility    : {:.4}", summary.volatility)?;
    writeln!(out, "period_high   : {:.4}", summary.period_high)?;
    writeln!(out, "period_low    : {:.4}", summary.period_low)?;
    writeln!(
        out,
        "moving_average: {:.4} ({} of {} closes)",
        projection.moving_average, projection.window_used, projection.window
    )?;
    writeln!(
        out,
        "projection    : {} {:+.2}% -> {:.4}",
        projection.direction.as_str(),
        projection.change_pct,
        projection.projected_price
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscope_core::{
        DailyBar, MovingAverageProjection, SeriesSummary, StockSeries, TradingDate,
    };

    fn series() -> StockSeries {
        let bars = ["2024-01-02", "2024-01-03"]
            .iter()
            .zip([10.0, 12.0])
            .map(|(date, close)| {
                DailyBar::new(
                    TradingDate::parse(date).expect("valid date"),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1_000,
                )
                .expect("finite bar")
            })
            .collect();
        StockSeries::new("IBM", "2024-01-03", bars).expect("valid series")
    }

    fn rendered(report: &Report, format: OutputFormat, pretty: bool) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, report, format, pretty).expect("render should succeed");
        String::from_utf8(buffer).expect("utf8 output")
    }

    fn series_report(limit: usize) -> Report {
        let series = series();
        let mut points = series.points().to_vec();
        points.truncate(limit);
        Report::Series(SeriesReport {
            symbol: series.symbol().to_owned(),
            last_refreshed: series.last_refreshed().to_owned(),
            total_points: series.len(),
            points,
        })
    }

    #[test]
    fn json_output_is_a_single_line_document() {
        let output = rendered(&series_report(1), OutputFormat::Json, false);

        assert_eq!(output.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["symbol"], "IBM");
        assert_eq!(value["total_points"], 2);
        assert_eq!(value["points"][0]["date"], "2024-01-03");
        assert_eq!(value["points"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn series_table_lists_most_recent_first() {
        let output = rendered(&series_report(2), OutputFormat::Table, false);
        let rows = output
            .lines()
            .filter(|line| line.starts_with("2024-"))
            .collect::<Vec<_>>();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("2024-01-03"));
        assert!(output.contains("points        : 2 of 2"));
    }

    #[test]
    fn summary_table_reports_projection() {
        let series = series();
        let report = Report::Summary(SummaryReport {
            symbol: series.symbol().to_owned(),
            last_refreshed: series.last_refreshed().to_owned(),
            summary: SeriesSummary::from_series(&series),
            projection: MovingAverageProjection::from_series(&series, 20).expect("window > 0"),
        });

        let output = rendered(&report, OutputFormat::Table, false);

        assert!(output.contains("average_close : 11.0000"));
        assert!(output.contains("projection    : down -8.33% -> 11.0000"));
    }
}
