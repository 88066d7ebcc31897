//! Terminal front end for the admin console
//!
//! Runs one admin operation through the same orchestrator as the web
//! console and prints the field set, the notice and the refreshed table.

use momentum_core::{
    CardioHistory, FieldView, Grid, Notice, Operation, Orchestrator, Resource, ResultView, SubmitOutcome,
    WeightsHistory,
};
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::adapters::http_transport::HttpTransport;
use crate::cli::AdminArgs;
use crate::config::Settings;

pub async fn run(settings: &Settings, args: &AdminArgs) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run_with(settings, args, &mut input, &mut out).await
}

pub async fn run_with<R: BufRead, W: Write>(
    settings: &Settings,
    args: &AdminArgs,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let resource: Resource = match &args.resource {
        Some(r) => r.parse()?,
        None => settings.console.resource()?,
    };
    let operation: Operation = match &args.operation {
        Some(o) => o.parse()?,
        None => settings.console.operation()?,
    };
    tracing::info!("Running {} on {} against {}", operation, resource, settings.backend.url);

    let transport = Rc::new(HttpTransport::new(&settings.backend.url));
    let mut admin = Orchestrator::new(transport.clone(), resource, operation);
    admin.add_summary(Box::new(CardioHistory::new(transport.clone())));
    admin.add_summary(Box::new(WeightsHistory::new(transport)));

    admin.start().await?;
    print_fields(out, resource, operation, &admin.state().field_views())?;

    for (name, value) in &args.fields {
        if !admin.state().fields().iter().any(|f| f.name == name.as_str()) {
            tracing::warn!("Ignoring field '{}': not part of the {} form for {}", name, operation, resource);
        }
        admin.set_field(name, value.clone());
    }

    let result = match operation {
        // The table was fetched on start
        Operation::View => Ok(()),
        _ => match admin.submit().await {
            Ok(SubmitOutcome::NeedsConfirmation(pending)) => {
                if args.yes || confirm(input, out, &pending.prompt())? {
                    admin.confirm_empty(pending).await.map(|_| ())
                } else {
                    admin.cancel_empty();
                    writeln!(out, "Cancelled, nothing was sent.")?;
                    Ok(())
                }
            }
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        },
    };

    if let Some(notice) = admin.state().notice() {
        print_notice(out, notice)?;
    }
    if let Some(view) = admin.state().view() {
        print_view(out, view)?;
    }

    result.map_err(Into::into)
}

fn print_fields<W: Write>(out: &mut W, resource: Resource, operation: Operation, views: &[FieldView]) -> std::io::Result<()> {
    if views.is_empty() {
        return writeln!(out, "{} {}: no input fields", operation.label(), resource.label());
    }
    writeln!(out, "{} {}:", operation.label(), resource.label())?;
    for view in views {
        writeln!(
            out,
            "  {:<20} --field {}=<{}>{}",
            view.label,
            view.name,
            view.input.hint(),
            if view.required { "" } else { " (optional)" }
        )?;
    }
    Ok(())
}

fn print_notice<W: Write>(out: &mut W, notice: &Notice) -> std::io::Result<()> {
    match notice {
        Notice::Success(message) => writeln!(out, "{}", message),
        Notice::Error(message) => writeln!(out, "error: {}", message),
    }
}

fn print_view<W: Write>(out: &mut W, view: &ResultView) -> std::io::Result<()> {
    match view {
        ResultView::NoData => writeln!(out, "{}", momentum_core::NO_DATA),
        ResultView::Grid(grid) => out.write_all(format_grid(grid).as_bytes()),
    }
}

/// Plain text table with a header rule, columns padded to their widest cell
pub fn format_grid(grid: &Grid) -> String {
    let widths: Vec<usize> = grid
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            grid.rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut text = line(&grid.columns);
    text.push('\n');
    text.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    text.push('\n');
    for row in &grid.rows {
        text.push_str(&line(row));
        text.push('\n');
    }
    text
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> std::io::Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grid_pads_columns() {
        let grid = Grid {
            columns: vec!["id".to_string(), "duration".to_string()],
            rows: vec![vec!["1".to_string(), "30m 15s".to_string()]],
        };
        assert_eq!(format_grid(&grid), "id | duration\n---+---------\n1  | 30m 15s\n");
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut out = Vec::new();
        assert!(!confirm(&mut "\n".as_bytes(), &mut out, "Sure?").unwrap());
        assert!(!confirm(&mut "nope\n".as_bytes(), &mut out, "Sure?").unwrap());
        assert!(confirm(&mut "Y\n".as_bytes(), &mut out, "Sure?").unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Sure? [y/N] "));
    }
}
