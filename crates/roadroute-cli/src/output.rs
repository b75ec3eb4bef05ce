//! Output formatting for the `route` command.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use roadroute_lib::{Coordinate, RoutePlan, RouteQuery};

/// Presentation style for a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Machine-readable JSON document.
    Json,
}

/// JSON document printed by `route --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteOutput<'a> {
    pub from: Coordinate,
    pub to: Coordinate,
    pub found: bool,
    pub plan: &'a RoutePlan,
}

impl<'a> RouteOutput<'a> {
    pub fn new(query: &RouteQuery, plan: &'a RoutePlan) -> Self {
        Self {
            from: query.start,
            to: query.dest,
            found: !plan.is_empty(),
            plan,
        }
    }
}

/// Write `plan` to `out` in the requested format.
pub fn render_route<W: Write>(
    out: &mut W,
    query: &RouteQuery,
    plan: &RoutePlan,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &RouteOutput::new(query, plan))?;
            writeln!(out)?;
        }
        OutputFormat::Text => render_text(out, plan)?,
    }
    Ok(())
}

fn render_text<W: Write>(out: &mut W, plan: &RoutePlan) -> Result<()> {
    if plan.is_empty() {
        writeln!(
            out,
            "No route from vertex {} to vertex {}.",
            plan.start, plan.goal
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "Route from vertex {} to vertex {} ({} hops, cost {:.1}):",
        plan.start,
        plan.goal,
        plan.hop_count(),
        plan.cost
    )?;
    for (vertex, waypoint) in plan.steps.iter().zip(&plan.waypoints) {
        writeln!(out, "- {} ({}, {})", vertex, waypoint.lat, waypoint.lon)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> RoutePlan {
        RoutePlan {
            start: 1,
            goal: 2,
            steps: vec![1, 2],
            waypoints: vec![Coordinate::new(0, 0), Coordinate::new(100_000, 0)],
            cost: 100_000.0,
        }
    }

    #[test]
    fn text_lists_each_waypoint() {
        let query = RouteQuery::new(0, 0, 100_000, 0);
        let mut out = Vec::new();
        render_route(&mut out, &query, &plan(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Route from vertex 1 to vertex 2 (1 hops, cost 100000.0):"));
        assert!(text.contains("- 2 (100000, 0)"));
    }

    #[test]
    fn json_marks_found_routes() {
        let query = RouteQuery::new(0, 0, 100_000, 0);
        let mut out = Vec::new();
        render_route(&mut out, &query, &plan(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["plan"]["steps"], serde_json::json!([1, 2]));
        assert_eq!(value["from"]["lat"], 0);
    }

    #[test]
    fn text_reports_missing_route() {
        let empty = RoutePlan {
            steps: Vec::new(),
            waypoints: Vec::new(),
            cost: 0.0,
            ..plan()
        };
        let mut out = Vec::new();
        render_route(&mut out, &RouteQuery::new(0, 0, 0, 0), &empty, OutputFormat::Text)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No route from vertex 1 to vertex 2.\n"
        );
    }
}
