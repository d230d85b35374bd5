use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use trainroute_core::RouteDistance;

use crate::report::{Answer, ReportLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Text form of a distance: the number, or `NO SUCH ROUTE`.
pub fn distance_str(d: RouteDistance) -> String {
    match d {
        RouteDistance::Found(d) => d.to_string(),
        RouteDistance::NoRoute => "NO SUCH ROUTE".to_string(),
    }
}

pub fn answer_str(answer: Answer) -> String {
    match answer {
        Answer::Distance(d) => distance_str(d),
        Answer::Trips(n) => n.to_string(),
    }
}

pub fn render_report(lines: &[ReportLine], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(lines
            .iter()
            .map(|l| format!("Output #{}: {}", l.number, answer_str(l.answer)))
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => Ok(serde_json::to_string_pretty(lines)?),
    }
}

#[derive(Serialize)]
struct SingleAnswer<'a> {
    query: &'a str,
    answer: Answer,
}

/// Render a single answer: plain value in text mode, an object in JSON mode.
pub fn render_answer(query: &str, answer: Answer, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(answer_str(answer)),
        Format::Json => Ok(serde_json::to_string_pretty(&SingleAnswer { query, answer })?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<ReportLine> {
        vec![
            ReportLine {
                number: 1,
                query: "distance of route A-B".to_string(),
                answer: Answer::Distance(RouteDistance::Found(5)),
            },
            ReportLine {
                number: 2,
                query: "distance of route A-E".to_string(),
                answer: Answer::Distance(RouteDistance::NoRoute),
            },
            ReportLine {
                number: 3,
                query: "trips".to_string(),
                answer: Answer::Trips(4),
            },
        ]
    }

    #[test]
    fn test_render_report_text() {
        let text = render_report(&lines(), Format::Text).unwrap();
        assert_eq!(text, "Output #1: 5\nOutput #2: NO SUCH ROUTE\nOutput #3: 4");
    }

    #[test]
    fn test_render_report_json() {
        let json = render_report(&lines(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["answer"]["status"], "found");
        assert_eq!(value[0]["answer"]["distance"], 5);
        assert_eq!(value[1]["answer"]["status"], "no_route");
        assert_eq!(value[2]["answer"], 4);
    }

    #[test]
    fn test_render_answer() {
        let answer = Answer::Trips(7);
        assert_eq!(render_answer("trips", answer, Format::Text).unwrap(), "7");
        let json = render_answer("trips", answer, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "trips");
        assert_eq!(value["answer"], 7);
    }

    #[test]
    fn test_distance_str() {
        assert_eq!(distance_str(RouteDistance::Found(0)), "0");
        assert_eq!(distance_str(RouteDistance::NoRoute), "NO SUCH ROUTE");
    }
}
