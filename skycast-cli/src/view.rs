//! Text rendering of a [`RenderPlan`] for the terminal.
//!
//! The plan already carries display-ready strings; this module only lays
//! them out as a current-conditions panel followed by one line per card.

use skycast_core::RenderPlan;

pub fn print_plan(plan: &RenderPlan) {
    print!("{}", format_plan(plan));
}

pub fn format_plan(plan: &RenderPlan) -> String {
    let mut out = String::new();

    out.push_str(&format!("== {} ==\n", plan.current.location));
    out.push_str(&format!("{}  {}\n", plan.current.temperature, plan.current.condition));

    let metrics: Vec<String> = plan
        .current
        .metrics
        .iter()
        .map(|m| format!("{} {}", m.label, m.value))
        .collect();
    out.push_str(&metrics.join("  |  "));
    out.push('\n');

    if !plan.forecast.is_empty() {
        out.push_str(&format!("\n{}-Day Forecast\n", plan.forecast.len()));
        for card in &plan.forecast {
            out.push_str(&format!(
                "{:<4} {:>7} / {:<7} {}\n",
                card.weekday, card.high, card.low, card.condition
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::{CurrentPanel, ForecastCard, Metric, RenderPlan, Theme};

    fn sample_plan(cards: usize) -> RenderPlan {
        RenderPlan {
            theme: Theme::Dark,
            transparency: 0.95,
            current: CurrentPanel {
                location: "Jaipur, India".to_string(),
                temperature: "28.5°C".to_string(),
                condition: "Sunny".to_string(),
                metrics: vec![
                    Metric { label: "Humidity".to_string(), value: "40%".to_string() },
                    Metric { label: "Wind".to_string(), value: "12.3 km/h".to_string() },
                    Metric { label: "Feels Like".to_string(), value: "30.1°C".to_string() },
                    Metric { label: "UV Index".to_string(), value: "6".to_string() },
                ],
            },
            forecast: (0..cards)
                .map(|_| ForecastCard {
                    weekday: "Fri".to_string(),
                    high: "34°C".to_string(),
                    low: "26°C".to_string(),
                    condition: "Patchy rain nearby".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn panel_shows_location_reading_and_metric_row() {
        let text = format_plan(&sample_plan(0));

        assert!(text.contains("Jaipur, India"));
        assert!(text.contains("28.5°C  Sunny"));
        assert!(text.contains("Humidity 40%"));
        assert!(text.contains("UV Index 6"));
        assert!(!text.contains("Forecast"), "no forecast header without cards");
    }

    #[test]
    fn forecast_lines_follow_the_panel() {
        let text = format_plan(&sample_plan(7));

        assert!(text.contains("7-Day Forecast"));
        assert_eq!(text.matches("Patchy rain nearby").count(), 7);
    }
}
