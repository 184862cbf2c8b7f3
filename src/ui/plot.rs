use std::collections::HashMap;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Year axis helpers
// ---------------------------------------------------------------------------

/// Position of each selected year on the x axis (0, 1, 2, ...).
fn year_positions<'a>(years: &[&'a str]) -> HashMap<&'a str, f64> {
    years
        .iter()
        .enumerate()
        .map(|(i, year)| (*year, i as f64))
        .collect()
}

fn year_at(labels: &[String], x: f64) -> Option<&str> {
    if x < -0.5 || (x - x.round()).abs() > 1e-6 {
        return None;
    }
    labels.get(x.round() as usize).map(String::as_str)
}

/// Label integer grid marks with their year; the axis is nominal.
fn year_axis_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| year_at(&labels, mark.value).unwrap_or_default().to_string()
}

fn hover_formatter(labels: Vec<String>) -> impl Fn(&str, &PlotPoint) -> String {
    move |name, point| {
        let year = year_at(&labels, point.x).unwrap_or("");
        if name.is_empty() {
            format!("{year}\n{:.2}", point.y)
        } else {
            format!("{name}\n{year}: {:.2}", point.y)
        }
    }
}

fn group_color(state: &AppState, age_group: &str) -> Color32 {
    state
        .color_map
        .as_ref()
        .map(|cm| cm.color_for(age_group))
        .unwrap_or(Color32::LIGHT_BLUE)
}

// ---------------------------------------------------------------------------
// Trend chart: one line per age group across years
// ---------------------------------------------------------------------------

/// Render the reading-volume trend lines in the central panel.
pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    let years = state.selected_years();
    let x_of = year_positions(&years);
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Reading volume")
        .x_axis_formatter(year_axis_formatter(labels.clone()))
        .label_formatter(hover_formatter(labels))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for group in state.selected_age_groups() {
                let color = group_color(state, group);

                let mut points: Vec<[f64; 2]> = state
                    .visible_rows()
                    .filter(|r| r.age_group == group)
                    .filter_map(|r| x_of.get(r.year.as_str()).map(|&x| [x, r.value]))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));

                plot_ui.line(Line::new(points.clone()).name(group).color(color).width(2.0));
                plot_ui.points(Points::new(points).name(group).color(color).radius(3.5));
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bar chart: age groups side by side within each year
// ---------------------------------------------------------------------------

/// Render grouped bars, one colour per age group.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let years = state.selected_years();
    let groups = state.selected_age_groups();
    let x_of = year_positions(&years);
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();

    let n = groups.len().max(1) as f64;
    let slot = 0.8 / n;

    Plot::new("bar_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Reading volume")
        .x_axis_formatter(year_axis_formatter(labels))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (k, group) in groups.iter().enumerate() {
                let offset = (k as f64 - (n - 1.0) / 2.0) * slot;
                let bars: Vec<Bar> = state
                    .visible_rows()
                    .filter(|r| r.age_group == *group)
                    .filter_map(|r| {
                        let x = x_of.get(r.year.as_str())?;
                        Some(
                            Bar::new(x + offset, r.value)
                                .width(slot * 0.9)
                                .name(format!("{group} · {}", r.year)),
                        )
                    })
                    .collect();
                if bars.is_empty() {
                    continue;
                }
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(group)
                        .color(group_color(state, group)),
                );
            }
        });
}
