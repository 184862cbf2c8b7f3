use std::collections::HashMap;

use eframe::egui::{pos2, vec2, Align2, FontId, Rect, ScrollArea, Sense, Ui};
use reading_dashboard::data::model::value_range;

use crate::color::{heat_color, heat_text_color, normalize};
use crate::state::AppState;

const LABEL_WIDTH: f32 = 110.0;
const HEADER_HEIGHT: f32 = 26.0;

/// Age groups × years grid, each cell shaded by its value.
pub fn heatmap(ui: &mut Ui, state: &AppState) {
    let years = state.selected_years();
    let groups = state.selected_age_groups();
    let Some((lo, hi)) = value_range(state.visible_rows()) else {
        return;
    };
    if years.is_empty() || groups.is_empty() {
        return;
    }

    let cells: HashMap<(&str, &str), f64> = state
        .visible_rows()
        .map(|r| ((r.age_group.as_str(), r.year.as_str()), r.value))
        .collect();

    ui.label(format!("Scale: {lo:.1} (light) – {hi:.1} (dark)"));

    let avail = ui.available_size();
    let cell_w = ((avail.x - LABEL_WIDTH) / years.len() as f32).clamp(40.0, 120.0);
    let cell_h = ((avail.y - HEADER_HEIGHT) / groups.len() as f32).clamp(24.0, 48.0);
    let size = vec2(
        LABEL_WIDTH + cell_w * years.len() as f32,
        HEADER_HEIGHT + cell_h * groups.len() as f32,
    );

    ScrollArea::both().show(ui, |ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        let font = FontId::proportional(13.0);
        let text_color = ui.visuals().text_color();
        let empty_fill = ui.visuals().faint_bg_color;
        let hover = response.hover_pos();
        let mut hovered = None;

        for (j, year) in years.iter().enumerate() {
            let center = origin + vec2(LABEL_WIDTH + (j as f32 + 0.5) * cell_w, HEADER_HEIGHT * 0.5);
            painter.text(center, Align2::CENTER_CENTER, year, font.clone(), text_color);
        }

        for (i, group) in groups.iter().enumerate() {
            let top = origin.y + HEADER_HEIGHT + i as f32 * cell_h;
            painter.text(
                pos2(origin.x + LABEL_WIDTH - 8.0, top + cell_h * 0.5),
                Align2::RIGHT_CENTER,
                group,
                font.clone(),
                text_color,
            );

            for (j, year) in years.iter().enumerate() {
                let rect = Rect::from_min_size(
                    pos2(origin.x + LABEL_WIDTH + j as f32 * cell_w, top),
                    vec2(cell_w, cell_h),
                )
                .shrink(1.0);

                let value = cells.get(&(*group, *year)).copied();
                match value {
                    Some(v) => {
                        let t = normalize(v, lo, hi);
                        painter.rect_filled(rect, 2.0, heat_color(t));
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            format!("{v:.1}"),
                            font.clone(),
                            heat_text_color(t),
                        );
                    }
                    None => {
                        painter.rect_filled(rect, 2.0, empty_fill);
                    }
                }

                if hover.is_some_and(|p| rect.contains(p)) {
                    hovered = Some(match value {
                        Some(v) => format!("{group} · {year}: {v:.2}"),
                        None => format!("{group} · {year}: no data"),
                    });
                }
            }
        }

        if let Some(text) = hovered {
            response.on_hover_text(text);
        }
    });
}
