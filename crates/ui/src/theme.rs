use bevy_egui::{egui, EguiContexts};

pub fn apply_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Night-sky panels over the daylight city.
    let panel = egui::Color32::from_rgb(28, 32, 44);
    let inactive = egui::Color32::from_rgb(48, 56, 72);
    let hover = egui::Color32::from_rgb(72, 86, 112);
    let active = egui::Color32::from_rgb(222, 150, 96);

    for (widget, fill) in [
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, active),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.corner_radius = egui::CornerRadius::same(4);
    }
    style.visuals.widgets.noninteractive.bg_fill = panel;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}
