//! Side panel and HUD drawn with egui.

use heightfield::{BoundingSphere, Channel, IndexWidth, Topology};
use std::path::PathBuf;

/// What the panel currently shows.
pub struct PanelState<'a> {
    pub images: &'a [PathBuf],
    pub current_image: Option<usize>,
    pub topology: Topology,
    pub channel: Channel,
}

/// Selections made this frame. Each field is set only when the user picked
/// something different from the current state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub image: Option<usize>,
    pub topology: Option<Topology>,
    pub channel: Option<Channel>,
    pub reset_view: bool,
}

pub struct SceneStats {
    pub width: u32,
    pub height: u32,
    pub vertices: usize,
    pub indices: usize,
    pub index_width: IndexWidth,
    pub topology: Topology,
    pub sphere: BoundingSphere,
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn draw_panel(ctx: &egui::Context, state: &PanelState<'_>) -> UiActions {
    let mut actions = UiActions::default();

    egui::Window::new("Height field")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            if !state.images.is_empty() {
                let selected = state
                    .current_image
                    .and_then(|i| state.images.get(i))
                    .map(|p| file_label(p))
                    .unwrap_or_else(|| "(none)".to_owned());

                egui::ComboBox::from_label("Image")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (i, path) in state.images.iter().enumerate() {
                            let current = state.current_image == Some(i);
                            if ui.selectable_label(current, file_label(path)).clicked() && !current {
                                actions.image = Some(i);
                            }
                        }
                    });
            }

            egui::ComboBox::from_label("Topology")
                .selected_text(state.topology.as_str())
                .show_ui(ui, |ui| {
                    for topology in Topology::ALL {
                        let current = topology == state.topology;
                        if ui.selectable_label(current, topology.as_str()).clicked() && !current {
                            actions.topology = Some(topology);
                        }
                    }
                });

            ui.horizontal(|ui| {
                ui.label("Height");
                for channel in Channel::SELECTABLE {
                    let current = channel == state.channel;
                    if ui.radio(current, channel.as_str()).clicked() && !current {
                        actions.channel = Some(channel);
                    }
                }
            });

            if ui.button("Reset view").clicked() {
                actions.reset_view = true;
            }
        });

    actions
}

pub fn draw_hud(ctx: &egui::Context, stats: Option<&SceneStats>) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(ctx, |ui| {
            let Some(s) = stats else {
                ui.label("No image loaded");
                return;
            };

            ui.label(format!("{}x{} grid, {} vertices", s.width, s.height, s.vertices));
            ui.label(format!(
                "{} {} indices ({} primitives)",
                s.indices,
                s.index_width,
                s.topology.primitive_count(s.indices)
            ));
            ui.label(format!(
                "sphere c=({:.1}, {:.1}, {:.1}) r={:.1}",
                s.sphere.center[0], s.sphere.center[1], s.sphere.center[2], s.sphere.radius
            ));
        });
}
