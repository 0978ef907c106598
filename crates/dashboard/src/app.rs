use crate::actions::Action;
use crate::graph_view::{self, AssetGraphView};
use crate::layout_radial::{self, LayoutStateRadial, RadialSeed};
use crate::mock;
use crate::node_shapes::status_color;
use crate::popover::PopoverPayload;
use crate::sidebar::Sidebar;
use crate::state::State;
use crate::store::Store;
use asset_graph::{GraphNode, NodeData, NodeKind, Status};
use eframe::egui;
use egui_graphs::{
    SettingsInteraction, SettingsNavigation, SettingsStyle,
    reset_layout,
};
use instant::Instant;

const POPOVER_SIZE: egui::Vec2 = egui::Vec2::new(320.0, 200.0);
const POPOVER_MARGIN: f32 = 20.0;

pub fn create_app(
    _cc: &eframe::CreationContext<'_>,
) -> DashboardApp {
    DashboardApp::new()
}

pub struct DashboardApp {
    state: State,
    sidebar: Sidebar,
    /// Aggregate version the radial layout was last seeded for.
    layout_synced_version: Option<u64>,
    next_node_serial: u32,
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardApp {
    pub fn new() -> Self {
        Self {
            state: State::new(Store::new(
                mock::mock_graph_data(),
            )),
            sidebar: Sidebar::new(),
            layout_synced_version: None,
            next_node_serial: 0,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(
        &mut self,
        ctx: &egui::Context,
        _frame: &mut eframe::Frame,
    ) {
        let now = Instant::now();
        self.state.flush_actions(now);
        self.state.tick(now);

        self.sidebar.ui(ctx, &mut self.state);
        self.overview_panel(ctx);
        self.graph_panel(ctx);
        self.popover_overlay(ctx);
        self.error_window(ctx);

        // Keep frames coming while a deferred popover clear is armed or
        // actions were dispatched during drawing.
        if self.state.has_pending_work() {
            ctx.request_repaint();
        }
    }
}

impl DashboardApp {
    fn overview_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("overview_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Overview");
                ui.separator();

                let critical = self
                    .state
                    .cache
                    .critical_nodes
                    .get(&self.state.store)
                    .len();
                ui.label(format!(
                    "Total nodes: {}",
                    self.state.store.node_count()
                ));
                ui.label(format!(
                    "Total edges: {}",
                    self.state.store.edge_count()
                ));
                ui.label(format!("Critical: {critical}"));
                ui.separator();

                let selected_title = self
                    .state
                    .store
                    .selected_node()
                    .map(|n| n.label.clone());
                ui.label(format!(
                    "Selected: {}",
                    selected_title
                        .as_deref()
                        .unwrap_or("No selection")
                ));
                ui.separator();

                if ui.button("Add critical node").clicked() {
                    self.next_node_serial += 1;
                    let serial = self.next_node_serial;
                    let node = GraphNode::new(
                        format!("added{serial}"),
                        format!("New Node {serial}"),
                    )
                    .with_data(NodeData::new(
                        NodeKind::Asset,
                        Status::Critical,
                    ));
                    self.state.dispatch(Action::AddNode { node });
                }

                let selected_id = self
                    .state
                    .store
                    .selected_node()
                    .map(|n| n.id.clone());
                if ui
                    .add_enabled(
                        selected_id.is_some(),
                        egui::Button::new("Remove selected"),
                    )
                    .clicked()
                    && let Some(id) = selected_id
                {
                    self.state.dispatch(Action::RemoveNode { id });
                }

                if ui.button("Reset demo data").clicked() {
                    self.next_node_serial = 0;
                    self.state.dispatch(Action::SetGraphData {
                        data: mock::mock_graph_data(),
                    });
                }
            });
    }

    fn graph_panel(&mut self, ctx: &egui::Context) {
        let popover_rect = self.popover_rect(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            // Re-seed the layout whenever the aggregate changed.
            let version = self.state.store.graph_version();
            if self.layout_synced_version != Some(version) {
                layout_radial::set_pending_seed(
                    RadialSeed::from_graph(self.state.store.graph()),
                );
                reset_layout::<LayoutStateRadial>(ui, None);
                self.layout_synced_version = Some(version);
            }

            let selected_id = self
                .state
                .store
                .selected_node()
                .map(|n| n.id.clone());

            let display = self
                .state
                .cache
                .display
                .get_mut(&self.state.store);

            // Mirror the store selection into the widget so the node
            // ring tracks the single source of truth.
            let selected_idx = selected_id
                .as_deref()
                .and_then(|id| {
                    display
                        .nodes_iter()
                        .find(|(_, n)| n.payload().id == id)
                        .map(|(idx, _)| idx)
                });
            display.set_selected_nodes(
                selected_idx.into_iter().collect(),
            );

            let settings_interaction = SettingsInteraction::new()
                .with_dragging_enabled(true)
                .with_node_clicking_enabled(true);
            let settings_navigation = SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(false);
            let settings_style =
                SettingsStyle::new().with_labels_always(true);

            ui.add(
                &mut AssetGraphView::new(display)
                    .with_interactions(&settings_interaction)
                    .with_navigations(&settings_navigation)
                    .with_styles(&settings_style),
            );

            // Node click opens the popover and selects; background
            // click resets both stores. Clicks landing on the popover
            // itself are left to the overlay.
            let pointer = ui.input(|i| i.pointer.clone());
            if pointer.primary_clicked() {
                let click_pos = pointer.interact_pos();
                let on_popover = match (click_pos, popover_rect) {
                    (Some(p), Some(rect)) => rect.contains(p),
                    _ => false,
                };
                if !on_popover {
                    let clicked_id = display
                        .hovered_node()
                        .and_then(|idx| {
                            graph_view::node_id_at(display, idx)
                        });
                    match clicked_id {
                        Some(id) => {
                            let pos =
                                click_pos.unwrap_or_default();
                            self.on_node_click(&id, (pos.x, pos.y));
                        }
                        None => self.on_background_click(),
                    }
                }
            }
        });
    }

    /// One gesture, two stores: popover payload first, then selection.
    fn on_node_click(&mut self, id: &str, position: (f32, f32)) {
        let Some(node) = self.state.store.graph().node(id).cloned()
        else {
            return;
        };
        let payload = PopoverPayload::from_node(&node, position);
        self.state.dispatch(Action::ShowPopover { payload });
        self.state
            .dispatch(Action::SelectNode { node: Some(node) });
    }

    fn on_background_click(&mut self) {
        self.state.dispatch(Action::HidePopover);
        self.state.dispatch(Action::SelectNode { node: None });
    }

    fn popover_rect(
        &self,
        ctx: &egui::Context,
    ) -> Option<egui::Rect> {
        if !self.state.popover.is_visible() {
            return None;
        }
        let payload = self.state.popover.payload()?;
        let pos = clamp_popover_pos(
            payload.position,
            ctx.screen_rect(),
        );
        Some(egui::Rect::from_min_size(pos, POPOVER_SIZE))
    }

    fn popover_overlay(&mut self, ctx: &egui::Context) {
        let Some(rect) = self.popover_rect(ctx) else {
            return;
        };
        let Some(payload) = self.state.popover.payload().cloned()
        else {
            return;
        };

        let mut close = false;
        egui::Area::new(egui::Id::new("node_popover"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                    ui.set_max_width(POPOVER_SIZE.x);
                    ui.horizontal(|ui| {
                        ui.heading(&payload.title);
                        ui.with_layout(
                            egui::Layout::right_to_left(
                                egui::Align::Center,
                            ),
                            |ui| {
                                if ui.button("✕").clicked() {
                                    close = true;
                                }
                            },
                        );
                    });
                    ui.colored_label(
                        status_color(Some(payload.status)),
                        payload.status.as_str(),
                    );
                    ui.separator();
                    ui.label(&payload.description);
                    if !payload.details.is_empty() {
                        ui.separator();
                        egui::Grid::new("popover_details")
                            .num_columns(2)
                            .show(ui, |ui| {
                                for (key, value) in
                                    &payload.details
                                {
                                    ui.label(key);
                                    ui.label(detail_text(value));
                                    ui.end_row();
                                }
                            });
                    }
                });
            });

        if close {
            self.on_background_click();
        }
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.state.store.last_error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.dispatch(Action::ClearError);
                    }
                });
        }
    }
}

fn detail_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep the popover on screen: clamp horizontally, flip above the
/// cursor when it would overflow the bottom edge.
fn clamp_popover_pos(
    position: (f32, f32),
    screen: egui::Rect,
) -> egui::Pos2 {
    let (mut x, mut y) = position;

    if x + POPOVER_SIZE.x > screen.width() {
        x = screen.width() - POPOVER_SIZE.x - POPOVER_MARGIN;
    }
    if x < POPOVER_MARGIN {
        x = POPOVER_MARGIN;
    }

    if y + POPOVER_SIZE.y > screen.height() {
        y -= POPOVER_SIZE.y + POPOVER_MARGIN;
    }
    if y < POPOVER_MARGIN {
        y = POPOVER_MARGIN;
    }

    egui::Pos2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> egui::Rect {
        egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::Vec2::new(1280.0, 800.0),
        )
    }

    #[test]
    fn popover_stays_inside_the_viewport() {
        let pos = clamp_popover_pos((100.0, 100.0), screen());
        assert_eq!(pos, egui::Pos2::new(100.0, 100.0));
    }

    #[test]
    fn popover_clamps_on_the_right_edge() {
        let pos = clamp_popover_pos((1200.0, 100.0), screen());
        assert_eq!(pos.x, 1280.0 - 320.0 - 20.0);
    }

    #[test]
    fn popover_flips_above_near_the_bottom() {
        let pos = clamp_popover_pos((100.0, 700.0), screen());
        assert_eq!(pos.y, 700.0 - 200.0 - 20.0);
    }

    #[test]
    fn popover_clamps_to_the_top_left_margin() {
        let pos = clamp_popover_pos((-50.0, -10.0), screen());
        assert_eq!(pos, egui::Pos2::new(20.0, 20.0));
    }

    #[test]
    fn detail_text_unquotes_strings() {
        assert_eq!(
            detail_text(&serde_json::json!("Asset 1")),
            "Asset 1"
        );
        assert_eq!(detail_text(&serde_json::json!(3)), "3");
    }
}
