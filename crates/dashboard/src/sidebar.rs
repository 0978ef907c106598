//! Icon rail on the left edge: a fixed set of navigation entries with a
//! single active item, plus the collapse toggle and live counters.

use crate::actions::Action;
use crate::state::State;
use eframe::egui;

pub const EXPANDED_WIDTH: f32 = 180.0;
pub const COLLAPSED_WIDTH: f32 = 52.0;

#[derive(Debug, Clone)]
pub struct SidebarItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

pub struct Sidebar {
    items: Vec<SidebarItem>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn new() -> Self {
        let item = |id, label, icon, active| SidebarItem {
            id,
            label,
            icon,
            active,
        };
        Self {
            items: vec![
                item("grid", "Overview", "▦", false),
                item("alert", "Alerts", "⚠", false),
                item("cube", "Assets", "◩", false),
                item("collapse", "Graph", "⬡", true),
                item("plug", "Integrations", "⌁", false),
                item("file", "Reports", "🗋", false),
                item("align", "Policies", "☰", false),
                item("settings", "Settings", "⚙", false),
                item("bell", "Notifications", "🔔", false),
            ],
        }
    }

    fn activate(&mut self, id: &str) {
        for item in &mut self.items {
            item.active = item.id == id;
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, state: &mut State) {
        let collapsed = state.store.sidebar_collapsed;
        let width = if collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        };

        egui::SidePanel::left("sidebar")
            .exact_width(width)
            .resizable(false)
            .show(ctx, |ui| {
                let toggle_icon =
                    if collapsed { "»" } else { "«" };
                if ui.button(toggle_icon).clicked() {
                    state.dispatch(Action::ToggleSidebar);
                }
                ui.separator();

                let mut clicked: Option<&'static str> = None;
                let (top, bottom) = self.items.split_at(7);
                for item in top {
                    if item_button(ui, item, collapsed) {
                        clicked = Some(item.id);
                    }
                }

                ui.with_layout(
                    egui::Layout::bottom_up(egui::Align::LEFT),
                    |ui| {
                        if !collapsed {
                            let critical = state
                                .cache
                                .critical_nodes
                                .get(&state.store)
                                .len();
                            ui.label(format!(
                                "critical: {critical}"
                            ));
                            ui.label(format!(
                                "nodes: {}",
                                state.store.node_count()
                            ));
                            ui.separator();
                        }
                        for item in bottom.iter().rev() {
                            if item_button(ui, item, collapsed) {
                                clicked = Some(item.id);
                            }
                        }
                    },
                );

                if let Some(id) = clicked {
                    self.activate(id);
                }
            });
    }
}

fn item_button(
    ui: &mut egui::Ui,
    item: &SidebarItem,
    collapsed: bool,
) -> bool {
    let text = if collapsed {
        item.icon.to_string()
    } else {
        format!("{}  {}", item.icon, item.label)
    };
    ui.selectable_label(item.active, text).clicked()
}
