//! Custom node rendering: a disc colored by severity, the label beside
//! it, an optional IP line underneath and a small red badge counter.

use asset_graph::{GraphNode, Status};
use eframe::egui::{
    self, Color32, FontFamily, FontId, Pos2, Shape, Stroke, Vec2,
    epaint::{CircleShape, TextShape},
};
use egui_graphs::{DisplayNode, DrawContext, NodeProps};
use petgraph::{EdgeType, stable_graph::IndexType};
use serde::{Deserialize, Serialize};

const NODE_RADIUS: f32 = 14.0;
const LABEL_GAP: f32 = 6.0;
const LABEL_FONT: f32 = 13.0;
const IP_FONT: f32 = 10.0;
const BADGE_RADIUS: f32 = 6.0;
const BADGE_FONT: f32 = 9.0;

const BADGE_FILL: Color32 = Color32::from_rgb(220, 38, 38);

/// Severity palette from the dashboard design.
pub fn status_color(status: Option<Status>) -> Color32 {
    match status {
        Some(Status::Critical) => Color32::from_rgb(0xef, 0x44, 0x44),
        Some(Status::High) => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        Some(Status::Medium) => Color32::from_rgb(0x22, 0xc5, 0x5e),
        Some(Status::Low) | None => {
            Color32::from_rgb(0x0e, 0xa5, 0xe9)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusNodeShape {
    pos: Pos2,
    selected: bool,
    dragged: bool,
    hovered: bool,
    label_text: String,
    status: Option<Status>,
    badge: Option<u32>,
    ip: Option<String>,
}

impl From<NodeProps<GraphNode>> for StatusNodeShape {
    fn from(props: NodeProps<GraphNode>) -> Self {
        let data = props.payload.data.as_ref();
        Self {
            pos: props.location(),
            selected: props.selected,
            dragged: props.dragged,
            hovered: props.hovered,
            label_text: props.label.clone(),
            status: data.map(|d| d.status),
            badge: data.and_then(|d| d.badge).filter(|b| *b > 0),
            ip: data.and_then(|d| d.ip.clone()),
        }
    }
}

impl<E: Clone, Ty: EdgeType, Ix: IndexType>
    DisplayNode<GraphNode, E, Ty, Ix> for StatusNodeShape
{
    fn closest_boundary_point(&self, dir: Vec2) -> Pos2 {
        self.pos + dir.normalized() * NODE_RADIUS
    }

    fn shapes(&mut self, ctx: &DrawContext) -> Vec<Shape> {
        let mut res = Vec::with_capacity(4);
        let center = ctx.meta.canvas_to_screen_pos(self.pos);
        let radius = ctx.meta.canvas_to_screen_size(NODE_RADIUS);
        let fill = status_color(self.status);

        res.push(
            CircleShape {
                center,
                radius,
                fill,
                stroke: self.ring_stroke(),
            }
            .into(),
        );

        let label_color = ctx.ctx.style().visuals.text_color();
        let label = self.galley(
            ctx,
            self.label_text.clone(),
            LABEL_FONT,
            label_color,
        );
        let label_pos = Pos2::new(
            center.x - label.size().x / 2.0,
            center.y
                + radius
                + ctx.meta.canvas_to_screen_size(LABEL_GAP),
        );
        let label_height = label.size().y;
        res.push(
            TextShape::new(label_pos, label, label_color).into(),
        );

        if let Some(ip) = &self.ip {
            let weak = ctx.ctx.style().visuals.weak_text_color();
            let ip_galley =
                self.galley(ctx, ip.clone(), IP_FONT, weak);
            let ip_pos = Pos2::new(
                center.x - ip_galley.size().x / 2.0,
                label_pos.y + label_height + 2.0,
            );
            res.push(TextShape::new(ip_pos, ip_galley, weak).into());
        }

        if let Some(badge) = self.badge {
            let badge_center = Pos2::new(
                center.x + radius * 0.8,
                center.y - radius * 0.8,
            );
            let badge_radius =
                ctx.meta.canvas_to_screen_size(BADGE_RADIUS);
            res.push(
                CircleShape {
                    center: badge_center,
                    radius: badge_radius,
                    fill: BADGE_FILL,
                    stroke: Stroke::NONE,
                }
                .into(),
            );
            let count = self.galley(
                ctx,
                badge.to_string(),
                BADGE_FONT,
                Color32::WHITE,
            );
            let count_pos = Pos2::new(
                badge_center.x - count.size().x / 2.0,
                badge_center.y - count.size().y / 2.0,
            );
            res.push(
                TextShape::new(count_pos, count, Color32::WHITE)
                    .into(),
            );
        }

        res
    }

    fn update(&mut self, state: &NodeProps<GraphNode>) {
        self.pos = state.location();
        self.selected = state.selected;
        self.dragged = state.dragged;
        self.hovered = state.hovered;
        self.label_text = state.label.clone();
        let data = state.payload.data.as_ref();
        self.status = data.map(|d| d.status);
        self.badge = data.and_then(|d| d.badge).filter(|b| *b > 0);
        self.ip = data.and_then(|d| d.ip.clone());
    }

    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.pos).length() <= NODE_RADIUS
    }
}

impl StatusNodeShape {
    fn ring_stroke(&self) -> Stroke {
        if self.selected || self.dragged {
            Stroke::new(3.0, Color32::from_rgb(30, 64, 175))
        } else if self.hovered {
            Stroke::new(2.0, Color32::from_rgb(148, 163, 184))
        } else {
            Stroke::new(1.0, Color32::from_rgb(71, 85, 105))
        }
    }

    fn galley(
        &self,
        ctx: &DrawContext,
        text: String,
        size: f32,
        color: Color32,
    ) -> std::sync::Arc<egui::Galley> {
        ctx.ctx.fonts_mut(|f| {
            f.layout_no_wrap(
                text,
                FontId::new(size, FontFamily::Proportional),
                color,
            )
        })
    }
}
